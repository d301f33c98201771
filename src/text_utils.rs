use chrono::NaiveDateTime;

use crate::error::ConvertError;

// The fraction is mandatory in both forms. `%f` reads the digits as nanoseconds,
// which is fine as only the time of day down to the second is used.
const PUBLISHED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%f";
// Some clients separate the fraction with a dash instead of a dot
const PUBLISHED_DASH_FORMAT: &str = "%Y-%m-%dT%H:%M:%S-%f";

pub fn parse_published(buf: &str) -> Result<NaiveDateTime, ConvertError> {
    let buf = buf.trim();
    NaiveDateTime::parse_from_str(buf, PUBLISHED_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(buf, PUBLISHED_DASH_FORMAT))
        .map_err(|_| ConvertError::MalformedTimestamp(buf.to_string()))
}

/// Slug used when the client did not send `mp-slug`: the publishing time as `HHMMSS`.
pub fn default_slug(published: &str) -> Result<String, ConvertError> {
    let date_time = parse_published(published)?;
    Ok(date_time.format("%H%M%S").to_string())
}

pub fn split_list(value: &str) -> Vec<String> {
    value.split(',')
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(|s| s.to_string())
        .collect()
}
