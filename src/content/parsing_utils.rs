use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

/// Header block of a notedown document, keys already normalized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotedownHeaders(BTreeMap<String, String>);

impl NotedownHeaders {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    /// True when the header exists and is not blank.
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.trim().is_empty())
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(normalize_key(key), value.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item=(&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn append_line(&mut self, key: &str, line: &str) {
        if let Some(value) = self.0.get_mut(key) {
            value.push('\n');
            value.push_str(line);
        }
    }
}

/// `In-Reply-To` and `in_reply_to` are the same header.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

/// Example of document
/// title: What I learned
/// in-reply-to: https://example.com/post/1
///
/// Body text with #hashtags and @mentions
///
/// Splits the document into headers and body. The header block ends at the
/// first blank line; a document not starting with a header line is all body.
pub fn parse_notedown(text: &str) -> (NotedownHeaders, &str) {
    let mut headers = NotedownHeaders::default();
    let mut last_key: Option<String> = None;
    let mut body_start = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);

        if content.trim().is_empty() {
            if !headers.is_empty() {
                body_start += line.len();
            }
            break;
        }

        if let Some(ref key) = last_key {
            if is_continuation(content) {
                headers.append_line(key, content.trim());
                body_start += line.len();
                continue;
            }
        }

        let Some((key, value)) = extract_header(content) else {
            break;
        };
        let key = normalize_key(key);
        headers.insert(&key, value.trim());
        last_key = Some(key);
        body_start += line.len();
    }

    let body = text[body_start..].trim_end_matches(['\r', '\n']);
    (headers, body)
}

fn is_continuation(line: &str) -> bool {
    line.starts_with('\t') || line.starts_with("    ")
}

fn extract_header(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        // The colon must be followed by a blank or the end of line, so a url is never a header
        static ref HEADER_REGEX: Regex = Regex::new(
            r"^(?P<key>[A-Za-z0-9_-]+):(?:[ \t]+(?P<value>.*))?$"
        ).unwrap();
    }

    HEADER_REGEX.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str());
        let val = cap.name("value").map_or("", |val| val.as_str());
        key.map(|key| (key, val))
    })
}
