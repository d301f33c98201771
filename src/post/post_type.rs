use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;

use crate::content::parsing_utils::NotedownHeaders;
use crate::error::ConvertError;

/// The post types the converter knows how to render.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum PostType {
    Reply,
    Repost,
    Like,
    Photo,
    Article,
    Note,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Reply => "reply",
            PostType::Repost => "repost",
            PostType::Like => "like",
            PostType::Photo => "photo",
            PostType::Article => "article",
            PostType::Note => "note",
        }
    }

    /// Classifies a notedown document. First rule that matches wins.
    pub fn from_headers(headers: &NotedownHeaders, body: &str) -> PostType {
        if headers.has_value("in_reply_to") {
            PostType::Reply
        } else if headers.has_value("repost_of") {
            PostType::Repost
        } else if headers.has_value("like_of") {
            PostType::Like
        } else if headers.has_value("photos") || headers.has_value("photo") {
            PostType::Photo
        } else if !body.trim().is_empty() && headers.has_value("title") {
            PostType::Article
        } else {
            PostType::Note
        }
    }
}

impl FromStr for PostType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reply" => Ok(PostType::Reply),
            "repost" => Ok(PostType::Repost),
            "like" => Ok(PostType::Like),
            "photo" => Ok(PostType::Photo),
            "article" => Ok(PostType::Article),
            "note" => Ok(PostType::Note),
            other => Err(ConvertError::UnsupportedPostType(other.to_string())),
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::content::parsing_utils::parse_notedown;

    use super::*;

    fn classify(doc: &str) -> PostType {
        let (headers, body) = parse_notedown(doc);
        PostType::from_headers(&headers, body)
    }

    #[test]
    fn test_from_str() {
        assert_eq!("article".parse::<PostType>().unwrap(), PostType::Article);
        for unsupported in ["event", "org", "person", "rsvp", "invite", "follow", ""] {
            let res = unsupported.parse::<PostType>();
            assert!(matches!(res, Err(ConvertError::UnsupportedPostType(ref t)) if t == unsupported));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(PostType::Repost.to_string(), "repost");
    }

    #[test]
    fn test_header_rules_order() {
        assert_eq!(classify("in_reply_to: http://a.com\nlike_of: http://b.com\n\nhi"), PostType::Reply);
        assert_eq!(classify("like-of: http://b.com\nrepost-of: http://c.com\n\nhi"), PostType::Repost);
        assert_eq!(classify("like_of: http://b.com\n\n"), PostType::Like);
        assert_eq!(classify("photos: http://b.com/1.jpg\ntitle: Sunset\n\nLook"), PostType::Photo);
        assert_eq!(classify("title: Sunset\n\nLook at it"), PostType::Article);
    }

    #[test]
    fn test_header_rules_fallback() {
        assert_eq!(classify("title: Sunset\n\n"), PostType::Note);
        assert_eq!(classify("title:\n\nhello there"), PostType::Note);
        assert_eq!(classify("in_reply_to:\n\nhello"), PostType::Note);
        assert_eq!(classify("just some text"), PostType::Note);
    }
}
