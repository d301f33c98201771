use serde::Serialize;

use crate::post::{Post, Properties, PropValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Flattened, semantic view of an h-entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub name: Option<String>,
    pub content_plain: Option<String>,
    pub summary: Option<String>,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub author: Option<Author>,
    /// Target URLs, whether sent as plain URLs or as embedded h-cites
    pub in_reply_to: Vec<String>,
    pub like_of: Vec<String>,
    pub repost_of: Vec<String>,
    pub bookmark_of: Vec<String>,
}

/// Microformats2 interpretation: post type discovery and entry flattening.
pub trait Mf2Interpreter {
    /// Raw post type name. It may be outside of what the converter supports
    /// (`event`, `person`, `rsvp`...), the caller decides.
    fn discover_post_type(&self, post: &Post) -> String;

    fn interpret_entry(&self, post: &Post) -> Option<Entry>;
}

/// Default interpreter following the W3C Post Type Discovery algorithm.
#[derive(Debug, Default, Clone, Copy)]
pub struct HEntryInterpreter;

// Response properties, the first one present decides the type
const IMPLIED_TYPES: [(&str, &str); 7] = [
    ("rsvp", "rsvp"),
    ("invitee", "invite"),
    ("repost-of", "repost"),
    ("like-of", "like"),
    ("follow-of", "follow"),
    ("in-reply-to", "reply"),
    ("photo", "photo"),
];

impl Mf2Interpreter for HEntryInterpreter {
    fn discover_post_type(&self, post: &Post) -> String {
        let props = &post.properties;

        if post.has_type("h-card") {
            let name = props.first_text("name");
            let org = props.first_text("org");
            return match (name, org) {
                (Some(name), Some(org)) if name == org => "org".to_string(),
                _ => "person".to_string(),
            };
        }

        if post.has_type("h-event") {
            return "event".to_string();
        }

        if let Some((_, implied)) = IMPLIED_TYPES.iter().find(|(prop, _)| props.has(prop)) {
            return implied.to_string();
        }

        let name = props.first_text("name").map(normalize_space);
        let content = props.first_text("content")
            .or_else(|| props.first_text("summary"))
            .map(normalize_space);

        match (name, content) {
            (Some(name), Some(content)) if !content.starts_with(&name) => "article".to_string(),
            _ => "note".to_string(),
        }
    }

    fn interpret_entry(&self, post: &Post) -> Option<Entry> {
        if !post.has_type("h-entry") && !post.has_type("h-event") {
            return None;
        }

        let props = &post.properties;
        let text = |name: &str| props.first_text(name).map(|s| s.to_string());

        Some(Entry {
            name: text("name"),
            content_plain: text("content"),
            summary: text("summary"),
            published: text("published"),
            updated: text("updated"),
            author: props.first("author").and_then(parse_author),
            in_reply_to: parse_targets(props, "in-reply-to"),
            like_of: parse_targets(props, "like-of"),
            repost_of: parse_targets(props, "repost-of"),
            bookmark_of: parse_targets(props, "bookmark-of"),
        })
    }
}

fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

fn parse_author(value: &PropValue) -> Option<Author> {
    let author = match value {
        PropValue::Embedded { properties, .. } => Author {
            name: properties.first_text("name").map(|s| s.to_string()),
            url: properties.first_text("url").map(|s| s.to_string()),
            photo: properties.first_text("photo").map(|s| s.to_string()),
        },
        other => {
            let text = other.as_text()?.trim();
            if text.is_empty() {
                return None;
            }
            if is_url(text) {
                Author { url: Some(text.to_string()), ..Author::default() }
            } else {
                Author { name: Some(text.to_string()), ..Author::default() }
            }
        }
    };
    Some(author)
}

fn parse_targets(props: &Properties, name: &str) -> Vec<String> {
    props.get(name).iter()
        .filter_map(|value| match value {
            PropValue::Embedded { properties, .. } => properties.first_text("url"),
            other => other.as_text().filter(|url| !url.is_empty()),
        })
        .map(|url| url.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::test_data::{NOTE_POST, REPLY_POST};

    use super::*;

    fn post(json: &str) -> Post {
        Post::from_json_str(json).unwrap()
    }

    #[test]
    fn test_discover_note() {
        assert_eq!(HEntryInterpreter.discover_post_type(&post(NOTE_POST)), "note");
    }

    #[test]
    fn test_discover_responses() {
        assert_eq!(HEntryInterpreter.discover_post_type(&post(REPLY_POST)), "reply");
        let like = post(r#"{"type": ["h-entry"], "properties": {"like-of": ["http://a.com"], "in-reply-to": ["http://b.com"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&like), "like");
        let photo = post(r#"{"type": ["h-entry"], "properties": {"photo": ["http://a.com/1.jpg"], "content": ["hi"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&photo), "photo");
        let rsvp = post(r#"{"type": ["h-entry"], "properties": {"rsvp": ["yes"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&rsvp), "rsvp");
        // A response property counts even when sent empty
        let empty_reply = post(r#"{"type": ["h-entry"], "properties": {"in-reply-to": [], "content": ["hi"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&empty_reply), "reply");
    }

    #[test]
    fn test_discover_article() {
        let article = post(r#"{"type": ["h-entry"], "properties": {"name": "Awesome post", "content": ["test *post*"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&article), "article");

        let implied_name = post(r#"{"type": ["h-entry"], "properties": {"name": ["hello   world"], "content": ["hello world, again"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&implied_name), "note");
    }

    #[test]
    fn test_discover_other_vocabularies() {
        let event = post(r#"{"type": ["h-event"], "properties": {"name": ["Party"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&event), "event");
        let person = post(r#"{"type": ["h-card"], "properties": {"name": ["Jane"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&person), "person");
        let org = post(r#"{"type": ["h-card"], "properties": {"name": ["ACME"], "org": ["ACME"]}}"#);
        assert_eq!(HEntryInterpreter.discover_post_type(&org), "org");
    }

    #[test]
    fn test_interpret_entry() {
        let entry = HEntryInterpreter.interpret_entry(&post(REPLY_POST)).unwrap();
        assert_eq!(entry.content_plain.as_deref(), Some("Nice write up!"));
        assert_eq!(entry.summary.as_deref(), Some("A reply"));
        assert_eq!(entry.in_reply_to, ["https://example.com/post/1"]);
        assert_eq!(entry.published.as_deref(), Some("2019-08-29T02:03:05.429827"));
        assert!(entry.like_of.is_empty());

        let author = entry.author.unwrap();
        assert_eq!(author.name.as_deref(), Some("Jane Doe"));
        assert_eq!(author.url.as_deref(), Some("https://jane.example.com"));
    }

    #[test]
    fn test_interpret_rich_content() {
        let entry = HEntryInterpreter.interpret_entry(&post(
            r#"{"type": ["h-entry"], "properties": {"content": [{"html": "<p>hi</p>"}], "author": ["https://me.com"]}}"#
        )).unwrap();
        assert_eq!(entry.content_plain, None);
        assert_eq!(entry.author, Some(Author { url: Some("https://me.com".to_string()), ..Author::default() }));
    }

    #[test]
    fn test_interpret_requires_entry() {
        assert!(HEntryInterpreter.interpret_entry(&post(r#"{"properties": {"content": ["x"]}}"#)).is_none());
        assert!(HEntryInterpreter.interpret_entry(&post(r#"{"type": ["h-card"], "properties": {}}"#)).is_none());
    }
}
