//! The metadata record handed to the site generator next to the rendered HTML.
//!
//! Keys use underscores (`in_reply_to`, `author_full`, `post_type`...) for both
//! Micropub and notedown sources, whatever naming the source used.

use std::collections::BTreeMap;

use serde::Serialize;
use spdlog::debug;

use crate::config::Settings;
use crate::content::parsing_utils::{normalize_key, NotedownHeaders};
use crate::error::ConvertError;
use crate::markup::{extract_hashtags, extract_links, extract_mentions};
use crate::post::entry::{Author, Entry};
use crate::post::post_type::PostType;
use crate::post::{Post, PropValue};
use crate::text_utils::{default_slug, split_list};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
    Photos(Vec<Photo>),
    Author(Author),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(MetaValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key) {
            Some(MetaValue::List(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: &str, value: MetaValue) {
        self.0.insert(key.to_string(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item=(&str, &MetaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn insert_text(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(key, MetaValue::Text(value.to_string()));
        }
    }

    fn insert_list(&mut self, key: &str, values: Vec<String>) {
        self.insert(key, MetaValue::List(values));
    }

    fn insert_if_any(&mut self, key: &str, values: Vec<String>) {
        if !values.is_empty() {
            self.insert_list(key, values);
        }
    }

    fn insert_category(&mut self, settings: &Settings, post_type: PostType) {
        if let Some(category) = settings.category_for(post_type) {
            self.insert("category", MetaValue::Text(category.to_string()));
        }
    }
}

fn to_photo(value: &PropValue) -> Option<Photo> {
    match value {
        PropValue::Structured { value, alt } => Some(Photo { value: value.clone(), alt: alt.clone() }),
        other => other.as_text().map(|value| Photo { value: value.to_string(), alt: None }),
    }
}

/// Metadata for a Micropub post, from the raw post and its interpreted entry.
pub fn normalize(settings: &Settings, entry: &Entry, post: &Post, post_type: PostType) -> Result<Metadata, ConvertError> {
    let props = &post.properties;
    let published = entry.published.as_deref();

    let slug = match props.first_text("mp-slug") {
        Some(slug) => slug.to_string(),
        None => default_slug(published.ok_or(ConvertError::MissingPublished)?)?,
    };
    let modified = entry.updated.as_deref().or(published);
    let title = entry.name.as_deref().or(entry.content_plain.as_deref());

    let mut metadata = Metadata::default();
    metadata.insert_text("slug", Some(slug.as_str()));
    metadata.insert_text("date", published);
    metadata.insert_text("modified", modified);
    metadata.insert_text("title", title);
    metadata.insert_text("summary", entry.summary.as_deref());
    metadata.insert_list("tags", props.texts("category"));
    metadata.insert_list("in_reply_to", entry.in_reply_to.clone());
    metadata.insert_list("like_of", entry.like_of.clone());
    metadata.insert_list("repost_of", entry.repost_of.clone());
    metadata.insert_list("bookmark_of", entry.bookmark_of.clone());
    metadata.insert_list("mp_syndicate_to", props.texts("mp-syndicate-to"));

    let photos = props.get("photo").iter().filter_map(to_photo).collect();
    metadata.insert("photo", MetaValue::Photos(photos));

    if let Some(ref author) = entry.author {
        metadata.insert_text("author", author.name.as_deref());
        metadata.insert("author_full", MetaValue::Author(author.clone()));
    }

    metadata.insert_text("post_type", Some(post_type.as_str()));
    metadata.insert_category(settings, post_type);

    debug!("Metadata for {} post with slug {}", post_type, slug);
    Ok(metadata)
}

/// Metadata for a notedown document. Headers pass through as text, except the
/// configured content headers and photos which always become lists.
pub fn normalize_notedown(settings: &Settings, headers: &NotedownHeaders, body: &str, post_type: PostType) -> Metadata {
    let mut metadata = Metadata::default();

    for (key, value) in headers.iter() {
        metadata.insert_text(key, Some(value));
    }

    let list_keys = settings.webmentions.content_headers.iter()
        .map(|k| normalize_key(k))
        .chain(["photo", "photos"].into_iter()
            .filter(|k| headers.get(k).is_some())
            .map(|k| k.to_string()));

    for key in list_keys {
        let values = headers.get(&key).map(split_list).unwrap_or_default();
        metadata.insert_list(&key, values);
    }

    metadata.insert_text("post_type", Some(post_type.as_str()));
    // An explicit category header wins over the configured mapping
    if !metadata.contains("category") {
        metadata.insert_category(settings, post_type);
    }

    if !body.trim().is_empty() {
        if !metadata.text("title").is_some_and(|title| !title.trim().is_empty()) {
            metadata.insert_text("title", Some(body));
        }
        metadata.insert_if_any("hashtags", extract_hashtags(body));
        metadata.insert_if_any("mentions", extract_mentions(body));
        metadata.insert_if_any("links", extract_links(body));
    }

    metadata
}
