//! Notedown: the inline markup used for notes, replies and other short posts.
//!
//! Rendering is a chain of independent stages, applied in this order:
//!
//! 1. urls become anchors (when autolinking is on)
//! 2. `#hashtags` become anchors (when a hashtag template is configured)
//! 3. `@mentions` become anchors (when a mention template is configured)
//! 4. tabs become four spaces
//! 5. `\r\n` and `\n` become `<br/>`
//! 6. every whitespace preceded by whitespace becomes `&nbsp;`
//!
//! Each stage reads the previous stage output. Text is not HTML escaped.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

const HASHTAG_SLOT: &str = "{hashtag}";
const MENTION_SLOT: &str = "{mention}";
const TAB_SPACES: &str = "    ";
const LINE_BREAK: &str = "<br/>";
const NBSP: &str = "&nbsp;";

lazy_static! {
    static ref MENTION_REGEX: Regex = Regex::new(
        r"(?P<lead>^|\s)(?P<marker>[＠@](?P<name>[^\s#<>\[\]|{}]+))"
    ).unwrap();

    static ref HASHTAG_REGEX: Regex = Regex::new(
        r"(?P<lead>^|\s)(?P<marker>[＃#](?P<name>\w+))"
    ).unwrap();

    // `$-_` is a range: it covers `/`, `:`, `?`, `=` and friends
    static ref LINK_REGEX: Regex = Regex::new(
        r"(?P<url>https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+)"
    ).unwrap();
}

/// Knobs for [`render`]. `None` templates switch their stage off.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkupOptions {
    pub linkify: bool,
    pub hashtag_template: Option<String>,
    pub mention_template: Option<String>,
}

impl MarkupOptions {
    pub fn new(linkify: bool, hashtag_template: Option<&str>, mention_template: Option<&str>) -> Self {
        MarkupOptions {
            linkify,
            hashtag_template: hashtag_template.map(|s| s.to_string()),
            mention_template: mention_template.map(|s| s.to_string()),
        }
    }
}

pub fn render(text: &str, options: &MarkupOptions) -> String {
    let mut html = text.to_string();

    if options.linkify {
        html = link_urls(&html);
    }
    if let Some(template) = non_empty(&options.hashtag_template) {
        html = link_hashtags(&html, template);
    }
    if let Some(template) = non_empty(&options.mention_template) {
        html = link_mentions(&html, template);
    }

    let html = expand_tabs(&html);
    let html = convert_line_breaks(&html);
    collapse_whitespace(&html)
}

fn non_empty(template: &Option<String>) -> Option<&str> {
    template.as_deref().filter(|t| !t.is_empty())
}

pub fn link_urls(text: &str) -> String {
    LINK_REGEX.replace_all(text, r#"<a href="$url">$url</a>"#).into_owned()
}

pub fn link_hashtags(text: &str, template: &str) -> String {
    link_markers(&HASHTAG_REGEX, text, template, HASHTAG_SLOT)
}

pub fn link_mentions(text: &str, template: &str) -> String {
    link_markers(&MENTION_REGEX, text, template, MENTION_SLOT)
}

/// The visible text keeps the marker, the target only gets the bare name.
fn link_markers(regex: &Regex, text: &str, template: &str, slot: &str) -> String {
    regex.replace_all(text, |caps: &Captures| {
        let href = template.replace(slot, &caps["name"]);
        format!(r#"{}<a href="{}">{}</a>"#, &caps["lead"], href, &caps["marker"])
    }).into_owned()
}

pub fn expand_tabs(text: &str) -> Cow<'_, str> {
    if text.contains('\t') {
        Cow::Owned(text.replace('\t', TAB_SPACES))
    } else {
        Cow::Borrowed(text)
    }
}

/// `\r\n` goes first, otherwise it would turn into two breaks.
pub fn convert_line_breaks(text: &str) -> String {
    text.replace("\r\n", LINE_BREAK).replace('\n', LINE_BREAK)
}

/// Replaces any whitespace char whose previous char is also whitespace.
/// The first char of a run stays as it is.
pub fn collapse_whitespace(text: &str) -> String {
    let mut res = String::with_capacity(text.len());
    let mut prev_is_space = false;

    for c in text.chars() {
        let is_space = c.is_whitespace();
        if is_space && prev_is_space {
            res.push_str(NBSP);
        } else {
            res.push(c);
        }
        prev_is_space = is_space;
    }

    res
}

pub fn extract_hashtags(text: &str) -> Vec<String> {
    extract_names(&HASHTAG_REGEX, text)
}

pub fn extract_mentions(text: &str) -> Vec<String> {
    extract_names(&MENTION_REGEX, text)
}

pub fn extract_links(text: &str) -> Vec<String> {
    LINK_REGEX.captures_iter(text)
        .filter_map(|cap| cap.name("url").map(|m| m.as_str().to_string()))
        .collect()
}

fn extract_names(regex: &Regex, text: &str) -> Vec<String> {
    regex.captures_iter(text)
        .filter_map(|cap| cap.name("name").map(|m| m.as_str().to_string()))
        .collect()
}
