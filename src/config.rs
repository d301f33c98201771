use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::markup::MarkupOptions;
use crate::post::post_type::PostType;

pub const DEFAULT_CONTENT_HEADERS: [&str; 4] = ["like_of", "repost_of", "in_reply_to", "bookmark_of"];

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Micropub {
    /// Post type name (`note`, `reply`...) to category
    pub category_map: BTreeMap<String, String>,
    /// Used when the post type has no entry in `category_map`. Unset by default,
    /// in which case the category is left out of the metadata.
    pub default_category: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Notedown {
    pub disable_url_autolinking: bool,
    /// e.g. `https://example.com/tags/{hashtag}`
    pub hashtag_template: Option<String>,
    /// e.g. `https://example.com/people/{mention}`
    pub mention_template: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Webmentions {
    /// Metadata fields that always end up as lists
    pub content_headers: Vec<String>,
}

impl Default for Webmentions {
    fn default() -> Self {
        Webmentions {
            content_headers: DEFAULT_CONTENT_HEADERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub micropub: Micropub,
    pub notedown: Notedown,
    pub webmentions: Webmentions,
    pub log: Option<Log>,
}

impl Settings {
    /// Mapped category first, then the configured default, else none.
    pub fn category_for(&self, post_type: PostType) -> Option<&str> {
        self.micropub.category_map.get(post_type.as_str())
            .or(self.micropub.default_category.as_ref())
            .map(|s| s.as_str())
    }

    pub fn markup_options(&self) -> MarkupOptions {
        MarkupOptions::new(
            !self.notedown.disable_url_autolinking,
            self.notedown.hashtag_template.as_deref(),
            self.notedown.mention_template.as_deref(),
        )
    }
}

fn parse_path(path: PathBuf) -> PathBuf {
    if path.starts_with("${exe_dir}") {
        let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(|p| p.to_path_buf())) else {
            return path;
        };
        let str_path = path.to_string_lossy();
        PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
    } else {
        path
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Settings> {
    match toml::from_str::<Settings>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Settings> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, Settings::default());
        assert_eq!(cfg.webmentions.content_headers, DEFAULT_CONTENT_HEADERS);
        assert_eq!(cfg.category_for(PostType::Note), None);
        assert!(cfg.markup_options().linkify);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r##"
[micropub]
category_map = { note = "notes", reply = "replies" }
default_category = "miscellanea"

[notedown]
disable_url_autolinking = true
hashtag_template = "https://example.com/tags/{hashtag}"

[webmentions]
content_headers = ["in_reply_to"]

[log]
level = "Debug"
log_to_console = false
location = "/tmp/mp2html.log"
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.category_for(PostType::Note), Some("notes"));
        assert_eq!(cfg.category_for(PostType::Reply), Some("replies"));
        assert_eq!(cfg.category_for(PostType::Article), Some("miscellanea"));
        assert_eq!(cfg.webmentions.content_headers, ["in_reply_to"]);

        let options = cfg.markup_options();
        assert!(!options.linkify);
        assert_eq!(options.hashtag_template.as_deref(), Some("https://example.com/tags/{hashtag}"));
        assert_eq!(options.mention_template, None);

        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert_eq!(log.location, Some(PathBuf::from("/tmp/mp2html.log")));
    }

    #[test]
    fn test_invalid_config() {
        let res = parse_config("[notedown]\ndisable_url_autolinking = \"maybe\"\n");
        assert_eq!(res.unwrap_err().kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_config_missing_file() {
        let res = read_config(Path::new("/this/does/not/exist.toml"));
        assert_eq!(res.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
