use std::path::Path;

use serde::Serialize;
use spdlog::debug;

use crate::config::Settings;
use crate::content::content_file::ContentFile;
use crate::content::content_format::ContentFormat;
use crate::content::parsing_utils::parse_notedown;
use crate::content::{render_text, resolve_html, GfmRenderer, MarkdownRenderer};
use crate::error::ConvertError;
use crate::metadata::{normalize, normalize_notedown, Metadata};
use crate::post::entry::{HEntryInterpreter, Mf2Interpreter};
use crate::post::post_type::PostType;
use crate::post::Post;

/// What the site generator receives for each post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Converted {
    pub html: String,
    pub metadata: Metadata,
}

pub fn micropub2html(post: &Post, settings: &Settings) -> Result<Converted, ConvertError> {
    micropub2html_with(post, settings, &HEntryInterpreter, &GfmRenderer)
}

pub fn micropub2html_with(post: &Post,
                          settings: &Settings,
                          interpreter: &dyn Mf2Interpreter,
                          renderer: &dyn MarkdownRenderer) -> Result<Converted, ConvertError> {
    let post_type: PostType = interpreter.discover_post_type(post).parse()?;
    let entry = interpreter.interpret_entry(post).ok_or(ConvertError::UninterpretableEntry)?;
    debug!("Micropub post classified as {}", post_type);

    let html = resolve_html(post, post_type, settings, renderer)?;
    let metadata = normalize(settings, &entry, post, post_type)?;

    Ok(Converted { html, metadata })
}

pub fn notedown2html(text: &str, settings: &Settings) -> Result<Converted, ConvertError> {
    notedown2html_with(text, settings, &GfmRenderer)
}

pub fn notedown2html_with(text: &str, settings: &Settings, renderer: &dyn MarkdownRenderer) -> Result<Converted, ConvertError> {
    let (headers, body) = parse_notedown(text);
    let post_type = PostType::from_headers(&headers, body);
    debug!("Notedown document classified as {}", post_type);

    let html = if body.trim().is_empty() {
        String::new()
    } else {
        render_text(body, post_type, settings, renderer)?
    };
    let metadata = normalize_notedown(settings, &headers, body, post_type);

    Ok(Converted { html, metadata })
}

pub fn read_file(file_path: &Path, settings: &Settings) -> Result<Converted, ConvertError> {
    let file = ContentFile::from_file(file_path)?;
    debug!("Converting {} as {}", file.file_path.display(), file.format);

    match file.format {
        ContentFormat::Micropub => {
            let post = Post::from_json_str(&file.raw_content)?;
            micropub2html(&post, settings)
        }
        ContentFormat::Notedown => notedown2html(&file.raw_content, settings),
    }
}
