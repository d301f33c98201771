use markdown::Options;
use spdlog::debug;

use crate::config::Settings;
use crate::error::ConvertError;
use crate::markup;
use crate::post::post_type::PostType;
use crate::post::{Post, PropValue};

pub mod content_file;
pub mod content_format;
pub mod parsing_utils;

pub trait MarkdownRenderer {
    fn render(&self, md_text: &str) -> Result<String, ConvertError>;
}

/// GitHub flavoured markdown, used for articles.
#[derive(Debug, Default, Clone, Copy)]
pub struct GfmRenderer;

impl MarkdownRenderer for GfmRenderer {
    fn render(&self, md_text: &str) -> Result<String, ConvertError> {
        match markdown::to_html_with_options(md_text, &Options::gfm()) {
            Ok(x) => Ok(x),
            Err(e) => Err(ConvertError::Markdown(e.reason)),
        }
    }
}

/// HTML for a Micropub post.
///
/// Content already sent as HTML is used verbatim. Plain text goes through markdown
/// for articles and through notedown for everything else. No content gives an empty string.
pub fn resolve_html(post: &Post, post_type: PostType, settings: &Settings, renderer: &dyn MarkdownRenderer) -> Result<String, ConvertError> {
    match post.properties.first("content") {
        Some(PropValue::Rich { html, .. }) => {
            debug!("Using HTML content as is");
            Ok(html.clone())
        }
        Some(PropValue::Text(text)) => render_text(text, post_type, settings, renderer),
        _ => Ok(String::new()),
    }
}

pub fn render_text(text: &str, post_type: PostType, settings: &Settings, renderer: &dyn MarkdownRenderer) -> Result<String, ConvertError> {
    if text.is_empty() {
        return Ok(String::new());
    }

    if post_type == PostType::Article {
        debug!("Rendering {} as markdown", post_type);
        renderer.render(text)
    } else {
        debug!("Rendering {} as notedown", post_type);
        Ok(markup::render(text, &settings.markup_options()))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_data::NOTE_POST;

    use super::*;

    struct FailingRenderer;

    impl MarkdownRenderer for FailingRenderer {
        fn render(&self, _md_text: &str) -> Result<String, ConvertError> {
            Err(ConvertError::Markdown("nope".to_string()))
        }
    }

    fn post(json: &str) -> Post {
        Post::from_json_str(json).unwrap()
    }

    #[test]
    fn test_fetches_html() {
        let post = post(r#"{"type": ["h-entry"], "properties": {"content": [{"html": "<p>hi</p>", "value": "hi #there"}]}}"#);
        let settings = Settings {
            notedown: crate::config::Notedown {
                hashtag_template: Some("/t/{hashtag}".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let html = resolve_html(&post, PostType::Note, &settings, &FailingRenderer).unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn test_note_uses_notedown() {
        let html = resolve_html(&post(NOTE_POST), PostType::Note, &Settings::default(), &FailingRenderer).unwrap();
        assert_eq!(html, "test<br/>post");
    }

    #[test]
    fn test_article_uses_markdown() {
        let post = post(r#"{"type": ["h-entry"], "properties": {"name": "Awesome post", "content": ["test *post*"]}}"#);
        let html = resolve_html(&post, PostType::Article, &Settings::default(), &GfmRenderer).unwrap();
        assert_eq!(html, "<p>test <em>post</em></p>");

        let res = resolve_html(&post, PostType::Article, &Settings::default(), &FailingRenderer);
        assert!(matches!(res, Err(ConvertError::Markdown(_))));
    }

    #[test]
    fn test_no_content() {
        let settings = Settings::default();
        for json in [
            r#"{"type": ["h-entry"], "properties": {}}"#,
            r#"{"type": ["h-entry"], "properties": {"content": []}}"#,
            r#"{"type": ["h-entry"], "properties": {"content": [""]}}"#,
            r#"{"type": ["h-entry"], "properties": {"content": [{"value": "plain"}]}}"#,
        ] {
            let html = resolve_html(&post(json), PostType::Article, &settings, &FailingRenderer).unwrap();
            assert_eq!(html, "");
        }
    }

    #[test]
    fn test_render_text_with_settings() {
        let mut settings = Settings::default();
        settings.notedown.disable_url_autolinking = true;
        let html = render_text("see http://a.com", PostType::Reply, &settings, &GfmRenderer).unwrap();
        assert_eq!(html, "see http://a.com");

        settings.notedown.disable_url_autolinking = false;
        let html = render_text("see http://a.com", PostType::Reply, &settings, &GfmRenderer).unwrap();
        assert_eq!(html, r#"see <a href="http://a.com">http://a.com</a>"#);
    }
}
