use std::io;
use std::path::PathBuf;

/// Everything that stops a single post from being converted.
///
/// All variants are fatal for the post being processed: no partial metadata is produced.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{0} not among supported post types")]
    UnsupportedPostType(String),

    #[error("Could not interpret parsed entry")]
    UninterpretableEntry,

    #[error("Unable to parse published date {0}")]
    MalformedTimestamp(String),

    #[error("Post has no published date to derive a slug from")]
    MissingPublished,

    #[error("Invalid post JSON")]
    Json(#[from] serde_json::Error),

    #[error("Invalid post: {0}")]
    InvalidPost(String),

    #[error("Error rendering markdown: {0}")]
    Markdown(String),

    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("Could not guess the type of the file {0}")]
    UnknownFormat(PathBuf),
}
