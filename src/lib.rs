pub mod config;
pub mod logger;
pub mod error;
pub mod markup;
pub mod post;
pub mod content;
pub mod metadata;
pub mod reader;
mod text_utils;
mod test_data;

pub use error::ConvertError;
pub use reader::{micropub2html, notedown2html, read_file, Converted};
