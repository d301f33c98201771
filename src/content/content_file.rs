use std::fs;
use std::path::{Path, PathBuf};

use crate::content::content_format::ContentFormat;
use crate::error::ConvertError;

pub struct ContentFile {
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(file_path: &Path) -> Result<ContentFile, ConvertError> {
        let format = match Self::guess_type(file_path) {
            None => return Err(ConvertError::UnknownFormat(file_path.to_path_buf())),
            Some(format) => format,
        };

        let raw_content = fs::read_to_string(file_path)?;

        Ok(ContentFile {
            file_path: file_path.to_path_buf(),
            format,
            raw_content,
        })
    }

    pub fn guess_type(file_name: &Path) -> Option<ContentFormat> {
        let ext = file_name.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "mp" | "json" => Some(ContentFormat::Micropub),
            "nd" | "notedown" | "txt" => Some(ContentFormat::Notedown),
            _ => None,
        }
    }
}
