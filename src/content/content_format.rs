use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// Micropub JSON, `.mp` or `.json`
    Micropub,
    /// Header block plus notedown body, `.nd`, `.notedown` or `.txt`
    Notedown,
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ContentFormat::Micropub => write!(f, "micropub"),
            ContentFormat::Notedown => write!(f, "notedown"),
        }
    }
}
