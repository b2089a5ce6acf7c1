//! File type detection by extension

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Upload formats, decided by the filename extension alone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Plain text
    Txt,
    /// PDF document
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Legacy Microsoft Word document (.doc), read with the .docx reader
    Doc,
    /// Anything else; holds the lowercased extension (empty if none)
    Unsupported(String),
}

impl FileType {
    /// Detect file type from extension, case-insensitively
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => Self::Txt,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::Doc,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// Detect file type from a filename
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }

    /// Whether the ingestor can extract text from this type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Whether this is a Word document
    pub fn is_word(&self) -> bool {
        matches!(self, Self::Docx | Self::Doc)
    }

    /// Canonical extension
    pub fn extension(&self) -> &str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Unsupported(ext) => ext,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported(ext) if ext.is_empty() => write!(f, "(no extension)"),
            other => write!(f, ".{}", other.extension()),
        }
    }
}
