//! Format-specific text extraction

use std::fs;
use std::path::Path;
use thiserror::Error;

use super::file_type::FileType;
use crate::error::{Error, Result};

/// Failure reported by a text extractor
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ExtractError(pub String);

impl From<std::io::Error> for ExtractError {
    fn from(err: std::io::Error) -> Self {
        ExtractError(err.to_string())
    }
}

/// PDF and Word text extraction
///
/// Extractors are blocking; callers run them on the blocking pool.
pub trait TextExtractor: Send + Sync {
    /// Extract text from the PDF at `path`
    fn extract_pdf(&self, path: &Path) -> std::result::Result<String, ExtractError>;

    /// Extract text from the Word document at `path`
    fn extract_word(&self, path: &Path) -> std::result::Result<String, ExtractError>;
}

/// Extraction backed by `pdf-extract` and `docx-rs`
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeExtractor;

impl TextExtractor for NativeExtractor {
    fn extract_pdf(&self, path: &Path) -> std::result::Result<String, ExtractError> {
        pdf_extract::extract_text(path).map_err(|e| ExtractError(e.to_string()))
    }

    fn extract_word(&self, path: &Path) -> std::result::Result<String, ExtractError> {
        let data = fs::read(path)?;
        let doc = docx_rs::read_docx(&data).map_err(|e| ExtractError(e.to_string()))?;

        let mut content = String::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            match child {
                                docx_rs::RunChild::Text(t) => content.push_str(&t.text),
                                docx_rs::RunChild::Tab(_) => content.push('\t'),
                                _ => {}
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        Ok(content)
    }
}

/// Map ligature glyphs and stray NULs left by PDF fonts to plain text
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
}

/// Dispatches a spooled upload to the right extractor
pub struct FileParser;

impl FileParser {
    /// Extract text from the file at `path` according to `file_type`
    pub fn extract(extractor: &dyn TextExtractor, file_type: &FileType, path: &Path) -> Result<String> {
        match file_type {
            FileType::Txt => Self::parse_text(path),
            FileType::Pdf => Self::parse_pdf(extractor, path),
            FileType::Docx | FileType::Doc => Self::parse_word(extractor, path),
            FileType::Unsupported(_) => Err(Error::UnsupportedFileType(file_type.to_string())),
        }
    }

    /// Plain text, decoded as UTF-8 and kept verbatim
    fn parse_text(path: &Path) -> Result<String> {
        let data = fs::read(path)
            .map_err(|e| Error::ingestion(format!("Failed to read text file: {}", e)))?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// PDF text, trimmed; whitespace-only output means the PDF is unreadable
    fn parse_pdf(extractor: &dyn TextExtractor, path: &Path) -> Result<String> {
        let raw = extractor
            .extract_pdf(path)
            .map_err(|e| Error::PdfParseFailure(e.to_string()))?;

        let content = cleanup_pdf_text(&raw);
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::UnreadablePdf);
        }

        Ok(content.to_string())
    }

    /// Word text, used as-is (empty output is accepted)
    fn parse_word(extractor: &dyn TextExtractor, path: &Path) -> Result<String> {
        extractor
            .extract_word(path)
            .map_err(|e| Error::ingestion(format!("Failed to read Word document: {}", e)))
    }
}
