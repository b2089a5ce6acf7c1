//! Document ingestion: uploaded file -> extracted text -> context store

mod file_type;
mod ingestor;
mod parser;

pub use file_type::FileType;
pub use ingestor::{DocumentIngestor, IngestOutcome};
pub use parser::{ExtractError, FileParser, NativeExtractor, TextExtractor};
