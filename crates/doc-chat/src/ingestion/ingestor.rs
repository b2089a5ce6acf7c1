//! Upload ingestion with scoped temporary storage

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

use super::file_type::FileType;
use super::parser::{FileParser, TextExtractor};
use crate::error::{Error, Result};
use crate::store::ContextStore;
use crate::types::Document;

/// Result of a successful ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Original filename
    pub name: String,
    /// Detected type
    pub file_type: FileType,
    /// Characters of extracted text
    pub length: usize,
}

/// Extracts text from uploads and appends it to the context store
///
/// Each upload is spooled to a temporary file in `upload_dir` for the
/// duration of extraction. The file is removed on every exit path.
pub struct DocumentIngestor {
    store: Arc<dyn ContextStore>,
    extractor: Arc<dyn TextExtractor>,
    upload_dir: PathBuf,
}

impl DocumentIngestor {
    /// Create an ingestor, creating `upload_dir` if needed
    pub fn new(
        store: Arc<dyn ContextStore>,
        extractor: Arc<dyn TextExtractor>,
        upload_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let upload_dir = upload_dir.into();
        fs::create_dir_all(&upload_dir).map_err(|e| {
            Error::Config(format!(
                "Failed to create upload directory {}: {}",
                upload_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            store,
            extractor,
            upload_dir,
        })
    }

    /// Directory holding in-flight uploads
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Extract text from an uploaded file and store it as a document
    pub async fn ingest(&self, filename: &str, data: &[u8]) -> Result<IngestOutcome> {
        let file_type = FileType::from_filename(filename);
        if !file_type.is_supported() {
            return Err(Error::UnsupportedFileType(file_type.to_string()));
        }

        let spooled = self.spool(&file_type, data)?;
        let extracted = self.extract(&file_type, spooled.path()).await;
        if let Err(e) = spooled.close() {
            tracing::warn!("Failed to remove spooled upload for '{}': {}", filename, e);
        }
        let content = extracted?;

        let document = Document::new(filename, content);
        let length = document.char_len();
        self.store.append_document(document)?;

        tracing::info!("Ingested '{}' ({}, {} chars)", filename, file_type, length);

        Ok(IngestOutcome {
            name: filename.to_string(),
            file_type,
            length,
        })
    }

    /// Write the upload to a temporary file that is deleted on drop
    fn spool(&self, file_type: &FileType, data: &[u8]) -> Result<NamedTempFile> {
        let suffix = format!(".{}", file_type.extension());
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(&self.upload_dir)
            .map_err(|e| Error::ingestion(format!("Failed to create temporary file: {}", e)))?;

        file.write_all(data)
            .and_then(|_| file.flush())
            .map_err(|e| Error::ingestion(format!("Failed to write temporary file: {}", e)))?;

        Ok(file)
    }

    /// Run extraction on the blocking pool; a panicking extractor becomes an error
    async fn extract(&self, file_type: &FileType, path: &Path) -> Result<String> {
        let extractor = Arc::clone(&self.extractor);
        let kind = file_type.clone();
        let path = path.to_path_buf();

        let joined =
            tokio::task::spawn_blocking(move || FileParser::extract(extractor.as_ref(), &kind, &path))
                .await;

        match joined {
            Ok(result) => result,
            Err(e) => {
                let reason = if e.is_panic() {
                    "extractor panicked".to_string()
                } else {
                    format!("extraction did not complete: {}", e)
                };
                tracing::error!("Extraction of {} upload failed: {}", file_type, reason);
                Err(match file_type {
                    FileType::Pdf => Error::PdfParseFailure(reason),
                    _ => Error::ingestion(reason),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::parser::ExtractError;
    use crate::store::MemoryStore;
    use parking_lot::Mutex;
    use tempfile::TempDir;

    type ExtractFn = Box<dyn Fn(&Path) -> std::result::Result<String, ExtractError> + Send + Sync>;

    /// Extractor driven by closures; records whether the spool file existed
    struct FakeExtractor {
        pdf: ExtractFn,
        word: ExtractFn,
        seen: Mutex<Vec<(PathBuf, bool)>>,
    }

    fn no_text(_: &Path) -> std::result::Result<String, ExtractError> {
        Ok(String::new())
    }

    impl FakeExtractor {
        fn pdf<F>(f: F) -> Arc<Self>
        where
            F: Fn(&Path) -> std::result::Result<String, ExtractError> + Send + Sync + 'static,
        {
            Arc::new(Self {
                pdf: Box::new(f),
                word: Box::new(no_text),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl TextExtractor for FakeExtractor {
        fn extract_pdf(&self, path: &Path) -> std::result::Result<String, ExtractError> {
            self.seen.lock().push((path.to_path_buf(), path.exists()));
            (self.pdf)(path)
        }

        fn extract_word(&self, path: &Path) -> std::result::Result<String, ExtractError> {
            self.seen.lock().push((path.to_path_buf(), path.exists()));
            (self.word)(path)
        }
    }

    fn setup(extractor: Arc<dyn TextExtractor>) -> (DocumentIngestor, Arc<MemoryStore>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(MemoryStore::new());
        let ingestor =
            DocumentIngestor::new(Arc::clone(&store) as Arc<dyn ContextStore>, extractor, dir.path())
                .unwrap();
        (ingestor, store, dir)
    }

    fn spool_dir_is_empty(dir: &TempDir) -> bool {
        fs::read_dir(dir.path()).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_text_upload_is_stored_verbatim() {
        let (ingestor, store, dir) = setup(FakeExtractor::pdf(no_text));

        let outcome = ingestor.ingest("hello.txt", b"hello world").await.unwrap();

        assert_eq!(outcome.length, 11);
        assert_eq!(outcome.file_type, FileType::Txt);
        let docs = store.documents();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "hello.txt");
        assert_eq!(docs[0].content, "hello world");
        assert!(spool_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_unsupported_extension_stores_nothing() {
        let (ingestor, store, dir) = setup(FakeExtractor::pdf(|_| Ok("text".into())));

        let err = ingestor.ingest("photo.png", b"\x89PNG").await.unwrap_err();

        assert!(matches!(err, Error::UnsupportedFileType(_)));
        assert_eq!(store.document_count(), 0);
        assert!(spool_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_stores_nothing() {
        let extractor = FakeExtractor::pdf(|_| Ok("  \n \n".into()));
        let (ingestor, store, dir) = setup(extractor.clone());

        let err = ingestor.ingest("scan.pdf", b"%PDF-1.4").await.unwrap_err();

        assert!(matches!(err, Error::UnreadablePdf));
        assert_eq!(store.document_count(), 0);
        assert!(spool_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_extractor_reads_spooled_copy() {
        let extractor = FakeExtractor::pdf(|path| {
            let bytes = fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        });
        let (ingestor, store, dir) = setup(extractor.clone());

        let outcome = ingestor.ingest("Report.PDF", b"  quarterly numbers  ").await.unwrap();

        assert_eq!(outcome.length, "quarterly numbers".len());
        assert_eq!(store.documents()[0].content, "quarterly numbers");

        let seen = extractor.seen.lock();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].1, "spooled file should exist during extraction");
        assert!(seen[0].0.starts_with(dir.path()));
        assert!(!seen[0].0.exists());
    }

    #[tokio::test]
    async fn test_pdf_extractor_error_is_parse_failure() {
        let (ingestor, store, dir) =
            setup(FakeExtractor::pdf(|_| Err(ExtractError("invalid xref table".into()))));

        let err = ingestor.ingest("broken.pdf", b"%PDF").await.unwrap_err();

        match err {
            Error::PdfParseFailure(msg) => assert!(msg.contains("invalid xref table")),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(store.document_count(), 0);
        assert!(spool_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_pdf_extractor_panic_is_parse_failure() {
        let (ingestor, store, dir) = setup(FakeExtractor::pdf(|_| panic!("font table overflow")));

        let err = ingestor.ingest("fonts.pdf", b"%PDF").await.unwrap_err();

        assert!(matches!(err, Error::PdfParseFailure(_)));
        assert_eq!(store.document_count(), 0);
        assert!(spool_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_word_document_without_text_is_accepted() {
        let (ingestor, store, dir) = setup(FakeExtractor::pdf(no_text));

        let outcome = ingestor.ingest("empty.docx", b"PK").await.unwrap();

        assert_eq!(outcome.length, 0);
        assert_eq!(store.document_count(), 1);
        assert!(spool_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_garbage_word_document_fails_with_native_extractor() {
        let (ingestor, store, dir) = setup(Arc::new(crate::ingestion::NativeExtractor));

        let err = ingestor.ingest("legacy.doc", b"\xD0\xCF\x11\xE0").await.unwrap_err();

        assert!(matches!(err, Error::GenericIngestionFailure(_)));
        assert_eq!(store.document_count(), 0);
        assert!(spool_dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn test_same_name_twice_creates_two_documents() {
        let (ingestor, store, _dir) = setup(FakeExtractor::pdf(no_text));

        ingestor.ingest("notes.txt", b"v1").await.unwrap();
        ingestor.ingest("notes.txt", b"v2").await.unwrap();

        assert_eq!(store.document_count(), 2);
    }

    #[test]
    fn test_missing_upload_dir_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let ingestor = DocumentIngestor::new(
            Arc::new(MemoryStore::new()),
            Arc::new(crate::ingestion::NativeExtractor),
            &nested,
        )
        .unwrap();
        assert!(ingestor.upload_dir().is_dir());
    }
}
