use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::errors::{AppError, AppResult};

/// Turns a stored document into raw syllabus text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, path: &Path) -> AppResult<String>;
}

pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, path: &Path) -> AppResult<String> {
        let owned_path = path.to_path_buf();

        // pdf-extract is CPU bound and may panic on malformed input
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned_path))
            .await
            .map_err(|e| AppError::ExtractionFailure(format!("PDF reader aborted: {}", e)))?
            .map_err(|e| AppError::ExtractionFailure(format!("Could not read PDF: {}", e)))?;

        if text.trim().is_empty() {
            return Err(AppError::ExtractionFailure(
                "PDF contains no extractable text".to_string(),
            ));
        }

        log::info!("Extracted {} characters from {}", text.len(), path.display());
        Ok(text)
    }
}

/// Checks the filename extension, ignoring ASCII case.
pub fn is_pdf_filename(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Directory that holds uploaded documents while they are being read.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` to a uniquely named file in the store.
    ///
    /// The file lives as long as the returned guard.
    pub fn stage(&self, bytes: &[u8]) -> AppResult<StagedUpload> {
        let mut file = tempfile::Builder::new()
            .prefix("syllabus-")
            .suffix(".pdf")
            .tempfile_in(&self.dir)?;

        file.write_all(bytes)?;
        file.flush()?;

        log::debug!("Staged {} byte upload at {}", bytes.len(), file.path().display());
        Ok(StagedUpload { file })
    }
}

/// An uploaded document on disk, deleted when dropped.
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Deletes the file now, logging rather than failing if removal errors.
    pub fn discard(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            log::error!("Failed to remove staged upload {}: {}", path.display(), e);
        }
    }
}
