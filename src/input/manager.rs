//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{AtsError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::text_processor::truncate_graphemes;
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size_bytes: u64,
    max_resume_chars: usize,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_cache,
            max_file_size_bytes: config.max_file_size_bytes,
            max_resume_chars: config.max_resume_chars,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract plain text from a PDF, text or markdown file.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let metadata = tokio::fs::metadata(path).await.map_err(|_| {
            AtsError::InvalidInput(format!("File does not exist: {}", path.display()))
        })?;
        if metadata.len() > self.max_file_size_bytes {
            return Err(AtsError::InvalidInput(format!(
                "File '{}' is {} bytes, larger than the {} byte limit",
                path.display(),
                metadata.len(),
                self.max_file_size_bytes
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Docx => {
                return Err(AtsError::UnsupportedFormat(format!(
                    "Word documents are not supported, export '{}' to PDF or text first",
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(AtsError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if text.trim().is_empty() {
            return Err(AtsError::InvalidInput(format!(
                "No text could be extracted from {}",
                path.display()
            )));
        }

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract resume text and cut it to the configured character budget.
    pub async fn extract_resume(&mut self, path: &Path) -> Result<String> {
        let text = self.extract_text(path).await?;
        Ok(self.apply_budget(text))
    }

    /// Cut text to the configured character budget.
    pub fn apply_budget(&self, text: String) -> String {
        let (budgeted, truncated) = truncate_graphemes(&text, self.max_resume_chars);
        if truncated {
            warn!(
                "Resume text truncated to {} characters (was {})",
                self.max_resume_chars,
                text.chars().count()
            );
            budgeted
        } else {
            text
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| AtsError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_budget() {
        let manager = InputManager::from_config(&InputConfig {
            max_resume_chars: 10,
            ..InputConfig::default()
        });

        assert_eq!(manager.apply_budget("short".to_string()), "short");
        assert_eq!(manager.apply_budget("a much longer resume".to_string()), "a much lon");
    }

    #[tokio::test]
    async fn test_file_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "x".repeat(64)).unwrap();

        let mut manager = InputManager::from_config(&InputConfig {
            max_file_size_bytes: 32,
            ..InputConfig::default()
        });

        assert!(matches!(manager.extract_text(&path).await, Err(AtsError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_docx_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let mut manager = InputManager::new();
        assert!(matches!(manager.extract_text(&path).await, Err(AtsError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "  \n ").unwrap();

        let mut manager = InputManager::new();
        assert!(matches!(manager.extract_text(&path).await, Err(AtsError::InvalidInput(_))));
    }
}
