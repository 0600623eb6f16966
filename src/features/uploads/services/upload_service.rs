use chrono::Utc;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::config::UploadConfig;
use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{
    is_mime_type_allowed, normalize_mime_type, ALLOWED_MIME_TYPES,
};
use crate::features::uploads::models::{IncomingFile, UploadDescriptor};
use crate::features::uploads::services::generate_storage_key;
use crate::modules::storage::ObjectStorage;

/// Validates uploaded files and forwards them to object storage
pub struct UploadService {
    storage: Arc<dyn ObjectStorage>,
    config: UploadConfig,
}

impl UploadService {
    pub fn new(storage: Arc<dyn ObjectStorage>, config: UploadConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Validate and store one file
    ///
    /// # Returns
    /// The descriptor of the stored object, including its public URL
    pub async fn accept_single(&self, file: Option<IncomingFile>) -> Result<UploadDescriptor> {
        let file = file.ok_or_else(|| AppError::MissingFile("No file uploaded".to_string()))?;
        self.validate(&file)?;
        self.store(file).await
    }

    /// Validate every file, then store them concurrently.
    ///
    /// All-or-nothing: if any write fails the whole batch is rejected. Writes
    /// that already succeeded are not rolled back.
    pub async fn accept_multiple(&self, files: Vec<IncomingFile>) -> Result<Vec<UploadDescriptor>> {
        if files.is_empty() {
            return Err(AppError::MissingFile("No files uploaded".to_string()));
        }
        if files.len() > self.config.max_files {
            return Err(AppError::TooManyFiles(format!(
                "Too many files. Maximum is {}",
                self.config.max_files
            )));
        }
        for file in &files {
            self.validate(file)?;
        }

        let total = files.len();
        let results = join_all(files.into_iter().map(|file| self.store(file))).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!(
                "{} of {} uploads failed; rejecting the whole batch",
                failed, total
            );
        }

        results.into_iter().collect()
    }

    /// Type and size checks, in that order
    pub fn validate(&self, file: &IncomingFile) -> Result<()> {
        if !is_mime_type_allowed(&file.declared_mime_type) {
            return Err(invalid_type_error(&file.declared_mime_type));
        }

        let size = file.size_bytes.max(file.bytes.len() as u64);
        if size > self.config.max_file_size as u64 {
            return Err(too_large_error(self.config.max_file_size));
        }

        Ok(())
    }

    async fn store(&self, file: IncomingFile) -> Result<UploadDescriptor> {
        let mime_type = normalize_mime_type(&file.declared_mime_type);
        let key = generate_storage_key(
            &self.config.key_prefix,
            &file.original_name,
            &mime_type,
            Utc::now().timestamp_millis(),
        );
        let size_bytes = file.bytes.len() as u64;

        let stored = self
            .storage
            .put(&key, file.bytes, &mime_type)
            .await
            .map_err(|e| match e {
                AppError::StorageFailure(_) => e,
                other => AppError::StorageFailure(other.to_string()),
            })?;

        info!(
            "File uploaded: key={}, original_filename={}, content_type={}, size={}",
            stored.key, file.original_name, mime_type, size_bytes
        );

        Ok(UploadDescriptor {
            source_filename: file.original_name,
            mime_type,
            size_bytes,
            generated_key: stored.key,
            url: stored.url,
        })
    }
}

pub(crate) fn invalid_type_error(content_type: &str) -> AppError {
    AppError::InvalidFileType(format!(
        "Invalid file type '{}'. Allowed types: {}",
        content_type,
        ALLOWED_MIME_TYPES.join(", ")
    ))
}

pub(crate) fn too_large_error(max_file_size: usize) -> AppError {
    AppError::FileTooLarge(format!(
        "File too large. Maximum size is {} bytes ({} MB)",
        max_file_size,
        max_file_size / 1024 / 1024
    ))
}
