use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::is_mime_type_allowed;
use crate::features::uploads::models::IncomingFile;
use crate::features::uploads::services::{invalid_type_error, too_large_error};

/// Read file parts under `field` from a multipart body.
///
/// The type check runs on the part headers before any payload is read, and
/// the size ceiling is enforced chunk by chunk. A file part under any other
/// field name is refused. Text fields are ignored.
pub async fn collect_files(
    mut multipart: Multipart,
    field: &str,
    max_files: usize,
    max_file_size: usize,
) -> Result<Vec<IncomingFile>> {
    let mut files = Vec::new();

    while let Some(mut part) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = part.name().unwrap_or("").to_string();

        // An empty file input arrives with `filename=""`
        let Some(original_name) = part
            .file_name()
            .filter(|name| !name.is_empty())
            .map(|s| s.to_string())
        else {
            debug!("Ignoring non-file or empty field: {}", field_name);
            continue;
        };

        if field_name != field {
            return Err(AppError::BadRequest(format!(
                "Unexpected field '{}'",
                field_name
            )));
        }

        if files.len() >= max_files {
            return Err(AppError::TooManyFiles(format!(
                "Too many files. Maximum is {}",
                max_files
            )));
        }

        let content_type = part
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        if !is_mime_type_allowed(&content_type) {
            debug!(
                "Refusing '{}' with content type '{}'",
                original_name, content_type
            );
            return Err(invalid_type_error(&content_type));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = part.chunk().await.map_err(multipart_error)? {
            if bytes.len() + chunk.len() > max_file_size {
                return Err(too_large_error(max_file_size));
            }
            bytes.extend_from_slice(&chunk);
        }

        let size_bytes = bytes.len() as u64;
        files.push(IncomingFile {
            bytes,
            declared_mime_type: content_type,
            original_name,
            size_bytes,
        });
    }

    Ok(files)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::FileTooLarge("Request body too large".to_string());
    }

    debug!("Failed to read multipart data: {}", e);
    AppError::BadRequest(format!("Failed to read multipart data: {}", e.body_text()))
}
