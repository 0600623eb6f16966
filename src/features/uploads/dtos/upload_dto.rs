use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::uploads::models::UploadDescriptor;

/// Single upload request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadSingleFileDto {
    /// The image to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Multiple upload request DTO for OpenAPI documentation
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadMultipleFilesDto {
    /// Up to ten images (binary), repeated under the same field name
    pub files: Vec<String>,
}

/// Stored file as reported to the client
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadedFileDto {
    /// Public URL of the stored object
    pub url: String,
    /// Storage key, e.g. `uploads/1718000000000-a1B2c3D4e5F6.jpg`
    pub key: String,
    /// Original filename as uploaded
    pub filename: String,
    /// MIME type of the file
    pub mimetype: String,
    /// Size of the file in bytes
    pub size: u64,
}

impl From<UploadDescriptor> for UploadedFileDto {
    fn from(descriptor: UploadDescriptor) -> Self {
        Self {
            url: descriptor.url,
            key: descriptor.generated_key,
            filename: descriptor.source_filename,
            mimetype: descriptor.mime_type,
            size: descriptor.size_bytes,
        }
    }
}

/// Response DTO for `POST /upload/single`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SingleUploadResponseDto {
    pub success: bool,
    #[serde(flatten)]
    pub file: UploadedFileDto,
}

/// Response DTO for `POST /upload/multiple`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MultipleUploadResponseDto {
    pub success: bool,
    pub files: Vec<UploadedFileDto>,
}

/// Allowed MIME types for uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/avif",
];

/// Strip parameters and lowercase, e.g. `Image/PNG; q=1` -> `image/png`.
/// The non-standard `image/jpg` becomes `image/jpeg`.
pub fn normalize_mime_type(content_type: &str) -> String {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/jpg" => "image/jpeg".to_string(),
        _ => essence,
    }
}

/// Check if a MIME type is allowed
pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&normalize_mime_type(content_type).as_str())
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match normalize_mime_type(content_type).as_str() {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}
