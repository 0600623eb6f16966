use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::admin_auth::AdminSession;
use crate::features::uploads::dtos::{
    MultipleUploadResponseDto, SingleUploadResponseDto, UploadMultipleFilesDto,
    UploadSingleFileDto, UploadedFileDto,
};
use crate::features::uploads::handlers::collect_files;
use crate::features::uploads::services::UploadService;
use crate::shared::constants::{MULTIPLE_UPLOAD_FIELD, SINGLE_UPLOAD_FIELD};
use crate::shared::types::ErrorResponse;

/// Upload a single image
///
/// Accepts multipart/form-data with one `file` part.
#[utoipa::path(
    post,
    path = "/upload/single",
    tag = "uploads",
    request_body(
        content = UploadSingleFileDto,
        content_type = "multipart/form-data",
        description = "Image to upload under the `file` field",
    ),
    responses(
        (status = 200, description = "File uploaded successfully", body = SingleUploadResponseDto),
        (status = 400, description = "No file or malformed multipart body", body = ErrorResponse),
        (status = 401, description = "Admin session required", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Invalid file type or storage failure", body = ErrorResponse)
    ),
    security(
        ("admin_session" = [])
    )
)]
pub async fn upload_single(
    _admin: AdminSession,
    State(service): State<Arc<UploadService>>,
    multipart: Multipart,
) -> Result<Json<SingleUploadResponseDto>> {
    let files = collect_files(
        multipart,
        SINGLE_UPLOAD_FIELD,
        1,
        service.config().max_file_size,
    )
    .await?;

    let descriptor = service.accept_single(files.into_iter().next()).await?;

    Ok(Json(SingleUploadResponseDto {
        success: true,
        file: descriptor.into(),
    }))
}

/// Upload several images at once
///
/// Accepts multipart/form-data with up to ten `files` parts. Either every
/// file is stored or the request fails.
#[utoipa::path(
    post,
    path = "/upload/multiple",
    tag = "uploads",
    request_body(
        content = UploadMultipleFilesDto,
        content_type = "multipart/form-data",
        description = "Images to upload under the repeated `files` field",
    ),
    responses(
        (status = 200, description = "All files uploaded successfully", body = MultipleUploadResponseDto),
        (status = 400, description = "No files, too many files, or malformed multipart body", body = ErrorResponse),
        (status = 401, description = "Admin session required", body = ErrorResponse),
        (status = 413, description = "A file is too large", body = ErrorResponse),
        (status = 500, description = "Invalid file type or storage failure", body = ErrorResponse)
    ),
    security(
        ("admin_session" = [])
    )
)]
pub async fn upload_multiple(
    _admin: AdminSession,
    State(service): State<Arc<UploadService>>,
    multipart: Multipart,
) -> Result<Json<MultipleUploadResponseDto>> {
    let config = service.config();
    let files = collect_files(
        multipart,
        MULTIPLE_UPLOAD_FIELD,
        config.max_files,
        config.max_file_size,
    )
    .await?;

    let descriptors = service.accept_multiple(files).await?;

    Ok(Json(MultipleUploadResponseDto {
        success: true,
        files: descriptors.into_iter().map(UploadedFileDto::from).collect(),
    }))
}
