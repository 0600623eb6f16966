use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::uploads::handlers::{upload_multiple, upload_single};
use crate::features::uploads::services::UploadService;
use crate::shared::constants::MULTIPART_OVERHEAD_BYTES;

/// Create routes for the uploads feature
pub fn routes(upload_service: Arc<UploadService>) -> Router {
    let max_file_size = upload_service.config().max_file_size;
    let max_files = upload_service.config().max_files;

    Router::new()
        .route(
            "/upload/single",
            post(upload_single).layer(DefaultBodyLimit::max(
                max_file_size.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .route(
            "/upload/multiple",
            post(upload_multiple).layer(DefaultBodyLimit::max(
                max_file_size
                    .saturating_mul(max_files)
                    .saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .with_state(upload_service)
}
