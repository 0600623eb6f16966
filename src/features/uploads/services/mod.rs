mod storage_key;
mod upload_service;

pub use storage_key::generate_storage_key;
pub(crate) use upload_service::{invalid_type_error, too_large_error};
pub use upload_service::UploadService;
