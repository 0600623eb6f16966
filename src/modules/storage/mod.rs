//! Storage module for uploaded files
//!
//! Defines the `ObjectStorage` seam used by the upload ingress and its
//! MinIO/S3-compatible implementation.

mod minio_client;
mod object_storage;

pub use minio_client::MinIOClient;
pub use object_storage::{ObjectStorage, StoredObject};
