mod upload;

pub use upload::{IncomingFile, UploadDescriptor};
