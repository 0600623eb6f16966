/// A file payload that passed the multipart parser
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub bytes: Vec<u8>,
    pub declared_mime_type: String,
    pub original_name: String,
    pub size_bytes: u64,
}

/// An accepted, stored upload. Immutable once the storage write succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDescriptor {
    pub source_filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub generated_key: String,
    pub url: String,
}
