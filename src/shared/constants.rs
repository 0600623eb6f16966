/// Name of the admin session cookie
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// The only value an admin session cookie can carry
pub const ADMIN_SESSION_SENTINEL: &str = "authenticated";

/// Multipart field carrying the file on the single upload endpoint
pub const SINGLE_UPLOAD_FIELD: &str = "file";

/// Multipart field carrying the files on the multiple upload endpoint
pub const MULTIPLE_UPLOAD_FIELD: &str = "files";

/// Slack added to route body limits for multipart boundaries and headers
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Length of the random alphanumeric part of a storage key
pub const STORAGE_KEY_SUFFIX_LEN: usize = 12;
