use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for file extensions carried into storage keys
    /// Must be 1-10 lowercase ASCII alphanumerics
    /// - Valid: "jpg", "webp", "mp4"
    /// - Invalid: "", "JPG", "tar.gz", "p g", "verylongextension"
    pub static ref FILE_EXTENSION_REGEX: Regex = Regex::new(r"^[a-z0-9]{1,10}$").unwrap();
}
