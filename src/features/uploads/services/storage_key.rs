use rand::{distr::Alphanumeric, Rng};

use crate::features::uploads::dtos::get_extension_from_content_type;
use crate::shared::constants::STORAGE_KEY_SUFFIX_LEN;
use crate::shared::validation::FILE_EXTENSION_REGEX;

/// Build `{prefix}/{epoch_millis}-{random}.{ext}`.
///
/// The random alphanumeric suffix keeps keys distinct when several uploads
/// land in the same millisecond.
pub fn generate_storage_key(
    prefix: &str,
    original_name: &str,
    mime_type: &str,
    epoch_millis: i64,
) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STORAGE_KEY_SUFFIX_LEN)
        .map(char::from)
        .collect();

    format!(
        "{}/{}-{}.{}",
        prefix.trim_matches('/'),
        epoch_millis,
        suffix,
        file_extension(original_name, mime_type)
    )
}

/// Extension of the original filename, lowercased; falls back to the MIME type
pub fn file_extension(original_name: &str, mime_type: &str) -> String {
    let from_name = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| FILE_EXTENSION_REGEX.is_match(ext));

    from_name.unwrap_or_else(|| {
        get_extension_from_content_type(mime_type)
            .unwrap_or("bin")
            .to_string()
    })
}
