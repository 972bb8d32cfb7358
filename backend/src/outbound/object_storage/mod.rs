//! Cover image storage over plain HTTP object storage.
//!
//! Objects live at `{endpoint}/{bucket}/{key}` and are served publicly from
//! `{public_base_url}/{bucket}/{key}`. Keys are `{unix_millis}_{filename}`
//! with the filename reduced to a URL-safe alphabet.

mod http_store;

pub use http_store::{HttpObjectStore, ObjectStoreSettings};

const MAX_FILENAME_CHARS: usize = 128;
const FALLBACK_FILENAME: &str = "cover";

/// Reduce a client-supplied filename to `[A-Za-z0-9._-]`.
pub(crate) fn sanitise_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_CHARS)
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Object key for an upload received at `unix_millis`.
pub(crate) fn object_key(unix_millis: i64, filename: &str) -> String {
    format!("{unix_millis}_{}", sanitise_filename(filename))
}

/// Join a base URL, bucket and key without doubling slashes.
pub(crate) fn object_url(base: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        bucket.trim_matches('/'),
        key
    )
}
