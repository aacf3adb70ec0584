//! Document id and field path handling.
//!
//! Document ids are stored as their UTF-8 bytes. Field paths address nested
//! fields with `.` separators, e.g. `preferences.roleSelectionPreference`.

use crate::error::{Result, StoreError};

/// Separator between segments of a field path.
pub const FIELD_PATH_SEPARATOR: char = '.';

/// Validate a document id and return its storage key.
///
/// # Errors
///
/// Returns `StoreError::InvalidKey` if the id is empty or contains `/`.
pub fn document_key(id: &str) -> Result<Vec<u8>> {
    if id.is_empty() {
        return Err(StoreError::InvalidKey("empty document id".to_string()));
    }
    if id.contains('/') {
        return Err(StoreError::InvalidKey(format!(
            "document id contains '/': {id}"
        )));
    }
    Ok(id.as_bytes().to_vec())
}

/// Split a field path into its segments.
///
/// # Errors
///
/// Returns `StoreError::InvalidKey` if the path or any segment is empty.
pub fn field_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split(FIELD_PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::InvalidKey(format!("invalid field path: {path:?}")));
    }
    Ok(segments)
}
