//! JSON parser for the grades payload.

use anyhow::Result;

use crate::models::GradesResponse;

/// Decodes a `{ "items": [...] }` document from raw bytes.
///
/// A missing `items` key decodes to an empty collection.
///
/// # Errors
///
/// Returns an error if the bytes are not a JSON object of the expected shape.
pub fn parse_grades(bytes: &[u8]) -> Result<GradesResponse> {
    Ok(serde_json::from_slice(bytes)?)
}
