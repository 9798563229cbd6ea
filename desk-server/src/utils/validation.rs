//! Input validation helpers
//!
//! Text length limits for front desk payloads. Values are trimmed; blank
//! optional values become `None`.

use crate::visits::{DeskError, DeskResult};

/// Client names, development names
pub const MAX_NAME_LEN: usize = 200;

/// Short identifiers: client document (CPF / RG), broker id
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Validate a required string: non-blank and within `max_len` characters.
///
/// Returns the trimmed value.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> DeskResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DeskError::Validation(format!("{field} must not be empty")));
    }
    check_len(value, field, max_len)?;
    Ok(value.to_string())
}

/// Validate an optional string, if present, against the length limit.
///
/// Returns the trimmed value, `None` when absent or blank.
pub fn validate_optional_text(
    value: Option<String>,
    field: &str,
    max_len: usize,
) -> DeskResult<Option<String>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    check_len(value, field, max_len)?;
    Ok(Some(value.to_string()))
}

fn check_len(value: &str, field: &str, max_len: usize) -> DeskResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(DeskError::Validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}
