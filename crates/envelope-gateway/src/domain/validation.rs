//! Field validation for decrypted payloads.
//!
//! A table of field → predicates over a typed struct. Rules run per field
//! in declaration order; the first failing field's message is surfaced.

use crate::domain::contracts::EchoNameRequest;
use crate::domain::error::PipelineError;

/// Validate the decrypted demo payload.
///
/// Each string field must be non-empty and free of markup/script content.
///
/// # Errors
///
/// Returns a 400 `PipelineError` carrying the first failing field's
/// message.
pub fn validate_echo_name(request: &EchoNameRequest) -> Result<(), PipelineError> {
    let fields = [
        ("firstName", request.first_name.as_str()),
        ("lastName", request.last_name.as_str()),
    ];

    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(PipelineError::bad_request(format!(
                "{} should not be empty",
                name
            )));
        }
        if has_script_content(value) {
            return Err(PipelineError::bad_request(
                "Name must not contain HTML or JavaScript code",
            ));
        }
    }

    Ok(())
}

/// Detect embedded markup or script sequences: angle brackets, a
/// `javascript:` scheme, or an inline event handler (`onload=` etc.).
fn has_script_content(value: &str) -> bool {
    let lower = value.to_lowercase();

    if lower.contains('<') || lower.contains('>') {
        return true;
    }
    if lower.contains("javascript:") {
        return true;
    }

    for (i, _) in lower.match_indices("on") {
        let rest = &lower[i + 2..];
        let name_len = rest.chars().take_while(|c| c.is_ascii_alphabetic()).count();
        if name_len > 0 && rest[name_len..].starts_with('=') {
            return true;
        }
    }

    false
}
