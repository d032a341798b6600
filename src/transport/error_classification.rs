//! Error classification logic

/// Map an HTTP status from the Gemini API to a stable error class name.
///
/// The class names follow the usual provider error taxonomy so callers can
/// branch on them without matching raw status codes.
pub(crate) fn classify_status(status: u16) -> &'static str {
    match status {
        400 => "invalid_request",
        401 => "authentication",
        403 => "permission_denied",
        404 => "not_found",
        413 => "request_too_large",
        429 => "rate_limited",
        503 | 529 => "overloaded",
        500..=599 => "server_error",
        _ => "http_error",
    }
}

/// Pull the human readable message out of a Gemini error body.
///
/// Gemini errors look like `{"error": {"code": 403, "message": "...", "status": "PERMISSION_DENIED"}}`.
/// Falls back to the raw body, or the status class when the body is empty.
pub(crate) fn error_message(body: &str, class: &str) -> String {
    if let Ok(v) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = v.pointer("/error/message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        class.to_string()
    } else {
        trimmed.to_string()
    }
}
