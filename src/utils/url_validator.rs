//! Target URL validation.
//!
//! Aliases redirect to the exact string the caller supplied, so the URL is
//! parsed only to check it and is never rewritten.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// Rejects relative references, opaque URLs such as `mailto:` or
/// `javascript:`, and schemes other than `http`/`https`. Control characters
/// and surrounding whitespace are rejected rather than stripped, since the
/// stored string is later sent back verbatim in a `Location` header.
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] that applies.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/a?b=c").is_ok());
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not contain control characters".to_string(),
        ));
    }

    if input.trim() != input {
        return Err(UrlValidationError::InvalidFormat(
            "URL must not have leading or trailing whitespace".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}
