//! Short code generation and validation utilities.
//!
//! Generated codes are 6 random ASCII alphanumeric characters. Requested
//! codes must be 1-10 ASCII alphanumeric characters.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of an auto-generated short code.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Maximum length of a caller-requested short code.
pub const MAX_REQUESTED_CODE_LENGTH: usize = 10;

/// Codes that collide with fixed routes under `/shorturl/`.
///
/// A request for one of these is treated like a request for a taken code.
pub const RESERVED_CODES: &[&str] = &["login"];

/// Compiled pattern for caller-requested codes: `^[A-Za-z0-9]{1,10}$`.
pub static REQUESTED_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[A-Za-z0-9]{{1,{MAX_REQUESTED_CODE_LENGTH}}}$")).unwrap()
});

/// Generates a random short code of [`GENERATED_CODE_LENGTH`] characters.
///
/// Draws from `[A-Za-z0-9]` using the thread-local RNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true if `code` is shadowed by a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a caller-requested short code.
///
/// # Rules
///
/// - Length: 1-10 characters
/// - Allowed characters: ASCII letters (either case) and digits
///
/// # Errors
///
/// Returns [`AppError::InvalidCodeFormat`] if the code does not match.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_requested_code("Promo2025").is_ok());
/// assert!(validate_requested_code("a*b").is_err());
/// assert!(validate_requested_code("").is_err());
/// ```
pub fn validate_requested_code(code: &str) -> Result<(), AppError> {
    if REQUESTED_CODE_REGEX.is_match(code) {
        return Ok(());
    }

    Err(AppError::invalid_code_format(
        "Invalid shortcode format",
        json!({
            "code": code,
            "reason": format!(
                "Shortcode must be 1-{MAX_REQUESTED_CODE_LENGTH} alphanumeric characters"
            ),
        }),
    ))
}
