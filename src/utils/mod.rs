//! Utility functions for short code and URL validation.

pub mod code_generator;
pub mod url_validator;
