//! Validation predicates shared by the editor and the field directory service

use super::aggregate::NEW_FIELD_KEY;
use once_cell::sync::Lazy;
use regex::Regex;

pub const KEY_MAX_LENGTH: usize = 64;
pub const NAME_MAX_LENGTH: usize = 128;
pub const UNIT_MAX_LENGTH: usize = 16;

static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_]+$").expect("key pattern is valid"));

/// Lowercase alphanumerics and underscores only
pub fn is_valid_key_format(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// The placeholder key of an unsaved field can never be stored
pub fn is_reserved_key(key: &str) -> bool {
    key == NEW_FIELD_KEY
}

pub fn validate_key(key: &str) -> Result<(), String> {
    if key.is_empty() {
        return Err("Key is required".to_string());
    }
    if key.len() > KEY_MAX_LENGTH {
        return Err(format!("Key must be at most {} characters", KEY_MAX_LENGTH));
    }
    if !is_valid_key_format(key) {
        return Err(
            "Key may only contain lowercase letters, digits and underscores".to_string(),
        );
    }
    if is_reserved_key(key) {
        return Err(format!("Key '{}' is reserved", NEW_FIELD_KEY));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(format!("Name must be at most {} characters", NAME_MAX_LENGTH));
    }
    Ok(())
}
