//! API key lookup from environment variables.
//!
//! The key is wrapped in [`SecretString`] as soon as it is read and is
//! never logged.

use secrecy::SecretString;

/// Variables checked for the Gemini API key, in priority order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Read the API key from the process environment.
pub fn resolve_api_key() -> Option<SecretString> {
    resolve_api_key_with(|key| std::env::var(key).ok())
}

/// [`resolve_api_key`] with an injectable lookup. Blank values are skipped.
pub fn resolve_api_key_with(lookup: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
    API_KEY_VARS.iter().find_map(|var| {
        let value = lookup(var)?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            tracing::debug!(source = var, "API key found");
            Some(SecretString::from(value.to_string()))
        }
    })
}
