use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Aliases that collide with route prefixes and can never be claimed.
pub const RESERVED_ALIASES: [&str; 5] = ["create", "view", "api", "dashboard", "login"];

const MAX_LENGTH: usize = 20;

/// A validated alias identifying a shortened URL.
///
/// Aliases are at most 20 characters and contain only alphanumeric
/// characters, hyphens, or underscores. Route prefixes (`create`, `view`,
/// `api`, `dashboard`, `login`) are reserved and rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alias(String);

/// Validation failures for a user-supplied alias.
///
/// The error messages are user-facing and surfaced verbatim by the
/// creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("Invalid alias - must only contain letters, numbers, dashes, and underscores")]
    InvalidCharset,
    #[error("Invalid alias - must be 20 characters or less")]
    TooLong,
    #[error("Invalid alias - cannot use reserved keyword")]
    Reserved,
}

impl Alias {
    /// Creates a new `Alias` after validating the input.
    ///
    /// Checks run in order: charset, length, reserved set. The first
    /// failure wins.
    pub fn new(alias: impl Into<String>) -> Result<Self, AliasError> {
        let alias = alias.into();
        Self::validate(&alias)?;
        Ok(Self(alias))
    }

    /// Creates an `Alias` without validation.
    ///
    /// Use this only for values read back from the store, which were
    /// validated when first persisted.
    pub fn new_unchecked(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(alias: &str) -> Result<(), AliasError> {
        // An empty alias fails the charset check, same as any other
        // string that does not match `[A-Za-z0-9_-]+`.
        if alias.is_empty()
            || !alias
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(AliasError::InvalidCharset);
        }

        if alias.len() > MAX_LENGTH {
            return Err(AliasError::TooLong);
        }

        if RESERVED_ALIASES.contains(&alias) {
            return Err(AliasError::Reserved);
        }

        Ok(())
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
