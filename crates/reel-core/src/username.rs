use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A validated caller identifier.
///
/// Usernames arrive from the transport layer already authenticated; this
/// type only enforces shape: non-empty, at most 255 bytes, and free of
/// control characters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

const MAX_LENGTH: usize = 255;

impl Username {
    /// Creates a new `Username` after validating the input.
    pub fn new(name: impl Into<String>) -> std::result::Result<Self, CatalogError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// Creates a `Username` without validation.
    ///
    /// Use this only for identifiers produced by trusted internal sources
    /// (e.g. rows read back from storage that were validated on the way in).
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(name: &str) -> std::result::Result<(), CatalogError> {
        if name.is_empty() {
            return Err(CatalogError::InvalidUsername(
                "must not be empty".to_string(),
            ));
        }

        if name.len() > MAX_LENGTH {
            return Err(CatalogError::InvalidUsername(format!(
                "length must be at most {} bytes, got {}",
                MAX_LENGTH,
                name.len()
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(CatalogError::InvalidUsername(format!(
                "must not contain control characters: '{}'",
                name.escape_default()
            )));
        }

        Ok(())
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_usernames() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("bob@example.com").is_ok());
        assert!(Username::new("名前").is_ok());
        assert!(Username::new("a".repeat(255)).is_ok());
    }

    #[test]
    fn empty_username() {
        assert!(Username::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(Username::new("a".repeat(256)).is_err());
    }

    #[test]
    fn control_characters() {
        assert!(Username::new("ali\nce").is_err());
        assert!(Username::new("\0").is_err());
    }

    #[test]
    fn display() {
        let user = Username::new("alice").unwrap();
        assert_eq!(user.to_string(), "alice");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let alice = Username::new("alice").unwrap();
        let bob = Username::new("bob").unwrap();
        assert!(alice < bob);
    }
}
