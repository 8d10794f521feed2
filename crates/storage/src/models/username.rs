use std::fmt;

use crate::error::{Result, StorageError};

/// A player identifier that is guaranteed to be non-empty.
///
/// Usernames are used verbatim as hash fields in the counter store, so no
/// trimming or case folding happens here: "Dana" and "dana" are two players.
///
/// # Examples
///
/// ```
/// use storage::models::Username;
///
/// let name = Username::new("Shachar").unwrap();
/// assert_eq!(name.as_str(), "Shachar");
///
/// assert!(Username::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(StorageError::InvalidUsername);
        }
        Ok(Self(name))
    }

    /// Builds a username from an optional request field, treating absence like emptiness.
    pub fn from_optional(name: Option<String>) -> Result<Self> {
        Self::new(name.unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
