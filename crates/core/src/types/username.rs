//! Account username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is empty or only whitespace.
    #[error("username cannot be empty")]
    Empty,
    /// A stored username carries leading or trailing whitespace.
    #[error("username has surrounding whitespace")]
    Untrimmed,
}

/// A storefront account username.
///
/// Usernames are trimmed of leading and trailing whitespace on parse and are
/// compared case-sensitively, so `"Alice"` and `"alice"` are two accounts.
///
/// ## Examples
///
/// ```
/// use tidepool_core::Username;
///
/// let name = Username::parse("  marlin ").unwrap();
/// assert_eq!(name.as_str(), "marlin");
///
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parse a `Username` from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`UsernameError::Empty`] if nothing is left after trimming.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        // Stored keys must already be in canonical (trimmed) form.
        if value.trim() != value {
            return Err(UsernameError::Untrimmed);
        }
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Username {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Username::parse("  nemo\t").unwrap().as_str(), "nemo");
        assert_eq!(Username::parse("dory").unwrap().as_str(), "dory");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse(" \n "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_case_sensitive() {
        assert_ne!(
            Username::parse("Gill").unwrap(),
            Username::parse("gill").unwrap()
        );
    }

    #[test]
    fn test_inner_whitespace_kept() {
        assert_eq!(
            Username::parse(" sea turtle ").unwrap().as_str(),
            "sea turtle"
        );
    }

    #[test]
    fn test_deserialize_rejects_untrimmed() {
        let result: Result<Username, _> = serde_json::from_str("\" crush\"");
        assert!(result.is_err());

        let name: Username = serde_json::from_str("\"crush\"").unwrap();
        assert_eq!(name.as_str(), "crush");
    }
}
