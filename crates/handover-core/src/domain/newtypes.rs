//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for identifiers and account addresses.
//! Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

// ============================================================================
// Batch identifier
// ============================================================================

/// Identifier of a single transfer batch, used to correlate log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(Uuid);

impl BatchId {
    /// Create a new random BatchId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BatchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DomainError::InvalidId(format!("Invalid BatchId: {e}")))
    }
}

// ============================================================================
// Provider item identifier
// ============================================================================

/// Provider-assigned item identifier (opaque string)
///
/// Drive IDs look like `1A2b3C4d5E6f7G8h9I0jKlMnOpQrStUvW`; shortcuts and
/// shared drives use the same alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Create a new ItemId
    ///
    /// # Errors
    /// Returns error if the ID is empty or contains characters that would
    /// need escaping inside a request path
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.is_empty() {
            return Err(DomainError::InvalidItemId(
                "Item ID cannot be empty".to_string(),
            ));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidItemId(format!(
                "Item ID contains invalid characters: {id}"
            )));
        }

        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for ItemId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

// ============================================================================
// Email type
// ============================================================================

/// Validated email address identifying a provider account
///
/// Performs basic structural validation:
/// - Contains exactly one @
/// - Has non-empty local part
/// - Has non-empty domain with at least one dot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new validated Email
    ///
    /// # Errors
    /// Returns error if the email format is invalid
    pub fn new(email: String) -> Result<Self, DomainError> {
        let email = email.trim().to_string();
        Self::validate(&email)?;
        Ok(Self(email.to_lowercase()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(email: &str) -> Result<(), DomainError> {
        if email.is_empty() {
            return Err(DomainError::InvalidEmail(
                "Email cannot be empty".to_string(),
            ));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(DomainError::InvalidEmail(format!(
                "Email must contain exactly one '@': {email}"
            )));
        };

        if domain.contains('@') {
            return Err(DomainError::InvalidEmail(format!(
                "Email must contain exactly one '@': {email}"
            )));
        }

        if local.is_empty() {
            return Err(DomainError::InvalidEmail(format!(
                "Email local part cannot be empty: {email}"
            )));
        }

        if local.len() > 64 {
            return Err(DomainError::InvalidEmail(format!(
                "Email local part too long (max 64 chars): {email}"
            )));
        }

        if !local
            .chars()
            .all(|c| c.is_alphanumeric() || ".+-_'".contains(c))
        {
            return Err(DomainError::InvalidEmail(format!(
                "Email local part contains invalid characters: {email}"
            )));
        }

        if domain.is_empty() {
            return Err(DomainError::InvalidEmail(format!(
                "Email domain cannot be empty: {email}"
            )));
        }

        if !domain.contains('.') {
            return Err(DomainError::InvalidEmail(format!(
                "Email domain must contain at least one dot: {email}"
            )));
        }

        for label in domain.split('.') {
            if label.is_empty() {
                return Err(DomainError::InvalidEmail(format!(
                    "Email domain contains empty label: {email}"
                )));
            }
            if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
                return Err(DomainError::InvalidEmail(format!(
                    "Email domain contains invalid characters: {email}"
                )));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(DomainError::InvalidEmail(format!(
                    "Email domain label cannot start or end with hyphen: {email}"
                )));
            }
        }

        Ok(())
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for Email {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

// Stored lowercase, so hashing the inner string is case-insensitive
impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
