//! Access token storage and resolution
//!
//! Handover never runs an OAuth flow itself: the caller supplies a bearer
//! token, either per invocation or once through the system keyring.
//!
//! ## Components
//!
//! - [`KeyringTokenStorage`] - Secure token storage using the system keyring
//! - [`resolve_credentials`] - Picks the token from flag, environment or keyring

use std::fmt;

use anyhow::{Context, Result};
use handover_core::ports::Credentials;
use tracing::{debug, info};

/// Keyring service name for storing tokens
const KEYRING_SERVICE: &str = "handover";

/// Environment variable consulted when no token is passed explicitly
pub const TOKEN_ENV_VAR: &str = "HANDOVER_ACCESS_TOKEN";

/// Keyring username used when the configuration names no account
pub const DEFAULT_ACCOUNT: &str = "default";

// ============================================================================
// KeyringTokenStorage
// ============================================================================

/// Stores and retrieves credentials from the system keyring
///
/// Uses the `keyring` crate to store credentials in the OS credential
/// store (e.g., GNOME Keyring, KDE Wallet, macOS Keychain), serialized as
/// JSON under the service name "handover".
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    /// Stores credentials in the system keyring for the given account
    pub fn store(username: &str, credentials: &Credentials) -> Result<()> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, username)
            .context("Failed to create keyring entry")?;

        let json =
            serde_json::to_string(credentials).context("Failed to serialize credentials")?;

        entry
            .set_password(&json)
            .context("Failed to store credentials in keyring")?;

        debug!("Stored credentials in keyring for account: {}", username);
        Ok(())
    }

    /// Loads credentials from the system keyring for the given account
    ///
    /// # Returns
    /// `Some(Credentials)` if found, `None` if nothing is stored
    pub fn load(username: &str) -> Result<Option<Credentials>> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, username)
            .context("Failed to create keyring entry")?;

        match entry.get_password() {
            Ok(json) => {
                let credentials: Credentials = serde_json::from_str(&json)
                    .context("Failed to deserialize credentials from keyring")?;
                debug!("Loaded credentials from keyring for account: {}", username);
                Ok(Some(credentials))
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No credentials found in keyring for account: {}", username);
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to read from keyring")),
        }
    }

    /// Removes credentials from the system keyring for the given account
    ///
    /// Returns `false` when there was nothing to remove.
    pub fn clear(username: &str) -> Result<bool> {
        let entry = keyring::Entry::new(KEYRING_SERVICE, username)
            .context("Failed to create keyring entry")?;

        match entry.delete_credential() {
            Ok(()) => {
                info!("Cleared credentials from keyring for account: {}", username);
                Ok(true)
            }
            Err(keyring::Error::NoEntry) => {
                debug!("No credentials to clear for account: {}", username);
                Ok(false)
            }
            Err(e) => Err(anyhow::Error::new(e).context("Failed to delete from keyring")),
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Where a resolved token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Environment,
    Keyring,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Flag => write!(f, "--token"),
            TokenSource::Environment => write!(f, "{TOKEN_ENV_VAR}"),
            TokenSource::Keyring => write!(f, "keyring"),
        }
    }
}

/// Resolves credentials from `flag`, then [`TOKEN_ENV_VAR`], then the keyring
/// entry for `account`
pub fn resolve_credentials(flag: Option<&str>, account: &str) -> Result<(Credentials, TokenSource)> {
    let env = std::env::var(TOKEN_ENV_VAR).ok();
    resolve_with(flag, env.as_deref(), || KeyringTokenStorage::load(account))
}

fn resolve_with(
    flag: Option<&str>,
    env: Option<&str>,
    keyring: impl FnOnce() -> Result<Option<Credentials>>,
) -> Result<(Credentials, TokenSource)> {
    let present = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);

    if let Some(token) = present(flag) {
        return Ok((Credentials::new(token), TokenSource::Flag));
    }
    if let Some(token) = present(env) {
        return Ok((Credentials::new(token), TokenSource::Environment));
    }
    match keyring()? {
        Some(credentials) => Ok((credentials, TokenSource::Keyring)),
        None => anyhow::bail!(
            "No access token found. Pass --token, set {TOKEN_ENV_VAR}, or run 'handover auth store'"
        ),
    }
}
