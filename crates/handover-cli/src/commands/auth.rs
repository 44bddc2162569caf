//! Auth commands - Store, Clear, and Status for the Drive access token
//!
//! Provides the `handover auth` CLI subcommands which:
//! 1. `store`  - Saves a bearer token in the system keyring
//! 2. `clear`  - Removes the stored token
//! 3. `status` - Reports where the active token comes from and whether it expired
//!
//! Obtaining the token (OAuth consent, refresh) happens outside handover.

use std::io::BufRead;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use handover_core::ports::Credentials;
use handover_drive::auth::{resolve_credentials, KeyringTokenStorage};
use tracing::info;

use crate::context::CliContext;

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Store an access token in the system keyring
    Store {
        /// Access token; read from stdin when omitted
        token: Option<String>,
        /// Seconds until the token expires
        #[arg(long)]
        expires_in: Option<i64>,
    },
    /// Remove the stored token
    Clear,
    /// Show which token would be used
    Status,
}

impl AuthCommand {
    pub async fn execute(&self, ctx: &CliContext) -> Result<()> {
        match self {
            AuthCommand::Store { token, expires_in } => {
                self.execute_store(ctx, token.as_deref(), *expires_in)
            }
            AuthCommand::Clear => self.execute_clear(ctx),
            AuthCommand::Status => self.execute_status(ctx),
        }
    }

    fn execute_store(
        &self,
        ctx: &CliContext,
        token: Option<&str>,
        expires_in: Option<i64>,
    ) -> Result<()> {
        let formatter = ctx.formatter();

        let token = match token.or(ctx.token.as_deref()) {
            Some(t) => t.trim().to_string(),
            None => {
                let mut line = String::new();
                std::io::stdin()
                    .lock()
                    .read_line(&mut line)
                    .context("Failed to read token from stdin")?;
                line.trim().to_string()
            }
        };
        anyhow::ensure!(!token.is_empty(), "Access token is empty");

        let mut credentials = Credentials::new(token);
        if let Some(secs) = expires_in {
            credentials.expires_at = Some(expiry_after(Utc::now(), secs)?);
        }

        KeyringTokenStorage::store(ctx.account(), &credentials)?;
        info!(account = ctx.account(), "Stored access token");

        if ctx.format.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "account": ctx.account(),
                "expires_at": credentials.expires_at,
            }));
        } else {
            formatter.success(&format!("Stored token for account '{}'", ctx.account()));
        }
        Ok(())
    }

    fn execute_clear(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();
        let removed = KeyringTokenStorage::clear(ctx.account())?;

        if ctx.format.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "account": ctx.account(),
                "removed": removed,
            }));
        } else if removed {
            formatter.success(&format!("Removed token for account '{}'", ctx.account()));
        } else {
            formatter.success(&format!("No token stored for account '{}'", ctx.account()));
        }
        Ok(())
    }

    fn execute_status(&self, ctx: &CliContext) -> Result<()> {
        let formatter = ctx.formatter();

        match resolve_credentials(ctx.token.as_deref(), ctx.account()) {
            Ok((credentials, source)) => {
                let expired = credentials.is_expired();
                if ctx.format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "authenticated": !expired,
                        "source": source.to_string(),
                        "account": ctx.account(),
                        "expires_at": credentials.expires_at,
                        "expired": expired,
                    }));
                } else {
                    if expired {
                        formatter.warn("The access token has expired");
                    } else {
                        formatter.success("Access token available");
                    }
                    formatter.info(&format!("Source:  {source}"));
                    formatter.info(&format!("Account: {}", ctx.account()));
                    if let Some(at) = credentials.expires_at {
                        formatter.info(&format!("Expires: {}", at.to_rfc3339()));
                    }
                }
            }
            Err(e) => {
                if ctx.format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "authenticated": false,
                        "account": ctx.account(),
                        "error": e.to_string(),
                    }));
                } else {
                    formatter.error(&e.to_string());
                }
            }
        }
        Ok(())
    }
}

/// Absolute expiry for a token valid for `secs` seconds from `now`
fn expiry_after(now: DateTime<Utc>, secs: i64) -> Result<DateTime<Utc>> {
    anyhow::ensure!(secs > 0, "--expires-in must be positive");
    Duration::try_seconds(secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .with_context(|| format!("--expires-in {secs} is out of range"))
}
