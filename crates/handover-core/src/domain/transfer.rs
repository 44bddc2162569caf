//! Transfer request and report types
//!
//! A [`TransferRequest`] names the roots to hand over, the receiving account
//! and the [`TransferMode`]. Processing it yields a [`TransferReport`] with
//! one outcome per attempted item.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{BatchId, Email, ItemId};

/// Failure text recorded when the provider refuses an ownership change.
pub const OWNERSHIP_UNSUPPORTED_MESSAGE: &str =
    "Ownership transfer is not allowed for this item (the target account is likely \
     outside your domain). Use Share mode instead to grant edit access.";

// ============================================================================
// TransferMode
// ============================================================================

/// What to do with every item of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferMode {
    /// Grant edit permission, keep the current owner
    #[default]
    Share,
    /// Reassign the owner attribute
    TransferOwnership,
}

impl TransferMode {
    /// Maps the boolean "share" flag used by simple callers onto a mode
    pub fn from_share_flag(share: bool) -> Self {
        if share {
            TransferMode::Share
        } else {
            TransferMode::TransferOwnership
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::Share => "share",
            TransferMode::TransferOwnership => "transfer-ownership",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "share" => Ok(TransferMode::Share),
            "transfer-ownership" | "transfer_ownership" | "ownership" | "owner" => {
                Ok(TransferMode::TransferOwnership)
            }
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}

// ============================================================================
// TransferRequest
// ============================================================================

/// Input of a batch transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Root items in caller order; duplicates are processed twice
    pub roots: Vec<ItemId>,
    /// Receiving account
    pub target: Email,
    pub mode: TransferMode,
}

impl TransferRequest {
    pub fn new(roots: Vec<ItemId>, target: Email, mode: TransferMode) -> Self {
        Self {
            roots,
            target,
            mode,
        }
    }

    /// Builds a request from raw strings, validating every identifier
    ///
    /// # Errors
    /// Returns the first invalid identifier or an invalid target address
    pub fn parse<S: AsRef<str>>(
        roots: &[S],
        target: &str,
        mode: TransferMode,
    ) -> Result<Self, DomainError> {
        let roots = roots
            .iter()
            .map(|r| r.as_ref().parse())
            .collect::<Result<Vec<ItemId>, _>>()?;
        if roots.is_empty() {
            return Err(DomainError::ValidationFailed(
                "at least one item ID is required".to_string(),
            ));
        }
        Ok(Self::new(roots, target.parse()?, mode))
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Classification of a per-item failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    WrongKind,
    UnsupportedTransfer,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AccessDenied => "access_denied",
            ErrorKind::WrongKind => "wrong_kind",
            ErrorKind::UnsupportedTransfer => "unsupported_transfer",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item the mutation was applied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSuccess {
    pub id: ItemId,
    /// Display name of the resolved file or folder
    pub name: String,
}

/// An item the mutation could not be applied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFailure {
    pub id: ItemId,
    pub kind: ErrorKind,
    /// Human-readable description
    pub error: String,
}

// ============================================================================
// TransferReport
// ============================================================================

/// Aggregate result of one batch
///
/// `total` is kept equal to `successes.len() + failures.len()` by the
/// `record_*` methods; entries appear in processing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReport {
    pub batch_id: BatchId,
    pub target: Email,
    pub mode: TransferMode,
    pub total: usize,
    pub successes: Vec<TransferSuccess>,
    pub failures: Vec<TransferFailure>,
    /// Roots whose folder expansion was abandoned
    pub warnings: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl TransferReport {
    /// Starts an empty report for the given request
    pub fn begin(request: &TransferRequest) -> Self {
        Self {
            batch_id: BatchId::new(),
            target: request.target.clone(),
            mode: request.mode,
            total: 0,
            successes: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record_success(&mut self, id: ItemId, name: impl Into<String>) {
        self.successes.push(TransferSuccess {
            id,
            name: name.into(),
        });
        self.total += 1;
    }

    pub fn record_failure(&mut self, id: ItemId, kind: ErrorKind, error: impl Into<String>) {
        self.failures.push(TransferFailure {
            id,
            kind,
            error: error.into(),
        });
        self.total += 1;
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// True when every attempted item succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Wall-clock duration in milliseconds, once finished
    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}
