//! Redemption requests: conversions of points into e-wallet payouts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalogue::CatalogueId;
use crate::domain::user::UserId;

/// Lifecycle state of a redemption request. Points are reserved (deducted)
/// when the request is created; `Failed` is the only state that refunds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedemptionStatus {
    Pending,
    Completed,
    Failed,
}

impl RedemptionStatus {
    /// Stable wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Whether no further transition is permitted.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for RedemptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RedemptionStatus {
    type Err = RedemptionValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(RedemptionValidationError::UnknownStatus),
        }
    }
}

/// Validation errors raised by [`RedemptionRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionValidationError {
    NonPositiveAmount,
    NonPositivePoints,
    EmptyWalletInfo,
    UnknownStatus,
    PendingWithResolution,
    TerminalWithoutResolution,
    FailedWithoutReason,
}

impl fmt::Display for RedemptionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "payout amount must be greater than zero"),
            Self::NonPositivePoints => write!(f, "reserved points must be greater than zero"),
            Self::EmptyWalletInfo => write!(f, "wallet info must not be empty"),
            Self::UnknownStatus => write!(f, "status must be pending, completed, or failed"),
            Self::PendingWithResolution => {
                write!(f, "a pending redemption must not carry resolution fields")
            }
            Self::TerminalWithoutResolution => {
                write!(f, "a resolved redemption must record its reviewer and time")
            }
            Self::FailedWithoutReason => {
                write!(f, "a failed redemption must record a failure reason")
            }
        }
    }
}

impl std::error::Error for RedemptionValidationError {}

/// Reviewer attribution stamped onto a resolved redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionResolution {
    pub admin_id: UserId,
    pub notes: Option<String>,
    pub processed_at: DateTime<Utc>,
}

/// Input payload for [`RedemptionRequest::new`].
#[derive(Debug, Clone)]
pub struct RedemptionDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub reward_option_id: CatalogueId,
    pub idr_amount: i64,
    pub points_used: i64,
    pub status: RedemptionStatus,
    pub wallet_info: String,
    pub resolution: Option<RedemptionResolution>,
    pub created_at: DateTime<Utc>,
}

/// A persisted redemption request.
///
/// ## Invariants
/// - `points_used` is computed once at request time and never recomputed.
/// - A pending request carries no resolution fields; a resolved one always
///   does, and a failed one additionally records a non-empty reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RedemptionRequest {
    id: Uuid,
    user_id: UserId,
    reward_option_id: CatalogueId,
    idr_amount: i64,
    points_used: i64,
    status: RedemptionStatus,
    wallet_info: String,
    resolution: Option<RedemptionResolution>,
    created_at: DateTime<Utc>,
}

impl RedemptionRequest {
    /// Create a validated redemption request.
    pub fn new(draft: RedemptionDraft) -> Result<Self, RedemptionValidationError> {
        if draft.idr_amount <= 0 {
            return Err(RedemptionValidationError::NonPositiveAmount);
        }
        if draft.points_used <= 0 {
            return Err(RedemptionValidationError::NonPositivePoints);
        }
        if draft.wallet_info.trim().is_empty() {
            return Err(RedemptionValidationError::EmptyWalletInfo);
        }
        match (draft.status, &draft.resolution) {
            (RedemptionStatus::Pending, Some(_)) => {
                return Err(RedemptionValidationError::PendingWithResolution);
            }
            (RedemptionStatus::Completed | RedemptionStatus::Failed, None) => {
                return Err(RedemptionValidationError::TerminalWithoutResolution);
            }
            (RedemptionStatus::Failed, Some(resolution))
                if resolution
                    .notes
                    .as_deref()
                    .is_none_or(|n| n.trim().is_empty()) =>
            {
                return Err(RedemptionValidationError::FailedWithoutReason);
            }
            _ => {}
        }
        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            reward_option_id: draft.reward_option_id,
            idr_amount: draft.idr_amount,
            points_used: draft.points_used,
            status: draft.status,
            wallet_info: draft.wallet_info,
            resolution: draft.resolution,
            created_at: draft.created_at,
        })
    }

    /// Record identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user.
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Reward option the payout targets.
    pub fn reward_option_id(&self) -> &CatalogueId {
        &self.reward_option_id
    }

    /// Requested payout in the smallest currency unit (whole IDR).
    pub const fn idr_amount(&self) -> i64 {
        self.idr_amount
    }

    /// Points reserved when the request was created.
    pub const fn points_used(&self) -> i64 {
        self.points_used
    }

    /// Current lifecycle state.
    pub const fn status(&self) -> RedemptionStatus {
        self.status
    }

    /// Recipient wallet contact details.
    pub fn wallet_info(&self) -> &str {
        &self.wallet_info
    }

    /// Reviewer attribution, present once resolved.
    pub const fn resolution(&self) -> Option<&RedemptionResolution> {
        self.resolution.as_ref()
    }

    /// Request timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
