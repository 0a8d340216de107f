//! Deposit records: user-submitted waste weights that earn points.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalogue::CatalogueId;
use crate::domain::user::UserId;

/// Lifecycle state of a deposit. `Pending` is the only non-terminal state;
/// a record transitions at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Approved,
    Rejected,
}

impl DepositStatus {
    /// Stable wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether no further transition is permitted.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DepositStatus {
    type Err = DepositValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DepositValidationError::UnknownStatus),
        }
    }
}

/// Validation errors raised by [`Deposit::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositValidationError {
    NonPositiveWeight,
    NegativePoints,
    EmptyPhotoRef,
    UnknownStatus,
    PendingWithReview,
    RejectedWithoutReason,
}

impl fmt::Display for DepositValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWeight => write!(f, "weight must be greater than zero"),
            Self::NegativePoints => write!(f, "awarded points must not be negative"),
            Self::EmptyPhotoRef => write!(f, "photo reference must not be empty"),
            Self::UnknownStatus => write!(f, "status must be pending, approved, or rejected"),
            Self::PendingWithReview => {
                write!(f, "a pending deposit must not carry review fields")
            }
            Self::RejectedWithoutReason => {
                write!(f, "a rejected deposit must record a rejection reason")
            }
        }
    }
}

impl std::error::Error for DepositValidationError {}

/// Reviewer attribution stamped onto a resolved deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositReview {
    pub admin_id: UserId,
    pub notes: Option<String>,
    pub processed_at: DateTime<Utc>,
}

/// Input payload for [`Deposit::new`].
#[derive(Debug, Clone)]
pub struct DepositDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub waste_type_id: CatalogueId,
    pub weight_kg: f64,
    pub points_awarded: i64,
    pub status: DepositStatus,
    pub photo_ref: String,
    pub review: Option<DepositReview>,
    pub created_at: DateTime<Utc>,
}

/// A persisted deposit.
///
/// ## Invariants
/// - `points_awarded` is fixed at creation from the waste-type rate and the
///   weight; it never changes afterwards.
/// - A pending deposit carries no review fields; a resolved one always does,
///   and a rejected one additionally records a non-empty reason in its notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Deposit {
    id: Uuid,
    user_id: UserId,
    waste_type_id: CatalogueId,
    weight_kg: f64,
    points_awarded: i64,
    status: DepositStatus,
    photo_ref: String,
    review: Option<DepositReview>,
    created_at: DateTime<Utc>,
}

impl Deposit {
    /// Create a validated deposit.
    pub fn new(draft: DepositDraft) -> Result<Self, DepositValidationError> {
        if !(draft.weight_kg.is_finite() && draft.weight_kg > 0.0) {
            return Err(DepositValidationError::NonPositiveWeight);
        }
        if draft.points_awarded < 0 {
            return Err(DepositValidationError::NegativePoints);
        }
        if draft.photo_ref.trim().is_empty() {
            return Err(DepositValidationError::EmptyPhotoRef);
        }
        // Approved deposits may lack review fields: the auto-approve accrual
        // policy resolves them without an admin in the loop.
        match (draft.status, &draft.review) {
            (DepositStatus::Pending, Some(_)) => {
                return Err(DepositValidationError::PendingWithReview);
            }
            (DepositStatus::Rejected, review)
                if review
                    .as_ref()
                    .and_then(|r| r.notes.as_deref())
                    .is_none_or(|n| n.trim().is_empty()) =>
            {
                return Err(DepositValidationError::RejectedWithoutReason);
            }
            _ => {}
        }
        Ok(Self {
            id: draft.id,
            user_id: draft.user_id,
            waste_type_id: draft.waste_type_id,
            weight_kg: draft.weight_kg,
            points_awarded: draft.points_awarded,
            status: draft.status,
            photo_ref: draft.photo_ref,
            review: draft.review,
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

    /// Waste type the deposit was submitted against.
    pub fn waste_type_id(&self) -> &CatalogueId {
        &self.waste_type_id
    }

    /// Measured weight in kilograms.
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Points computed at creation time.
    pub const fn points_awarded(&self) -> i64 {
        self.points_awarded
    }

    /// Current lifecycle state.
    pub const fn status(&self) -> DepositStatus {
        self.status
    }

    /// Opaque photo reference; never interpreted by this core.
    pub fn photo_ref(&self) -> &str {
        &self.photo_ref
    }

    /// Reviewer attribution, present once resolved.
    pub const fn review(&self) -> Option<&DepositReview> {
        self.review.as_ref()
    }

    /// Submission timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
