//! Reference catalogue: waste types and reward options.
//!
//! Catalogue entries are read-only inputs to the accrual and redemption
//! engines. Editing the catalogue never rewrites historical records: awarded
//! and reserved point figures are fixed at record creation.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors raised by catalogue value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueValidationError {
    InvalidSlug,
    EmptyName,
    NonPositiveRate,
    NegativeMinPoints,
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSlug => write!(
                f,
                "catalogue id must be 1-32 lowercase letters, digits, hyphens, or underscores"
            ),
            Self::EmptyName => write!(f, "catalogue name must not be empty"),
            Self::NonPositiveRate => write!(f, "rate must be greater than zero"),
            Self::NegativeMinPoints => write!(f, "minimum points must not be negative"),
        }
    }
}

impl std::error::Error for CatalogueValidationError {}

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_regex() -> &'static Regex {
    SLUG_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9][a-z0-9_-]{0,31}$")
            .unwrap_or_else(|error| panic!("slug regex failed to compile: {error}"))
    })
}

/// Stable catalogue identifier, e.g. `bottles` or `gopay`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogueId(String);

impl CatalogueId {
    /// Validate and construct a [`CatalogueId`].
    pub fn new(raw: impl Into<String>) -> Result<Self, CatalogueValidationError> {
        let raw = raw.into();
        if !slug_regex().is_match(&raw) {
            return Err(CatalogueValidationError::InvalidSlug);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for CatalogueId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CatalogueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CatalogueId> for String {
    fn from(value: CatalogueId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CatalogueId {
    type Error = CatalogueValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A recyclable waste category and its accrual rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasteType {
    id: CatalogueId,
    name: String,
    points_per_kg: i64,
    is_active: bool,
}

impl WasteType {
    /// Create a validated waste type.
    pub fn new(
        id: CatalogueId,
        name: impl Into<String>,
        points_per_kg: i64,
        is_active: bool,
    ) -> Result<Self, CatalogueValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogueValidationError::EmptyName);
        }
        if points_per_kg <= 0 {
            return Err(CatalogueValidationError::NonPositiveRate);
        }
        Ok(Self {
            id,
            name,
            points_per_kg,
            is_active,
        })
    }

    /// Catalogue identifier.
    pub fn id(&self) -> &CatalogueId {
        &self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Points awarded per kilogram.
    pub const fn points_per_kg(&self) -> i64 {
        self.points_per_kg
    }

    /// Whether the type currently accepts deposits.
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

/// A payout destination users can redeem points against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardOption {
    id: CatalogueId,
    name: String,
    min_points_to_redeem: i64,
    rate: i64,
    is_active: bool,
}

impl RewardOption {
    /// Create a validated reward option.
    pub fn new(
        id: CatalogueId,
        name: impl Into<String>,
        min_points_to_redeem: i64,
        rate: i64,
        is_active: bool,
    ) -> Result<Self, CatalogueValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CatalogueValidationError::EmptyName);
        }
        if min_points_to_redeem < 0 {
            return Err(CatalogueValidationError::NegativeMinPoints);
        }
        if rate <= 0 {
            return Err(CatalogueValidationError::NonPositiveRate);
        }
        Ok(Self {
            id,
            name,
            min_points_to_redeem,
            rate,
            is_active,
        })
    }

    /// Catalogue identifier.
    pub fn id(&self) -> &CatalogueId {
        &self.id
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Balance threshold a user must hold before redeeming via this option.
    pub const fn min_points_to_redeem(&self) -> i64 {
        self.min_points_to_redeem
    }

    /// Displayed conversion reference. The payout computation itself uses the
    /// platform-wide points-to-IDR rate.
    pub const fn rate(&self) -> i64 {
        self.rate
    }

    /// Whether the option currently accepts redemptions.
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}
