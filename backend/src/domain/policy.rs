//! Deployment policy values fixed at startup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How the accrual engine resolves new deposits.
///
/// The two policies are mutually exclusive per deployment: under
/// `AutoApprove` every deposit is credited synchronously at submission and
/// the review endpoints have nothing to approve; under `ReviewRequired`
/// (the default) balances move only when an admin approves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AccrualPolicy {
    /// Deposits are created `pending` and credited on admin approval.
    #[default]
    ReviewRequired,
    /// Deposits are created `approved` and credited immediately.
    AutoApprove,
}

impl AccrualPolicy {
    /// Stable configuration representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReviewRequired => "review-required",
            Self::AutoApprove => "auto-approve",
        }
    }
}

impl fmt::Display for AccrualPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`AccrualPolicy`] configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("accrual policy must be review-required or auto-approve, got {value}")]
pub struct AccrualPolicyParseError {
    value: String,
}

impl FromStr for AccrualPolicy {
    type Err = AccrualPolicyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "review-required" => Ok(Self::ReviewRequired),
            "auto-approve" => Ok(Self::AutoApprove),
            _ => Err(AccrualPolicyParseError {
                value: raw.to_owned(),
            }),
        }
    }
}

/// Platform-wide conversion rates and redemption bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRates {
    /// IDR paid out per point.
    pub points_to_idr: i64,
    /// Smallest payout a request may ask for, in whole IDR.
    pub min_redeem_idr: i64,
    /// Granularity of payout amounts, in whole IDR.
    pub redeem_unit_idr: i64,
}

impl Default for PlatformRates {
    fn default() -> Self {
        Self {
            points_to_idr: 10,
            min_redeem_idr: 1000,
            redeem_unit_idr: 100,
        }
    }
}

/// Bounds applied to deposit submissions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositLimits {
    /// Largest weight a single deposit may claim, in kilograms.
    pub max_weight_kg: f64,
}

impl Default for DepositLimits {
    fn default() -> Self {
        Self {
            max_weight_kg: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn policy_round_trips_through_str() {
        for policy in [AccrualPolicy::ReviewRequired, AccrualPolicy::AutoApprove] {
            assert_eq!(policy.as_str().parse::<AccrualPolicy>(), Ok(policy));
        }
        assert!("sometimes".parse::<AccrualPolicy>().is_err());
    }

    #[rstest]
    fn defaults_match_the_platform_constants() {
        let rates = PlatformRates::default();
        assert_eq!(rates.points_to_idr, 10);
        assert_eq!(rates.min_redeem_idr, 1000);
        assert_eq!(rates.redeem_unit_idr, 100);
        assert_eq!(AccrualPolicy::default(), AccrualPolicy::ReviewRequired);
    }
}
