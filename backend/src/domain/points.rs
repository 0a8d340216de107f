//! Point arithmetic shared by the accrual and redemption engines.
//!
//! Both computations happen exactly once, at record creation; the results are
//! persisted and never recomputed, even if the catalogue or platform rates
//! change later.

/// Points awarded for a deposit: `weight_kg * points_per_kg`, rounded
/// half-up to the nearest whole point.
///
/// Rounding is half-up by policy: 2.5 points round to 3, never to 2. For the
/// positive inputs permitted by deposit validation this matches
/// `f64::round`, but the intent is spelled out here rather than inherited
/// from float semantics.
///
/// # Examples
/// ```
/// use ecopoints_backend::domain::points_for_weight;
///
/// assert_eq!(points_for_weight(2.0, 50), 100);
/// assert_eq!(points_for_weight(0.05, 50), 3); // 2.5 rounds up
/// ```
#[must_use]
pub fn points_for_weight(weight_kg: f64, points_per_kg: i64) -> i64 {
    let raw = weight_kg * points_per_kg as f64;
    (raw + 0.5).floor() as i64
}

/// Points reserved for a payout: `idr_amount / points_to_idr`, rounded up so
/// the platform never pays out more IDR than the reserved points cover.
///
/// # Examples
/// ```
/// use ecopoints_backend::domain::points_for_payout;
///
/// assert_eq!(points_for_payout(1000, 10), 100);
/// assert_eq!(points_for_payout(1005, 10), 101);
/// ```
#[must_use]
pub fn points_for_payout(idr_amount: i64, points_to_idr: i64) -> i64 {
    (idr_amount + points_to_idr - 1) / points_to_idr
}
