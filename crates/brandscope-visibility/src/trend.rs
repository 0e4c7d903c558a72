//! Synthetic six-month volume trends.

use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;

use crate::traffic::scale_floor;
use crate::types::TrendPoint;

/// Number of monthly periods in every trend.
pub const TREND_MONTHS: u32 = 6;

/// Per-period multiplier bounds around the base volume, inclusive.
const VARIANCE: (f64, f64) = (0.7, 1.3);

/// Expand `base` into six monthly points ending with the month of `anchor`.
///
/// Points are chronological (oldest first). Each volume is
/// `floor(base × U)` with `U` drawn independently from `[0.7, 1.3]`, so the
/// series carries bounded noise only, no seasonality.
pub fn synthesize_trend<R: Rng>(base: u64, anchor: NaiveDate, rng: &mut R) -> Vec<TrendPoint> {
    let first_of_month = anchor.with_day(1).unwrap_or(anchor);

    (0..TREND_MONTHS)
        .rev()
        .map(|months_back| {
            let month = first_of_month
                .checked_sub_months(Months::new(months_back))
                .unwrap_or(first_of_month);
            let factor = rng.random_range(VARIANCE.0..=VARIANCE.1);
            TrendPoint {
                period: month.format("%b %Y").to_string(),
                volume: scale_floor(base, factor),
            }
        })
        .collect()
}
