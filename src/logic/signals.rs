//! Rain signal extraction over weather snapshots.
//!
//! These functions evaluate against an explicitly supplied snapshot, so they
//! work the same on live provider data and on substituted test data. The
//! engine wraps them with its own snapshots for the common case.

use crate::models::{ForecastSnapshot, HistorySnapshot};

/// Returned by [`days_to_next_rain`] when no forecast day shows rain:
/// assume the worst case within a week.
pub const NO_RAIN_FALLBACK_DAYS: u32 = 7;

/// True iff the current conditions carry a rain field.
pub fn rains_today(forecast: &ForecastSnapshot) -> bool {
    forecast.current.as_ref().is_some_and(|c| c.has_rain())
}

/// True iff the nearest forecast day (`daily[0]`) carries a rain field.
pub fn rains_tomorrow(forecast: &ForecastSnapshot) -> bool {
    forecast.daily.first().is_some_and(|d| d.has_rain())
}

/// True iff strictly more than one hourly entry carried rain yesterday.
/// A single rainy hour is treated as noise, not as "it rained".
pub fn rained_yesterday(history: &HistorySnapshot) -> bool {
    let rainy_hours = history.hourly.iter().filter(|h| h.has_rain()).count();
    rainy_hours > 1
}

/// 1-based count of days until the first forecast day showing rain
/// (tomorrow is day 1). Falls back to [`NO_RAIN_FALLBACK_DAYS`] when no
/// day qualifies, so the result is always >= 1.
pub fn days_to_next_rain(forecast: &ForecastSnapshot) -> u32 {
    forecast
        .daily
        .iter()
        .position(|d| d.has_rain())
        .map(|idx| idx as u32 + 1)
        .unwrap_or(NO_RAIN_FALLBACK_DAYS)
}
