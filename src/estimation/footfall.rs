//! Visitor count estimate for the authority dashboard.

use super::jitter::{round_half_up, seeded_random};
use super::{CalendarPoint, CrowdEstimator};
use time::OffsetDateTime;

pub const AVERAGE_DWELL_MINUTES: u32 = 45;
const DAYS_PER_WEEK: f64 = 7.0;
const DAYS_PER_MONTH: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FootfallEstimate {
    /// Visitors so far today, through the end of the current hour.
    pub today_count: u64,
    pub weekly_count: u64,
    pub monthly_count: u64,
    /// Simulated day-over-day change, one decimal.
    pub change_percent: f64,
    /// Busiest hour of the base curve.
    pub peak_hour: u8,
    pub avg_dwell_minutes: u32,
}

impl CrowdEstimator {
    pub fn footfall(&self, temple_id: &str, at: OffsetDateTime) -> Option<FootfallEstimate> {
        let temple = self.catalog.temple(temple_id)?;
        let tables = &self.catalog.tables;
        let point = CalendarPoint::from(at);

        let day_multiplier = temple.day_multipliers[point.weekday];
        let month_multiplier = tables.month_multipliers[point.month];
        let visitors = f64::from(temple.average_daily_visitors);

        let elapsed: f64 = tables.hourly_pattern[..=usize::from(point.hour)]
            .iter()
            .sum();
        let proportion_of_day = elapsed / tables.hourly_total();

        let today = visitors * day_multiplier * month_multiplier * proportion_of_day;
        let weekly = visitors * DAYS_PER_WEEK * month_multiplier;
        let monthly = visitors * DAYS_PER_MONTH * month_multiplier;

        Some(FootfallEstimate {
            today_count: to_count(today),
            weekly_count: to_count(weekly),
            monthly_count: to_count(monthly),
            change_percent: change_percent(point),
            peak_hour: peak_hour(&tables.hourly_pattern),
            avg_dwell_minutes: AVERAGE_DWELL_MINUTES,
        })
    }
}

fn change_percent(point: CalendarPoint) -> f64 {
    let seed = f64::from(point.day_of_month) * 100.0 + point.month as f64;
    round_half_up((seeded_random(seed) - 0.4) * 20.0 * 10.0) / 10.0
}

/// Earliest hour holding the curve's maximum.
fn peak_hour(pattern: &[f64]) -> u8 {
    let mut best = 0;
    for (hour, value) in pattern.iter().enumerate() {
        if *value > pattern[best] {
            best = hour;
        }
    }
    best as u8
}

fn to_count(value: f64) -> u64 {
    round_half_up(value).max(0.0) as u64
}
