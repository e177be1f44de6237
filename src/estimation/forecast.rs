//! Hourly and weekly projections of the same model, without minute
//! interpolation or jitter.

use super::jitter::round_half_up;
use super::{CalendarPoint, CrowdEstimator, CrowdStatus};
use serde::Serialize;
use time::OffsetDateTime;

/// Hours dashboards show by default.
pub const VISITING_HOURS_START: u8 = 5;
pub const VISITING_HOURS_END: u8 = 21;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const AVOID_ABOVE: u32 = 70;
const MODERATE_ABOVE: u32 = 50;
const BEST_BELOW: u32 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForecastLabel {
    Low,
    Moderate,
    High,
    Peak,
}

impl From<CrowdStatus> for ForecastLabel {
    fn from(status: CrowdStatus) -> Self {
        match status {
            CrowdStatus::Low => Self::Low,
            CrowdStatus::Moderate => Self::Moderate,
            CrowdStatus::High => Self::High,
            CrowdStatus::Critical => Self::Peak,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyForecastPoint {
    pub hour: u8,
    pub crowd_percent: u32,
    pub label: ForecastLabel,
}

impl HourlyForecastPoint {
    pub fn time_label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Best,
    Good,
    Moderate,
    Avoid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyForecastDay {
    pub day_name: &'static str,
    pub avg_crowd_percent: u32,
    pub recommendation: Recommendation,
    pub reason: &'static str,
}

impl CrowdEstimator {
    /// All 24 hours for the day and month of `at`. Without a zone the
    /// forecast weight from the crowd tables applies.
    pub fn hourly_forecast(
        &self,
        temple_id: &str,
        zone_id: Option<&str>,
        at: OffsetDateTime,
    ) -> Vec<HourlyForecastPoint> {
        let Some(temple) = self.catalog.temple(temple_id) else {
            return Vec::new();
        };
        let point = CalendarPoint::from(at);
        let tables = &self.catalog.tables;
        let day_multiplier = temple.day_multipliers[point.weekday];
        let month_multiplier = tables.month_multipliers[point.month];
        let zone_factor = zone_id
            .map(|zone_id| tables.zone_factor(zone_id))
            .unwrap_or(tables.forecast_zone_factor);

        tables
            .hourly_pattern
            .iter()
            .enumerate()
            .map(|(hour, base)| {
                let crowd_percent = percent(base * day_multiplier * month_multiplier * zone_factor);
                HourlyForecastPoint {
                    hour: hour as u8,
                    crowd_percent,
                    label: CrowdStatus::from_density(f64::from(crowd_percent)).into(),
                }
            })
            .collect()
    }

    /// One entry per weekday, Sunday first, for the month of `at`.
    pub fn weekly_forecast(&self, temple_id: &str, at: OffsetDateTime) -> Vec<WeeklyForecastDay> {
        let Some(temple) = self.catalog.temple(temple_id) else {
            return Vec::new();
        };
        let point = CalendarPoint::from(at);
        let tables = &self.catalog.tables;
        let month_multiplier = tables.month_multipliers[point.month];

        DAY_NAMES
            .into_iter()
            .zip(temple.day_multipliers)
            .enumerate()
            .map(|(weekday, (day_name, day_multiplier))| {
                let avg_crowd_percent =
                    percent(tables.weekly_hourly_average * day_multiplier * month_multiplier);
                let (recommendation, reason) = recommend(weekday, avg_crowd_percent);
                WeeklyForecastDay {
                    day_name,
                    avg_crowd_percent,
                    recommendation,
                    reason,
                }
            })
            .collect()
    }
}

/// Keeps points whose hour falls in `start..=end`.
pub fn within_hours(
    points: Vec<HourlyForecastPoint>,
    start: u8,
    end: u8,
) -> Vec<HourlyForecastPoint> {
    points
        .into_iter()
        .filter(|point| (start..=end).contains(&point.hour))
        .collect()
}

pub fn recommend(weekday: usize, avg_crowd_percent: u32) -> (Recommendation, &'static str) {
    if avg_crowd_percent > AVOID_ABOVE {
        let reason = match weekday {
            0 => "Sunday rush – highest weekend crowd",
            6 => "Saturday rush",
            _ => "Peak day",
        };
        (Recommendation::Avoid, reason)
    } else if avg_crowd_percent > MODERATE_ABOVE {
        (Recommendation::Moderate, "Moderate crowd expected")
    } else if avg_crowd_percent < BEST_BELOW {
        (
            Recommendation::Best,
            "Typically lowest crowd – ideal for peaceful darshan",
        )
    } else {
        (Recommendation::Good, "Average visiting day")
    }
}

fn percent(fraction: f64) -> u32 {
    round_half_up(fraction * 100.0).clamp(0.0, 100.0) as u32
}
