//! Time-based crowd estimation.
//!
//! Every reading is a pure function of the catalog, a temple id and a
//! timestamp: an hourly base curve interpolated by minute, scaled by
//! day-of-week and month multipliers, weighted per zone and perturbed by a
//! seeded jitter that holds steady for 3 minutes.

use crate::catalog::{Catalog, TempleMetadata};
use serde::Serialize;
use std::sync::Arc;
use time::OffsetDateTime;

pub mod footfall;
pub mod forecast;
pub mod jitter;
pub mod weather;

use jitter::{round_half_up, round_to_tenth, zone_jitter};

pub const MIN_DENSITY: f64 = 2.0;
pub const MAX_DENSITY: f64 = 98.0;
pub const WAIT_MINUTES_PER_DENSITY_POINT: f64 = 0.45;
pub const MIN_WAIT_MINUTES: u32 = 1;

pub const MODERATE_THRESHOLD: f64 = 35.0;
pub const HIGH_THRESHOLD: f64 = 60.0;
pub const CRITICAL_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrowdStatus {
    Low,
    Moderate,
    High,
    Critical,
}

impl CrowdStatus {
    /// Thresholds are strict: 35.0 is low, 60.0 moderate, 80.0 high.
    pub fn from_density(density: f64) -> Self {
        if density > CRITICAL_THRESHOLD {
            Self::Critical
        } else if density > HIGH_THRESHOLD {
            Self::High
        } else if density > MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCrowdState {
    pub zone_id: String,
    pub name: String,
    /// Percentage occupancy, always within [2, 98].
    pub density: f64,
    pub wait_time_minutes: u32,
    pub status: CrowdStatus,
    pub current_count: u32,
    pub max_capacity: u32,
    pub last_updated: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TempleSnapshot {
    pub temple_id: String,
    pub name: String,
    pub location: String,
    pub zones: Vec<ZoneCrowdState>,
}

/// Calendar fields the model reads, taken in the timestamp's own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarPoint {
    pub hour: u8,
    pub minute: u8,
    /// 0 = Sunday.
    pub weekday: usize,
    /// 0 = January.
    pub month: usize,
    pub day_of_month: u8,
}

impl From<OffsetDateTime> for CalendarPoint {
    fn from(at: OffsetDateTime) -> Self {
        Self {
            hour: at.hour(),
            minute: at.minute(),
            weekday: usize::from(at.weekday().number_days_from_sunday()),
            month: usize::from(u8::from(at.month()) - 1),
            day_of_month: at.day(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrowdEstimator {
    catalog: Arc<Catalog>,
}

impl CrowdEstimator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Catalog::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Zone readings in catalog order. Unknown temples yield an empty list.
    pub fn zone_states(&self, temple_id: &str, at: OffsetDateTime) -> Vec<ZoneCrowdState> {
        let Some(temple) = self.catalog.temple(temple_id) else {
            return Vec::new();
        };
        let point = CalendarPoint::from(at);
        let base = self.base_crowd_percent(temple, point);
        let tables = &self.catalog.tables;

        temple
            .zones
            .iter()
            .enumerate()
            .map(|(index, zone)| {
                let jitter = zone_jitter(point.day_of_month, point.hour, point.minute, index);
                let raw = base * tables.zone_factor(&zone.id) + jitter;
                let density = round_to_tenth(raw.clamp(MIN_DENSITY, MAX_DENSITY));

                ZoneCrowdState {
                    zone_id: zone.id.clone(),
                    name: zone.name.clone(),
                    density,
                    wait_time_minutes: wait_time_minutes(density),
                    status: CrowdStatus::from_density(density),
                    current_count: occupancy_count(density, zone.capacity),
                    max_capacity: zone.capacity,
                    last_updated: at,
                }
            })
            .collect()
    }

    pub fn zone_state(
        &self,
        temple_id: &str,
        zone_id: &str,
        at: OffsetDateTime,
    ) -> Option<ZoneCrowdState> {
        self.zone_states(temple_id, at)
            .into_iter()
            .find(|state| state.zone_id == zone_id)
    }

    pub fn temple_snapshot(&self, temple_id: &str, at: OffsetDateTime) -> Option<TempleSnapshot> {
        let temple = self.catalog.temple(temple_id)?;
        Some(TempleSnapshot {
            temple_id: temple.id.clone(),
            name: temple.name.clone(),
            location: temple.display_location(),
            zones: self.zone_states(temple_id, at),
        })
    }

    pub fn all_snapshots(&self, at: OffsetDateTime) -> Vec<TempleSnapshot> {
        self.catalog
            .temple_ids()
            .filter_map(|temple_id| self.temple_snapshot(temple_id, at))
            .collect()
    }

    /// Temple-wide crowd percentage before zone weighting, in [0, 100].
    pub fn base_crowd_percent(&self, temple: &TempleMetadata, point: CalendarPoint) -> f64 {
        let tables = &self.catalog.tables;
        let hour = usize::from(point.hour);
        let current = tables.hourly_pattern[hour];
        let next = tables.hourly_pattern[(hour + 1) % tables.hourly_pattern.len()];
        let interpolated = current + (next - current) * (f64::from(point.minute) / 60.0);

        let percent = interpolated
            * temple.day_multipliers[point.weekday]
            * tables.month_multipliers[point.month]
            * 100.0;
        percent.clamp(0.0, 100.0)
    }
}

impl Default for CrowdEstimator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

pub fn wait_time_minutes(density: f64) -> u32 {
    let minutes = (density * WAIT_MINUTES_PER_DENSITY_POINT).ceil().max(0.0) as u32;
    minutes.max(MIN_WAIT_MINUTES)
}

pub fn occupancy_count(density: f64, capacity: u32) -> u32 {
    round_half_up(density / 100.0 * f64::from(capacity)).max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn status_thresholds_are_strict() {
        assert_eq!(CrowdStatus::from_density(35.0), CrowdStatus::Low);
        assert_eq!(CrowdStatus::from_density(35.1), CrowdStatus::Moderate);
        assert_eq!(CrowdStatus::from_density(60.0), CrowdStatus::Moderate);
        assert_eq!(CrowdStatus::from_density(60.1), CrowdStatus::High);
        assert_eq!(CrowdStatus::from_density(80.0), CrowdStatus::High);
        assert_eq!(CrowdStatus::from_density(81.0), CrowdStatus::Critical);
    }

    #[test]
    fn status_never_reverses_as_density_rises() {
        let mut previous = CrowdStatus::Low;
        for tenth in 20..=980 {
            let status = CrowdStatus::from_density(f64::from(tenth) / 10.0);
            assert!(status >= previous);
            previous = status;
        }
        assert_eq!(previous, CrowdStatus::Critical);
    }

    #[test]
    fn wait_time_has_floor_of_one_minute() {
        assert_eq!(wait_time_minutes(2.0), 1);
        assert_eq!(wait_time_minutes(0.0), 1);
        assert_eq!(wait_time_minutes(50.0), 23);
        assert_eq!(wait_time_minutes(98.0), 45);
    }

    #[test]
    fn occupancy_count_scales_capacity() {
        assert_eq!(occupancy_count(50.0, 500), 250);
        assert_eq!(occupancy_count(98.0, 200), 196);
        assert_eq!(occupancy_count(2.5, 100), 3);
    }

    #[test]
    fn calendar_point_reads_local_fields() {
        let point = CalendarPoint::from(datetime!(2026-12-06 07:04 +05:30));

        assert_eq!(
            point,
            CalendarPoint {
                hour: 7,
                minute: 4,
                weekday: 0,
                month: 11,
                day_of_month: 6,
            }
        );
    }

    #[test]
    fn base_percent_interpolates_between_hours() -> Result<(), Box<dyn std::error::Error>> {
        let estimator = CrowdEstimator::with_defaults();
        let temple = estimator.catalog().temple("dwarka").ok_or("missing dwarka")?;
        // Tuesday in May: day 0.6, month 0.5
        let on_hour = CalendarPoint::from(datetime!(2026-05-12 13:00 +05:30));
        let half_past = CalendarPoint::from(datetime!(2026-05-12 13:30 +05:30));

        let at_13 = estimator.base_crowd_percent(temple, on_hour);
        let at_1330 = estimator.base_crowd_percent(temple, half_past);

        assert!((at_13 - 0.30 * 0.6 * 0.5 * 100.0).abs() < 1e-9);
        assert!((at_1330 - 0.275 * 0.6 * 0.5 * 100.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn base_percent_wraps_midnight() -> Result<(), Box<dyn std::error::Error>> {
        let estimator = CrowdEstimator::with_defaults();
        let temple = estimator.catalog().temple("ambaji").ok_or("missing ambaji")?;
        // Thursday in March: day 0.7, month 1.1; 23:30 blends 0.10 toward 0.05
        let point = CalendarPoint::from(datetime!(2026-03-12 23:30 +05:30));

        let percent = estimator.base_crowd_percent(temple, point);

        assert!((percent - 0.075 * 0.7 * 1.1 * 100.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn zone_states_follow_catalog_order() {
        let estimator = CrowdEstimator::with_defaults();

        let states = estimator.zone_states("dwarka", datetime!(2026-10-16 10:00 +05:30));

        let ids: Vec<&str> = states.iter().map(|s| s.zone_id.as_str()).collect();
        assert_eq!(ids, vec!["mainDarshan", "garbhaGriha", "pradakshina", "gomtiGhat"]);
    }

    #[test]
    fn derived_fields_are_consistent() {
        let estimator = CrowdEstimator::with_defaults();
        let at = datetime!(2026-10-16 18:20 +05:30);

        for state in estimator.zone_states("ambaji", at) {
            assert_eq!(state.wait_time_minutes, wait_time_minutes(state.density));
            assert_eq!(state.status, CrowdStatus::from_density(state.density));
            assert_eq!(
                state.current_count,
                occupancy_count(state.density, state.max_capacity)
            );
            assert_eq!(state.last_updated, at);
        }
    }

    #[test]
    fn unknown_temple_yields_nothing() {
        let estimator = CrowdEstimator::with_defaults();
        let at = datetime!(2026-10-16 12:00 +05:30);

        assert!(estimator.zone_states("nonexistent", at).is_empty());
        assert!(estimator.temple_snapshot("nonexistent", at).is_none());
        assert!(estimator.zone_state("nonexistent", "garbhaGriha", at).is_none());
    }

    #[test]
    fn snapshot_joins_location_and_district() -> Result<(), Box<dyn std::error::Error>> {
        let estimator = CrowdEstimator::with_defaults();

        let snapshot = estimator
            .temple_snapshot("pavagadh", datetime!(2026-10-16 12:00 +05:30))
            .ok_or("missing snapshot")?;

        assert_eq!(snapshot.name, "Kalika Mata Temple");
        assert_eq!(snapshot.location, "Pavagadh Hill, Champaner, Panchmahal");
        assert_eq!(snapshot.zones.len(), 4);
        Ok(())
    }

    #[test]
    fn all_snapshots_cover_every_temple() {
        let estimator = CrowdEstimator::with_defaults();

        let snapshots = estimator.all_snapshots(datetime!(2026-10-16 12:00 +05:30));

        let ids: Vec<&str> = snapshots.iter().map(|s| s.temple_id.as_str()).collect();
        assert_eq!(ids, vec!["somnath", "dwarka", "ambaji", "pavagadh"]);
    }
}
