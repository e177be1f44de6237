//! Temple catalog: static temple metadata plus the shared crowd tables the
//! estimator reads.
//!
//! The built-in catalog models four Gujarat temples. A JSON catalog file can
//! replace it so other sites can be modelled without code changes; loaded
//! catalogs are validated before use.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;

pub mod gujarat;

pub const HOURS_PER_DAY: usize = 24;
pub const DAYS_PER_WEEK: usize = 7;
pub const MONTHS_PER_YEAR: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTimings {
    pub open: String,
    pub close: String,
    pub aarti: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    /// Upper bound for the zone's occupancy count.
    pub capacity: u32,
}

/// Descriptive only; the estimator does not apply festival multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Festival {
    pub name: String,
    pub month: String,
    pub crowd_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempleMetadata {
    pub id: String,
    pub name: String,
    pub deity: String,
    pub location: String,
    pub district: String,
    pub state: String,
    pub coordinates: Coordinates,
    pub daily_timings: DailyTimings,
    pub average_daily_visitors: u32,
    pub peak_capacity: u32,
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub festivals: Vec<Festival>,
    /// Day-of-week crowd multipliers, index 0 = Sunday.
    pub day_multipliers: [f64; DAYS_PER_WEEK],
}

impl TempleMetadata {
    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == zone_id)
    }

    pub fn display_location(&self) -> String {
        format!("{}, {}", self.location, self.district)
    }
}

/// Shared lookup tables combined by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrowdTables {
    /// Typical fraction of peak crowd for each hour, 0..=23.
    pub hourly_pattern: [f64; HOURS_PER_DAY],
    /// Seasonal multipliers, index 0 = January.
    pub month_multipliers: [f64; MONTHS_PER_YEAR],
    /// Per zone-type weight in [0, 1], keyed by zone id.
    pub zone_factors: BTreeMap<String, f64>,
    #[serde(default = "default_zone_factor")]
    pub default_zone_factor: f64,
    /// Weight used by the hourly forecast when no zone is requested.
    #[serde(default = "default_forecast_zone_factor")]
    pub forecast_zone_factor: f64,
    /// Representative hour-independent crowd fraction for weekly forecasts.
    #[serde(default = "default_weekly_hourly_average")]
    pub weekly_hourly_average: f64,
}

fn default_zone_factor() -> f64 {
    0.5
}

fn default_forecast_zone_factor() -> f64 {
    0.7
}

fn default_weekly_hourly_average() -> f64 {
    0.55
}

impl CrowdTables {
    pub fn zone_factor(&self, zone_id: &str) -> f64 {
        self.zone_factors
            .get(zone_id)
            .copied()
            .unwrap_or(self.default_zone_factor)
    }

    pub fn hourly_total(&self) -> f64 {
        self.hourly_pattern.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub tables: CrowdTables,
    pub temples: Vec<TempleMetadata>,
}

impl Catalog {
    pub fn temple(&self, temple_id: &str) -> Option<&TempleMetadata> {
        self.temples.iter().find(|temple| temple.id == temple_id)
    }

    pub fn temple_ids(&self) -> impl Iterator<Item = &str> {
        self.temples.iter().map(|temple| temple.id.as_str())
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_tables(&self.tables)?;

        if self.temples.is_empty() {
            return Err(CatalogError::Invalid("catalog has no temples".to_string()));
        }

        let mut temple_ids = HashSet::new();
        for temple in &self.temples {
            if !temple_ids.insert(temple.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate temple id: {}",
                    temple.id
                )));
            }
            validate_temple(temple)?;
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        gujarat::catalog()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

pub fn load_catalog_from_path(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    parse_catalog(&contents)
}

pub fn parse_catalog(contents: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(contents)?;
    catalog.validate()?;
    Ok(catalog)
}

fn validate_tables(tables: &CrowdTables) -> Result<(), CatalogError> {
    for (hour, value) in tables.hourly_pattern.iter().enumerate() {
        if !is_unit_fraction(*value) {
            return Err(CatalogError::Invalid(format!(
                "hourly pattern value {value} at hour {hour} outside [0, 1]"
            )));
        }
    }
    if tables.hourly_total() <= 0.0 {
        return Err(CatalogError::Invalid(
            "hourly pattern sums to zero".to_string(),
        ));
    }

    for (month, value) in tables.month_multipliers.iter().enumerate() {
        if !is_multiplier(*value) {
            return Err(CatalogError::Invalid(format!(
                "month multiplier {value} at index {month} must be finite and non-negative"
            )));
        }
    }

    let named = tables
        .zone_factors
        .iter()
        .map(|(zone_id, value)| (zone_id.as_str(), *value));
    let fallbacks = [
        ("default_zone_factor", tables.default_zone_factor),
        ("forecast_zone_factor", tables.forecast_zone_factor),
        ("weekly_hourly_average", tables.weekly_hourly_average),
    ];
    for (name, value) in named.chain(fallbacks) {
        if !is_unit_fraction(value) {
            return Err(CatalogError::Invalid(format!(
                "zone factor {name} = {value} outside [0, 1]"
            )));
        }
    }
    Ok(())
}

fn validate_temple(temple: &TempleMetadata) -> Result<(), CatalogError> {
    if temple.zones.is_empty() {
        return Err(CatalogError::Invalid(format!(
            "temple {} has no zones",
            temple.id
        )));
    }

    let mut zone_ids = HashSet::new();
    for zone in &temple.zones {
        if !zone_ids.insert(zone.id.as_str()) {
            return Err(CatalogError::Invalid(format!(
                "temple {} has duplicate zone id: {}",
                temple.id, zone.id
            )));
        }
        if zone.capacity == 0 {
            return Err(CatalogError::Invalid(format!(
                "zone {}/{} has zero capacity",
                temple.id, zone.id
            )));
        }
    }

    if let Some(value) = temple
        .day_multipliers
        .iter()
        .copied()
        .find(|value| !is_multiplier(*value))
    {
        return Err(CatalogError::Invalid(format!(
            "temple {} day multiplier {value} must be finite and non-negative",
            temple.id
        )));
    }
    Ok(())
}

fn is_unit_fraction(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

fn is_multiplier(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
