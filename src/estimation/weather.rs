//! Seasonal weather approximation shared by every Gujarat temple.

use super::jitter::round_half_up;
use super::{CalendarPoint, CrowdEstimator};
use serde::Serialize;
use std::f64::consts::PI;
use time::OffsetDateTime;

const MONTHLY_TEMPERATURE_C: [f64; 12] = [
    22.0, 25.0, 30.0, 35.0, 40.0, 38.0, 32.0, 30.0, 31.0, 32.0, 28.0, 23.0,
];
const MONTHLY_HUMIDITY_PERCENT: [u8; 12] = [35, 30, 25, 20, 20, 55, 80, 85, 75, 50, 40, 35];
const MONTHLY_CONDITIONS: [&str; 12] = [
    "Clear",
    "Clear",
    "Sunny",
    "Hot",
    "Very Hot",
    "Humid",
    "Rainy",
    "Rainy",
    "Partly Cloudy",
    "Clear",
    "Clear",
    "Clear",
];
const DIURNAL_SWING_C: f64 = 5.0;
const MUGGY_HUMIDITY_PERCENT: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UvIndex {
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherEstimate {
    pub temperature_c: i32,
    pub humidity_percent: u8,
    pub condition: &'static str,
    pub feels_like_c: i32,
    pub wind_speed_kmh: u32,
    pub uv_index: UvIndex,
}

impl CrowdEstimator {
    pub fn weather(&self, temple_id: &str, at: OffsetDateTime) -> Option<WeatherEstimate> {
        self.catalog.temple(temple_id)?;
        Some(estimate_weather(CalendarPoint::from(at)))
    }
}

pub fn estimate_weather(point: CalendarPoint) -> WeatherEstimate {
    let hour = f64::from(point.hour);
    let base = MONTHLY_TEMPERATURE_C[point.month];
    let humidity_percent = MONTHLY_HUMIDITY_PERCENT[point.month];
    // Coolest around dawn, warmest mid-afternoon.
    let variation = ((hour - 6.0) * PI / 12.0).sin() * DIURNAL_SWING_C;
    let humidity_adjust = if humidity_percent > MUGGY_HUMIDITY_PERCENT {
        3.0
    } else {
        -1.0
    };

    WeatherEstimate {
        temperature_c: round_half_up(base + variation) as i32,
        humidity_percent,
        condition: MONTHLY_CONDITIONS[point.month],
        feels_like_c: round_half_up(base + variation + humidity_adjust) as i32,
        wind_speed_kmh: round_half_up(8.0 + hour.sin() * 5.0).max(0.0) as u32,
        uv_index: uv_index(point),
    }
}

fn uv_index(point: CalendarPoint) -> UvIndex {
    let midday = (10..=16).contains(&point.hour);
    // April through June
    let summer = (3..=5).contains(&point.month);
    match (midday, summer) {
        (true, true) => UvIndex::VeryHigh,
        (true, false) => UvIndex::High,
        (false, _) => UvIndex::Moderate,
    }
}
