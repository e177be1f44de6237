use crate::estimation::CrowdStatus;
use crate::estimation::forecast::{ForecastLabel, Recommendation};
use crate::estimation::weather::UvIndex;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ErrorResponse {
    pub error_code: ErrorCode,
    pub error_message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownTemple,
    InvalidRequest,
    InternalError,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HealthSuccessResponse {
    pub status: HealthStatus,
    pub temples: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ZoneStateResponse {
    pub zone_id: String,
    pub name: String,
    pub density: f64,
    pub wait_time_minutes: u32,
    pub wait_time: String,
    pub status: CrowdStatus,
    pub current_count: u32,
    pub max_capacity: u32,
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ZonesSuccessResponse {
    pub temple_id: String,
    pub zones: Vec<ZoneStateResponse>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TempleSnapshotResponse {
    pub temple_id: String,
    pub name: String,
    pub location: String,
    pub zones: Vec<ZoneStateResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TemplesSuccessResponse {
    pub temples: Vec<TempleSnapshotResponse>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HourlyPointResponse {
    pub time: String,
    pub hour: u8,
    pub crowd: u32,
    pub status: ForecastLabel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HourlyForecastSuccessResponse {
    pub temple_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    pub hours: Vec<HourlyPointResponse>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WeeklyDayResponse {
    pub day: String,
    pub crowd: u32,
    pub recommendation: Recommendation,
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WeeklyForecastSuccessResponse {
    pub temple_id: String,
    pub days: Vec<WeeklyDayResponse>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FootfallSuccessResponse {
    pub temple_id: String,
    pub today: u64,
    pub weekly: u64,
    pub monthly: u64,
    pub change_percent: f64,
    pub peak_hour: String,
    pub avg_dwell_minutes: u32,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct WeatherSuccessResponse {
    pub temple_id: String,
    pub temperature_c: i32,
    pub humidity_percent: u8,
    pub condition: String,
    pub feels_like_c: i32,
    pub wind_speed_kmh: u32,
    pub uv_index: UvIndex,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_response_uses_screaming_snake_case_code() {
        let response = ErrorResponse {
            error_code: ErrorCode::UnknownTemple,
            error_message: "Unknown temple: kedarnath".to_string(),
            timestamp: "2026-10-16T12:32:00+05:30".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize error response");
        assert_eq!(
            value,
            json!({
                "error_code": "UNKNOWN_TEMPLE",
                "error_message": "Unknown temple: kedarnath",
                "timestamp": "2026-10-16T12:32:00+05:30"
            })
        );
    }

    #[test]
    fn zone_state_serializes_lowercase_status() {
        let response = ZoneStateResponse {
            zone_id: "garbhaGriha".to_string(),
            name: "Garbha Griha".to_string(),
            density: 81.5,
            wait_time_minutes: 37,
            wait_time: "37 min".to_string(),
            status: CrowdStatus::Critical,
            current_count: 408,
            max_capacity: 500,
            last_updated: "2026-10-16T07:00:00+05:30".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize zone state");
        assert_eq!(
            value,
            json!({
                "zone_id": "garbhaGriha",
                "name": "Garbha Griha",
                "density": 81.5,
                "wait_time_minutes": 37,
                "wait_time": "37 min",
                "status": "critical",
                "current_count": 408,
                "max_capacity": 500,
                "last_updated": "2026-10-16T07:00:00+05:30"
            })
        );
    }

    #[test]
    fn hourly_forecast_omits_zone_when_none() {
        let response = HourlyForecastSuccessResponse {
            temple_id: "dwarka".to_string(),
            zone_id: None,
            hours: vec![HourlyPointResponse {
                time: "07:00".to_string(),
                hour: 7,
                crowd: 88,
                status: ForecastLabel::Peak,
            }],
            timestamp: "2026-10-16T07:00:00+05:30".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize hourly forecast");
        assert_eq!(
            value,
            json!({
                "temple_id": "dwarka",
                "hours": [{ "time": "07:00", "hour": 7, "crowd": 88, "status": "Peak" }],
                "timestamp": "2026-10-16T07:00:00+05:30"
            })
        );
    }

    #[test]
    fn weather_serializes_spaced_uv_label() {
        let response = WeatherSuccessResponse {
            temple_id: "ambaji".to_string(),
            temperature_c: 45,
            humidity_percent: 20,
            condition: "Very Hot".to_string(),
            feels_like_c: 44,
            wind_speed_kmh: 5,
            uv_index: UvIndex::VeryHigh,
            timestamp: "2026-05-12T12:00:00+05:30".to_string(),
        };

        let value = serde_json::to_value(response).expect("serialize weather");
        assert_eq!(value["uv_index"], json!("Very High"));
        assert_eq!(value["condition"], json!("Very Hot"));
    }
}
