use crate::api::responses::{
    ErrorCode, ErrorResponse, FootfallSuccessResponse, HealthStatus, HealthSuccessResponse,
    HourlyForecastSuccessResponse, HourlyPointResponse, TempleSnapshotResponse,
    TemplesSuccessResponse, WeatherSuccessResponse, WeeklyDayResponse,
    WeeklyForecastSuccessResponse, ZoneStateResponse, ZonesSuccessResponse,
};
use crate::estimation::forecast::{VISITING_HOURS_END, VISITING_HOURS_START, within_hours};
use crate::estimation::{TempleSnapshot, ZoneCrowdState};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, error, warn};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
const LAST_HOUR: u8 = 23;

#[derive(Debug)]
enum TimestampError {
    Format(time::error::Format),
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::Format(err) => write!(f, "timestamp format error: {err}"),
        }
    }
}

pub enum ApiResponse<T> {
    Success(T),
    Error {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            ApiResponse::Error { status, body } => (status, Json(body)).into_response(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AtQuery {
    /// RFC 3339 timestamp; defaults to now
    pub at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HourlyQuery {
    pub zone: Option<String>,
    pub from: Option<u8>,
    pub to: Option<u8>,
}

pub async fn get_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    build_health_response(&state, state.now())
}

pub async fn get_temples(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    build_temples_response(&state, state.now())
}

pub async fn get_temple(
    State(state): State<Arc<AppState>>,
    Path(temple_id): Path<String>,
) -> impl IntoResponse {
    build_temple_response(&state, &temple_id, state.now())
}

pub async fn get_zones(
    State(state): State<Arc<AppState>>,
    Path(temple_id): Path<String>,
    Query(query): Query<AtQuery>,
) -> impl IntoResponse {
    build_zones_response(&state, &temple_id, &query, state.now())
}

pub async fn get_hourly_forecast(
    State(state): State<Arc<AppState>>,
    Path(temple_id): Path<String>,
    Query(query): Query<HourlyQuery>,
) -> impl IntoResponse {
    build_hourly_response(&state, &temple_id, &query, state.now())
}

pub async fn get_weekly_forecast(
    State(state): State<Arc<AppState>>,
    Path(temple_id): Path<String>,
) -> impl IntoResponse {
    build_weekly_response(&state, &temple_id, state.now())
}

pub async fn get_footfall(
    State(state): State<Arc<AppState>>,
    Path(temple_id): Path<String>,
    Query(query): Query<AtQuery>,
) -> impl IntoResponse {
    build_footfall_response(&state, &temple_id, &query, state.now())
}

pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(temple_id): Path<String>,
) -> impl IntoResponse {
    build_weather_response(&state, &temple_id, state.now())
}

fn build_health_response(
    state: &AppState,
    now: OffsetDateTime,
) -> ApiResponse<HealthSuccessResponse> {
    let timestamp = match format_timestamp(now) {
        Ok(formatted) => formatted,
        Err(_) => return internal_error("timestamp formatting failure"),
    };
    ApiResponse::Success(HealthSuccessResponse {
        status: HealthStatus::Ok,
        temples: state.estimator().catalog().temples.len(),
        timestamp,
    })
}

fn build_temples_response(
    state: &AppState,
    now: OffsetDateTime,
) -> ApiResponse<TemplesSuccessResponse> {
    let snapshots = state.estimator().all_snapshots(now);
    let mut temples = Vec::with_capacity(snapshots.len());
    for snapshot in snapshots {
        match map_snapshot(snapshot) {
            Ok(mapped) => temples.push(mapped),
            Err(_) => return internal_error("timestamp formatting failure"),
        }
    }

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success(TemplesSuccessResponse { temples, timestamp }),
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn build_temple_response(
    state: &AppState,
    temple_id: &str,
    now: OffsetDateTime,
) -> ApiResponse<TempleSnapshotResponse> {
    let Some(snapshot) = state.estimator().temple_snapshot(temple_id, now) else {
        return unknown_temple(temple_id, now);
    };
    match map_snapshot(snapshot) {
        Ok(mapped) => ApiResponse::Success(mapped),
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn build_zones_response(
    state: &AppState,
    temple_id: &str,
    query: &AtQuery,
    now: OffsetDateTime,
) -> ApiResponse<ZonesSuccessResponse> {
    let at = match resolve_at(state, query, now) {
        Ok(at) => at,
        Err(message) => return invalid_request(message, now),
    };

    let states = state.estimator().zone_states(temple_id, at);
    if states.is_empty() {
        return unknown_temple(temple_id, now);
    }

    let zones = match states
        .into_iter()
        .map(map_zone_state)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(zones) => zones,
        Err(_) => return internal_error("timestamp formatting failure"),
    };

    match format_timestamp(at) {
        Ok(timestamp) => ApiResponse::Success(ZonesSuccessResponse {
            temple_id: temple_id.to_string(),
            zones,
            timestamp,
        }),
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn build_hourly_response(
    state: &AppState,
    temple_id: &str,
    query: &HourlyQuery,
    now: OffsetDateTime,
) -> ApiResponse<HourlyForecastSuccessResponse> {
    let Some(temple) = state.estimator().catalog().temple(temple_id) else {
        return unknown_temple(temple_id, now);
    };

    let from = query.from.unwrap_or(VISITING_HOURS_START);
    let to = query.to.unwrap_or(VISITING_HOURS_END);
    if from > to || to > LAST_HOUR {
        return invalid_request(format!("invalid hour window {from}..={to}"), now);
    }
    if let Some(zone_id) = query.zone.as_deref()
        && temple.zone(zone_id).is_none()
    {
        return invalid_request(format!("unknown zone for {temple_id}: {zone_id}"), now);
    }

    let points = state
        .estimator()
        .hourly_forecast(temple_id, query.zone.as_deref(), now);
    let hours = within_hours(points, from, to)
        .into_iter()
        .map(|point| HourlyPointResponse {
            time: point.time_label(),
            hour: point.hour,
            crowd: point.crowd_percent,
            status: point.label,
        })
        .collect();

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success(HourlyForecastSuccessResponse {
            temple_id: temple_id.to_string(),
            zone_id: query.zone.clone(),
            hours,
            timestamp,
        }),
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn build_weekly_response(
    state: &AppState,
    temple_id: &str,
    now: OffsetDateTime,
) -> ApiResponse<WeeklyForecastSuccessResponse> {
    let days = state.estimator().weekly_forecast(temple_id, now);
    if days.is_empty() {
        return unknown_temple(temple_id, now);
    }

    let days = days
        .into_iter()
        .map(|day| WeeklyDayResponse {
            day: day.day_name.to_string(),
            crowd: day.avg_crowd_percent,
            recommendation: day.recommendation,
            reason: day.reason.to_string(),
        })
        .collect();

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success(WeeklyForecastSuccessResponse {
            temple_id: temple_id.to_string(),
            days,
            timestamp,
        }),
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn build_footfall_response(
    state: &AppState,
    temple_id: &str,
    query: &AtQuery,
    now: OffsetDateTime,
) -> ApiResponse<FootfallSuccessResponse> {
    let at = match resolve_at(state, query, now) {
        Ok(at) => at,
        Err(message) => return invalid_request(message, now),
    };
    let Some(estimate) = state.estimator().footfall(temple_id, at) else {
        return unknown_temple(temple_id, now);
    };

    match format_timestamp(at) {
        Ok(timestamp) => ApiResponse::Success(FootfallSuccessResponse {
            temple_id: temple_id.to_string(),
            today: estimate.today_count,
            weekly: estimate.weekly_count,
            monthly: estimate.monthly_count,
            change_percent: estimate.change_percent,
            peak_hour: format!("{:02}:00", estimate.peak_hour),
            avg_dwell_minutes: estimate.avg_dwell_minutes,
            timestamp,
        }),
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn build_weather_response(
    state: &AppState,
    temple_id: &str,
    now: OffsetDateTime,
) -> ApiResponse<WeatherSuccessResponse> {
    let Some(weather) = state.estimator().weather(temple_id, now) else {
        return unknown_temple(temple_id, now);
    };

    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Success(WeatherSuccessResponse {
            temple_id: temple_id.to_string(),
            temperature_c: weather.temperature_c,
            humidity_percent: weather.humidity_percent,
            condition: weather.condition.to_string(),
            feels_like_c: weather.feels_like_c,
            wind_speed_kmh: weather.wind_speed_kmh,
            uv_index: weather.uv_index,
            timestamp,
        }),
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn resolve_at(
    state: &AppState,
    query: &AtQuery,
    now: OffsetDateTime,
) -> Result<OffsetDateTime, String> {
    match query.at.as_deref() {
        None => Ok(now),
        Some(raw) => OffsetDateTime::parse(raw, &Rfc3339)
            .map(|parsed| state.localize(parsed))
            .map_err(|err| format!("invalid 'at' timestamp {raw:?}: {err}")),
    }
}

fn map_snapshot(snapshot: TempleSnapshot) -> Result<TempleSnapshotResponse, TimestampError> {
    let zones = snapshot
        .zones
        .into_iter()
        .map(map_zone_state)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TempleSnapshotResponse {
        temple_id: snapshot.temple_id,
        name: snapshot.name,
        location: snapshot.location,
        zones,
    })
}

fn map_zone_state(state: ZoneCrowdState) -> Result<ZoneStateResponse, TimestampError> {
    Ok(ZoneStateResponse {
        wait_time: format!("{} min", state.wait_time_minutes),
        last_updated: format_timestamp(state.last_updated)?,
        zone_id: state.zone_id,
        name: state.name,
        density: state.density,
        wait_time_minutes: state.wait_time_minutes,
        status: state.status,
        current_count: state.current_count,
        max_capacity: state.max_capacity,
    })
}

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, TimestampError> {
    timestamp.format(&Rfc3339).map_err(TimestampError::Format)
}

fn unknown_temple<T>(temple_id: &str, now: OffsetDateTime) -> ApiResponse<T> {
    debug!(temple_id = temple_id, "Request for unknown temple");
    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Error {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse {
                error_code: ErrorCode::UnknownTemple,
                error_message: format!("Unknown temple: {temple_id}"),
                timestamp,
            },
        },
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn invalid_request<T>(message: String, now: OffsetDateTime) -> ApiResponse<T> {
    warn!(message = %message, "Rejected invalid request");
    match format_timestamp(now) {
        Ok(timestamp) => ApiResponse::Error {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                error_code: ErrorCode::InvalidRequest,
                error_message: message,
                timestamp,
            },
        },
        Err(_) => internal_error("timestamp formatting failure"),
    }
}

fn internal_error<T>(message: &str) -> ApiResponse<T> {
    error!(message = message, "Internal error while handling request");
    let formatted = format_timestamp(OffsetDateTime::now_utc()).unwrap_or_else(|err| {
        error!(error = %err, "Failed to format internal error timestamp");
        "1970-01-01T00:00:00Z".to_string()
    });
    ApiResponse::Error {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: ErrorResponse {
            error_code: ErrorCode::InternalError,
            error_message: INTERNAL_ERROR_MESSAGE.to_string(),
            timestamp: formatted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::{CrowdEstimator, CrowdStatus};
    use time::macros::{datetime, offset};

    fn ist_state() -> AppState {
        AppState::new(CrowdEstimator::with_defaults(), offset!(+05:30))
    }

    fn expect_error<T>(response: ApiResponse<T>) -> (StatusCode, ErrorResponse) {
        match response {
            ApiResponse::Error { status, body } => (status, body),
            ApiResponse::Success(_) => panic!("expected error response"),
        }
    }

    fn expect_success<T>(response: ApiResponse<T>) -> T {
        match response {
            ApiResponse::Success(body) => body,
            ApiResponse::Error { status, body } => {
                panic!("expected success, got {status}: {}", body.error_message)
            }
        }
    }

    #[test]
    fn health_reports_catalog_size() {
        let state = ist_state();

        let body = expect_success(build_health_response(
            &state,
            datetime!(2026-10-16 09:00 +05:30),
        ));

        assert_eq!(body.status, HealthStatus::Ok);
        assert_eq!(body.temples, 4);
        assert_eq!(body.timestamp, "2026-10-16T09:00:00+05:30");
    }

    #[test]
    fn zones_handler_returns_all_zones() {
        let state = ist_state();

        let body = expect_success(build_zones_response(
            &state,
            "somnath",
            &AtQuery::default(),
            datetime!(2026-12-06 07:00 +05:30),
        ));

        assert_eq!(body.temple_id, "somnath");
        assert_eq!(body.zones.len(), 4);
        let sanctum = &body.zones[1];
        assert_eq!(sanctum.zone_id, "garbhaGriha");
        assert_eq!(sanctum.status, CrowdStatus::Critical);
        assert_eq!(
            sanctum.wait_time,
            format!("{} min", sanctum.wait_time_minutes)
        );
        assert_eq!(sanctum.last_updated, "2026-12-06T07:00:00+05:30");
    }

    #[test]
    fn zones_handler_localizes_at_parameter() {
        let state = ist_state();
        let query = AtQuery {
            at: Some("2026-12-06T01:30:00Z".to_string()),
        };

        let body = expect_success(build_zones_response(
            &state,
            "somnath",
            &query,
            datetime!(2026-10-16 09:00 +05:30),
        ));

        assert_eq!(body.timestamp, "2026-12-06T07:00:00+05:30");
        let direct = state
            .estimator()
            .zone_states("somnath", datetime!(2026-12-06 07:00 +05:30));
        let densities: Vec<f64> = body.zones.iter().map(|z| z.density).collect();
        let expected: Vec<f64> = direct.iter().map(|z| z.density).collect();
        assert_eq!(densities, expected);
    }

    #[test]
    fn zones_handler_rejects_malformed_at() {
        let state = ist_state();
        let query = AtQuery {
            at: Some("yesterday".to_string()),
        };

        let (status, body) = expect_error(build_zones_response(
            &state,
            "somnath",
            &query,
            datetime!(2026-10-16 09:00 +05:30),
        ));

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error_code, ErrorCode::InvalidRequest);
    }

    #[test]
    fn unknown_temple_is_not_found_everywhere() {
        let state = ist_state();
        let now = datetime!(2026-10-16 09:00 +05:30);

        let responses = [
            expect_error(build_temple_response(&state, "kedarnath", now)),
            expect_error(build_zones_response(
                &state,
                "kedarnath",
                &AtQuery::default(),
                now,
            )),
            expect_error(build_hourly_response(
                &state,
                "kedarnath",
                &HourlyQuery::default(),
                now,
            )),
            expect_error(build_weekly_response(&state, "kedarnath", now)),
            expect_error(build_footfall_response(
                &state,
                "kedarnath",
                &AtQuery::default(),
                now,
            )),
            expect_error(build_weather_response(&state, "kedarnath", now)),
        ];

        for (status, body) in responses {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body.error_code, ErrorCode::UnknownTemple);
            assert_eq!(body.error_message, "Unknown temple: kedarnath");
        }
    }

    #[test]
    fn hourly_handler_defaults_to_visiting_hours() {
        let state = ist_state();

        let body = expect_success(build_hourly_response(
            &state,
            "dwarka",
            &HourlyQuery::default(),
            datetime!(2026-10-16 09:00 +05:30),
        ));

        assert_eq!(body.hours.len(), 17);
        assert_eq!(body.hours[0].time, "05:00");
        assert_eq!(body.hours[16].time, "21:00");
        assert!(body.zone_id.is_none());
    }

    #[test]
    fn hourly_handler_honours_window_and_zone() {
        let state = ist_state();
        let query = HourlyQuery {
            zone: Some("gomtiGhat".to_string()),
            from: Some(0),
            to: Some(23),
        };

        let body = expect_success(build_hourly_response(
            &state,
            "dwarka",
            &query,
            datetime!(2026-10-16 09:00 +05:30),
        ));

        assert_eq!(body.hours.len(), 24);
        assert_eq!(body.zone_id.as_deref(), Some("gomtiGhat"));
    }

    #[test]
    fn hourly_handler_rejects_bad_window_and_foreign_zone() {
        let state = ist_state();
        let now = datetime!(2026-10-16 09:00 +05:30);

        let inverted = HourlyQuery {
            zone: None,
            from: Some(20),
            to: Some(6),
        };
        let past_midnight = HourlyQuery {
            zone: None,
            from: Some(5),
            to: Some(24),
        };
        let foreign_zone = HourlyQuery {
            zone: Some("ropeway".to_string()),
            from: None,
            to: None,
        };

        for query in [inverted, past_midnight, foreign_zone] {
            let (status, body) = expect_error(build_hourly_response(&state, "dwarka", &query, now));
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.error_code, ErrorCode::InvalidRequest);
        }
    }

    #[test]
    fn weekly_handler_lists_seven_days() {
        let state = ist_state();

        let body = expect_success(build_weekly_response(
            &state,
            "ambaji",
            datetime!(2026-10-16 09:00 +05:30),
        ));

        assert_eq!(body.days.len(), 7);
        assert_eq!(body.days[0].day, "Sunday");
        assert_eq!(body.days[6].day, "Saturday");
    }

    #[test]
    fn footfall_handler_formats_peak_hour() {
        let state = ist_state();

        let body = expect_success(build_footfall_response(
            &state,
            "somnath",
            &AtQuery::default(),
            datetime!(2026-10-16 10:45 +05:30),
        ));

        assert_eq!(body.today, 12_078);
        assert_eq!(body.peak_hour, "19:00");
        assert_eq!(body.avg_dwell_minutes, 45);
    }

    #[test]
    fn temples_handler_covers_catalog() {
        let state = ist_state();

        let body = expect_success(build_temples_response(
            &state,
            datetime!(2026-10-16 09:00 +05:30),
        ));

        assert_eq!(body.temples.len(), 4);
        assert_eq!(body.temples[1].name, "Dwarkadhish Temple");
        assert_eq!(body.temples[1].location, "Dwarka, Devbhumi Dwarka");
    }

    #[test]
    fn weather_handler_returns_estimate() {
        let state = ist_state();

        let body = expect_success(build_weather_response(
            &state,
            "pavagadh",
            datetime!(2026-05-12 12:00 +05:30),
        ));

        assert_eq!(body.temperature_c, 45);
        assert_eq!(body.condition, "Very Hot");
    }
}
