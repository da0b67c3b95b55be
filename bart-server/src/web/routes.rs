//! HTTP route handlers.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};

use crate::analytics::{IdentificationMethod, RequestMeta};
use crate::bart::{BartApi, BartError};
use crate::departures::fetch_departures;
use crate::directions::plan_trips;
use crate::domain::{Coordinate, RouteTable, StationCode, TripQuery};
use crate::proximity::{DEFAULT_LIMIT, closest_stations};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<C: BartApi + 'static>(state: AppState<C>) -> Router {
    Router::new()
        .route("/bart", post(fetch_bart::<C>))
        .route("/directions", post(fetch_directions::<C>))
        .route("/stations", get(station_names::<C>))
        .route("/admin/api/analytics", get(analytics_summary::<C>))
        .fallback(not_found)
        .with_state(state)
}

/// Anything outside the API surface gets the literal "404" body.
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404")
}

/// Serialize a response body with the charset-qualified content type the
/// API has always sent.
fn json_response<T: serde::Serialize>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_string(value).map_err(|e| AppError::Internal {
        message: format!("response serialization failed: {e}"),
    })?;

    Ok((
        [(header::CONTENT_TYPE, "application/json;charset=UTF-8")],
        body,
    )
        .into_response())
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Extract identity-relevant metadata from request headers.
///
/// The client IP prefers `CF-Connecting-IP`; failing that, the first
/// comma-separated hop in `X-Forwarded-For`.
fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let forwarded_ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    RequestMeta {
        user_id: header_str(headers, "x-user-id"),
        session_id: header_str(headers, "x-session-id"),
        ip: header_str(headers, "cf-connecting-ip").or(forwarded_ip),
        user_agent: header_str(headers, "user-agent"),
    }
}

/// POST /bart: closest stations to a point, with live departure boards.
async fn fetch_bart<C: BartApi + 'static>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let location: Coordinate =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
            message: format!("invalid request body: {e}"),
        })?;

    state.analytics.record("/bart", request_meta(&headers));

    let ranked = closest_stations(&*state.bart, location, DEFAULT_LIMIT).await?;
    let boards = fetch_departures(&*state.bart, ranked).await;

    let entries: Vec<StationEntry> = boards.into_iter().map(StationEntry::from).collect();
    json_response(&entries)
}

/// POST /directions: scheduled itineraries for a batch of trips.
async fn fetch_directions<C: BartApi + 'static>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let requests: Vec<TripRequest> =
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
            message: format!("invalid request body: {e}"),
        })?;

    state.analytics.record("/directions", request_meta(&headers));

    let trips = requests
        .iter()
        .map(|r| {
            Ok(TripQuery {
                origin: StationCode::parse_normalized(&r.start_code).map_err(|e| {
                    AppError::BadRequest {
                        message: format!("invalid startCode {:?}: {e}", r.start_code),
                    }
                })?,
                destination: StationCode::parse_normalized(&r.end_code).map_err(|e| {
                    AppError::BadRequest {
                        message: format!("invalid endCode {:?}: {e}", r.end_code),
                    }
                })?,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    // An empty batch needs no route table and no upstream calls
    if trips.is_empty() {
        return json_response(&Vec::<TripEntry>::new());
    }

    let routes = state.bart.routes().await?;
    let table = RouteTable::from_routes(&routes);

    let directions = plan_trips(&*state.bart, &table, trips).await;
    let entries: Vec<TripEntry> = directions.into_iter().map(TripEntry::from).collect();
    json_response(&entries)
}

/// GET /stations: station code to display name mapping.
async fn station_names<C: BartApi + 'static>(
    State(state): State<AppState<C>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    state.analytics.record("/stations", request_meta(&headers));

    let stations = state.bart.stations().await?;
    let names: BTreeMap<&str, &str> = stations
        .iter()
        .map(|s| (s.abbr.as_str(), s.name.as_str()))
        .collect();

    json_response(&names)
}

/// GET /admin/api/analytics: usage summary from the in-process sink.
async fn analytics_summary<C: BartApi + 'static>(
    State(state): State<AppState<C>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Response, AppError> {
    let days = query.days.unwrap_or(1).max(1) as i64;

    // Coarser buckets for longer windows, as the dashboard expects
    let interval_secs = if days > 90 {
        7 * 86_400
    } else if days > 7 {
        86_400
    } else {
        3_600
    };

    let method = match query.identification.as_deref() {
        Some("explicit") => Some(IdentificationMethod::Explicit),
        _ => None,
    };

    let now = Utc::now().timestamp();
    let summary = state
        .analytics
        .sink()
        .summarize(now - days * 86_400, interval_secs, method)
        .await;

    let response = AnalyticsSummaryResponse {
        time_periods: summary
            .time_periods
            .iter()
            .map(|&secs| {
                DateTime::<Utc>::from_timestamp(secs, 0)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_else(|| secs.to_string())
            })
            .collect(),
        unique_sessions: summary.unique_sessions,
        unique_users: summary.unique_users,
        requests: summary.requests,
        totals: TotalsResponse {
            unique_sessions: summary.totals.unique_sessions,
            unique_users: summary.totals.unique_users,
            requests: summary.totals.requests,
        },
    };

    json_response(&response)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream(BartError),
    Internal { message: String },
}

impl From<BartError> for AppError {
    fn from(e: BartError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Upstream(BartError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, BartError::Timeout.to_string())
            }
            AppError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        tracing::error!(status = %status, error = %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
