use crate::datasources::OpenWeatherMapClient;
use crate::logic::SprinklerEngine;
use crate::models::{ForecastSnapshot, HistorySnapshot, SiteParameters};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<OpenWeatherMapClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sprinkleNow/{lat}/{lon}", get(sprinkle_now))
        .route("/sprinkleTime/{lat}/{lon}/{barrelv}/{pumpo}", get(sprinkle_time))
        .route("/signals/{lat}/{lon}", get(signals))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize)]
struct SoilQuery {
    /// Soil moisture percentage, optional
    soilm: Option<String>,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn parse_param(raw: &str, message: &str) -> Result<f64, ApiError> {
    raw.parse::<f64>().map_err(|_| bad_request(message))
}

fn parse_soil_moisture(query: &SoilQuery) -> Result<Option<f64>, ApiError> {
    match query.soilm.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => parse_param(raw, "Invalid soil moisture").map(Some),
    }
}

/// Build an engine for one request. Upstream fetch failures degrade to the
/// empty snapshot shapes, so the engine never sees an error.
async fn build_engine(state: &AppState, site: SiteParameters) -> SprinklerEngine {
    let forecast = match state.weather.fetch_forecast(site.latitude, site.longitude).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Forecast fetch failed, using empty snapshot: {}", e);
            ForecastSnapshot::default()
        }
    };

    let history = match state.weather.fetch_history(site.latitude, site.longitude).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("History fetch failed, using empty snapshot: {}", e);
            HistorySnapshot::default()
        }
    };

    SprinklerEngine::new(site, forecast, history)
}

async fn sprinkle_now(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
    Query(query): Query<SoilQuery>,
) -> Result<Json<Value>, ApiError> {
    let lat = parse_param(&lat, "Invalid latitude")?;
    let lon = parse_param(&lon, "Invalid longitude")?;
    let soil_moisture = parse_soil_moisture(&query)?;

    let site = SiteParameters::new(lat, lon).with_soil_moisture(soil_moisture);
    let engine = build_engine(&state, site).await;

    Ok(Json(json!({ "sprinkle": engine.should_sprinkle_now() })))
}

async fn sprinkle_time(
    State(state): State<AppState>,
    Path((lat, lon, barrelv, pumpo)): Path<(String, String, String, String)>,
    Query(query): Query<SoilQuery>,
) -> Result<Json<Value>, ApiError> {
    let lat = parse_param(&lat, "Invalid latitude")?;
    let lon = parse_param(&lon, "Invalid longitude")?;
    let barrel_volume = parse_param(&barrelv, "Invalid barrel volume")?;
    let pump_output = parse_param(&pumpo, "Invalid pump output")?;
    let soil_moisture = parse_soil_moisture(&query)?;

    let site = SiteParameters::new(lat, lon)
        .with_soil_moisture(soil_moisture)
        .with_barrel(barrel_volume, pump_output);
    let engine = build_engine(&state, site).await;

    Ok(Json(json!({ "sprinkleTime": engine.sprinkle_seconds() })))
}

/// Raw extractor answers, for callers that want the signals without the
/// decision.
async fn signals(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let lat = parse_param(&lat, "Invalid latitude")?;
    let lon = parse_param(&lon, "Invalid longitude")?;

    let site = SiteParameters::new(lat, lon);
    let engine = build_engine(&state, site).await;

    Ok(Json(json!({
        "rainsToday": engine.rains_today(),
        "rainsTomorrow": engine.rains_tomorrow(),
        "rainedYesterday": engine.rained_yesterday(),
        "daysToNextRain": engine.days_to_next_rain(),
    })))
}

async fn health() -> &'static str {
    "OK"
}
