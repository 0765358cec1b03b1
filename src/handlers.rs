use crate::errors::AppError;
use crate::models::LocationRequest;
use crate::report::{ForecastReport, build_report};
use crate::season::{ModeSelection, select_mode};
use crate::state::{AppState, QueryState};
use crate::ui::render_index;
use axum::{Json, extract::State, response::Html};
use tracing::{error, info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let selection = select_mode(state.clock.today());
    let query = state.query.lock().await;
    Html(render_index(&query.location, &selection))
}

pub async fn get_mode(State(state): State<AppState>) -> Json<ModeSelection> {
    Json(select_mode(state.clock.today()))
}

pub async fn get_query(State(state): State<AppState>) -> Json<QueryState> {
    let query = state.query.lock().await;
    Json(query.clone())
}

pub async fn submit_location(
    State(state): State<AppState>,
    Json(payload): Json<LocationRequest>,
) -> Result<Json<ForecastReport>, AppError> {
    let location = payload.location.trim();
    if location.is_empty() {
        return Err(AppError::bad_request("location must not be empty"));
    }

    let report = run_query(&state, location).await?;
    Ok(Json(report))
}

/// Fetches and evaluates `location`, publishing the result to the shared
/// query context unless a newer submission arrived in the meantime.
async fn run_query(state: &AppState, location: &str) -> Result<ForecastReport, AppError> {
    let generation = state.query.lock().await.begin(location.to_string());
    let selection = select_mode(state.clock.today());
    info!(location, generation, mode = ?selection.mode, "loading weather data");

    let fetched = state.weather.fetch_daily_records(location, &selection).await;

    let mut query = state.query.lock().await;
    match fetched {
        Ok(records) => {
            let report = build_report(
                location,
                &selection,
                records,
                state.config.reference_outcome,
            );
            if !query.complete(generation, Ok(report.clone())) {
                warn!(location, generation, "discarding stale weather response");
            }
            Ok(report)
        }
        Err(err) => {
            error!(location, generation, "failed to load weather data: {err}");
            if !query.complete(generation, Err(err.to_string())) {
                warn!(location, generation, "discarding stale weather error");
            }
            Err(err.into())
        }
    }
}
