use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use skybook_core::{NewPassenger, Passenger, PassengerUpdate};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/passengers", get(search_passengers).post(create_passenger))
        .route("/v1/passengers/{passenger_id}", get(get_passenger).patch(update_passenger))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PassengerResponse {
    #[serde(flatten)]
    pub passenger: Passenger,
    pub document_type_display: &'static str,
    pub age: i32,
}

impl From<Passenger> for PassengerResponse {
    fn from(passenger: Passenger) -> Self {
        Self {
            document_type_display: passenger.document_type.label(),
            age: passenger.age_on(Utc::now().date_naive()),
            passenger,
        }
    }
}

/// POST /v1/passengers
pub async fn create_passenger(
    State(state): State<AppState>,
    Json(req): Json<NewPassenger>,
) -> Result<(StatusCode, Json<PassengerResponse>), AppError> {
    let passenger = Passenger::register(req)?;
    let passenger = state.passenger_repo.create_passenger(passenger).await?;
    Ok((StatusCode::CREATED, Json(passenger.into())))
}

/// GET /v1/passengers?name=...
///
/// Active passengers whose name contains the query; no query lists them all.
pub async fn search_passengers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PassengerResponse>>, AppError> {
    let name = query.name.unwrap_or_default();
    let found = state.passenger_repo.search_passengers(&name).await?;
    Ok(Json(found.into_iter().map(PassengerResponse::from).collect()))
}

/// GET /v1/passengers/{passenger_id}
pub async fn get_passenger(
    State(state): State<AppState>,
    Path(passenger_id): Path<Uuid>,
) -> Result<Json<PassengerResponse>, AppError> {
    let passenger = load_passenger(&state, passenger_id).await?;
    Ok(Json(passenger.into()))
}

/// PATCH /v1/passengers/{passenger_id}
pub async fn update_passenger(
    State(state): State<AppState>,
    Path(passenger_id): Path<Uuid>,
    Json(req): Json<PassengerUpdate>,
) -> Result<Json<PassengerResponse>, AppError> {
    let current = load_passenger(&state, passenger_id).await?;
    let updated = current.updated(req)?;
    let saved = state.passenger_repo.update_passenger(updated).await?;
    Ok(Json(saved.into()))
}

async fn load_passenger(state: &AppState, passenger_id: Uuid) -> Result<Passenger, AppError> {
    state
        .passenger_repo
        .get_passenger(passenger_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Passenger {} not found", passenger_id)))
}
