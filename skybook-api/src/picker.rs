use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use skybook_seatmap::{PickerSnapshot, PickerTargets, SeatPicker, UiPatch};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AppError;
use crate::flights::seat_map;
use crate::state::{evict_expired, AppState, PickerSession};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/{flight_id}/picker", post(open_session))
        .route("/v1/picker/{session_id}", get(get_session).delete(close_session))
        .route("/v1/picker/{session_id}/click", post(click_seat))
        .route("/v1/picker/{session_id}/select", post(select_seat))
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub flight_id: Uuid,
    #[serde(flatten)]
    pub snapshot: PickerSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct SeatRequest {
    pub seat_id: String,
}

#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub patches: Vec<UiPatch>,
    pub selected_seat: Option<String>,
}

/// POST /v1/flights/{flight_id}/picker
///
/// The body, when present, is a `PickerTargets` object naming which page
/// targets exist. An empty body means all of them.
pub async fn open_session(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let targets = if body.iter().all(u8::is_ascii_whitespace) {
        PickerTargets::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::ValidationError(format!("Invalid picker targets: {}", e)))?
    };

    let (flight, seats) = seat_map(&state, flight_id).await?;
    let picker = SeatPicker::initialize(seats, targets)?;
    let snapshot = picker.snapshot();

    let session_id = Uuid::new_v4();
    {
        let mut sessions = state.sessions.write().await;
        let evicted = evict_expired(&mut sessions, state.session_ttl());
        if evicted > 0 {
            info!(evicted, "expired seat pickers discarded");
        }
        if sessions.len() >= state.seatmap.max_sessions {
            return Err(AppError::ConflictError("Too many open seat maps".to_string()));
        }
        sessions.insert(session_id, PickerSession::new(flight.id, picker));
    }
    info!(%session_id, flight_number = %flight.flight_number, "seat picker opened");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            flight_id: flight.id,
            snapshot,
        }),
    ))
}

/// GET /v1/picker/{session_id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = live_session(&mut sessions, session_id, &state)?;

    Ok(Json(SessionResponse {
        session_id,
        flight_id: session.flight_id,
        snapshot: session.picker.snapshot(),
    }))
}

/// POST /v1/picker/{session_id}/click
///
/// The write lock is held for the whole click, so clicks on the same seat
/// map are handled one at a time.
pub async fn click_seat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SeatRequest>,
) -> Result<Json<ClickResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = live_session(&mut sessions, session_id, &state)?;

    let patches = session.picker.click(&req.seat_id)?;

    Ok(Json(ClickResponse {
        patches,
        selected_seat: session.picker.selected().map(|s| s.seat_id.clone()),
    }))
}

/// POST /v1/picker/{session_id}/select
///
/// Selects a seat directly, bypassing click handlers. Selecting an
/// unavailable seat answers 409 with the user notice and changes nothing.
pub async fn select_seat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SeatRequest>,
) -> Result<Json<ClickResponse>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = live_session(&mut sessions, session_id, &state)?;

    let patches = session.picker.select_seat(&req.seat_id)?;

    Ok(Json(ClickResponse {
        patches,
        selected_seat: session.picker.selected().map(|s| s.seat_id.clone()),
    }))
}

/// DELETE /v1/picker/{session_id}
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.sessions.write().await.remove(&session_id) {
        Some(_) => {
            info!(%session_id, "seat picker closed");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(session_not_found(session_id)),
    }
}

/// Looks up a session and marks it as seen. A session past its idle TTL is
/// discarded and reported as not found.
fn live_session<'a>(
    sessions: &'a mut HashMap<Uuid, PickerSession>,
    session_id: Uuid,
    state: &AppState,
) -> Result<&'a mut PickerSession, AppError> {
    let expired = match sessions.get(&session_id) {
        Some(session) => session.is_expired(Utc::now(), state.session_ttl()),
        None => return Err(session_not_found(session_id)),
    };
    if expired {
        sessions.remove(&session_id);
        debug!(%session_id, "expired seat picker discarded");
        return Err(session_not_found(session_id));
    }

    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| session_not_found(session_id))?;
    session.touch();
    Ok(session)
}

fn session_not_found(session_id: Uuid) -> AppError {
    AppError::NotFoundError(format!("Picker session {} not found", session_id))
}
