use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use skybook_core::{
    Airplane, Flight, FlightFilter, FlightStatus, Money, OccupancyStats, Page, Seat, SeatCounts,
    SeatStatus,
};
use skybook_seatmap::SeatElement;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(list_flights).post(create_flight))
        .route("/v1/flights/cities", get(list_cities))
        .route("/v1/flights/{flight_id}", get(get_flight))
        .route("/v1/flights/{flight_id}/seats", get(get_seat_map))
        .route("/v1/airplanes", get(list_airplanes).post(create_airplane))
        .route("/v1/airplanes/{airplane_id}", get(get_airplane))
        .route("/v1/airplanes/{airplane_id}/stats", get(get_airplane_stats))
        .route("/v1/seats/{seat_id}/status", put(update_seat_status))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters are taken as raw strings; malformed values fall back
/// to "no filter" or the first page instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListFlightsQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlightSummary {
    pub id: Uuid,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: FlightStatus,
    pub base_price: Money,
    pub airplane_model: String,
    pub available_seats: usize,
}

impl FlightSummary {
    fn new(flight: &Flight, airplane: &Airplane, seats: &[Seat]) -> Self {
        Self {
            id: flight.id,
            flight_number: flight.flight_number.clone(),
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
            departure: flight.departure,
            arrival: flight.arrival,
            duration_minutes: flight.duration().num_minutes(),
            status: flight.status,
            base_price: flight.base_price,
            airplane_model: airplane.model.clone(),
            available_seats: seats
                .iter()
                .filter(|s| s.status == SeatStatus::Available)
                .count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlightDetailResponse {
    pub flight: FlightSummary,
    pub seat_counts: SeatCounts,
    pub available_counts: SeatCounts,
}

#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub flight_id: Uuid,
    pub flight_number: String,
    pub seats: Vec<SeatElement>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFlightRequest {
    pub airplane_id: Uuid,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    /// In cents, like every amount the API returns
    pub base_price: Money,
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAirplaneRequest {
    pub model: String,
    pub registration: String,
    pub rows: u32,
    pub columns: u32,
}

#[derive(Debug, Serialize)]
pub struct AirplaneDetailResponse {
    pub airplane: Airplane,
    pub seat_counts: SeatCounts,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSeatStatusRequest {
    pub status: SeatStatus,
}

#[derive(Debug, Serialize)]
pub struct AirplaneStatsResponse {
    pub airplane: Airplane,
    #[serde(flatten)]
    pub stats: OccupancyStats,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /v1/flights
pub async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<ListFlightsQuery>,
) -> Result<Json<Page<FlightSummary>>, AppError> {
    let filter = FlightFilter {
        origin: query.origin,
        destination: query.destination,
        date_from: query.date_from,
        date_to: query.date_to,
        status: query.status,
    };
    let page = query.page.as_deref().map(parse_page);

    let flights = filter.apply(state.flight_repo.list_flights().await?);
    let page = Page::paginate(flights, page, Page::<Flight>::DEFAULT_SIZE);

    let mut items = Vec::with_capacity(page.items.len());
    for flight in &page.items {
        let (airplane, seats) = load_airplane(&state, flight.airplane_id).await?;
        items.push(FlightSummary::new(flight, &airplane, &seats));
    }

    Ok(Json(Page {
        items,
        page: page.page,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }))
}

/// POST /v1/flights
pub async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<(StatusCode, Json<FlightSummary>), AppError> {
    let (airplane, seats) = load_airplane(&state, req.airplane_id).await?;
    let flight = Flight::new(
        airplane.id,
        &req.flight_number,
        &req.origin,
        &req.destination,
        req.departure,
        req.arrival,
        req.base_price,
    )?;
    let flight = state.flight_repo.create_flight(flight).await?;

    Ok((StatusCode::CREATED, Json(FlightSummary::new(&flight, &airplane, &seats))))
}

/// GET /v1/flights/cities
///
/// Distinct origins and destinations of the flights currently listed.
pub async fn list_cities(State(state): State<AppState>) -> Result<Json<CitiesResponse>, AppError> {
    let mut origins = BTreeSet::new();
    let mut destinations = BTreeSet::new();
    for flight in state.flight_repo.list_flights().await? {
        if flight.status.is_listed() {
            origins.insert(flight.origin);
            destinations.insert(flight.destination);
        }
    }

    Ok(Json(CitiesResponse {
        origins: origins.into_iter().collect(),
        destinations: destinations.into_iter().collect(),
    }))
}

/// GET /v1/flights/{flight_id}
pub async fn get_flight(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<FlightDetailResponse>, AppError> {
    let (flight, airplane, seats) = load_flight(&state, flight_id).await?;

    Ok(Json(FlightDetailResponse {
        flight: FlightSummary::new(&flight, &airplane, &seats),
        seat_counts: SeatCounts::tally(&seats, |_| true),
        available_counts: SeatCounts::tally(&seats, |s| s.status == SeatStatus::Available),
    }))
}

/// GET /v1/flights/{flight_id}/seats
pub async fn get_seat_map(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let (flight, seats) = seat_map(&state, flight_id).await?;

    Ok(Json(SeatMapResponse {
        flight_id: flight.id,
        flight_number: flight.flight_number,
        seats,
    }))
}

/// GET /v1/airplanes
pub async fn list_airplanes(State(state): State<AppState>) -> Result<Json<Vec<Airplane>>, AppError> {
    Ok(Json(state.flight_repo.list_airplanes().await?))
}

/// POST /v1/airplanes
///
/// The seat layout is generated together with the airplane.
pub async fn create_airplane(
    State(state): State<AppState>,
    Json(req): Json<CreateAirplaneRequest>,
) -> Result<(StatusCode, Json<AirplaneDetailResponse>), AppError> {
    if req.model.trim().is_empty() || req.registration.trim().is_empty() {
        return Err(AppError::ValidationError(
            "model and registration are required".to_string(),
        ));
    }

    let airplane = Airplane::new(req.model.trim(), req.registration.trim(), req.rows, req.columns)?;
    let airplane = state.flight_repo.create_airplane(airplane).await?;
    let seats = state.flight_repo.seats_for_airplane(airplane.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(AirplaneDetailResponse {
            seat_counts: SeatCounts::tally(&seats, |_| true),
            airplane,
            seats,
        }),
    ))
}

/// GET /v1/airplanes/{airplane_id}
pub async fn get_airplane(
    State(state): State<AppState>,
    Path(airplane_id): Path<Uuid>,
) -> Result<Json<AirplaneDetailResponse>, AppError> {
    let (airplane, seats) = load_airplane(&state, airplane_id).await?;

    Ok(Json(AirplaneDetailResponse {
        seat_counts: SeatCounts::tally(&seats, |_| true),
        airplane,
        seats,
    }))
}

/// PUT /v1/seats/{seat_id}/status
pub async fn update_seat_status(
    State(state): State<AppState>,
    Path(seat_id): Path<Uuid>,
    Json(req): Json<UpdateSeatStatusRequest>,
) -> Result<StatusCode, AppError> {
    if state.flight_repo.update_seat_status(seat_id, req.status).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFoundError(format!("Seat {} not found", seat_id)))
    }
}

/// GET /v1/airplanes/{airplane_id}/stats
pub async fn get_airplane_stats(
    State(state): State<AppState>,
    Path(airplane_id): Path<Uuid>,
) -> Result<Json<AirplaneStatsResponse>, AppError> {
    let (airplane, seats) = load_airplane(&state, airplane_id).await?;

    Ok(Json(AirplaneStatsResponse {
        stats: OccupancyStats::from_seats(&seats),
        airplane,
    }))
}

// ============================================================================
// Loaders
// ============================================================================

/// Non-numeric pages mean the first page. Any other integer is passed on,
/// with zero and negative numbers mapped to 0 so they clamp like any other
/// out-of-range page.
fn parse_page(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(page) => usize::try_from(page).unwrap_or(0),
        Err(_) => 1,
    }
}

async fn load_airplane(state: &AppState, airplane_id: Uuid) -> Result<(Airplane, Vec<Seat>), AppError> {
    let airplane = state
        .flight_repo
        .get_airplane(airplane_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Airplane {} not found", airplane_id)))?;
    let seats = state.flight_repo.seats_for_airplane(airplane_id).await?;
    Ok((airplane, seats))
}

async fn load_flight(state: &AppState, flight_id: Uuid) -> Result<(Flight, Airplane, Vec<Seat>), AppError> {
    let flight = state
        .flight_repo
        .get_flight(flight_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Flight {} not found", flight_id)))?;
    let (airplane, seats) = load_airplane(state, flight.airplane_id).await?;
    Ok((flight, airplane, seats))
}

/// Seat elements for a flight, priced with its base fare.
pub(crate) async fn seat_map(state: &AppState, flight_id: Uuid) -> Result<(Flight, Vec<SeatElement>), AppError> {
    let (flight, _, seats) = load_flight(state, flight_id).await?;
    let elements = seats
        .iter()
        .map(|seat| SeatElement::from_seat(seat, flight.base_price))
        .collect();
    Ok((flight, elements))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page("2"), 2);
        assert_eq!(parse_page(" 3 "), 3);
        assert_eq!(parse_page("abc"), 1);
        assert_eq!(parse_page("0"), 0);
        assert_eq!(parse_page("-1"), 0);
    }
}
