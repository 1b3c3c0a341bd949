use chrono::{DateTime, Duration, Utc};
use skybook_core::{Airplane, CoreResult, Flight, FlightRepository, Money, SeatStatus};
use tracing::info;

const AIRPLANES: &[(&str, &str, u32, u32)] = &[
    ("Boeing 737-800", "LV-ABC", 31, 6),
    ("Airbus A320", "LV-DEF", 30, 6),
    ("Boeing 787 Dreamliner", "LV-GHI", 40, 6),
];

/// origin, destination, duration in minutes, base fare in whole units
const ROUTES: &[(&str, &str, i64, i64)] = &[
    ("Buenos Aires", "Mendoza", 120, 15000),
    ("Buenos Aires", "Córdoba", 90, 12000),
    ("Buenos Aires", "Bariloche", 150, 18000),
    ("Buenos Aires", "Salta", 150, 17000),
    ("Buenos Aires", "Puerto Iguazú", 120, 16000),
    ("Buenos Aires", "Santiago de Chile", 120, 20000),
    ("Buenos Aires", "Lima", 240, 35000),
    ("Buenos Aires", "São Paulo", 180, 25000),
    ("Córdoba", "Mendoza", 60, 10000),
    ("Mendoza", "Santiago de Chile", 60, 12000),
];

/// Flights whose first free seat is already taken in the demo data.
const PRE_RESERVED_FLIGHTS: usize = 4;

/// Loads the demo fleet and timetable, departures counted from `now`.
pub async fn seed(repo: &dyn FlightRepository, now: DateTime<Utc>) -> CoreResult<Vec<Flight>> {
    let mut airplanes = Vec::with_capacity(AIRPLANES.len());
    for &(model, registration, rows, columns) in AIRPLANES {
        let airplane = Airplane::new(model, registration, rows, columns)?;
        airplanes.push(repo.create_airplane(airplane).await?);
    }

    let mut flights = Vec::with_capacity(ROUTES.len());
    for (i, &(origin, destination, minutes, fare)) in ROUTES.iter().enumerate() {
        let airplane = &airplanes[i % airplanes.len()];
        let departure = now + Duration::days(i as i64 + 1) + Duration::hours(8);
        let flight = Flight::new(
            airplane.id,
            &format!("AR{}", 1000 + i),
            origin,
            destination,
            departure,
            departure + Duration::minutes(minutes),
            Money::from_units(fare),
        )?;
        flights.push(repo.create_flight(flight).await?);
    }

    for flight in flights.iter().take(PRE_RESERVED_FLIGHTS) {
        let seats = repo.seats_for_airplane(flight.airplane_id).await?;
        if let Some(seat) = seats.iter().find(|s| s.status == SeatStatus::Available) {
            repo.update_seat_status(seat.id, SeatStatus::Reserved).await?;
        }
    }

    info!(
        airplanes = airplanes.len(),
        flights = flights.len(),
        "demo data loaded"
    );
    Ok(flights)
}
