use async_trait::async_trait;
use skybook_core::{
    generate_seats, Airplane, CoreError, CoreResult, Flight, FlightRepository, Seat, SeatStatus,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    airplanes: HashMap<Uuid, Airplane>,
    flights: HashMap<Uuid, Flight>,
    /// Seat layouts keyed by airplane, kept in row/column order
    seats: HashMap<Uuid, Vec<Seat>>,
}

/// Process-local flight store.
#[derive(Default)]
pub struct InMemoryFlightRepository {
    tables: RwLock<Tables>,
}

impl InMemoryFlightRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlightRepository for InMemoryFlightRepository {
    async fn list_airplanes(&self) -> CoreResult<Vec<Airplane>> {
        let tables = self.tables.read().await;
        let mut airplanes: Vec<Airplane> = tables.airplanes.values().cloned().collect();
        airplanes.sort_by(|a, b| a.model.cmp(&b.model));
        Ok(airplanes)
    }

    async fn get_airplane(&self, id: Uuid) -> CoreResult<Option<Airplane>> {
        Ok(self.tables.read().await.airplanes.get(&id).cloned())
    }

    async fn create_airplane(&self, airplane: Airplane) -> CoreResult<Airplane> {
        let seats = generate_seats(&airplane)?;
        let mut tables = self.tables.write().await;

        if tables
            .airplanes
            .values()
            .any(|a| a.registration == airplane.registration)
        {
            return Err(CoreError::Conflict(format!(
                "registration {} already in use",
                airplane.registration
            )));
        }

        info!(
            airplane_id = %airplane.id,
            model = %airplane.model,
            seats = seats.len(),
            "airplane created"
        );
        tables.seats.insert(airplane.id, seats);
        tables.airplanes.insert(airplane.id, airplane.clone());
        Ok(airplane)
    }

    async fn list_flights(&self) -> CoreResult<Vec<Flight>> {
        Ok(self.tables.read().await.flights.values().cloned().collect())
    }

    async fn get_flight(&self, id: Uuid) -> CoreResult<Option<Flight>> {
        Ok(self.tables.read().await.flights.get(&id).cloned())
    }

    async fn create_flight(&self, flight: Flight) -> CoreResult<Flight> {
        let mut tables = self.tables.write().await;

        if !tables.airplanes.contains_key(&flight.airplane_id) {
            return Err(CoreError::NotFound(format!("airplane {}", flight.airplane_id)));
        }
        if tables
            .flights
            .values()
            .any(|f| f.flight_number == flight.flight_number)
        {
            return Err(CoreError::Conflict(format!(
                "flight number {} already exists",
                flight.flight_number
            )));
        }

        info!(flight_id = %flight.id, flight_number = %flight.flight_number, "flight created");
        tables.flights.insert(flight.id, flight.clone());
        Ok(flight)
    }

    async fn seats_for_airplane(&self, airplane_id: Uuid) -> CoreResult<Vec<Seat>> {
        Ok(self
            .tables
            .read()
            .await
            .seats
            .get(&airplane_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_seat_status(&self, seat_id: Uuid, status: SeatStatus) -> CoreResult<bool> {
        let mut tables = self.tables.write().await;
        let seat = tables
            .seats
            .values_mut()
            .flat_map(|layout| layout.iter_mut())
            .find(|s| s.id == seat_id);

        match seat {
            Some(seat) => {
                info!(%seat_id, number = %seat.number, status = status.as_str(), "seat status updated");
                seat.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use skybook_core::Money;

    async fn repo_with_plane() -> (InMemoryFlightRepository, Airplane) {
        let repo = InMemoryFlightRepository::new();
        let plane = Airplane::new("Boeing 737-800", "LV-ABC", 10, 6).unwrap();
        let plane = repo.create_airplane(plane).await.unwrap();
        (repo, plane)
    }

    #[tokio::test]
    async fn test_airplane_gets_seats() {
        let (repo, plane) = repo_with_plane().await;
        let seats = repo.seats_for_airplane(plane.id).await.unwrap();
        assert_eq!(seats.len(), 60);
        assert_eq!(seats[0].number, "1A");

        let dup = Airplane::new("Boeing 737-800", "LV-ABC", 2, 2).unwrap();
        assert!(matches!(repo.create_airplane(dup).await, Err(CoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_flight_requires_airplane_and_unique_number() {
        let (repo, plane) = repo_with_plane().await;
        let departure = Utc::now() + Duration::days(1);
        let make = |airplane_id| {
            Flight::new(
                airplane_id,
                "AR1000",
                "Buenos Aires",
                "Mendoza",
                departure,
                departure + Duration::hours(2),
                Money::from_units(150),
            )
            .unwrap()
        };

        let orphan = repo.create_flight(make(Uuid::new_v4())).await;
        assert!(matches!(orphan, Err(CoreError::NotFound(_))));

        let flight = repo.create_flight(make(plane.id)).await.unwrap();
        assert!(repo.get_flight(flight.id).await.unwrap().is_some());
        assert!(matches!(repo.create_flight(make(plane.id)).await, Err(CoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_seat_status() {
        let (repo, plane) = repo_with_plane().await;
        let seat_id = repo.seats_for_airplane(plane.id).await.unwrap()[7].id;

        assert!(repo.update_seat_status(seat_id, SeatStatus::Occupied).await.unwrap());
        let seats = repo.seats_for_airplane(plane.id).await.unwrap();
        assert_eq!(seats[7].status, SeatStatus::Occupied);

        assert!(!repo.update_seat_status(Uuid::new_v4(), SeatStatus::Occupied).await.unwrap());
    }
}
