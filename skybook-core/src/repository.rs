use async_trait::async_trait;
use uuid::Uuid;

use crate::flight::{Airplane, Flight};
use crate::passenger::Passenger;
use crate::seat::{Seat, SeatStatus};
use crate::CoreResult;

/// Repository trait for airplane, flight and seat data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn list_airplanes(&self) -> CoreResult<Vec<Airplane>>;

    async fn get_airplane(&self, id: Uuid) -> CoreResult<Option<Airplane>>;

    /// Stores the airplane together with its generated seat layout.
    async fn create_airplane(&self, airplane: Airplane) -> CoreResult<Airplane>;

    async fn list_flights(&self) -> CoreResult<Vec<Flight>>;

    async fn get_flight(&self, id: Uuid) -> CoreResult<Option<Flight>>;

    async fn create_flight(&self, flight: Flight) -> CoreResult<Flight>;

    /// Seats of an airplane ordered by row, then column.
    async fn seats_for_airplane(&self, airplane_id: Uuid) -> CoreResult<Vec<Seat>>;

    /// Returns `false` when no seat has the given id.
    async fn update_seat_status(&self, seat_id: Uuid, status: SeatStatus) -> CoreResult<bool>;
}

/// Repository trait for the passenger registry
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    /// Fails with `CoreError::Conflict` when the document number or email is taken.
    async fn create_passenger(&self, passenger: Passenger) -> CoreResult<Passenger>;

    async fn get_passenger(&self, id: Uuid) -> CoreResult<Option<Passenger>>;

    /// Replaces the stored passenger with the same id, with the same
    /// uniqueness rules as `create_passenger`.
    async fn update_passenger(&self, passenger: Passenger) -> CoreResult<Passenger>;

    /// Active passengers whose name contains `name`, ignoring case, ordered by name.
    async fn search_passengers(&self, name: &str) -> CoreResult<Vec<Passenger>>;
}
