pub mod money;
pub mod seat;
pub mod flight;
pub mod passenger;
pub mod repository;

pub use money::Money;
pub use seat::{Seat, SeatClass, SeatStatus, SeatCounts, OccupancyStats, generate_seats};
pub use flight::{Airplane, Flight, FlightStatus, FlightFilter, Page};
pub use passenger::{DocumentType, NewPassenger, Passenger, PassengerUpdate};
pub use repository::{FlightRepository, PassengerRepository};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
