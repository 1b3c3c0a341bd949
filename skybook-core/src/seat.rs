use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flight::Airplane;
use crate::money::Money;
use crate::{CoreError, CoreResult};

const COLUMN_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Cabin class of a seat.
///
/// Unknown tags are kept verbatim so that a seat map coming from another
/// source still round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeatClass {
    First,
    Business,
    Economy,
    Other(String),
}

impl SeatClass {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "first" => SeatClass::First,
            "business" => SeatClass::Business,
            "economy" => SeatClass::Economy,
            other => SeatClass::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            SeatClass::First => "first",
            SeatClass::Business => "business",
            SeatClass::Economy => "economy",
            SeatClass::Other(tag) => tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SeatClass::First => "First Class",
            SeatClass::Business => "Business Class",
            SeatClass::Economy => "Economy Class",
            SeatClass::Other(tag) => tag,
        }
    }

    /// Class and surcharge assigned to a row when an airplane's seats are generated.
    pub fn for_row(row: u32) -> (SeatClass, Money) {
        match row {
            0..=2 => (SeatClass::First, Money::from_units(100)),
            3..=5 => (SeatClass::Business, Money::from_units(50)),
            _ => (SeatClass::Economy, Money::ZERO),
        }
    }
}

impl From<String> for SeatClass {
    fn from(tag: String) -> Self {
        SeatClass::parse(&tag)
    }
}

impl From<SeatClass> for String {
    fn from(class: SeatClass) -> Self {
        class.tag().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Available,
    Reserved,
    Occupied,
    Maintenance,
}

impl SeatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Reserved => "reserved",
            SeatStatus::Occupied => "occupied",
            SeatStatus::Maintenance => "maintenance",
        }
    }
}

/// A physical seat on an airplane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: Uuid,
    pub airplane_id: Uuid,
    /// Row number followed by the column letter, e.g. `12A`
    pub number: String,
    pub row: u32,
    pub column: char,
    pub class: SeatClass,
    pub status: SeatStatus,
    pub extra_price: Money,
}

impl Seat {
    /// Ticket price of this seat on a flight with the given base fare.
    pub fn price_on(&self, base_price: Money) -> Money {
        base_price + self.extra_price
    }
}

/// Builds the full seat layout for an airplane, row by row.
pub fn generate_seats(airplane: &Airplane) -> CoreResult<Vec<Seat>> {
    if airplane.columns as usize > COLUMN_LETTERS.len() {
        return Err(CoreError::ValidationError(format!(
            "airplane {} has {} columns, at most {} are supported",
            airplane.registration,
            airplane.columns,
            COLUMN_LETTERS.len()
        )));
    }

    let count = airplane.rows.checked_mul(airplane.columns).ok_or_else(|| {
        CoreError::ValidationError(format!(
            "airplane {} has too many seats to lay out",
            airplane.registration
        ))
    })?;

    let mut seats = Vec::with_capacity(count as usize);
    for row in 1..=airplane.rows {
        let (class, extra_price) = SeatClass::for_row(row);
        for col in 0..airplane.columns as usize {
            let column = COLUMN_LETTERS[col] as char;
            seats.push(Seat {
                id: Uuid::new_v4(),
                airplane_id: airplane.id,
                number: format!("{}{}", row, column),
                row,
                column,
                class: class.clone(),
                status: SeatStatus::Available,
                extra_price,
            });
        }
    }

    tracing::debug!(airplane_id = %airplane.id, count = seats.len(), "seat layout generated");
    Ok(seats)
}

/// Seat tally per cabin class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeatCounts {
    pub first_class: usize,
    pub business_class: usize,
    pub economy_class: usize,
}

impl SeatCounts {
    pub fn tally<'a, I, F>(seats: I, mut include: F) -> Self
    where
        I: IntoIterator<Item = &'a Seat>,
        F: FnMut(&Seat) -> bool,
    {
        let mut counts = SeatCounts::default();
        for seat in seats.into_iter().filter(|s| include(*s)) {
            match seat.class {
                SeatClass::First => counts.first_class += 1,
                SeatClass::Business => counts.business_class += 1,
                SeatClass::Economy => counts.economy_class += 1,
                SeatClass::Other(_) => {}
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.first_class + self.business_class + self.economy_class
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OccupancyStats {
    pub total_seats: usize,
    pub occupied_seats: usize,
    pub occupancy_percent: f64,
}

impl OccupancyStats {
    pub fn from_seats(seats: &[Seat]) -> Self {
        let total_seats = seats.len();
        let occupied_seats = seats
            .iter()
            .filter(|s| s.status == SeatStatus::Occupied)
            .count();

        let occupancy_percent = if total_seats == 0 {
            0.0
        } else {
            occupied_seats as f64 / total_seats as f64 * 100.0
        };

        Self {
            total_seats,
            occupied_seats,
            occupancy_percent,
        }
    }
}
