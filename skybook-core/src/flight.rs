use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airplane {
    pub id: Uuid,
    pub model: String,
    pub registration: String,
    pub capacity: u32,
    pub rows: u32,
    pub columns: u32,
    pub active: bool,
}

impl Airplane {
    pub fn new(model: &str, registration: &str, rows: u32, columns: u32) -> CoreResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(CoreError::ValidationError(
                "rows and columns must be greater than zero".to_string(),
            ));
        }

        let capacity = rows.checked_mul(columns).ok_or_else(|| {
            CoreError::ValidationError(format!("{} rows of {} seats is too many", rows, columns))
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            model: model.to_string(),
            registration: registration.to_string(),
            capacity,
            rows,
            columns,
            active: true,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightStatus {
    Scheduled,
    Boarding,
    InFlight,
    Landed,
    Cancelled,
    Delayed,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::Scheduled => "scheduled",
            FlightStatus::Boarding => "boarding",
            FlightStatus::InFlight => "in_flight",
            FlightStatus::Landed => "landed",
            FlightStatus::Cancelled => "cancelled",
            FlightStatus::Delayed => "delayed",
        }
    }

    /// Only flights still open for seat selection appear in listings.
    pub fn is_listed(&self) -> bool {
        matches!(self, FlightStatus::Scheduled | FlightStatus::Boarding)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    pub airplane_id: Uuid,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub status: FlightStatus,
    pub base_price: Money,
}

impl Flight {
    pub fn new(
        airplane_id: Uuid,
        flight_number: &str,
        origin: &str,
        destination: &str,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
        base_price: Money,
    ) -> CoreResult<Self> {
        let (flight_number, origin, destination) =
            (flight_number.trim(), origin.trim(), destination.trim());
        if flight_number.is_empty() || origin.is_empty() || destination.is_empty() {
            return Err(CoreError::ValidationError(
                "flight number, origin and destination are required".to_string(),
            ));
        }
        if base_price < Money::ZERO {
            return Err(CoreError::ValidationError(format!(
                "flight {} has a negative base price",
                flight_number
            )));
        }
        if arrival <= departure {
            return Err(CoreError::ValidationError(format!(
                "flight {} arrives before it departs",
                flight_number
            )));
        }
        if origin.eq_ignore_ascii_case(destination) {
            return Err(CoreError::ValidationError(
                "origin and destination must differ".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            airplane_id,
            flight_number: flight_number.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure,
            arrival,
            status: FlightStatus::Scheduled,
            base_price,
        })
    }

    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}

/// Query filters for the flight listing.
///
/// Empty strings behave like absent filters, and dates that do not parse as
/// `YYYY-MM-DD` are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<String>,
}

impl FlightFilter {
    pub fn matches(&self, flight: &Flight) -> bool {
        if !flight.status.is_listed() {
            return false;
        }
        if let Some(origin) = non_empty(&self.origin) {
            if !contains_ignore_case(&flight.origin, origin) {
                return false;
            }
        }
        if let Some(destination) = non_empty(&self.destination) {
            if !contains_ignore_case(&flight.destination, destination) {
                return false;
            }
        }

        let departure_day = flight.departure.date_naive();
        if let Some(from) = parse_day(&self.date_from) {
            if departure_day < from {
                return false;
            }
        }
        if let Some(to) = parse_day(&self.date_to) {
            if departure_day > to {
                return false;
            }
        }

        match non_empty(&self.status) {
            Some(status) => flight.status.as_str() == status,
            None => true,
        }
    }

    /// Applies the filter and orders the result by departure, earliest first.
    pub fn apply(&self, flights: Vec<Flight>) -> Vec<Flight> {
        let mut matched: Vec<Flight> = flights.into_iter().filter(|f| self.matches(f)).collect();
        matched.sort_by_key(|f| f.departure);
        matched
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn parse_day(value: &Option<String>) -> Option<NaiveDate> {
    non_empty(value).and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub const DEFAULT_SIZE: usize = 10;

    /// Slices `items` into the requested page (1-based). A missing page is
    /// the first page; a page past either end clamps to the last page.
    pub fn paginate(items: Vec<T>, page: Option<usize>, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page).max(1);

        let page = match page {
            None => 1,
            Some(p) if p < 1 || p > total_pages => total_pages,
            Some(p) => p,
        };

        let items = items
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        Self {
            items,
            page,
            total_pages,
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn flight(number: &str, origin: &str, destination: &str, day: u32) -> Flight {
        let departure = Utc.with_ymd_and_hms(2026, 11, day, 8, 0, 0).unwrap();
        Flight::new(
            Uuid::new_v4(),
            number,
            origin,
            destination,
            departure,
            departure + Duration::hours(2),
            Money::from_units(150),
        )
        .unwrap()
    }

    #[test]
    fn test_flight_validation() {
        let departure = Utc.with_ymd_and_hms(2026, 11, 3, 8, 0, 0).unwrap();
        let err = Flight::new(
            Uuid::new_v4(),
            "AR1000",
            "Buenos Aires",
            "Mendoza",
            departure,
            departure,
            Money::ZERO,
        );
        assert!(err.is_err());

        let err = Flight::new(
            Uuid::new_v4(),
            " ",
            "Buenos Aires",
            "Mendoza",
            departure,
            departure + Duration::hours(1),
            Money::ZERO,
        );
        assert!(matches!(err, Err(CoreError::ValidationError(_))));

        let err = Flight::new(
            Uuid::new_v4(),
            "AR1000",
            "Buenos Aires",
            "Mendoza",
            departure,
            departure + Duration::hours(1),
            Money::from_cents(-1),
        );
        assert!(err.is_err());

        let ok = flight("AR1001", "Buenos Aires", "Córdoba", 3);
        assert_eq!(ok.duration(), Duration::hours(2));
        assert_eq!(ok.status, FlightStatus::Scheduled);
    }

    #[test]
    fn test_airplane_capacity_overflow_rejected() {
        let plane = Airplane::new("Airbus A320", "LV-DEF", 30, 6).unwrap();
        assert_eq!(plane.capacity, 180);

        let err = Airplane::new("Airbus A320", "LV-XYZ", u32::MAX, 2);
        assert!(matches!(err, Err(CoreError::ValidationError(_))));
        assert!(Airplane::new("Airbus A320", "LV-XYZ", 0, 6).is_err());
    }

    #[test]
    fn test_filter_by_city_and_dates() {
        let flights = vec![
            flight("AR1002", "Buenos Aires", "Bariloche", 5),
            flight("AR1000", "Buenos Aires", "Mendoza", 2),
            flight("AR1008", "Córdoba", "Mendoza", 9),
        ];

        let filter = FlightFilter {
            destination: Some("mendoza".to_string()),
            ..Default::default()
        };
        let found = filter.apply(flights.clone());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].flight_number, "AR1000");

        let filter = FlightFilter {
            origin: Some("aires".to_string()),
            date_from: Some("2026-11-03".to_string()),
            date_to: Some("not-a-date".to_string()),
            ..Default::default()
        };
        let found = filter.apply(flights);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].flight_number, "AR1002");
    }

    #[test]
    fn test_unlisted_statuses_hidden() {
        let mut landed = flight("AR1003", "Buenos Aires", "Salta", 4);
        landed.status = FlightStatus::Landed;
        let mut boarding = flight("AR1004", "Buenos Aires", "Salta", 4);
        boarding.status = FlightStatus::Boarding;

        let all = FlightFilter::default().apply(vec![landed.clone(), boarding.clone()]);
        assert_eq!(all.len(), 1);

        let filter = FlightFilter {
            status: Some("landed".to_string()),
            ..Default::default()
        };
        assert!(filter.apply(vec![landed, boarding]).is_empty());
    }

    #[test]
    fn test_pagination_clamps() {
        let items: Vec<u32> = (1..=23).collect();

        let first = Page::paginate(items.clone(), None, 10);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);

        let last = Page::paginate(items.clone(), Some(3), 10);
        assert_eq!(last.items, vec![21, 22, 23]);

        let beyond = Page::paginate(items.clone(), Some(99), 10);
        assert_eq!(beyond.page, 3);

        let empty = Page::paginate(Vec::<u32>::new(), Some(2), 10);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }
}
