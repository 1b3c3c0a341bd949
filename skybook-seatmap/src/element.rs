use serde::{Deserialize, Serialize};
use skybook_core::{Money, Seat, SeatClass, SeatStatus};

/// Availability tag carried by a seat element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTag {
    Available,
    Occupied,
}

/// One seat as it appears on the rendered seat map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatElement {
    pub seat_id: String,
    pub number: String,
    pub class_tag: SeatClass,
    pub price: Money,
    pub state: StateTag,
    #[serde(default)]
    pub selected: bool,
    /// Hover text, set only on seats that accept clicks
    #[serde(default)]
    pub tooltip: Option<String>,
    /// Whether a click handler is bound
    #[serde(default)]
    pub clickable: bool,
}

impl SeatElement {
    pub fn new(seat_id: &str, number: &str, class_tag: SeatClass, price: Money, state: StateTag) -> Self {
        Self {
            seat_id: seat_id.to_string(),
            number: number.to_string(),
            class_tag,
            price,
            state,
            selected: false,
            tooltip: None,
            clickable: false,
        }
    }

    /// Projects a stored seat onto the map of a flight with the given base fare.
    /// Reserved and maintenance seats are shown as occupied.
    pub fn from_seat(seat: &Seat, base_price: Money) -> Self {
        let state = match seat.status {
            SeatStatus::Available => StateTag::Available,
            _ => StateTag::Occupied,
        };

        Self::new(
            &seat.id.to_string(),
            &seat.number,
            seat.class.clone(),
            seat.price_on(base_price),
            state,
        )
    }

    /// True iff the seat is not tagged occupied. Never mutates the element.
    pub fn is_available(&self) -> bool {
        self.state != StateTag::Occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn stored(status: SeatStatus) -> Seat {
        Seat {
            id: Uuid::new_v4(),
            airplane_id: Uuid::new_v4(),
            number: "4C".to_string(),
            row: 4,
            column: 'C',
            class: SeatClass::Business,
            status,
            extra_price: Money::from_units(50),
        }
    }

    #[test]
    fn test_projection_adds_surcharge() {
        let seat = stored(SeatStatus::Available);
        let element = SeatElement::from_seat(&seat, Money::from_units(120));

        assert_eq!(element.seat_id, seat.id.to_string());
        assert_eq!(element.number, "4C");
        assert_eq!(element.price, Money::from_units(170));
        assert_eq!(element.state, StateTag::Available);
        assert!(!element.selected);
        assert!(!element.clickable);
    }

    #[test]
    fn test_non_available_statuses_project_as_occupied() {
        for status in [SeatStatus::Reserved, SeatStatus::Occupied, SeatStatus::Maintenance] {
            let element = SeatElement::from_seat(&stored(status), Money::ZERO);
            assert_eq!(element.state, StateTag::Occupied);
            assert!(!element.is_available());
        }
    }

    #[test]
    fn test_is_available_is_idempotent() {
        let element = SeatElement::new("A1", "A1", SeatClass::First, Money::from_units(150), StateTag::Available);
        let before = serde_json::to_value(&element).unwrap();
        assert!(element.is_available());
        assert!(element.is_available());
        assert_eq!(serde_json::to_value(&element).unwrap(), before);
    }
}
