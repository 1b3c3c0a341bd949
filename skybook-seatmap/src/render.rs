use serde::Serialize;
use skybook_core::Money;

use crate::element::SeatElement;

pub const FIRST_CLASS_BENEFITS: &str = "Gourmet meal, premium drinks, reclining seat, extra baggage";
pub const BUSINESS_CLASS_BENEFITS: &str = "Enhanced meal, drinks, comfortable seat, additional baggage";
pub const ECONOMY_CLASS_BENEFITS: &str = "Snack, drink, standard carry-on baggage";
pub const DEFAULT_BENEFITS: &str = "Standard class.";

/// Benefits blurb shown for a class tag. Total: unknown tags get the default.
pub fn class_benefits(class_tag: &str) -> &'static str {
    match class_tag {
        "first" => FIRST_CLASS_BENEFITS,
        "business" => BUSINESS_CLASS_BENEFITS,
        "economy" => ECONOMY_CLASS_BENEFITS,
        _ => DEFAULT_BENEFITS,
    }
}

/// Price with exactly two decimal digits, e.g. `150.00`.
pub fn format_price(price: Money) -> String {
    price.to_string()
}

pub fn format_currency(price: Money) -> String {
    format!("${}", format_price(price))
}

/// Declarative contents of the seat info panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatInfoView {
    pub seat_number: String,
    pub class_tag: String,
    pub class_label: String,
    pub price: String,
    pub benefits: String,
}

pub fn render_seat_info(seat: &SeatElement) -> SeatInfoView {
    SeatInfoView {
        seat_number: seat.number.clone(),
        class_tag: seat.class_tag.tag().to_string(),
        class_label: seat.class_tag.label().to_string(),
        price: format_currency(seat.price),
        benefits: class_benefits(seat.class_tag.tag()).to_string(),
    }
}

/// One change to apply to the page, in the order returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiPatch {
    Deselect { seat_id: String },
    Select { seat_id: String },
    SetSubmissionValue { value: String },
    EnableReservation,
    RenderInfo { view: SeatInfoView },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::StateTag;
    use skybook_core::SeatClass;

    #[test]
    fn test_benefits_lookup_is_total() {
        assert_eq!(class_benefits("first"), FIRST_CLASS_BENEFITS);
        assert_eq!(class_benefits("business"), BUSINESS_CLASS_BENEFITS);
        assert_eq!(class_benefits("economy"), ECONOMY_CLASS_BENEFITS);

        for tag in ["", "First", "premium_economy", "🛫"] {
            assert_eq!(class_benefits(tag), DEFAULT_BENEFITS);
        }
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_price(Money::from_units(150)), "150.00");
        assert_eq!(format_price(Money::from_decimal(99.5)), "99.50");
        assert_eq!(format_currency(Money::from_decimal(90.0)), "$90.00");
    }

    #[test]
    fn test_render_other_class() {
        let seat = SeatElement::new(
            "C9",
            "9C",
            SeatClass::Other("crew".to_string()),
            Money::from_cents(1234),
            StateTag::Available,
        );
        let view = render_seat_info(&seat);

        assert_eq!(view.seat_number, "9C");
        assert_eq!(view.class_label, "crew");
        assert_eq!(view.price, "$12.34");
        assert_eq!(view.benefits, DEFAULT_BENEFITS);
    }

    #[test]
    fn test_patch_wire_shape() {
        let patch = UiPatch::SetSubmissionValue { value: "A1".to_string() };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"op": "set_submission_value", "value": "A1"}));

        let json = serde_json::to_value(&UiPatch::EnableReservation).unwrap();
        assert_eq!(json, serde_json::json!({"op": "enable_reservation"}));
    }
}
