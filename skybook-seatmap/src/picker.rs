use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::element::{SeatElement, StateTag};
use crate::render::{format_currency, render_seat_info, SeatInfoView, UiPatch};

/// Optional page targets the picker writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerTargets {
    pub submission_field: bool,
    pub reservation_button: bool,
    pub info_panel: bool,
}

impl Default for PickerTargets {
    fn default() -> Self {
        Self {
            submission_field: true,
            reservation_button: true,
            info_panel: true,
        }
    }
}

impl PickerTargets {
    /// A bare seat map with no form and no panel.
    pub fn none() -> Self {
        Self {
            submission_field: false,
            reservation_button: false,
            info_panel: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("This seat is not available")]
    SeatUnavailable { seat_id: String },

    #[error("Unknown seat: {0}")]
    UnknownSeat(String),

    #[error("Duplicate seat id on map: {0}")]
    DuplicateSeat(String),
}

#[derive(Debug, Default)]
struct SubmissionField {
    value: String,
}

#[derive(Debug)]
struct ReservationButton {
    disabled: bool,
}

#[derive(Debug, Default)]
struct InfoPanel {
    content: Option<SeatInfoView>,
}

/// Seat selection for one seat map, alive for the lifetime of one page.
///
/// Holds at most one selected seat. Every element's `selected` flag is kept
/// equal to "this element is the current selection".
#[derive(Debug)]
pub struct SeatPicker {
    seats: Vec<SeatElement>,
    index: HashMap<String, usize>,
    selection: Option<usize>,
    submission: Option<SubmissionField>,
    button: Option<ReservationButton>,
    panel: Option<InfoPanel>,
}

/// Read-only view of a picker, as sent to clients.
#[derive(Debug, Clone, Serialize)]
pub struct PickerSnapshot {
    pub seats: Vec<SeatElement>,
    pub selected_seat: Option<String>,
    pub submission_value: Option<String>,
    pub reservation_enabled: Option<bool>,
    pub info_panel: Option<SeatInfoView>,
}

impl SeatPicker {
    /// Binds click handlers and price tooltips to every available seat.
    /// Any incoming selection or handler flags are reset.
    pub fn initialize(seats: Vec<SeatElement>, targets: PickerTargets) -> Result<Self, PickerError> {
        let mut index = HashMap::with_capacity(seats.len());
        let mut seats = seats;

        for (i, seat) in seats.iter_mut().enumerate() {
            if index.insert(seat.seat_id.clone(), i).is_some() {
                return Err(PickerError::DuplicateSeat(seat.seat_id.clone()));
            }

            seat.selected = false;
            if seat.state == StateTag::Available {
                seat.clickable = true;
                seat.tooltip = Some(format!("Price: {}", format_currency(seat.price)));
            } else {
                seat.clickable = false;
                seat.tooltip = None;
            }
        }

        Ok(Self {
            seats,
            index,
            selection: None,
            submission: targets.submission_field.then(SubmissionField::default),
            button: targets
                .reservation_button
                .then_some(ReservationButton { disabled: true }),
            panel: targets.info_panel.then(InfoPanel::default),
        })
    }

    pub fn is_available(seat: &SeatElement) -> bool {
        seat.is_available()
    }

    /// Click entry point. Seats without a handler ignore the click.
    pub fn click(&mut self, seat_id: &str) -> Result<Vec<UiPatch>, PickerError> {
        let idx = self.position(seat_id)?;
        if !self.seats[idx].clickable {
            debug!(seat_id, "click on seat without handler ignored");
            return Ok(Vec::new());
        }
        self.select_at(idx)
    }

    /// Makes `seat_id` the single selected seat and updates every target.
    ///
    /// On an unavailable seat nothing changes and the returned error carries
    /// the notice shown to the user.
    pub fn select_seat(&mut self, seat_id: &str) -> Result<Vec<UiPatch>, PickerError> {
        let idx = self.position(seat_id)?;
        self.select_at(idx)
    }

    fn select_at(&mut self, idx: usize) -> Result<Vec<UiPatch>, PickerError> {
        if !Self::is_available(&self.seats[idx]) {
            warn!(seat_id = %self.seats[idx].seat_id, "selection of unavailable seat rejected");
            return Err(PickerError::SeatUnavailable {
                seat_id: self.seats[idx].seat_id.clone(),
            });
        }

        let mut patches = Vec::new();

        // Previous holder loses the tag before the new seat gets it.
        if let Some(prev) = self.selection.take() {
            if prev != idx {
                self.seats[prev].selected = false;
                patches.push(UiPatch::Deselect {
                    seat_id: self.seats[prev].seat_id.clone(),
                });
            }
        }

        let seat = &mut self.seats[idx];
        seat.selected = true;
        self.selection = Some(idx);
        patches.push(UiPatch::Select {
            seat_id: seat.seat_id.clone(),
        });

        if let Some(field) = self.submission.as_mut() {
            field.value = seat.seat_id.clone();
            patches.push(UiPatch::SetSubmissionValue {
                value: field.value.clone(),
            });
        }

        if let Some(button) = self.button.as_mut() {
            button.disabled = false;
            patches.push(UiPatch::EnableReservation);
        }

        let view = render_seat_info(seat);
        match self.panel.as_mut() {
            Some(panel) => {
                panel.content = Some(view.clone());
                patches.push(UiPatch::RenderInfo { view });
            }
            None => debug!(seat_id = %seat.seat_id, "no info panel on page, skipping render"),
        }

        Ok(patches)
    }

    fn position(&self, seat_id: &str) -> Result<usize, PickerError> {
        self.index
            .get(seat_id)
            .copied()
            .ok_or_else(|| PickerError::UnknownSeat(seat_id.to_string()))
    }

    pub fn seats(&self) -> &[SeatElement] {
        &self.seats
    }

    pub fn seat(&self, seat_id: &str) -> Option<&SeatElement> {
        self.index.get(seat_id).map(|&i| &self.seats[i])
    }

    pub fn selected(&self) -> Option<&SeatElement> {
        self.selection.map(|i| &self.seats[i])
    }

    /// `None` when the page has no submission field.
    pub fn submission_value(&self) -> Option<&str> {
        self.submission.as_ref().map(|f| f.value.as_str())
    }

    /// `None` when the page has no reservation button.
    pub fn reservation_enabled(&self) -> Option<bool> {
        self.button.as_ref().map(|b| !b.disabled)
    }

    pub fn info_panel(&self) -> Option<&SeatInfoView> {
        self.panel.as_ref().and_then(|p| p.content.as_ref())
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            seats: self.seats.clone(),
            selected_seat: self.selected().map(|s| s.seat_id.clone()),
            submission_value: self.submission_value().map(str::to_string),
            reservation_enabled: self.reservation_enabled(),
            info_panel: self.info_panel().cloned(),
        }
    }
}
