use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use skybook_core::{FlightRepository, PassengerRepository};
use skybook_seatmap::SeatPicker;
use skybook_store::app_config::SeatmapConfig;
use tokio::sync::RwLock;
use uuid::Uuid;

/// One open seat map page.
pub struct PickerSession {
    pub flight_id: Uuid,
    pub picker: SeatPicker,
    pub last_seen: DateTime<Utc>,
}

impl PickerSession {
    pub fn new(flight_id: Uuid, picker: SeatPicker) -> Self {
        Self {
            flight_id,
            picker,
            last_seen: Utc::now(),
        }
    }

    /// A session nobody has touched for `ttl` counts as an unloaded page.
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen >= ttl
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }
}

pub type SessionMap = Arc<RwLock<HashMap<Uuid, PickerSession>>>;

#[derive(Clone)]
pub struct AppState {
    pub flight_repo: Arc<dyn FlightRepository>,
    pub passenger_repo: Arc<dyn PassengerRepository>,
    pub sessions: SessionMap,
    pub seatmap: SeatmapConfig,
}

impl AppState {
    pub fn new(
        flight_repo: Arc<dyn FlightRepository>,
        passenger_repo: Arc<dyn PassengerRepository>,
        seatmap: SeatmapConfig,
    ) -> Self {
        Self {
            flight_repo,
            passenger_repo,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            seatmap,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        let seconds = i64::try_from(self.seatmap.session_ttl_seconds).unwrap_or(i64::MAX);
        Duration::seconds(seconds.min(i64::MAX / 1000))
    }
}

/// Drops every expired session and returns how many were removed.
pub fn evict_expired(sessions: &mut HashMap<Uuid, PickerSession>, ttl: Duration) -> usize {
    let now = Utc::now();
    let before = sessions.len();
    sessions.retain(|_, session| !session.is_expired(now, ttl));
    before - sessions.len()
}
