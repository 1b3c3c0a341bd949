use async_trait::async_trait;
use skybook_core::{CoreError, CoreResult, Passenger, PassengerRepository};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

/// Process-local passenger registry.
#[derive(Default)]
pub struct InMemoryPassengerRepository {
    passengers: RwLock<HashMap<Uuid, Passenger>>,
}

impl InMemoryPassengerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Document numbers and emails may belong to at most one passenger.
fn check_unique(passengers: &HashMap<Uuid, Passenger>, candidate: &Passenger) -> CoreResult<()> {
    for other in passengers.values().filter(|p| p.id != candidate.id) {
        if other.document == candidate.document {
            return Err(CoreError::Conflict(format!(
                "a passenger with document {} already exists",
                candidate.document
            )));
        }
        if other.email.eq_ignore_ascii_case(&candidate.email) {
            return Err(CoreError::Conflict(format!(
                "a passenger with email {} already exists",
                candidate.email
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl PassengerRepository for InMemoryPassengerRepository {
    async fn create_passenger(&self, passenger: Passenger) -> CoreResult<Passenger> {
        let mut passengers = self.passengers.write().await;
        check_unique(&passengers, &passenger)?;

        info!(passenger_id = %passenger.id, "passenger registered");
        passengers.insert(passenger.id, passenger.clone());
        Ok(passenger)
    }

    async fn get_passenger(&self, id: Uuid) -> CoreResult<Option<Passenger>> {
        Ok(self.passengers.read().await.get(&id).cloned())
    }

    async fn update_passenger(&self, passenger: Passenger) -> CoreResult<Passenger> {
        let mut passengers = self.passengers.write().await;
        if !passengers.contains_key(&passenger.id) {
            return Err(CoreError::NotFound(format!("passenger {}", passenger.id)));
        }
        check_unique(&passengers, &passenger)?;

        passengers.insert(passenger.id, passenger.clone());
        Ok(passenger)
    }

    async fn search_passengers(&self, name: &str) -> CoreResult<Vec<Passenger>> {
        let needle = name.trim().to_lowercase();
        let mut found: Vec<Passenger> = self
            .passengers
            .read()
            .await
            .values()
            .filter(|p| p.active && p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}
