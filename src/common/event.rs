use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An event the domain hands to the ledger for publication.
///
/// Implementations must be pure functions of committed state: no clocks, no
/// randomness. Identity and timestamps are assigned by the ledger on commit.
pub trait DomainEvent: Send + Sync {
    fn event_name(&self) -> &'static str;
    fn aggregate_id(&self) -> &str;
    fn payload(&self) -> &[u8];
}

/// An event as observed by subscribers after the ledger has accepted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedEvent {
    pub event_id: Uuid,
    pub name: String,
    pub payload: Vec<u8>,
    pub committed_at: DateTime<Utc>,
}

impl CommittedEvent {
    pub fn new(name: &str, payload: &[u8]) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            name: name.to_string(),
            payload: payload.to_vec(),
            committed_at: Utc::now(),
        }
    }
}
