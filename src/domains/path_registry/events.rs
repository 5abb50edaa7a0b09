use super::types::Path;
use crate::common::{CommittedEvent, DomainEvent};

pub const PATH_COMMITTED: &str = "path-committed";

#[derive(Debug, Clone, PartialEq)]
pub enum PathRegistryEvent {
    /// Carries the path exactly as persisted.
    PathCommitted { robot_id: String, payload: Vec<u8> },
}

impl PathRegistryEvent {
    pub fn path_committed(robot_id: &str, payload: &[u8]) -> Self {
        PathRegistryEvent::PathCommitted {
            robot_id: robot_id.to_string(),
            payload: payload.to_vec(),
        }
    }

    /// Decode the path carried by a committed `path-committed` event.
    /// Other events, and payloads that are not a path, yield `None`.
    pub fn decode_committed(event: &CommittedEvent) -> Option<Path> {
        if event.name != PATH_COMMITTED {
            return None;
        }
        serde_json::from_slice(&event.payload).ok()
    }
}

impl DomainEvent for PathRegistryEvent {
    fn event_name(&self) -> &'static str {
        match self {
            PathRegistryEvent::PathCommitted { .. } => PATH_COMMITTED,
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            PathRegistryEvent::PathCommitted { robot_id, .. } => robot_id,
        }
    }

    fn payload(&self) -> &[u8] {
        match self {
            PathRegistryEvent::PathCommitted { payload, .. } => payload,
        }
    }
}
