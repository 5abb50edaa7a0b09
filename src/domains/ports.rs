use crate::common::{composite_key, CommittedEvent, LedgerResult};
use tokio::sync::broadcast;

/// A single state entry produced by a range scan.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Cursor over a range of world state, ordered by key bytes.
///
/// Backends may hold resources for an open cursor; callers must `close` it on
/// every exit path.
pub trait StateIterator: Iterator<Item = LedgerResult<KeyValue>> + Send {
    fn close(&mut self) -> LedgerResult<()>;
}

/// Port onto the ledger runtime hosting the registry.
///
/// Every call happens inside one ordered transaction owned by the runtime, so
/// implementations need no cross-call coordination from the domain.
pub trait LedgerStub: Send + Sync {
    /// Read a plain key. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>>;

    fn put(&self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Scan every composite key under `object_type` whose leading attributes
    /// equal `attributes`.
    fn scan_by_prefix(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> LedgerResult<Box<dyn StateIterator>>;

    fn split_key(&self, key: &str) -> LedgerResult<(String, Vec<String>)> {
        composite_key::split(key)
    }

    fn create_key(&self, object_type: &str, attributes: &[&str]) -> LedgerResult<String> {
        composite_key::create(object_type, attributes)
    }

    /// Publish a named event with the current transaction.
    fn emit_event(&self, name: &str, payload: &[u8]) -> LedgerResult<()>;
}

/// Port for observers of committed events.
pub trait EventSource: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<CommittedEvent>;
}
