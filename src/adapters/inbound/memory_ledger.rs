use crate::common::{composite_key, CommittedEvent, LedgerError, LedgerResult};
use crate::domains::ports::{EventSource, KeyValue, LedgerStub, StateIterator};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Cursor over a snapshot of matching entries. Counts itself as open until
/// `close` is called, so leaked cursors stay visible to the owning ledger.
pub struct SnapshotIterator {
    entries: std::vec::IntoIter<KeyValue>,
    open: Arc<AtomicUsize>,
    closed: bool,
}

impl SnapshotIterator {
    pub(crate) fn new(entries: Vec<KeyValue>, open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            entries: entries.into_iter(),
            open,
            closed: false,
        }
    }
}

impl Iterator for SnapshotIterator {
    type Item = LedgerResult<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.entries.next().map(Ok)
    }
}

impl StateIterator for SnapshotIterator {
    fn close(&mut self) -> LedgerResult<()> {
        if !self.closed {
            self.closed = true;
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Collect every entry of `state` inside the composite-key range for the
/// given object type and leading attributes.
pub(crate) fn scan_range(
    state: &BTreeMap<String, Vec<u8>>,
    object_type: &str,
    attributes: &[&str],
) -> LedgerResult<Vec<KeyValue>> {
    let start = composite_key::create(object_type, attributes)?;
    let end = composite_key::range_end(&start);
    Ok(state
        .range::<str, _>((Bound::Included(start.as_str()), Bound::Excluded(end.as_str())))
        .map(|(key, value)| KeyValue {
            key: key.clone(),
            value: value.clone(),
        })
        .collect())
}

/// In-memory ledger for tests and single-process runs.
///
/// Keys are ordered byte-lexicographically, like the world state of a real
/// ledger peer.
pub struct InMemoryLedger {
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    events: RwLock<Vec<CommittedEvent>>,
    publisher: broadcast::Sender<CommittedEvent>,
    open_iterators: Arc<AtomicUsize>,
    writes: AtomicUsize,
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_event_capacity(capacity: usize) -> Self {
        let (publisher, _) = broadcast::channel(capacity);
        Self {
            state: RwLock::new(BTreeMap::new()),
            events: RwLock::new(Vec::new()),
            publisher,
            open_iterators: Arc::new(AtomicUsize::new(0)),
            writes: AtomicUsize::new(0),
        }
    }

    /// Stored bytes for `key`, bypassing the port.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.get(key).cloned())
    }

    pub fn keys(&self) -> Vec<String> {
        self.state
            .read()
            .map(|state| state.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<CommittedEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Scan cursors handed out and not yet closed.
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LedgerStub for InMemoryLedger {
    fn get(&self, key: &str) -> LedgerResult<Option<Vec<u8>>> {
        let state = self.state.read().map_err(|e| LedgerError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(state.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> LedgerResult<()> {
        let mut state = self.state.write().map_err(|e| LedgerError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        state.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn scan_by_prefix(
        &self,
        object_type: &str,
        attributes: &[&str],
    ) -> LedgerResult<Box<dyn StateIterator>> {
        let state = self
            .state
            .read()
            .map_err(|e| LedgerError::Query(e.to_string()))?;
        let entries = scan_range(&state, object_type, attributes)?;
        Ok(Box::new(SnapshotIterator::new(
            entries,
            self.open_iterators.clone(),
        )))
    }

    fn emit_event(&self, name: &str, payload: &[u8]) -> LedgerResult<()> {
        let event = CommittedEvent::new(name, payload);
        self.events
            .write()
            .map_err(|e| LedgerError::Event(e.to_string()))?
            .push(event.clone());
        // no subscribers is fine
        let _ = self.publisher.send(event);
        Ok(())
    }
}

impl EventSource for InMemoryLedger {
    fn subscribe(&self) -> broadcast::Receiver<CommittedEvent> {
        self.publisher.subscribe()
    }
}
