use super::memory_ledger::{scan_range, SnapshotIterator};
use crate::common::{CommittedEvent, LedgerError, LedgerResult};
use crate::domains::ports::{EventSource, LedgerStub, StateIterator};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

const STATE_FILE: &str = "state.json";
const EVENTS_FILE: &str = "events.jsonl";

/// File-backed ledger for local runs of the binary.
///
/// World state lives in `state.json` and is rewritten after every put.
/// Committed events are appended to `events.jsonl`, one JSON object per line,
/// so several invocations of the binary share the same history.
pub struct FileLedger {
    base_path: PathBuf,
    state: RwLock<BTreeMap<String, Vec<u8>>>,
    publisher: broadcast::Sender<CommittedEvent>,
    open_iterators: Arc<AtomicUsize>,
}

impl FileLedger {
    pub fn open<P: Into<PathBuf>>(base_path: P) -> LedgerResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| LedgerError::Read {
            key: base_path.display().to_string(),
            reason: format!("failed to create ledger directory: {}", e),
        })?;

        let state_path = base_path.join(STATE_FILE);
        let state = if state_path.exists() {
            let content = fs::read(&state_path).map_err(|e| read_error(&state_path, e))?;
            serde_json::from_slice(&content).map_err(|e| read_error(&state_path, e))?
        } else {
            BTreeMap::new()
        };

        let (publisher, _) = broadcast::channel(256);
        Ok(Self {
            base_path,
            state: RwLock::new(state),
            publisher,
            open_iterators: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Every event appended so far, oldest first.
    pub fn load_events(&self) -> LedgerResult<Vec<CommittedEvent>> {
        let path = self.base_path.join(EVENTS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(|e| read_error(&path, e))?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line).map_err(|e| LedgerError::Read {
                    key: path.display().to_string(),
                    reason: format!("bad event at line {}: {}", n + 1, e),
                })
            })
            .collect()
    }

    fn persist(&self, key: &str, state: &BTreeMap<String, Vec<u8>>) -> LedgerResult<()> {
        let write_error = |reason: String| LedgerError::Write {
            key: key.to_string(),
            reason,
        };
        let bytes = serde_json::to_vec(state).map_err(|e| write_error(e.to_string()))?;
        let tmp = self.base_path.join(format!("{}.tmp", STATE_FILE));
        fs::write(&tmp, bytes).map_err(|e| write_error(e.to_string()))?;
        fs::rename(&tmp, self.base_path.join(STATE_FILE)).map_err(|e| write_error(e.to_string()))
    }
}

fn read_error(path: &Path, e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Read {
        key: path.display().to_string(),
        reason: e.to_string(),
    }
}

impl LedgerStub for FileLedger {
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
        let previous = state.insert(key.to_string(), value.to_vec());
        if let Err(e) = self.persist(key, &state) {
            // keep memory and disk in step
            match previous {
                Some(old) => state.insert(key.to_string(), old),
                None => state.remove(key),
            };
            return Err(e);
        }
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
        let mut line =
            serde_json::to_string(&event).map_err(|e| LedgerError::Event(e.to_string()))?;
        line.push('\n');

        let path = self.base_path.join(EVENTS_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LedgerError::Event(format!("failed to open {}: {}", path.display(), e)))?;
        file.write_all(line.as_bytes())
            .map_err(|e| LedgerError::Event(format!("failed to write event: {}", e)))?;

        let _ = self.publisher.send(event);
        Ok(())
    }
}

impl EventSource for FileLedger {
    fn subscribe(&self) -> broadcast::Receiver<CommittedEvent> {
        self.publisher.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let ledger = FileLedger::open(temp_dir.path().join("ledger")).unwrap();
            ledger.put("r1", b"{\"robotId\":\"r1\",\"points\":[]}").unwrap();
            let key = ledger.create_key("allpaths~robot", &["allpaths", "r1"]).unwrap();
            ledger.put(&key, &[0]).unwrap();
        }

        let ledger = FileLedger::open(temp_dir.path().join("ledger")).unwrap();
        assert!(ledger.get("r1").unwrap().is_some());

        let mut it = ledger.scan_by_prefix("allpaths~robot", &["allpaths"]).unwrap();
        assert_eq!(it.by_ref().count(), 1);
        it.close().unwrap();
    }

    #[test]
    fn test_events_appended_as_json_lines() {
        let temp_dir = TempDir::new().unwrap();
        let ledger = FileLedger::open(temp_dir.path()).unwrap();
        ledger.emit_event("path-committed", b"one").unwrap();
        ledger.emit_event("path-committed", b"two").unwrap();

        let events = ledger.load_events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].payload, b"one".to_vec());
        assert_eq!(events[1].payload, b"two".to_vec());
    }
}
