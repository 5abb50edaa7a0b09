//! Secondary index of every robot that has committed a path.
//!
//! Entries are valueless composite keys `allpaths~robot / allpaths / <robot id>`.
//! One entry per robot, written on its first commit and never removed.

use crate::common::{RegistryError, RegistryResult};
use crate::domains::ports::{LedgerStub, StateIterator};
use std::sync::Arc;

pub const INDEX_OBJECT_TYPE: &str = "allpaths~robot";
pub const INDEX_NAMESPACE: &str = "allpaths";
pub const INDEX_SENTINEL: [u8; 1] = [0x00];

#[derive(Clone)]
pub struct PathIndex {
    ledger: Arc<dyn LedgerStub>,
}

impl PathIndex {
    pub fn new(ledger: Arc<dyn LedgerStub>) -> Self {
        Self { ledger }
    }

    pub fn index_key(&self, robot_id: &str) -> RegistryResult<String> {
        Ok(self
            .ledger
            .create_key(INDEX_OBJECT_TYPE, &[INDEX_NAMESPACE, robot_id])?)
    }

    /// Only the first commit of a robot may call this. Writing the marker again
    /// for the same robot leaves a single entry.
    pub fn register_agent(&self, robot_id: &str) -> RegistryResult<()> {
        let key = self.index_key(robot_id)?;
        self.ledger.put(&key, &INDEX_SENTINEL)?;
        Ok(())
    }

    /// Start a fresh scan over all indexed robot ids, in key order.
    pub fn scan_all_agents(&self) -> RegistryResult<AgentScan> {
        let inner = self
            .ledger
            .scan_by_prefix(INDEX_OBJECT_TYPE, &[INDEX_NAMESPACE])?;
        Ok(AgentScan {
            ledger: self.ledger.clone(),
            inner: Some(inner),
        })
    }
}

/// Lazy sequence of robot ids read from the index.
///
/// Closing is idempotent; dropping an unclosed scan closes it and discards any
/// close error, so call [`AgentScan::close`] where that error matters.
pub struct AgentScan {
    ledger: Arc<dyn LedgerStub>,
    inner: Option<Box<dyn StateIterator>>,
}

impl AgentScan {
    pub fn close(&mut self) -> RegistryResult<()> {
        if let Some(mut inner) = self.inner.take() {
            inner.close()?;
        }
        Ok(())
    }

    fn robot_id_of(&self, key: &str) -> RegistryResult<String> {
        let (object_type, attributes) = self
            .ledger
            .split_key(key)
            .map_err(|e| RegistryError::corrupt(format!("unreadable index key: {}", e)))?;
        match attributes.as_slice() {
            [namespace, robot_id]
                if object_type == INDEX_OBJECT_TYPE && namespace == INDEX_NAMESPACE =>
            {
                Ok(robot_id.clone())
            }
            _ => Err(RegistryError::corrupt(format!(
                "unexpected index key {:?}",
                key
            ))),
        }
    }
}

impl Iterator for AgentScan {
    type Item = RegistryResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.as_mut()?.next()? {
            Ok(entry) => entry,
            Err(e) => return Some(Err(e.into())),
        };
        Some(self.robot_id_of(&entry.key))
    }
}

impl Drop for AgentScan {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::inbound::InMemoryLedger;

    fn index() -> (Arc<InMemoryLedger>, PathIndex) {
        let ledger = Arc::new(InMemoryLedger::new());
        (ledger.clone(), PathIndex::new(ledger))
    }

    #[test]
    fn test_scan_empty_index() {
        let (ledger, index) = index();
        let mut scan = index.scan_all_agents().unwrap();
        assert!(scan.next().is_none());
        scan.close().unwrap();
        assert_eq!(ledger.open_iterators(), 0);
    }

    #[test]
    fn test_scan_yields_ids_in_key_order() {
        let (_, index) = index();
        for id in ["robot02", "robot10", "alpha", "robot01"] {
            index.register_agent(id).unwrap();
        }
        let ids: Vec<String> = index
            .scan_all_agents()
            .unwrap()
            .collect::<RegistryResult<_>>()
            .unwrap();
        assert_eq!(ids, vec!["alpha", "robot01", "robot02", "robot10"]);
    }

    #[test]
    fn test_reregistering_keeps_one_entry() {
        let (ledger, index) = index();
        index.register_agent("r1").unwrap();
        index.register_agent("r1").unwrap();
        assert_eq!(ledger.keys().len(), 1);
    }

    #[test]
    fn test_index_entry_is_sentinel_only() {
        let (ledger, index) = index();
        index.register_agent("r1").unwrap();
        let key = index.index_key("r1").unwrap();
        assert_eq!(ledger.raw(&key), Some(INDEX_SENTINEL.to_vec()));
        // plain record keys are untouched
        assert_eq!(ledger.raw("r1"), None);
    }

    #[test]
    fn test_scan_ignores_plain_keys_and_other_namespaces() {
        let (ledger, index) = index();
        ledger.put("r9", b"{}").unwrap();
        let foreign = ledger.create_key("other~type", &["allpaths", "x"]).unwrap();
        ledger.put(&foreign, &INDEX_SENTINEL).unwrap();
        index.register_agent("r1").unwrap();

        let ids: Vec<String> = index
            .scan_all_agents()
            .unwrap()
            .collect::<RegistryResult<_>>()
            .unwrap();
        assert_eq!(ids, vec!["r1"]);
    }

    #[test]
    fn test_scan_is_restartable() {
        let (_, index) = index();
        index.register_agent("a").unwrap();
        index.register_agent("b").unwrap();

        let first: Vec<_> = index.scan_all_agents().unwrap().collect();
        let second: Vec<_> = index.scan_all_agents().unwrap().collect();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_dropped_scan_releases_iterator() {
        let (ledger, index) = index();
        index.register_agent("a").unwrap();
        {
            let mut scan = index.scan_all_agents().unwrap();
            assert!(scan.next().is_some());
            assert_eq!(ledger.open_iterators(), 1);
        }
        assert_eq!(ledger.open_iterators(), 0);
    }

    #[test]
    fn test_malformed_index_key_is_corrupt_state() {
        let (ledger, index) = index();
        let bad = ledger
            .create_key(INDEX_OBJECT_TYPE, &[INDEX_NAMESPACE, "a", "extra"])
            .unwrap();
        ledger.put(&bad, &INDEX_SENTINEL).unwrap();

        let results: Vec<_> = index.scan_all_agents().unwrap().collect();
        assert!(matches!(
            results.as_slice(),
            [Err(RegistryError::CorruptState { .. })]
        ));
    }
}
