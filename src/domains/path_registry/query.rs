use super::index::{AgentScan, PathIndex};
use super::types::Path;
use crate::common::{RegistryError, RegistryResult};
use crate::domains::logger::DynLogger;
use crate::domains::ports::LedgerStub;
use std::sync::Arc;

/// Answers "every other robot's path" by walking the index.
pub struct PathQuery {
    ledger: Arc<dyn LedgerStub>,
    index: PathIndex,
    logger: DynLogger,
}

impl PathQuery {
    pub fn new(ledger: Arc<dyn LedgerStub>, logger: DynLogger) -> Self {
        Self {
            index: PathIndex::new(ledger.clone()),
            ledger,
            logger,
        }
    }

    /// All committed paths except the caller's, in index order.
    ///
    /// An indexed robot without a record fails the whole query.
    pub fn paths_except(&self, caller_robot_id: &str) -> RegistryResult<Vec<Path>> {
        if caller_robot_id.is_empty() {
            return Err(RegistryError::malformed("caller robot id must not be empty"));
        }

        let mut scan = self.index.scan_all_agents()?;
        let collected = self.collect_except(&mut scan, caller_robot_id);
        let closed = scan.close();
        let paths = collected?;
        closed?;
        Ok(paths)
    }

    /// Serialized JSON array form of [`PathQuery::paths_except`].
    pub fn get_all_paths_except(&self, caller_robot_id: &str) -> RegistryResult<Vec<u8>> {
        let paths = self.paths_except(caller_robot_id)?;
        let bytes = serde_json::to_vec(&paths)
            .map_err(|e| RegistryError::corrupt(format!("paths not serializable: {}", e)))?;

        self.logger.info(&format!("Found {} paths!", paths.len()));
        self.logger
            .debug(&format!("All paths: {}", String::from_utf8_lossy(&bytes)));
        Ok(bytes)
    }

    fn collect_except(
        &self,
        scan: &mut AgentScan,
        caller_robot_id: &str,
    ) -> RegistryResult<Vec<Path>> {
        let mut paths = Vec::new();
        for robot_id in scan.by_ref() {
            let robot_id = robot_id?;
            if robot_id == caller_robot_id {
                continue;
            }
            let bytes = self.ledger.get(&robot_id)?.ok_or_else(|| {
                RegistryError::corrupt(format!("robot {} is indexed but has no path", robot_id))
            })?;
            paths.push(Path::from_stored(&robot_id, &bytes)?);
        }
        Ok(paths)
    }
}
