use super::contract::MultiRobotContract;
use super::router::Operation;
use crate::common::{CommittedEvent, RegistryError, RegistryResult};
use crate::domains::logger::DynLogger;
use crate::domains::path_registry::{Path, PathRegistryEvent};
use crate::domains::workspace::{Point, Workspace};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Typed robot-side access to the registry.
pub struct RegistryClient {
    contract: Arc<MultiRobotContract>,
    logger: DynLogger,
}

impl RegistryClient {
    pub fn new(contract: Arc<MultiRobotContract>, logger: DynLogger) -> Self {
        Self { contract, logger }
    }

    pub fn workspace(&self) -> RegistryResult<Workspace> {
        let bytes = self
            .contract
            .try_invoke(Operation::GetWorkspace.wire_name(), &[])?;
        Workspace::from_json(&bytes)
            .map_err(|e| RegistryError::corrupt(format!("stored workspace unreadable: {}", e)))
    }

    /// Paths committed by every robot other than `robot_id`.
    pub fn peer_paths(&self, robot_id: &str) -> RegistryResult<Vec<Path>> {
        let bytes = self
            .contract
            .try_invoke(Operation::GetAllPaths.wire_name(), &[robot_id.to_string()])?;
        let paths: Vec<Path> = serde_json::from_slice(&bytes)
            .map_err(|e| RegistryError::corrupt(format!("path list unreadable: {}", e)))?;
        for (i, path) in paths.iter().enumerate() {
            self.logger
                .debug(&format!("Retrieved path({}) of Robot[{}]", i, path.robot_id));
        }
        Ok(paths)
    }

    pub fn commit_path(&self, robot_id: &str, points: &[Point]) -> RegistryResult<()> {
        let encoded = serde_json::to_string(points)
            .map_err(|e| RegistryError::malformed(format!("points not serializable: {}", e)))?;
        self.contract.try_invoke(
            Operation::SetMyPath.wire_name(),
            &[robot_id.to_string(), encoded],
        )?;
        Ok(())
    }
}

/// Follows `path-committed` events on a ledger subscription.
pub struct PathCommitWatcher {
    receiver: broadcast::Receiver<CommittedEvent>,
    logger: DynLogger,
}

impl PathCommitWatcher {
    pub fn new(receiver: broadcast::Receiver<CommittedEvent>, logger: DynLogger) -> Self {
        Self { receiver, logger }
    }

    /// Next committed path, or `None` once the event source is gone.
    pub async fn next_path(&mut self) -> Option<Path> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => {
                    if let Some(path) = PathRegistryEvent::decode_committed(&event) {
                        self.logger
                            .info(&format!("Robot[{}] committed path", path.robot_id));
                        return Some(path);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    self.logger
                        .warn(&format!("Watcher lagged, {} events skipped", skipped));
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Wait until `robot_id`'s own commit is observed.
    pub async fn wait_for(&mut self, robot_id: &str) -> Option<Path> {
        while let Some(path) = self.next_path().await {
            if path.robot_id == robot_id {
                return Some(path);
            }
        }
        None
    }
}
