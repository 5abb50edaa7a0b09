use super::events::PathRegistryEvent;
use super::index::PathIndex;
use super::notifier::CommitNotifier;
use super::types::{validate_robot_id, Path};
use crate::common::{RegistryError, RegistryResult};
use crate::domains::logger::DynLogger;
use crate::domains::ports::LedgerStub;
use crate::domains::workspace::Point;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// No record existed; record and index entry were both written.
    FirstCommit,
    /// Existing record's points were replaced in place.
    Update,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome {
    pub path: Path,
    pub kind: CommitKind,
    /// Bytes written to the ledger and carried by the commit event.
    pub payload: Vec<u8>,
}

pub struct PathStore {
    ledger: Arc<dyn LedgerStub>,
    index: PathIndex,
    notifier: CommitNotifier,
    logger: DynLogger,
}

impl PathStore {
    pub fn new(ledger: Arc<dyn LedgerStub>, logger: DynLogger) -> Self {
        Self {
            index: PathIndex::new(ledger.clone()),
            notifier: CommitNotifier::new(ledger.clone(), logger.clone()),
            ledger,
            logger,
        }
    }

    pub fn index(&self) -> &PathIndex {
        &self.index
    }

    pub fn get_path(&self, robot_id: &str) -> RegistryResult<Option<Path>> {
        validate_robot_id(robot_id)?;
        self.ledger
            .get(robot_id)?
            .map(|bytes| Path::from_stored(robot_id, &bytes))
            .transpose()
    }

    /// Create or replace the robot's path, then announce it.
    ///
    /// The index entry is written only on the first commit, and before the
    /// record: a record write that fails leaves no record behind, so a retry
    /// takes the first-commit branch again and rewrites the same marker. If
    /// the event cannot be emitted the writes stay in place and
    /// `NotificationFailed` is returned.
    pub fn upsert_path(
        &self,
        robot_id: &str,
        points: Vec<Point>,
    ) -> RegistryResult<CommitOutcome> {
        validate_robot_id(robot_id)?;
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(RegistryError::malformed(format!("point {} is not finite", i)));
        }

        let (path, kind) = match self.ledger.get(robot_id)? {
            None => (Path::new(robot_id, points), CommitKind::FirstCommit),
            Some(bytes) => {
                let mut path = Path::from_stored(robot_id, &bytes)?;
                path.points = points;
                (path, CommitKind::Update)
            }
        };

        let payload = path.to_bytes()?;
        if kind == CommitKind::FirstCommit {
            self.index.register_agent(robot_id)?;
        }
        self.ledger.put(robot_id, &payload)?;

        match kind {
            CommitKind::FirstCommit => {
                self.logger
                    .info(&format!("Robot[{}] first time set path", robot_id));
            }
            CommitKind::Update => {
                self.logger.info(&format!("Robot[{}] updated path", robot_id));
            }
        }
        self.logger.debug(&format!("{:?}", path.points));

        self.notifier
            .notify_committed(&PathRegistryEvent::path_committed(robot_id, &payload))?;

        Ok(CommitOutcome { path, kind, payload })
    }
}
