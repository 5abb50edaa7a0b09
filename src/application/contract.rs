use super::response::Response;
use super::router::Invocation;
use crate::common::{RegistryError, RegistryResult};
use crate::domains::logger::DynLogger;
use crate::domains::path_registry::{PathQuery, PathStore};
use crate::domains::ports::LedgerStub;
use crate::domains::workspace::{Workspace, WorkspaceStore};
use std::sync::Arc;

/// Entry points the ledger runtime calls: one `init` at instantiation, then
/// one `invoke` per ordered transaction.
pub struct MultiRobotContract {
    workspace: Workspace,
    workspace_store: WorkspaceStore,
    path_store: PathStore,
    path_query: PathQuery,
    logger: DynLogger,
}

impl MultiRobotContract {
    pub fn new(ledger: Arc<dyn LedgerStub>, logger: DynLogger, workspace: Workspace) -> Self {
        Self {
            workspace,
            workspace_store: WorkspaceStore::new(ledger.clone(), logger.clone()),
            path_store: PathStore::new(ledger.clone(), logger.clone()),
            path_query: PathQuery::new(ledger, logger.clone()),
            logger,
        }
    }

    pub fn try_init(&self) -> RegistryResult<()> {
        self.workspace_store.initialize_workspace(&self.workspace)?;
        self.logger
            .info("MULTI-ROBOT contract instantiated successfully!");
        Ok(())
    }

    pub fn init(&self) -> Response {
        match self.try_init() {
            Ok(()) => Response::success(Vec::new()),
            Err(e) => {
                self.logger.error(&format!("Initialization failed: {}", e));
                Response::error(&e)
            }
        }
    }

    /// Validate and run one call, returning its payload.
    pub fn try_invoke(&self, function: &str, args: &[String]) -> RegistryResult<Vec<u8>> {
        let invocation = match Invocation::parse(function, args) {
            Ok(invocation) => invocation,
            Err(e @ RegistryError::UnknownOperation { .. }) => {
                self.logger
                    .info(&format!("Invoke did not find func: {}", function));
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        self.dispatch(invocation)
    }

    pub fn invoke(&self, function: &str, args: &[String]) -> Response {
        let result = self.try_invoke(function, args);
        if let Err(e) = &result {
            self.logger
                .warn(&format!("{} failed [{}]: {}", function, e.kind(), e));
        }
        Response::from(result)
    }

    pub fn dispatch(&self, invocation: Invocation) -> RegistryResult<Vec<u8>> {
        match invocation {
            Invocation::GetWorkspace => self.workspace_store.get_workspace(),
            Invocation::GetAllPaths { caller_robot_id } => {
                self.path_query.get_all_paths_except(&caller_robot_id)
            }
            Invocation::SetMyPath { robot_id, points } => {
                self.path_store.upsert_path(&robot_id, points)?;
                Ok(Vec::new())
            }
        }
    }
}
