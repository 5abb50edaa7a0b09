use super::types::Workspace;
use crate::common::{RegistryError, RegistryResult};
use crate::domains::logger::DynLogger;
use crate::domains::ports::LedgerStub;
use std::sync::Arc;

/// Plain key holding the serialized workspace.
pub const WORKSPACE_KEY: &str = "workspace";

pub struct WorkspaceStore {
    ledger: Arc<dyn LedgerStub>,
    logger: DynLogger,
}

impl WorkspaceStore {
    pub fn new(ledger: Arc<dyn LedgerStub>, logger: DynLogger) -> Self {
        Self { ledger, logger }
    }

    /// Write the workspace record. Runs once at bootstrap; a failed write is
    /// returned to the caller untouched.
    pub fn initialize_workspace(&self, workspace: &Workspace) -> RegistryResult<()> {
        workspace.validate()?;
        let bytes = serde_json::to_vec(workspace)
            .map_err(|e| RegistryError::malformed(format!("workspace not serializable: {}", e)))?;
        self.ledger.put(WORKSPACE_KEY, &bytes)?;

        self.logger.debug(&format!("Workspace.Start: {:?}", workspace.start));
        self.logger.debug(&format!("Workspace.Goal: {:?}", workspace.goal));
        self.logger.debug(&format!("Workspace.Bounds: {:?}", workspace.bounds));
        self.logger.debug(&format!("Workspace.Circles: {:?}", workspace.circles));
        self.logger.debug(&format!("Workspace.Rectangles: {:?}", workspace.rectangles));
        Ok(())
    }

    /// Serialized workspace exactly as stored.
    pub fn get_workspace(&self) -> RegistryResult<Vec<u8>> {
        self.ledger
            .get(WORKSPACE_KEY)?
            .ok_or_else(|| RegistryError::NotFound {
                what: "workspace does not exist".to_string(),
            })
    }
}
