use crate::common::{DomainEvent, RegistryError, RegistryResult};
use crate::domains::logger::DynLogger;
use crate::domains::ports::LedgerStub;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommitNotifier {
    ledger: Arc<dyn LedgerStub>,
    logger: DynLogger,
}

impl CommitNotifier {
    pub fn new(ledger: Arc<dyn LedgerStub>, logger: DynLogger) -> Self {
        Self { ledger, logger }
    }

    /// Emit one event. A failure here never undoes the write that preceded it.
    pub fn notify_committed(&self, event: &dyn DomainEvent) -> RegistryResult<()> {
        match self.ledger.emit_event(event.event_name(), event.payload()) {
            Ok(()) => {
                self.logger.info(&format!(
                    "Event[{}] set from Robot[{}]",
                    event.event_name(),
                    event.aggregate_id()
                ));
                Ok(())
            }
            Err(e) => {
                self.logger.error(&format!(
                    "Event[{}] from Robot[{}] not emitted: {}",
                    event.event_name(),
                    event.aggregate_id(),
                    e
                ));
                Err(RegistryError::NotificationFailed(e))
            }
        }
    }
}
