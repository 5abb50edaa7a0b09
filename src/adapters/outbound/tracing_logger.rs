use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards domain log lines to `tracing`, tagged with the emitting component.
struct TracingBridge {
    component: &'static str,
}

impl DomainLogger for TracingBridge {
    fn debug(&self, msg: &str) {
        tracing::debug!(component = self.component, "{}", msg);
    }

    fn info(&self, msg: &str) {
        tracing::info!(component = self.component, "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(component = self.component, "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(component = self.component, "{}", msg);
    }
}

pub fn init_tracing_logger(component: &'static str) -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge { component })
}
