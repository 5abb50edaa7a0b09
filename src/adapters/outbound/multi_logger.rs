use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards to a primary logger and, when present, a secondary one.
/// Lets a file sink run next to the console or tracing output.
pub struct MultiLogger {
    primary: Arc<dyn DomainLogger>,
    secondary: Option<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(primary: Arc<dyn DomainLogger>, secondary: Option<Arc<dyn DomainLogger>>) -> Self {
        Self { primary, secondary }
    }
}

impl DomainLogger for MultiLogger {
    fn debug(&self, msg: &str) {
        self.primary.debug(msg);
        if let Some(sec) = &self.secondary {
            sec.debug(msg);
        }
    }

    fn info(&self, msg: &str) {
        self.primary.info(msg);
        if let Some(sec) = &self.secondary {
            sec.info(msg);
        }
    }

    fn warn(&self, msg: &str) {
        self.primary.warn(msg);
        if let Some(sec) = &self.secondary {
            sec.warn(msg);
        }
    }

    fn error(&self, msg: &str) {
        self.primary.error(msg);
        if let Some(sec) = &self.secondary {
            sec.error(msg);
        }
    }
}

/// Pair the tracing bridge with a fast_log file sink. Falls back to tracing
/// alone if the file logger cannot be set up.
pub fn init_combined_logger(path: &str, level: log::LevelFilter) -> Arc<dyn DomainLogger> {
    let tracing_logger = crate::adapters::outbound::init_tracing_logger("multi-robot");
    match crate::adapters::outbound::file_logger::init_file_logger(path, level) {
        Ok(file_logger) => {
            Arc::new(MultiLogger::new(tracing_logger, Some(file_logger))) as Arc<dyn DomainLogger>
        }
        Err(e) => {
            tracing_logger.warn(&e);
            tracing_logger
        }
    }
}
