// Tracing log adapter - Operation log with history, forwarded to tracing

use std::sync::Mutex;

use tracing::{debug, error, info, warn};

use crate::ports::*;

/// Tracing log adapter
///
/// Every line is kept in memory. Info lines reach `tracing` at info level when verbose and at
/// debug level otherwise.
#[derive(Debug, Default)]
pub struct TracingLogAdapter {
    verbose: bool,
    history: Mutex<Vec<String>>,
}

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            history: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, message: &str) {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}

impl LogPort for TracingLogAdapter {
    fn info(&self, message: &str) {
        self.record(message);
        if self.verbose {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }

    fn warn(&self, message: &str) {
        self.record(message);
        warn!("{}", message);
    }

    fn error(&self, message: &str) {
        self.record(message);
        error!("{}", message);
    }

    fn debug(&self, message: &str) {
        self.record(message);
        debug!("{}", message);
    }

    fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_keeps_every_level_in_order() {
        let log = TracingLogAdapter::new(false);
        log.info("one");
        log.warn("two");
        log.debug("three");
        log.error("four");
        assert_eq!(log.history(), vec!["one", "two", "three", "four"]);
    }
}
