use std::fmt;

/// Request-scoped logger.
///
/// Every event carries the controller and action of the request that
/// produced it, so log lines from the merger, the formatter and the data
/// source can be correlated without threading ids by hand.
#[derive(Debug, Clone, Copy)]
pub struct RequestLog<'a> {
    controller: &'a str,
    action: &'a str,
}

impl<'a> RequestLog<'a> {
    /// Creates a logger bound to a request identity.
    pub fn new(controller: &'a str, action: &'a str) -> Self {
        Self { controller, action }
    }

    /// Returns the controller this logger is bound to.
    pub fn controller(&self) -> &str {
        self.controller
    }

    /// Returns the action this logger is bound to.
    pub fn action(&self) -> &str {
        self.action
    }

    /// Logs an info-level message.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(controller = %self.controller, action = %self.action, "{}", args);
    }

    /// Logs a warning-level message.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(controller = %self.controller, action = %self.action, "{}", args);
    }

    /// Logs a debug-level message.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(controller = %self.controller, action = %self.action, "{}", args);
    }
}
