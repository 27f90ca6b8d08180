use std::fmt;

use crate::error::{Conflict, Violation};

/// Operation-scoped logging for policy checks, generation, and hashing.
///
/// Every event carries the operation name so that a subscriber can tell a
/// failed `validate` from a failed `generate`. Callers pass only rule kinds,
/// thresholds, and lengths here; password material never reaches a log line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PolicyLog {
    operation: &'static str,
}

impl PolicyLog {
    /// Creates a logger tagged with `operation`.
    pub(crate) fn new(operation: &'static str) -> Self {
        Self { operation }
    }

    /// Returns the operation this logger is tagged with.
    #[cfg(test)]
    pub(crate) fn operation(&self) -> &'static str {
        self.operation
    }

    /// Records an inconsistent policy.
    pub(crate) fn conflict(&self, conflict: &Conflict) {
        tracing::debug!(
            operation = self.operation,
            kind = ?conflict.kind,
            "policy conflict: {}",
            conflict
        );
    }

    /// Records the first rule a password failed.
    pub(crate) fn violation(&self, violation: &Violation) {
        tracing::debug!(
            operation = self.operation,
            kind = ?violation.kind,
            "policy violation: {}",
            violation
        );
    }

    /// Logs a trace-level message.
    pub(crate) fn trace(&self, args: fmt::Arguments<'_>) {
        tracing::trace!(operation = self.operation, "{}", args);
    }

    /// Logs a warning-level message.
    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(operation = self.operation, "{}", args);
    }
}
