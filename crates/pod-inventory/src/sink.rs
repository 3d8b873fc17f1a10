//! Best-effort error accumulation
//!
//! Every fragment, host, and container is an independent unit of work:
//! its failure is recorded here and the pass moves on. Warnings are
//! non-fatal signals (currently only the bare-hostname address fallback)
//! and are kept separately so callers can distinguish them from errors.

use crate::error::Error;

/// Ordered accumulator for resolution errors and warnings.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<Error>,
    warnings: Vec<String>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and continue.
    pub fn push(&mut self, error: Error) {
        tracing::debug!(%error, "recorded resolution error");
        self.errors.push(error);
    }

    /// Record a warning and emit it through the log.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.warnings.push(message);
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
