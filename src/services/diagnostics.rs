//! Error-reporting channel for failures absorbed at coordinator boundaries.

use std::sync::Mutex;

use tracing::{error, warn};

use crate::types::errors::{Diagnostic, ErrorKind};

/// Sink for diagnostics. Reporting must never fail or block.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Writes every diagnostic to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            ErrorKind::StoreUnavailable => error!(
                kind = %diagnostic.kind,
                context = %diagnostic.context,
                "{}",
                diagnostic.message
            ),
            ErrorKind::SearchProviderFailure => warn!(
                kind = %diagnostic.kind,
                context = %diagnostic.context,
                "{}",
                diagnostic.message
            ),
        }
    }
}

/// Keeps diagnostics in memory and forwards them to `tracing`.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    collected: Mutex<Vec<Diagnostic>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.collected
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.diagnostics().iter().filter(|d| d.kind == kind).count()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, diagnostic: Diagnostic) {
        TracingReporter.report(diagnostic.clone());
        if let Ok(mut collected) = self.collected.lock() {
            collected.push(diagnostic);
        }
    }
}
