//! Injected sink for parse/load diagnostics.
//!
//! The parser and store never fail outward. Everything that goes wrong is
//! handed to a [`Diagnostics`] implementation and processing continues.

use crate::error::Diagnostic;

/// Receives diagnostics and informational notes.
pub trait Diagnostics {
    /// A recoverable problem; the affected setting keeps its previous value.
    fn report(&mut self, diagnostic: Diagnostic);

    /// An informational message (load summary, applied migrations).
    fn note(&mut self, message: &str);
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }

    fn note(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// Buffers diagnostics in memory, e.g. to relay them to a chat surface.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    /// Reported problems in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
    /// Informational notes in the order they were emitted.
    pub notes: Vec<String>,
}

impl CollectedDiagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no problem was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn note(&mut self, message: &str) {
        self.notes.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_starts_clean() {
        let sink = CollectedDiagnostics::new();
        assert!(sink.is_clean());
        assert!(sink.notes.is_empty());
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut sink = CollectedDiagnostics::new();
        sink.report(Diagnostic::MalformedLine {
            line: 3,
            text: "oops".to_string(),
        });
        sink.note("first");
        sink.note("second");
        assert!(!sink.is_clean());
        assert_eq!(sink.notes, vec!["first", "second"]);
        assert_eq!(
            sink.diagnostics[0].to_string(),
            "line 3: unknown settings line `oops`, maybe it is missing the '='?"
        );
    }
}
