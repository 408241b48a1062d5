//! Observable events
//!
//! Events are explicit and typed; each carries its own severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in the listing schema lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration loaded
    ConfigLoaded,
    /// Schema of one revision assembled
    SchemaAssembled,
    /// Index plan of one revision verified
    IndexPlanVerified,
    /// Index plan of one revision failed verification (FATAL)
    IndexPlanRejected,
    /// Candidate record normalized
    RecordValidated,
    /// Candidate record rejected
    RecordRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaAssembled => "SCHEMA_ASSEMBLED",
            Event::IndexPlanVerified => "INDEX_PLAN_VERIFIED",
            Event::IndexPlanRejected => "INDEX_PLAN_REJECTED",
            Event::RecordValidated => "RECORD_VALIDATED",
            Event::RecordRejected => "RECORD_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaAssembled | Event::RecordValidated => Severity::Trace,
            Event::ConfigLoaded | Event::IndexPlanVerified => Severity::Info,
            Event::RecordRejected => Severity::Warn,
            Event::IndexPlanRejected => Severity::Fatal,
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
