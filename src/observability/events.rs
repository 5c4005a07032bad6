//! Observability events
//!
//! Every log line emitted by the crate carries one of these as its `event`
//! field. Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Registry
    /// Definition added to a registry
    DefinitionRegistered,
    /// Definition files loaded from a directory
    DefinitionsLoaded,

    // Construction
    /// Record construction begins
    ConstructBegin,
    /// Record constructed
    ConstructComplete,
    /// Record construction rejected
    ConstructRejected,

    // Casting
    /// Map cast into a nested record
    RecordCast,
    /// List of maps cast into records
    SequenceCast,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::DefinitionRegistered => "DEFINITION_REGISTERED",
            Event::DefinitionsLoaded => "DEFINITIONS_LOADED",
            Event::ConstructBegin => "CONSTRUCT_BEGIN",
            Event::ConstructComplete => "CONSTRUCT_COMPLETE",
            Event::ConstructRejected => "CONSTRUCT_REJECTED",
            Event::RecordCast => "RECORD_CAST",
            Event::SequenceCast => "SEQUENCE_CAST",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
