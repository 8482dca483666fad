//! Observable events
//!
//! Every log line emitted by the crate carries one of these as its `event`
//! field, so log consumers can filter on a closed vocabulary.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Shapes
    /// Shape directory loaded
    ShapesLoaded,
    /// Definition registered under a name
    ShapeRegistered,
    /// Normative type definition built on first use
    DefinitionInitialized,

    // Validation
    /// Candidate rejected by a definition
    ValidationFailed,
    /// Predicate cache recomputed a result
    PredicateCacheMiss,

    // CLI
    /// Check command finished
    CheckComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ShapesLoaded => "SHAPES_LOADED",
            Event::ShapeRegistered => "SHAPE_REGISTERED",
            Event::DefinitionInitialized => "DEFINITION_INITIALIZED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::PredicateCacheMiss => "PREDICATE_CACHE_MISS",
            Event::CheckComplete => "CHECK_COMPLETE",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
