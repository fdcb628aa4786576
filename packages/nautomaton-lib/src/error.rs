use thiserror::Error;

/// Structural misuse of an automaton. Ordinary "not declared" or "not
/// present" situations are reported as `false` by the mutating operations
/// instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AutomatonError {
    /// A spontaneous condition was handed to a DFA.
    #[error("DFAs do not allow spontaneous moves; build an NFA and convert it instead")]
    SpontaneousMove,

    /// A labeled condition that already leads somewhere was handed to a DFA.
    #[error(
        "DFAs do not allow two destinations for one condition; build an NFA and convert it instead"
    )]
    DuplicateCondition,

    /// The symbol of a spontaneous condition was requested.
    #[error("operation not supported: a spontaneous condition has no symbol")]
    UnsupportedOperation,

    /// Subset construction discovered more composite states than allowed.
    #[error("subset construction exceeded the limit of {limit} states")]
    StateLimitExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, AutomatonError>;
