use std::fmt::{Debug, Display};

use crate::{
    automaton::{State, Symbol},
    error::{AutomatonError, Result},
};

/// The trigger of a transition.
///
/// A labeled condition fires when the automaton is in `state` and reads
/// `symbol`. A spontaneous condition fires from `state` without consuming any
/// input. Neither variant is validated on construction, the owning automaton
/// checks membership when the condition is inserted.
///
/// The derived `Eq`/`Hash` only look at the fields of the respective variant,
/// so a spontaneous condition is identified by its state alone and never
/// equals a labeled one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition<Q: State, S: Symbol> {
    Labeled { state: Q, symbol: S },
    Spontaneous { state: Q },
}

impl<Q: State, S: Symbol> Condition<Q, S> {
    pub fn labeled(state: Q, symbol: S) -> Self {
        Condition::Labeled { state, symbol }
    }

    pub fn spontaneous(state: Q) -> Self {
        Condition::Spontaneous { state }
    }

    /// The source state of the transition.
    pub fn state(&self) -> &Q {
        match self {
            Condition::Labeled { state, .. } => state,
            Condition::Spontaneous { state } => state,
        }
    }

    /// The symbol consumed by the transition. Spontaneous conditions have
    /// none, asking for it is an [AutomatonError::UnsupportedOperation].
    pub fn symbol(&self) -> Result<&S> {
        match self {
            Condition::Labeled { symbol, .. } => Ok(symbol),
            Condition::Spontaneous { .. } => Err(AutomatonError::UnsupportedOperation),
        }
    }

    /// Like [Condition::symbol], but `None` for spontaneous conditions.
    pub fn label(&self) -> Option<&S> {
        match self {
            Condition::Labeled { symbol, .. } => Some(symbol),
            Condition::Spontaneous { .. } => None,
        }
    }

    pub fn is_spontaneous(&self) -> bool {
        matches!(self, Condition::Spontaneous { .. })
    }

    /// Whether this is the labeled condition `(state, symbol)`.
    pub fn matches(&self, state: &Q, symbol: &S) -> bool {
        match self {
            Condition::Labeled {
                state: s,
                symbol: a,
            } => s == state && a == symbol,
            Condition::Spontaneous { .. } => false,
        }
    }
}

impl<Q: State, S: Symbol> From<(Q, S)> for Condition<Q, S> {
    fn from((state, symbol): (Q, S)) -> Self {
        Condition::labeled(state, symbol)
    }
}

impl<Q: State + Display, S: Symbol + Display> Display for Condition<Q, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Labeled { state, symbol } => write!(f, "({}, {})", state, symbol),
            Condition::Spontaneous { state } => write!(f, "({}, ε)", state),
        }
    }
}
