use std::fmt::Display;

use super::{ActiveStateSet, Classification};

/// Explains why a word was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The symbol at `position` is not part of the alphabet.
    UnknownSymbol { position: usize, symbol: String },
    /// None of the active states has a transition on the symbol at `position`.
    NoTransition { position: usize, symbol: String },
    /// The word was read completely, but no active state is final.
    NoFinalStateReached,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::UnknownSymbol { position, symbol } => {
                write!(f, "symbol `{symbol}` at position {position} is not in the alphabet")
            }
            Reason::NoTransition { position, symbol } => write!(
                f,
                "no transition on symbol `{symbol}` at position {position} from any active state"
            ),
            Reason::NoFinalStateReached => write!(f, "no final state reached"),
        }
    }
}

/// The detailed result of evaluating a single word, see [`super::Evaluator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub(super) classification: Classification,
    pub(super) reason: Option<Reason>,
    pub(super) active_sets: Vec<ActiveStateSet>,
}

impl Run {
    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_accepted(&self) -> bool {
        self.classification == Classification::Accepted
    }

    /// Why the word was not accepted, `None` for accepted words.
    pub fn reason(&self) -> Option<&Reason> {
        self.reason.as_ref()
    }

    /// The active state sets in the order in which they were visited. The first entry is the
    /// set the evaluation started from, every further entry is the set after consuming one more
    /// symbol. Words that are invalid are never simulated, so for them this is empty.
    pub fn active_sets(&self) -> &[ActiveStateSet] {
        &self.active_sets
    }

    /// The number of symbols that were consumed successfully.
    pub fn consumed(&self) -> usize {
        self.active_sets.len().saturating_sub(1)
    }

    /// The active set in which the evaluation ended.
    pub fn last_active(&self) -> Option<&ActiveStateSet> {
        self.active_sets.last()
    }
}
