use std::fmt::Display;

use thiserror::Error;

/// Where a transition record came from. Records that were read from text know their source
/// line, records added programmatically are identified by their position among all records.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Location {
    /// 1-based line number in the definition source.
    Line(usize),
    /// 0-based index of the record in the order in which records were added.
    Record(usize),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Line(line) => write!(f, "line {line}"),
            Location::Record(idx) => write!(f, "record #{idx}"),
        }
    }
}

/// Which end of a transition an unknown state was found on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Origin => write!(f, "origin"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

/// The fields that make up a definition.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    Alphabet,
    States,
    InitialState,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Alphabet => write!(f, "alphabet"),
            Field::States => write!(f, "states"),
            Field::InitialState => write!(f, "initial state"),
        }
    }
}

/// Abstracts the reasons for which building an
/// [`AutomatonDefinition`](crate::AutomatonDefinition) can fail. Each variant corresponds to
/// one violated requirement and names the offending token.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum DefinitionError {
    #[error("epsilon marker `{0}` is not part of the alphabet")]
    MissingEpsilonSymbol(String),
    #[error("missing {0}")]
    MissingField(Field),
    #[error("{0} declares more than 2^32 distinct labels")]
    TooManyLabels(Field),
    #[error("expected a single initial state, found `{0}`")]
    MalformedInitialState(String),
    #[error("initial state `{0}` is not a declared state")]
    UnknownInitialState(String),
    #[error("final state `{0}` is not a declared state")]
    UnknownFinalState(String),
    #[error("{location}: transition record `{record}` does not consist of exactly three fields")]
    MalformedTransitionRecord { location: Location, record: String },
    #[error("{location}: {endpoint} `{state}` of transition is not a declared state")]
    UnknownTransitionState {
        location: Location,
        endpoint: Endpoint,
        state: String,
    },
    #[error("{location}: transition symbol `{symbol}` is not part of the alphabet")]
    UnknownTransitionSymbol { location: Location, symbol: String },
}
