//! Library for loading finite automata from a textual description and evaluating words on them.
//!
//! An automaton consists of an [`Alphabet`] (which always contains a designated epsilon marker),
//! a finite set of states, one initial state, a set of final states and a
//! [`TransitionRelation`](transition_relation::TransitionRelation) that maps pairs of state and
//! symbol to a non-empty set of destination states. As a pair may have more than one
//! destination, automata are non-deterministic in general.
//!
//! Automata are represented by [`AutomatonDefinition`], which is created once through a
//! [`DefinitionBuilder`] or loaded from text (see [`input`]) and never changes afterwards.
//! Creating a definition verifies that it is closed, i.e. every state and symbol that is used
//! somewhere has been declared. If that is not the case, a [`DefinitionError`] names the
//! offending token.
//!
//! Words are evaluated by an [`Evaluator`](evaluation::Evaluator), which tracks the set of all
//! states that are reachable after each prefix of the word and classifies the word as
//! [`Classification::Accepted`], [`Classification::Rejected`] or, if it contains a symbol that
//! is not in the alphabet, [`Classification::Invalid`].
//!
//! ```
//! use automaton_eval::prelude::*;
//!
//! let definition: AutomatonDefinition = "a b &\nq0 q1\nq0\nq1\nq0 a q0\nq0 b q1\n"
//!     .parse()
//!     .unwrap();
//! assert_eq!(definition.evaluate("aab"), Classification::Accepted);
//! assert_eq!(definition.evaluate("aa"), Classification::Rejected);
//! assert_eq!(definition.evaluate("abc"), Classification::Invalid);
//! ```
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automaton_eval::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, DEFAULT_EPSILON},
        definition::{
            AutomatonDefinition, DefinitionBuilder, DefinitionError, Endpoint, Field, Location,
            TransitionRecord,
        },
        evaluation::{
            ActiveStateSet, Classification, EpsilonHandling, EvaluationOptions, Evaluator,
            Classifications, Reason, Run, Tokenization,
        },
        id::{StateId, SymbolId},
        input::{DefinitionReader, LoadError},
        math,
        show::Show,
        transition_relation::TransitionRelation,
    };
}

/// Type aliases for the collections that are used throughout the crate.
pub mod math;

mod show;
pub use show::{show_duration, Show};

/// Dense indices for states and symbols.
pub mod id;

/// Module that contains the definition of alphabets.
pub mod alphabet;
pub use alphabet::Alphabet;

/// The transition relation and the helper that accumulates it.
pub mod transition_relation;

/// Validated automata and their construction.
pub mod definition;
pub use definition::{AutomatonDefinition, DefinitionBuilder, DefinitionError};

pub mod input;

mod output;

pub mod evaluation;
pub use evaluation::Classification;
