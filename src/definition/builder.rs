use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{
    alphabet::{Alphabet, DEFAULT_EPSILON},
    id::{self, StateId},
    math::OrderedSet,
    show::Show,
    transition_relation::TransitionRelationBuilder,
};

use super::{AutomatonDefinition, DefinitionError, Endpoint, Field, Location};

/// A single transition as it is given to the [`DefinitionBuilder`], before any of its labels
/// are resolved against the declared states and alphabet.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TransitionRecord {
    pub origin: String,
    pub symbol: String,
    pub destination: String,
    /// Where the record came from, used for error reporting only.
    pub location: Option<Location>,
}

impl TransitionRecord {
    /// Creates a record without a source location.
    pub fn new<O, S, D>(origin: O, symbol: S, destination: D) -> Self
    where
        O: Into<String>,
        S: Into<String>,
        D: Into<String>,
    {
        Self {
            origin: origin.into(),
            symbol: symbol.into(),
            destination: destination.into(),
            location: None,
        }
    }

    /// Parses a record of the shape `<origin> <symbol> <destination>`, the three fields being
    /// separated by whitespace.
    pub fn parse(record: &str, location: Location) -> Result<Self, DefinitionError> {
        let mut fields = record.split_whitespace();
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(origin), Some(symbol), Some(destination), None) => Ok(Self {
                location: Some(location),
                ..Self::new(origin, symbol, destination)
            }),
            _ => Err(DefinitionError::MalformedTransitionRecord {
                location,
                record: record.trim().to_string(),
            }),
        }
    }

    /// Sets the location of `self`.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl<O: Into<String>, S: Into<String>, D: Into<String>> From<(O, S, D)> for TransitionRecord {
    fn from((origin, symbol, destination): (O, S, D)) -> Self {
        Self::new(origin, symbol, destination)
    }
}

/// Helper struct for the construction of an [`AutomatonDefinition`]. It collects the raw
/// labels for all parts of the definition and only resolves and validates them once
/// [`DefinitionBuilder::build`] is called. Nothing is shared with previously built
/// definitions, every call to `build` produces an independent value.
///
/// # Example
///
/// We want an automaton over the alphabet `{a, b}` (plus the epsilon marker `&`) with states
/// `q0` and `q1`, which moves from `q0` to `q1` on `b` and loops on `a` in `q0`:
/// ```
/// use automaton_eval::prelude::*;
///
/// let definition = DefinitionBuilder::default()
///     .with_alphabet(["a", "b", "&"])
///     .with_states(["q0", "q1"])
///     .with_initial("q0")
///     .with_final_states(["q1"])
///     .with_transitions([("q0", "a", "q0"), ("q0", "b", "q1")])
///     .build()
///     .unwrap();
/// assert_eq!(definition.evaluate("ab"), Classification::Accepted);
/// ```
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    epsilon: String,
    alphabet: Vec<String>,
    states: Vec<String>,
    initial: Option<String>,
    finals: Vec<String>,
    records: Vec<TransitionRecord>,
}

impl Default for DefinitionBuilder {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON.to_string(),
            alphabet: vec![],
            states: vec![],
            initial: None,
            finals: vec![],
            records: vec![],
        }
    }
}

impl DefinitionBuilder {
    /// Sets the token that is used as epsilon marker. Defaults to [`DEFAULT_EPSILON`].
    pub fn with_epsilon<S: Into<String>>(mut self, epsilon: S) -> Self {
        self.epsilon = epsilon.into();
        self
    }

    /// Adds symbols to the alphabet. Symbols that are given more than once are only kept once.
    pub fn with_alphabet<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alphabet.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Adds state labels. The order in which labels are first given fixes their [`StateId`].
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Sets the initial state, replacing any previously set one.
    pub fn with_initial<S: Into<String>>(mut self, initial: S) -> Self {
        self.initial = Some(initial.into());
        self
    }

    pub fn with_final_states<I, S>(mut self, finals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.finals.extend(finals.into_iter().map(Into::into));
        self
    }

    /// Adds a single transition, anything that converts into a [`TransitionRecord`] will do,
    /// in particular `(origin, symbol, destination)` tuples.
    pub fn with_transition<R: Into<TransitionRecord>>(mut self, record: R) -> Self {
        self.records.push(record.into());
        self
    }

    /// Adds a list of transitions in the order in which they are given.
    pub fn with_transitions<R, I>(mut self, records: I) -> Self
    where
        R: Into<TransitionRecord>,
        I: IntoIterator<Item = R>,
    {
        self.records.extend(records.into_iter().map(Into::into));
        self
    }

    /// Non-consuming variant of [`Self::with_transition`], useful when records arrive one by one.
    pub fn push_transition<R: Into<TransitionRecord>>(&mut self, record: R) {
        self.records.push(record.into());
    }

    /// Resolves all labels and verifies that the resulting definition is closed, i.e. every
    /// state and symbol that is referenced has been declared. The first violation that is
    /// found is returned, checks happen in this order:
    /// 1. the epsilon marker is part of the alphabet
    /// 2. neither the alphabet nor the states exceed the capacity of the id types
    /// 3. an initial state is given and it is a declared state
    /// 4. every final state is a declared state
    /// 5. for each transition record in insertion order: origin, destination, symbol
    pub fn build(self) -> Result<AutomatonDefinition, DefinitionError> {
        let alphabet = Alphabet::new(self.alphabet, &self.epsilon)?;

        let declared = self.states.len();
        let states: OrderedSet<String> = self.states.into_iter().collect();
        if !id::fits(states.len()) {
            return Err(DefinitionError::TooManyLabels(Field::States));
        }
        if states.len() < declared {
            debug!(
                "collapsed {} duplicate state labels",
                declared - states.len()
            );
        }
        let resolve = |label: &str| states.get_index_of(label).map(StateId::from_usize);

        let initial_label = self
            .initial
            .ok_or(DefinitionError::MissingField(Field::InitialState))?;
        let initial = resolve(&initial_label)
            .ok_or_else(|| DefinitionError::UnknownInitialState(initial_label.clone()))?;

        let mut finals = BitSet::with_capacity(states.len());
        for label in &self.finals {
            let id = resolve(label)
                .ok_or_else(|| DefinitionError::UnknownFinalState(label.clone()))?;
            finals.insert(id.into_usize());
        }

        let mut transitions = TransitionRelationBuilder::new();
        for (idx, record) in self.records.into_iter().enumerate() {
            let location = record.location.unwrap_or(Location::Record(idx));
            let origin = resolve(&record.origin).ok_or_else(|| {
                DefinitionError::UnknownTransitionState {
                    location,
                    endpoint: Endpoint::Origin,
                    state: record.origin.clone(),
                }
            })?;
            let destination = resolve(&record.destination).ok_or_else(|| {
                DefinitionError::UnknownTransitionState {
                    location,
                    endpoint: Endpoint::Destination,
                    state: record.destination.clone(),
                }
            })?;
            let symbol = alphabet.id_of(&record.symbol).ok_or_else(|| {
                DefinitionError::UnknownTransitionSymbol {
                    location,
                    symbol: record.symbol.clone(),
                }
            })?;

            let transition = (&record.origin, &record.symbol, &record.destination);
            if transitions.insert(origin, symbol, destination) {
                trace!("{location}: adding transition {}", transition.show());
            } else {
                trace!("{location}: transition {} is listed twice", transition.show());
            }
        }

        let definition = AutomatonDefinition {
            alphabet,
            states,
            initial,
            finals,
            transitions: transitions.freeze(),
        };
        debug!(
            "built definition with {} states, {} symbols and {} transitions",
            definition.size(),
            definition.alphabet().size(),
            definition.transition_relation().len()
        );
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn base() -> DefinitionBuilder {
        DefinitionBuilder::default()
            .with_alphabet(["a", "b", "&"])
            .with_states(["q0", "q1"])
            .with_initial("q0")
            .with_final_states(["q1"])
    }

    #[test_log::test]
    fn parse_transition_records() {
        let record = TransitionRecord::parse("  q0   a q1 ", Location::Line(5)).unwrap();
        assert_eq!(record.origin, "q0");
        assert_eq!(record.symbol, "a");
        assert_eq!(record.destination, "q1");
        assert_eq!(record.location, Some(Location::Line(5)));

        for malformed in ["q0 a", "q0 a q1 q2", "", "q0"] {
            assert_eq!(
                TransitionRecord::parse(malformed, Location::Line(6)),
                Err(DefinitionError::MalformedTransitionRecord {
                    location: Location::Line(6),
                    record: malformed.trim().to_string()
                })
            );
        }
    }

    #[test_log::test]
    fn builds_valid_definition() {
        let definition = base()
            .with_transitions([("q0", "a", "q0"), ("q0", "b", "q1")])
            .build()
            .unwrap();
        assert_eq!(definition.initial(), "q0");
        assert_eq!(definition.final_states().collect::<Vec<_>>(), vec!["q1"]);
        assert_eq!(definition.transition_relation().len(), 2);
    }

    #[test_log::test]
    fn missing_epsilon() {
        let result = DefinitionBuilder::default()
            .with_alphabet(["a", "b"])
            .with_states(["q0"])
            .with_initial("q0")
            .build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::MissingEpsilonSymbol("&".into())
        );
    }

    #[test_log::test]
    fn custom_epsilon() {
        let definition = DefinitionBuilder::default()
            .with_epsilon("eps")
            .with_alphabet(["a", "eps"])
            .with_states(["q0"])
            .with_initial("q0")
            .with_transition(("q0", "eps", "q0"))
            .build()
            .unwrap();
        assert_eq!(definition.epsilon(), "eps");
    }

    #[test_log::test]
    fn missing_or_unknown_initial_state() {
        let result = DefinitionBuilder::default()
            .with_alphabet(["&"])
            .with_states(["q0"])
            .build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::MissingField(Field::InitialState)
        );

        let result = base().with_initial("q7").build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownInitialState("q7".into())
        );
    }

    #[test_log::test]
    fn unknown_final_state_names_first_offender() {
        let result = base().with_final_states(["q3", "q4"]).build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownFinalState("q3".into())
        );
    }

    #[test_log::test]
    fn unknown_transition_states() {
        let result = base()
            .with_transitions([("q0", "a", "q0"), ("q5", "a", "q0")])
            .build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownTransitionState {
                location: Location::Record(1),
                endpoint: Endpoint::Origin,
                state: "q5".into()
            }
        );

        let result = base()
            .with_transition(TransitionRecord::new("q0", "a", "q9").at(Location::Line(5)))
            .build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownTransitionState {
                location: Location::Line(5),
                endpoint: Endpoint::Destination,
                state: "q9".into()
            }
        );
    }

    #[test_log::test]
    fn unknown_transition_symbol() {
        let result = base().with_transition(("q0", "c", "q1")).build();
        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownTransitionSymbol {
                location: Location::Record(0),
                symbol: "c".into()
            }
        );
    }

    #[test_log::test]
    fn epsilon_is_a_valid_transition_symbol() {
        let definition = base().with_transition(("q0", "&", "q1")).build().unwrap();
        assert_eq!(
            definition.destinations("q0", "&").collect::<Vec<_>>(),
            vec!["q1"]
        );
        assert!(!definition.is_deterministic());
    }

    #[test_log::test]
    fn duplicates_collapse() {
        let definition = DefinitionBuilder::default()
            .with_alphabet(["a", "a", "&"])
            .with_states(["q0", "q1", "q0"])
            .with_initial("q0")
            .with_final_states(["q1", "q1"])
            .with_transitions([("q0", "a", "q1"), ("q0", "a", "q1"), ("q0", "a", "q0")])
            .build()
            .unwrap();
        assert_eq!(definition.size(), 2);
        assert_eq!(definition.alphabet().size(), 2);
        assert_eq!(definition.final_states().count(), 1);
        assert_eq!(
            definition.destinations("q0", "a").collect::<Vec<_>>(),
            vec!["q1", "q0"]
        );
    }

    #[test_log::test]
    fn builds_are_independent() {
        let builder = base().with_transition(("q0", "b", "q1"));
        let first = builder.clone().build().unwrap();
        let second = builder.with_transition(("q1", "a", "q0")).build().unwrap();
        assert_eq!(first.transition_relation().len(), 1);
        assert_eq!(second.transition_relation().len(), 2);
    }

    #[test_log::test]
    fn push_transitions_incrementally() {
        let mut builder = base();
        builder.push_transition(("q0", "b", "q1"));
        builder.push_transition(TransitionRecord::new("q1", "a", "q1"));
        let definition = builder.build().unwrap();
        assert!(definition.is_deterministic());
    }
}
