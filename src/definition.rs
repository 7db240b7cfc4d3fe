use bit_set::BitSet;

use crate::{
    alphabet::Alphabet,
    id::StateId,
    math::OrderedSet,
    transition_relation::TransitionRelation,
};

mod builder;
pub use builder::{DefinitionBuilder, TransitionRecord};

mod error;
pub use error::{DefinitionError, Endpoint, Field, Location};

/// A validated finite automaton, consisting of states, an alphabet, a transition relation, a
/// single initial state and a (possibly empty) set of final states.
///
/// Definitions can only be obtained through a [`DefinitionBuilder`] (or by loading them from
/// text, see [`crate::input`]), which guarantees that they are closed: the initial state, all
/// final states and every state or symbol occurring in a transition has been declared, and the
/// epsilon marker is part of the alphabet. After construction a definition is never modified,
/// so it can be shared freely between any number of evaluations, also across threads.
///
/// Internally, state labels and symbols are interned, the [`StateId`]s and [`SymbolId`](crate::id::SymbolId)s
/// correspond to the order in which they were declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutomatonDefinition {
    pub(crate) alphabet: Alphabet,
    pub(crate) states: OrderedSet<String>,
    pub(crate) initial: StateId,
    pub(crate) finals: BitSet,
    pub(crate) transitions: TransitionRelation,
}

impl AutomatonDefinition {
    /// Returns an empty [`DefinitionBuilder`].
    pub fn builder() -> DefinitionBuilder {
        DefinitionBuilder::default()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The epsilon marker of the alphabet.
    pub fn epsilon(&self) -> &str {
        self.alphabet.epsilon()
    }

    /// Iterates over all state labels in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(String::as_str)
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    pub fn state_id(&self, label: &str) -> Option<StateId> {
        self.states.get_index_of(label).map(StateId::from_usize)
    }

    /// Gives the label of the state with the given id, if `self` has such a state.
    pub fn get_state(&self, id: StateId) -> Option<&str> {
        self.states.get_index(id.into_usize()).map(String::as_str)
    }

    /// Panicking variant of [`Self::get_state`] for ids that were handed out by `self`.
    pub(crate) fn state(&self, id: StateId) -> &str {
        &self.states[id.into_usize()]
    }

    pub fn initial(&self) -> &str {
        self.state(self.initial)
    }

    pub fn initial_id(&self) -> StateId {
        self.initial
    }

    /// Iterates over the labels of all final states, ordered by their declaration.
    pub fn final_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.finals
            .iter()
            .map(move |idx| self.state(StateId::from_usize(idx)))
    }

    /// Returns true if `label` is a declared state that is final.
    pub fn is_final(&self, label: &str) -> bool {
        self.state_id(label).is_some_and(|id| self.is_final_id(id))
    }

    pub fn is_final_id(&self, id: StateId) -> bool {
        self.finals.contains(id.into_usize())
    }

    pub(crate) fn final_set(&self) -> &BitSet {
        &self.finals
    }

    pub fn transition_relation(&self) -> &TransitionRelation {
        &self.transitions
    }

    /// Returns the labels of all states reachable from `origin` on `symbol`. The iterator is
    /// empty if either label is unknown or if no transition is defined for the pair.
    pub fn destinations<'a>(
        &'a self,
        origin: &str,
        symbol: &str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let targets: &[StateId] = match (self.state_id(origin), self.alphabet.id_of(symbol)) {
            (Some(origin), Some(symbol)) => self.transitions.destinations(origin, symbol),
            _ => &[],
        };
        targets.iter().map(move |id| self.state(*id))
    }

    /// Iterates over all transitions as `(origin, symbol, destination)` label triples.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.transitions
            .triples()
            .map(move |(origin, symbol, destination)| {
                (
                    self.state(origin),
                    self.alphabet.symbol(symbol),
                    self.state(destination),
                )
            })
    }

    /// Returns true if every `(state, symbol)` pair has at most one destination and there are
    /// no epsilon transitions.
    pub fn is_deterministic(&self) -> bool {
        self.transitions.is_deterministic(self.alphabet.epsilon_id())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn nondeterministic() -> AutomatonDefinition {
        AutomatonDefinition::builder()
            .with_alphabet(["a", "b", "&"])
            .with_states(["q0", "q1", "q2"])
            .with_initial("q0")
            .with_final_states(["q2", "q1"])
            .with_transitions([
                ("q0", "a", "q0"),
                ("q0", "a", "q1"),
                ("q1", "b", "q2"),
            ])
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn queries() {
        let definition = nondeterministic();
        assert_eq!(definition.size(), 3);
        assert_eq!(
            definition.states().collect::<Vec<_>>(),
            vec!["q0", "q1", "q2"]
        );
        assert_eq!(definition.initial(), "q0");
        assert_eq!(definition.initial_id(), StateId(0));
        assert_eq!(
            definition.final_states().collect::<Vec<_>>(),
            vec!["q1", "q2"]
        );
        assert!(definition.is_final("q2"));
        assert!(!definition.is_final("q0"));
        assert!(!definition.is_final("nope"));
        assert_eq!(definition.state_id("q1"), Some(StateId(1)));
        assert_eq!(definition.state(StateId(2)), "q2");
        assert_eq!(definition.get_state(StateId(1)), Some("q1"));
        assert_eq!(definition.get_state(StateId(3)), None);
    }

    #[test_log::test]
    fn destinations_by_label() {
        let definition = nondeterministic();
        assert_eq!(
            definition.destinations("q0", "a").collect::<Vec<_>>(),
            vec!["q0", "q1"]
        );
        assert_eq!(definition.destinations("q0", "b").count(), 0);
        assert_eq!(definition.destinations("q9", "a").count(), 0);
        assert_eq!(definition.destinations("q0", "z").count(), 0);
        assert_eq!(
            definition.transitions().collect::<Vec<_>>(),
            vec![("q0", "a", "q0"), ("q0", "a", "q1"), ("q1", "b", "q2")]
        );
        assert!(!definition.is_deterministic());
    }

    #[test_log::test]
    fn definitions_are_shareable() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<AutomatonDefinition>();
    }
}
