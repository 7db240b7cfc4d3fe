use itertools::Itertools;

use crate::{
    id::{StateId, SymbolId},
    math::{OrderedMap, OrderedSet},
};

/// The transition relation of an automaton, mapping a pair of origin state and symbol to the
/// (non-empty) set of possible destination states. Multiple destinations for the same pair
/// are what makes the automaton non-deterministic.
///
/// A `TransitionRelation` is immutable, it is obtained by [`TransitionRelationBuilder::freeze`].
/// Keys are stored in the order in which they were first added, destinations in the order in
/// which they were first listed for their key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionRelation {
    edges: OrderedMap<(StateId, SymbolId), Box<[StateId]>>,
}

impl TransitionRelation {
    /// Returns the destinations reachable from `origin` on `symbol`. If no transition is
    /// defined for the pair, the returned slice is empty.
    pub fn destinations(&self, origin: StateId, symbol: SymbolId) -> &[StateId] {
        self.edges
            .get(&(origin, symbol))
            .map(|targets| &targets[..])
            .unwrap_or(&[])
    }

    /// Iterates over all keys together with their destinations.
    pub fn entries(&self) -> impl Iterator<Item = ((StateId, SymbolId), &[StateId])> + '_ {
        self.edges.iter().map(|(key, targets)| (*key, &targets[..]))
    }

    /// Iterates over all individual transitions as `(origin, symbol, destination)` triples.
    pub fn triples(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.entries().flat_map(|((origin, symbol), targets)| {
            targets.iter().map(move |target| (origin, symbol, *target))
        })
    }

    /// Number of distinct `(origin, symbol)` keys.
    pub fn keys_len(&self) -> usize {
        self.edges.len()
    }

    /// Number of individual transitions.
    pub fn len(&self) -> usize {
        self.edges.values().map(|targets| targets.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns true if no key has more than one destination and no transition is labeled with
    /// the given epsilon symbol.
    pub fn is_deterministic(&self, epsilon: SymbolId) -> bool {
        self.entries()
            .all(|((_, symbol), targets)| symbol != epsilon && targets.len() == 1)
    }

    /// Returns all keys that have more than one destination.
    pub fn nondeterministic_keys(&self) -> Vec<(StateId, SymbolId)> {
        self.entries()
            .filter(|(_, targets)| targets.len() > 1)
            .map(|(key, _)| key)
            .collect_vec()
    }
}

/// Exclusively owned accumulator for a [`TransitionRelation`]. Destinations listed for the
/// same key are merged, a destination that is listed twice is only kept once.
#[derive(Clone, Debug, Default)]
pub struct TransitionRelationBuilder {
    edges: OrderedMap<(StateId, SymbolId), OrderedSet<StateId>>,
}

impl TransitionRelationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the transition `origin --symbol--> destination`. Returns `false` if the exact
    /// transition was already present.
    pub fn insert(&mut self, origin: StateId, symbol: SymbolId, destination: StateId) -> bool {
        self.edges
            .entry((origin, symbol))
            .or_default()
            .insert(destination)
    }

    /// Turns the accumulated transitions into an immutable [`TransitionRelation`].
    pub fn freeze(self) -> TransitionRelation {
        TransitionRelation {
            edges: self
                .edges
                .into_iter()
                .map(|(key, targets)| (key, targets.into_iter().collect()))
                .collect(),
        }
    }
}
