use bit_set::BitSet;

use crate::{definition::AutomatonDefinition, id::StateId, show::Show};

/// The set of states that are simultaneously possible after reading some prefix of a word.
/// Each evaluation owns its active set exclusively, it is never shared between evaluations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveStateSet(BitSet);

impl ActiveStateSet {
    pub(crate) fn with_capacity(states: usize) -> Self {
        Self(BitSet::with_capacity(states))
    }

    pub(crate) fn singleton(state: StateId, states: usize) -> Self {
        let mut set = Self::with_capacity(states);
        set.insert(state);
        set
    }

    /// Adds `state`, returns `false` if it was already present.
    pub(crate) fn insert(&mut self, state: StateId) -> bool {
        self.0.insert(state.into_usize())
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.0.contains(state.into_usize())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the contained states in ascending order of their ids.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter().map(StateId::from_usize)
    }

    /// Returns true if at least one of the states in `self` is in `other`.
    pub(crate) fn intersects(&self, other: &BitSet) -> bool {
        !self.0.is_disjoint(other)
    }

    /// Resolves the contained states to their labels in `definition`. States that `definition`
    /// does not know are skipped.
    pub fn labels<'a>(
        &'a self,
        definition: &'a AutomatonDefinition,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().filter_map(move |id| definition.get_state(id))
    }

    /// Renders `self` as `{q0, q1}` using the labels from `definition`.
    pub fn show(&self, definition: &AutomatonDefinition) -> String {
        self.labels(definition).collect::<Vec<_>>().show()
    }
}
