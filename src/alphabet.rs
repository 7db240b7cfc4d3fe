use crate::{
    definition::{DefinitionError, Field},
    id::{self, SymbolId},
    math::OrderedSet,
};

/// The epsilon marker that is used if nothing else is configured.
pub const DEFAULT_EPSILON: &str = "&";

/// The alphabet of an automaton: a finite set of symbol tokens, one of which is the designated
/// epsilon marker. Symbols are interned in the order in which they are first given, the
/// resulting [`SymbolId`]s are what the transition relation is keyed on.
///
/// The epsilon marker is always part of the alphabet, an [`Alphabet`] without it can not be
/// constructed. It may label transitions, but it is never consumed from an input word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: OrderedSet<String>,
    epsilon: SymbolId,
}

impl Alphabet {
    /// Creates a new alphabet from the given symbols. Fails with
    /// [`DefinitionError::MissingEpsilonSymbol`] if `epsilon` is not among them.
    /// Duplicate symbols are collapsed.
    pub fn new<I, S>(symbols: I, epsilon: &str) -> Result<Self, DefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: OrderedSet<String> = symbols.into_iter().map(Into::into).collect();
        if !id::fits(symbols.len()) {
            return Err(DefinitionError::TooManyLabels(Field::Alphabet));
        }
        let epsilon = symbols
            .get_index_of(epsilon)
            .map(SymbolId::from_usize)
            .ok_or_else(|| DefinitionError::MissingEpsilonSymbol(epsilon.to_string()))?;
        Ok(Self { symbols, epsilon })
    }

    /// Returns the id of `symbol` if it is part of the alphabet.
    pub fn id_of(&self, symbol: &str) -> Option<SymbolId> {
        self.symbols.get_index_of(symbol).map(SymbolId::from_usize)
    }

    /// Gives the token that `id` refers to, if `id` belongs to this alphabet.
    pub fn get_symbol(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get_index(id.into_usize()).map(String::as_str)
    }

    /// Panicking variant of [`Self::get_symbol`] for ids that were handed out by `self`.
    pub(crate) fn symbol(&self, id: SymbolId) -> &str {
        &self.symbols[id.into_usize()]
    }

    /// Returns true if `symbol` is part of the alphabet. This includes the epsilon marker.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// The epsilon marker.
    pub fn epsilon(&self) -> &str {
        self.symbol(self.epsilon)
    }

    pub fn epsilon_id(&self) -> SymbolId {
        self.epsilon
    }

    pub fn is_epsilon(&self, id: SymbolId) -> bool {
        self.epsilon == id
    }

    /// Iterates over all symbols in the order in which they were declared, including the
    /// epsilon marker.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(String::as_str)
    }

    /// Returns the number of symbols, the epsilon marker included.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }
}
