use std::fmt::Debug;

/// The integer type backing [`StateId`] and [`SymbolId`]. It bounds the number of distinct
/// states and symbols a definition can declare to `2^32` each.
pub type DefaultIdType = u32;

/// Returns true if every position of an interning table with `len` entries can be turned
/// into an id.
pub(crate) fn fits(len: usize) -> bool {
    len == 0 || DefaultIdType::try_from(len - 1).is_ok()
}

macro_rules! impl_id_type {
    ($($name:ident => $prefix:literal),*) => {
        $(
            impl $name {
                /// Creates an id from a position in the interning table. Tables are checked
                /// with [`fits`] when they are built, so positions taken from them always fit.
                pub(crate) fn from_usize(n: usize) -> Self {
                    Self(n as DefaultIdType)
                }

                /// Creates an id from `n`, or returns `None` if `n` is out of range.
                pub fn try_from_usize(n: usize) -> Option<Self> {
                    DefaultIdType::try_from(n).ok().map(Self)
                }

                /// Returns the position in the interning table that `self` refers to.
                pub fn into_usize(self) -> usize {
                    self.0 as usize
                }
            }

            impl Debug for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "{}"), self.0)
                }
            }
        )*
    };
}

/// Index of a state label within an [`AutomatonDefinition`](crate::AutomatonDefinition).
/// State ids are dense, i.e. a definition with `n` states uses exactly the ids `0..n`.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct StateId(pub DefaultIdType);

/// Index of a symbol within an [`Alphabet`](crate::Alphabet).
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub DefaultIdType);

impl_id_type!(StateId => "q", SymbolId => "s");
