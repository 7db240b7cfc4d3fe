use std::hash::BuildHasherDefault;

/// A set which remembers the order in which its elements were first inserted. Indices into
/// an `OrderedSet` are stable as long as nothing is removed, which is what we rely on when
/// interning state labels and alphabet symbols.
pub type OrderedSet<S> = indexmap::IndexSet<S, BuildHasherDefault<fxhash::FxHasher>>;
/// A map which iterates its entries in insertion order.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<fxhash::FxHasher>>;
