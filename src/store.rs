use std::collections::BTreeMap;

use super::value::AbstractValue;

/// Mapping from address to abstract value, monotonic under join.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Store<A, V> {
    bindings: BTreeMap<A, V>,
}

impl<A: Ord + Clone, V: AbstractValue> Store<A, V> {
    pub fn new() -> Self {
        Store {
            bindings: BTreeMap::new(),
        }
    }

    pub fn from_bindings(bindings: impl IntoIterator<Item = (A, V)>) -> Self {
        let mut store = Store::new();
        for (a, v) in bindings {
            store = store.extend(a, v);
        }
        store
    }

    /// Returns `V::bottom()` if `a` is absent.
    pub fn lookup(&self, a: &A) -> V {
        self.bindings.get(a).cloned().unwrap_or_else(V::bottom)
    }

    /// Returns a store whose mapping at `a` is `v ⊔ lookup(a)`.
    pub fn extend(&self, a: A, v: V) -> Self {
        let mut bindings = self.bindings.clone();
        let joined = match bindings.get(&a) {
            Some(existing) => existing.join(&v),
            None => v,
        };
        bindings.insert(a, joined);
        Store { bindings }
    }

    /// `other ⊑ self`: true iff for every `(a, v')` in `other`, `v' ⊑ self.lookup(a)`.
    pub fn subsumes(&self, other: &Self) -> bool {
        other
            .bindings
            .iter()
            .all(|(a, v_other)| self.lookup(a).subsumes(v_other))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&A, &V)> {
        self.bindings.iter()
    }
}

impl<A: Ord + Clone, V: AbstractValue> Default for Store<A, V> {
    fn default() -> Self {
        Self::new()
    }
}
