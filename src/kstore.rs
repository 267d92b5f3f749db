use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::EngineError;
use crate::kont::{Kont, KontAddr};

/// Continuation store: maps continuation addresses to the set of frames
/// stored there, reference-counted so that frames become unreachable (and
/// are dropped) as the fixpoint search returns past them.
///
/// AAM's abstraction shares continuation addresses across many states, so a
/// tracing collector would need to scan every live root between steps. The
/// explorer instead only ever moves a single "current root" per transition
/// (`a -> a'`), so every update is the pair `add_ref(a'); dec_ref(a)` —
/// O(1) amortized except when a `dec_ref` cascades through now-unreachable
/// parents. `Normal(e, t)` addresses are only ever referenced by children
/// allocated strictly later, so the continuation graph is acyclic and
/// ref-counting is complete for this domain (no cycles to leak).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KontStore<F, Expr, T>
where
    F: Ord,
    Expr: Ord,
    T: Ord,
{
    konts: BTreeMap<KontAddr<Expr, T>, BTreeSet<Kont<F, Expr, T>>>,
    refs: BTreeMap<KontAddr<Expr, T>, u64>,
    /// Reverse edges: `in[p]` is the set of addresses holding a `Kont` whose
    /// parent is `p`. Maintained for invariant K2/K3 and exposed for tests;
    /// `dec_ref`'s cascade reads parents directly off the freed entry's own
    /// `Kont` set rather than consulting this map.
    rev: BTreeMap<KontAddr<Expr, T>, BTreeSet<KontAddr<Expr, T>>>,
    /// When `false`, `dec_ref` never removes anything — a baseline store
    /// used only to check that collection never changes the halted value
    /// set (see [`KontStore::without_collection`]).
    collect: bool,
}

impl<F, Expr, T> KontStore<F, Expr, T>
where
    F: Ord + Clone + Hash + Debug,
    Expr: Ord + Clone + Hash + Debug,
    T: Ord + Clone + Hash + Debug,
{
    /// Empty store with no entries at all — callers establish `Halt` via
    /// [`KontStore::add_ref`] before use (see `State::inject`).
    pub fn new() -> Self {
        KontStore {
            konts: BTreeMap::new(),
            refs: BTreeMap::new(),
            rev: BTreeMap::new(),
            collect: true,
        }
    }

    /// Returns a store that behaves identically except `dec_ref` becomes a
    /// no-op: nothing is ever reclaimed. Used to establish the baseline for
    /// property 8's ref-counting-never-changes-results check.
    pub fn without_collection(&self) -> Self {
        let mut next = self.clone();
        next.collect = false;
        next
    }

    pub fn contains(&self, k: &KontAddr<Expr, T>) -> bool {
        self.refs.contains_key(k)
    }

    pub fn ref_count(&self, k: &KontAddr<Expr, T>) -> u64 {
        self.refs.get(k).copied().unwrap_or(0)
    }

    /// Empty set if absent.
    pub fn lookup(&self, k: &KontAddr<Expr, T>) -> BTreeSet<Kont<F, Expr, T>> {
        self.konts.get(k).cloned().unwrap_or_default()
    }

    /// Addresses that hold a `Kont` whose parent is `p`.
    pub fn reverse_edges(&self, p: &KontAddr<Expr, T>) -> BTreeSet<KontAddr<Expr, T>> {
        self.rev.get(p).cloned().unwrap_or_default()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &KontAddr<Expr, T>> {
        self.refs.keys()
    }

    /// Inserts `k` with `refs = 1` if absent, otherwise increments `refs(k)`.
    pub fn add_ref(&self, k: KontAddr<Expr, T>) -> Self {
        let mut next = self.clone();
        *next.refs.entry(k).or_insert(0) += 1;
        next
    }

    /// Decrements `refs(k)`; when it reaches zero, removes `k` and cascades
    /// `dec_ref` onto each distinct parent referenced by the `Kont`s
    /// formerly stored at `k`. Fatal if `k` is absent or already at zero.
    pub fn dec_ref(&self, k: KontAddr<Expr, T>) -> Result<Self, EngineError<Expr, T>> {
        if !self.collect {
            return Ok(self.clone());
        }
        let mut next = self.clone();
        let mut pending = vec![k];
        while let Some(k) = pending.pop() {
            let count = next
                .refs
                .get(&k)
                .copied()
                .ok_or_else(|| EngineError::RefUnderflow(k.clone()))?;
            if count == 0 {
                return Err(EngineError::RefUnderflow(k));
            }
            if count > 1 {
                next.refs.insert(k.clone(), count - 1);
                continue;
            }
            // refs(k) hits zero: remove k and cascade onto its parents.
            next.refs.remove(&k);
            let freed = next.konts.remove(&k).unwrap_or_default();
            let parents: BTreeSet<KontAddr<Expr, T>> =
                freed.into_iter().map(|kont| kont.parent).collect();
            for parent in parents {
                if let Some(edges) = next.rev.get_mut(&parent) {
                    edges.remove(&k);
                    if edges.is_empty() {
                        next.rev.remove(&parent);
                    }
                }
                pending.push(parent);
            }
        }
        Ok(next)
    }

    /// If `kont` is already stored at `k`, returns `self` unchanged.
    /// Otherwise stores it, increments `refs(parent)`, and records the
    /// `k -> parent` reverse edge. `parent` must already be present (as an
    /// address with a refcount, even zero) — this is how `Push` sequences
    /// `extend` before the `add_ref` that brings the new root's own count
    /// to one.
    pub fn extend(
        &self,
        k: KontAddr<Expr, T>,
        kont: Kont<F, Expr, T>,
    ) -> Result<Self, EngineError<Expr, T>> {
        if self.konts.get(&k).is_some_and(|set| set.contains(&kont)) {
            return Ok(self.clone());
        }
        let parent = kont.parent.clone();
        if !self.refs.contains_key(&parent) {
            return Err(EngineError::MissingParent(parent));
        }
        let mut next = self.clone();
        next.konts.entry(k.clone()).or_default().insert(kont);
        next.refs.entry(k.clone()).or_insert(0);
        *next.refs.get_mut(&parent).expect("checked above") += 1;
        next.rev.entry(parent).or_default().insert(k);
        Ok(next)
    }

    /// `other ⊑ self`: for every `k` in `other`, the K-set at `k` in `other`
    /// is a subset of the K-set at `k` in `self`.
    pub fn subsumes(&self, other: &Self) -> bool {
        other
            .konts
            .iter()
            .all(|(k, other_set)| self.lookup(k).is_superset(other_set))
    }
}

impl<F, Expr, T> Default for KontStore<F, Expr, T>
where
    F: Ord + Clone + Hash + Debug,
    Expr: Ord + Clone + Hash + Debug,
    T: Ord + Clone + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
