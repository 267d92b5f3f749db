use std::fmt::Debug;
use std::hash::Hash;

/// An element of a join-semilattice abstract value domain.
///
/// Implementers provide the domain's own widening strategy if the lattice is
/// infinite; the core never widens on their behalf.
pub trait AbstractValue: Clone + Eq + Ord + Hash + Debug {
    /// The least element of the lattice.
    fn bottom() -> Self;

    /// Least upper bound of `self` and `other`.
    fn join(&self, other: &Self) -> Self;

    /// `other ⊑ self`: `self` carries at least as much information as `other`.
    fn subsumes(&self, other: &Self) -> bool;
}
