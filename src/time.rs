use std::fmt::Debug;
use std::hash::Hash;

/// An abstract timestamp used to allocate addresses.
///
/// The allocation policy itself lives outside the core (see [`crate::semantics::Semantics`]);
/// this trait only fixes the shape every timestamp type must have. Must be finite
/// over any finite program or termination is not guaranteed.
pub trait Time<Expr>: Clone + Eq + Ord + Hash + Debug {
    /// Seeds a fresh timeline, e.g. from the program's entry point name.
    fn initial(seed: &str) -> Self;

    /// Advances the clock by one ordinary step.
    fn tick(&self) -> Self;

    /// Advances the clock at a call site, distinct from a plain tick so that
    /// call-sensitive abstractions (k-CFA and friends) can thread context.
    fn tick_call(&self, call_site: &Expr) -> Self;
}
