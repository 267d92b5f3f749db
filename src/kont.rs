use std::fmt::Debug;
use std::hash::Hash;

/// Address of a continuation: either a fresh allocation tied to an expression
/// awaiting return at a given time, or the root sentinel.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KontAddr<Expr, T> {
    Normal(Expr, T),
    Halt,
}

impl<Expr, T> KontAddr<Expr, T> {
    pub fn is_halt(&self) -> bool {
        matches!(self, KontAddr::Halt)
    }
}

/// A continuation frame paired with the address to resume once it returns.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kont<F, Expr, T> {
    pub frame: F,
    pub parent: KontAddr<Expr, T>,
}

impl<F, Expr, T> Kont<F, Expr, T> {
    pub fn new(frame: F, parent: KontAddr<Expr, T>) -> Self {
        Kont { frame, parent }
    }
}
