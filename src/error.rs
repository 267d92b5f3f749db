use std::fmt::Debug;

use crate::kont::KontAddr;

/// Error type for engine failures.
///
/// The first three variants are invariant violations in the continuation
/// store and are always programmer errors in the supplied semantics — a
/// well-formed semantics never triggers them. [`EngineError::Semantics`] is
/// an escape hatch for errors external callers want to surface without
/// routing them through [`crate::control::Control::Error`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError<Expr, T>
where
    Expr: Debug,
    T: Debug,
{
    /// A state's current continuation address is not present in its own
    /// continuation store.
    #[error("no active root: {0:?} is not present in the continuation store")]
    NoActiveRoot(KontAddr<Expr, T>),
    /// `decRef` was called on a key whose recorded refcount was already zero
    /// (or the key was absent).
    #[error("ref count underflow at {0:?}")]
    RefUnderflow(KontAddr<Expr, T>),
    /// `extend` was asked to record an edge to a parent address that is not
    /// present in the store.
    #[error("extend referenced missing parent {0:?}")]
    MissingParent(KontAddr<Expr, T>),
    /// The explorer's iteration fuel was exhausted before reaching a fixpoint.
    #[error("exploration fuel exhausted")]
    ExplorationFuelExhausted,
    /// Opaque escape hatch for externally defined semantics-level errors.
    #[error(transparent)]
    Semantics(Box<dyn std::error::Error + Send + Sync>),
}

impl<Expr, T> EngineError<Expr, T>
where
    Expr: Debug,
    T: Debug,
{
    /// Wrap an arbitrary error as [`EngineError::Semantics`].
    pub fn semantics(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        EngineError::Semantics(Box::new(error))
    }
}
