use std::fmt::Debug;
use std::hash::Hash;

use crate::env::Env;
use crate::value::AbstractValue;

/// The three evaluation points a CESK state can sit at.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Control<Expr, A, V, Err> {
    /// Awaiting evaluation of `expr` under `env`.
    Eval(Expr, Env<A>),
    /// Returning `v` to whatever continuation the state's root names.
    Kont(V),
    /// A semantic error surfaced by the external semantics; terminal.
    Error(Err),
}

impl<Expr, A, V, Err> Control<Expr, A, V, Err>
where
    Expr: Eq,
    A: Eq,
    V: AbstractValue,
    Err: Eq,
{
    /// `self ⊒ other`: `Eval` requires identical expr/env; `Kont(v1)`
    /// subsumes `Kont(v2)` iff `v1 ⊒ v2`; `Error` requires equal payload;
    /// the two variants never cross-subsume.
    pub fn subsumes(&self, other: &Self) -> bool {
        match (self, other) {
            (Control::Eval(e1, env1), Control::Eval(e2, env2)) => e1 == e2 && env1 == env2,
            (Control::Kont(v1), Control::Kont(v2)) => v1.subsumes(v2),
            (Control::Error(err1), Control::Error(err2)) => err1 == err2,
            _ => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Control::Error(_))
    }

    pub fn as_value(&self) -> Option<&V> {
        match self {
            Control::Kont(v) => Some(v),
            _ => None,
        }
    }
}
