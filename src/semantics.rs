use smallvec::SmallVec;

use crate::action::Action;
use crate::env::Env;
use crate::store::Store;
use crate::value::AbstractValue;

/// The external collaborator every engine is parameterized over: the
/// concrete `stepEval`/`stepKont` relation, plus the program's initial
/// environment and store. Everything about the surface language — parsing,
/// address/time allocation policy, the value lattice itself — lives behind
/// this trait; the engine only ever calls through it.
pub trait Semantics<Expr, A, V, T, F, Err>
where
    V: AbstractValue,
{
    fn initial_env(&self) -> Env<A>;
    fn initial_store(&self) -> Store<A, V>;

    /// Successors of an `Eval(expr, env)` point.
    fn step_eval(
        &self,
        expr: &Expr,
        env: &Env<A>,
        store: &Store<A, V>,
        time: &T,
    ) -> SmallVec<[Action<Expr, A, V, F, Err>; 4]>;

    /// Successors of a `Kont(value)` point returning through `frame`.
    fn step_kont(
        &self,
        value: &V,
        frame: &F,
        store: &Store<A, V>,
        time: &T,
    ) -> SmallVec<[Action<Expr, A, V, F, Err>; 4]>;
}
