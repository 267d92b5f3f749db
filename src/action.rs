use crate::env::Env;
use crate::store::Store;

/// The action alphabet emitted by an external semantics: `step_eval` and
/// `step_kont` each return a set of these, one per non-deterministic
/// successor. Every variant carries the value store the semantics produced,
/// already joined with whatever it read.
#[derive(Clone, Debug)]
pub enum Action<Expr, A, V, F, Err> {
    /// Evaluation finished with a value; control becomes `Kont(v)`.
    ReachedValue(V, Store<A, V>),
    /// Push a continuation frame and evaluate `expr` under `env`; allocates
    /// a fresh `Normal(expr, time)` continuation address as the new root.
    Push(F, Expr, Env<A>, Store<A, V>),
    /// Continue evaluating a different expression under `env` with the
    /// current root unchanged.
    Eval(Expr, Env<A>, Store<A, V>),
    /// Like `Eval`, but the time is advanced with `tick_call` at `call_site`
    /// rather than a plain `tick`, for call-sensitive time abstractions.
    ///
    /// The two trailing fields are unused by the core; they exist so
    /// analyses plugged in above the core can thread call-site diagnostic
    /// context through without the action alphabet growing a second
    /// variant per analysis.
    StepIn(Expr, Expr, Env<A>, Store<A, V>, Option<Expr>, Option<Expr>),
    /// A semantic error; control becomes `Error(err)`, terminal.
    Error(Err),
}
