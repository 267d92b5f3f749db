use std::fmt::Debug;
use std::hash::Hash;

use crate::control::Control;
use crate::env::Env;
use crate::kont::KontAddr;
use crate::kstore::KontStore;
use crate::semantics::Semantics;
use crate::store::Store;
use crate::time::Time;
use crate::value::AbstractValue;

/// A CESK state: `(control, value store, continuation store, current
/// continuation address, time)`. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State<Expr, A, V, F, T, Err>
where
    F: Ord,
    Expr: Ord,
    T: Ord,
    A: Ord,
{
    pub control: Control<Expr, A, V, Err>,
    pub store: Store<A, V>,
    pub kstore: KontStore<F, Expr, T>,
    pub kaddr: KontAddr<Expr, T>,
    pub time: T,
}

impl<Expr, A, V, F, T, Err> State<Expr, A, V, F, T, Err>
where
    Expr: Ord + Clone + Hash + Debug,
    A: Ord + Clone + Hash + Debug,
    V: AbstractValue,
    F: Ord + Clone + Hash + Debug,
    T: Time<Expr>,
    Err: Eq,
{
    /// The initial state: `Eval(program, env0), S0, KS0, Halt, t0`, with
    /// `Halt` present in the continuation store at `refs = 1`.
    pub fn inject(program: Expr, env0: Env<A>, store0: Store<A, V>, seed: &str) -> Self {
        State {
            control: Control::Eval(program, env0),
            store: store0,
            kstore: KontStore::new().add_ref(KontAddr::Halt),
            kaddr: KontAddr::Halt,
            time: T::initial(seed),
        }
    }

    /// Halted iff control is `Error`, or control is `Kont(_)` with the root
    /// at `Halt`.
    pub fn is_halted(&self) -> bool {
        match &self.control {
            Control::Error(_) => true,
            Control::Kont(_) => self.kaddr.is_halt(),
            Control::Eval(..) => false,
        }
    }

    /// The initial state using a semantics' own `initial_env`/`initial_store`,
    /// rather than caller-supplied ones — the usual way to start exploring a
    /// whole program (see [`crate::explorer::Explorer::run_program`]).
    pub fn inject_with<Sem>(program: Expr, sem: &Sem, seed: &str) -> Self
    where
        Sem: Semantics<Expr, A, V, T, F, Err>,
    {
        Self::inject(program, sem.initial_env(), sem.initial_store(), seed)
    }

    /// The key `key(Σ) = Σ.a`, for bucketing states by continuation address.
    pub fn key(&self) -> &KontAddr<Expr, T> {
        &self.kaddr
    }

    /// Component-wise: `C ⊑`, `S ⊑`, `a ==`, `KS ⊑`, `t ==`.
    pub fn subsumes(&self, other: &Self) -> bool {
        self.kaddr == other.kaddr
            && self.time == other.time
            && self.control.subsumes(&other.control)
            && self.store.subsumes(&other.store)
            && self.kstore.subsumes(&other.kstore)
    }
}
