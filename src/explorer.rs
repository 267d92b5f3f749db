use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::action::Action;
use crate::config::{ExplorerConfig, WorklistOrder};
use crate::control::Control;
use crate::error::EngineError;
use crate::kont::{Kont, KontAddr};
use crate::kstore::KontStore;
use crate::semantics::Semantics;
use crate::state::State;
use crate::store::Store;
use crate::time::Time;
use crate::value::AbstractValue;

#[cfg(feature = "graph")]
use crate::graph::TransitionGraph;

/// Output of a completed (or timed-out / fuel-exhausted) exploration.
pub struct ExplorationResult<Expr, A, V, F, T, Err>
where
    F: Ord,
    Expr: Ord,
    T: Ord,
    A: Ord,
{
    pub halted: Vec<State<Expr, A, V, F, T, Err>>,
    pub number_of_states: usize,
    pub elapsed: Duration,
    pub timed_out: bool,
    pub fuel_exhausted: bool,
    #[cfg(feature = "graph")]
    pub graph: Option<TransitionGraph<Expr, A, V, F, T, Err>>,
}

impl<Expr, A, V, F, T, Err> ExplorationResult<Expr, A, V, F, T, Err>
where
    Expr: Ord,
    A: Ord + Eq,
    V: AbstractValue,
    F: Ord,
    T: Ord,
    Err: Eq,
{
    /// Values carried by halted `Kont(v)` states.
    pub fn final_values(&self) -> Vec<V> {
        self.halted
            .iter()
            .filter_map(|s| s.control.as_value().cloned())
            .collect()
    }
}

/// The action integrator: translates a single [`Action`] produced by the
/// semantics into the corresponding successor's control, store, root, and
/// continuation store, applying `addRef`/`decRef` on the root's move. The
/// order inside the `Push` case matters: `extend` (which ref-bumps the
/// parent) happens before the new root's own `add_ref`, which happens
/// before `dec_ref` on the state's old root, so invariant K1 never dips to
/// zero mid-update.
#[allow(clippy::type_complexity)]
fn integrate<Expr, A, V, F, T, Err>(
    action: Action<Expr, A, V, F, Err>,
    fallback_store: &Store<A, V>,
    base_root: &KontAddr<Expr, T>,
    old_root: &KontAddr<Expr, T>,
    kstore: &KontStore<F, Expr, T>,
    time: &T,
) -> Result<
    (
        Control<Expr, A, V, Err>,
        Store<A, V>,
        KontAddr<Expr, T>,
        KontStore<F, Expr, T>,
        T,
    ),
    EngineError<Expr, T>,
>
where
    Expr: Ord + Clone + Hash + Debug,
    A: Ord + Clone + Hash + Debug,
    V: AbstractValue,
    F: Ord + Clone + Hash + Debug,
    T: Time<Expr>,
{
    let move_root = |new_root: KontAddr<Expr, T>| -> Result<KontStore<F, Expr, T>, EngineError<Expr, T>> {
        if &new_root == old_root {
            Ok(kstore.clone())
        } else {
            Ok(kstore.add_ref(new_root).dec_ref(old_root.clone())?)
        }
    };

    match action {
        Action::ReachedValue(v, store) => {
            let new_root = base_root.clone();
            let kstore = move_root(new_root.clone())?;
            Ok((Control::Kont(v), store, new_root, kstore, time.tick()))
        }
        Action::Push(frame, expr, env, store) => {
            let k_new = KontAddr::Normal(expr.clone(), time.clone());
            let kstore = kstore.extend(k_new.clone(), Kont::new(frame, base_root.clone()))?;
            let kstore = kstore.add_ref(k_new.clone());
            let kstore = kstore.dec_ref(old_root.clone())?;
            Ok((Control::Eval(expr, env), store, k_new, kstore, time.tick()))
        }
        Action::Eval(expr, env, store) => {
            let new_root = base_root.clone();
            let kstore = move_root(new_root.clone())?;
            Ok((Control::Eval(expr, env), store, new_root, kstore, time.tick()))
        }
        Action::StepIn(call_site, next_expr, env, store, _reserved_a, _reserved_b) => {
            let new_root = base_root.clone();
            let kstore = move_root(new_root.clone())?;
            Ok((
                Control::Eval(next_expr, env),
                store,
                new_root,
                kstore,
                time.tick_call(&call_site),
            ))
        }
        Action::Error(err) => {
            let new_root = base_root.clone();
            let kstore = move_root(new_root.clone())?;
            Ok((
                Control::Error(err),
                fallback_store.clone(),
                new_root,
                kstore,
                time.tick(),
            ))
        }
    }
}

/// Successors of a single state: `Eval` dispatches through `step_eval`
/// once; `Kont(v)` dispatches through `step_kont` once per stored
/// continuation, each contributing its own parent as the base root;
/// `Error` and halted `Kont` states are terminal.
pub fn step<Expr, A, V, F, T, Err>(
    state: &State<Expr, A, V, F, T, Err>,
    sem: &impl Semantics<Expr, A, V, T, F, Err>,
) -> Result<Vec<State<Expr, A, V, F, T, Err>>, EngineError<Expr, T>>
where
    Expr: Ord + Clone + Hash + Debug,
    A: Ord + Clone + Hash + Debug,
    V: AbstractValue,
    F: Ord + Clone + Hash + Debug,
    T: Time<Expr>,
    Err: Eq,
{
    let mut out = Vec::new();
    match &state.control {
        Control::Eval(expr, env) => {
            let actions = sem.step_eval(expr, env, &state.store, &state.time);
            for action in actions {
                let (control, store, kaddr, kstore, time) = integrate(
                    action,
                    &state.store,
                    &state.kaddr,
                    &state.kaddr,
                    &state.kstore,
                    &state.time,
                )?;
                out.push(State { control, store, kstore, kaddr, time });
            }
        }
        Control::Kont(v) => {
            if state.kaddr.is_halt() {
                return Ok(out);
            }
            if !state.kstore.contains(&state.kaddr) {
                return Err(EngineError::NoActiveRoot(state.kaddr.clone()));
            }
            for kont in state.kstore.lookup(&state.kaddr) {
                let actions = sem.step_kont(v, &kont.frame, &state.store, &state.time);
                for action in actions {
                    let (control, store, kaddr, kstore, time) = integrate(
                        action,
                        &state.store,
                        &kont.parent,
                        &state.kaddr,
                        &state.kstore,
                        &state.time,
                    )?;
                    out.push(State { control, store, kstore, kaddr, time });
                }
            }
        }
        Control::Error(_) => {}
    }
    Ok(out)
}

/// The worklist fixpoint explorer: drives `step` to a least fixed point,
/// pruning by state equality and (optionally) subsumption.
pub struct Explorer<'s, Sem> {
    sem: &'s Sem,
    config: ExplorerConfig,
}

impl<'s, Sem> Explorer<'s, Sem> {
    pub fn new(sem: &'s Sem, config: ExplorerConfig) -> Self {
        Explorer { sem, config }
    }

    /// Injects `program` using the semantics' own `initial_env`/
    /// `initial_store` and runs it to a fixpoint. The usual entry point —
    /// [`Self::run`] is there for callers that already have a `State` to
    /// resume (e.g. a saved checkpoint).
    pub fn run_program<Expr, A, V, F, T, Err>(
        &self,
        program: Expr,
        seed: &str,
    ) -> Result<ExplorationResult<Expr, A, V, F, T, Err>, EngineError<Expr, T>>
    where
        Expr: Ord + Clone + Hash + Debug,
        A: Ord + Clone + Hash + Debug,
        V: AbstractValue,
        F: Ord + Clone + Hash + Debug,
        T: Time<Expr>,
        Err: Eq + Clone + Hash + Debug,
        Sem: Semantics<Expr, A, V, T, F, Err>,
    {
        let initial = State::inject_with(program, self.sem, seed);
        self.run(initial)
    }

    /// Drives exploration from `initial` to a fixpoint, a timeout, or fuel
    /// exhaustion. Confluent: the result does not depend on worklist order.
    pub fn run<Expr, A, V, F, T, Err>(
        &self,
        initial: State<Expr, A, V, F, T, Err>,
    ) -> Result<ExplorationResult<Expr, A, V, F, T, Err>, EngineError<Expr, T>>
    where
        Expr: Ord + Clone + Hash + Debug,
        A: Ord + Clone + Hash + Debug,
        V: AbstractValue,
        F: Ord + Clone + Hash + Debug,
        T: Time<Expr>,
        Err: Eq + Clone + Hash + Debug,
        Sem: Semantics<Expr, A, V, T, F, Err>,
    {
        let start = Instant::now();
        let mut initial = initial;
        if !self.config.collect_garbage {
            initial.kstore = initial.kstore.without_collection();
        }
        let mut worklist: VecDeque<State<Expr, A, V, F, T, Err>> = VecDeque::new();
        worklist.push_back(initial);

        let mut visited: FxHashSet<State<Expr, A, V, F, T, Err>> = FxHashSet::default();
        let mut by_key: FxHashMap<KontAddr<Expr, T>, Vec<State<Expr, A, V, F, T, Err>>> =
            FxHashMap::default();
        let mut halted: Vec<State<Expr, A, V, F, T, Err>> = Vec::new();
        #[cfg(feature = "graph")]
        let mut graph = if self.config.capture_graph {
            Some(TransitionGraph::new())
        } else {
            None
        };

        let mut iterations: u64 = 0;

        loop {
            if self.config.timeout.is_some_and(|timeout| start.elapsed() >= timeout) {
                return Ok(self.finish(halted, visited.len(), start.elapsed(), true, false, {
                    #[cfg(feature = "graph")]
                    {
                        graph
                    }
                    #[cfg(not(feature = "graph"))]
                    {
                        ()
                    }
                }));
            }

            let Some(state) = (match self.config.worklist_order {
                WorklistOrder::Lifo => worklist.pop_back(),
                WorklistOrder::Fifo => worklist.pop_front(),
            }) else {
                return Ok(self.finish(halted, visited.len(), start.elapsed(), false, false, {
                    #[cfg(feature = "graph")]
                    {
                        graph
                    }
                    #[cfg(not(feature = "graph"))]
                    {
                        ()
                    }
                }));
            };

            iterations += 1;
            if self.config.max_iterations.is_some_and(|max| iterations > max) {
                return Ok(self.finish(halted, visited.len(), start.elapsed(), false, true, {
                    #[cfg(feature = "graph")]
                    {
                        graph
                    }
                    #[cfg(not(feature = "graph"))]
                    {
                        ()
                    }
                }));
            }

            if visited.contains(&state) {
                continue;
            }

            if self.config.subsumption {
                if let Some(bucket) = by_key.get(state.key()) {
                    if let Some(_representative) = bucket.iter().find(|v| v.subsumes(&state)) {
                        #[cfg(feature = "graph")]
                        if let Some(g) = graph.as_mut() {
                            g.add_edge(&state, _representative);
                        }
                        continue;
                    }
                }
            }

            if state.is_halted() {
                halted.push(state.clone());
                by_key.entry(state.key().clone()).or_default().push(state.clone());
                visited.insert(state);
                continue;
            }

            let succs = step(&state, self.sem)?;
            #[cfg(feature = "graph")]
            if let Some(g) = graph.as_mut() {
                for s in &succs {
                    g.add_edge(&state, s);
                }
            }
            for s in succs {
                worklist.push_back(s);
            }
            by_key.entry(state.key().clone()).or_default().push(state.clone());
            visited.insert(state);
        }
    }

    #[cfg(feature = "graph")]
    #[allow(clippy::too_many_arguments)]
    fn finish<Expr, A, V, F, T, Err>(
        &self,
        halted: Vec<State<Expr, A, V, F, T, Err>>,
        number_of_states: usize,
        elapsed: Duration,
        timed_out: bool,
        fuel_exhausted: bool,
        graph: Option<TransitionGraph<Expr, A, V, F, T, Err>>,
    ) -> ExplorationResult<Expr, A, V, F, T, Err>
    where
        F: Ord,
        Expr: Ord,
        T: Ord,
        A: Ord,
    {
        ExplorationResult {
            halted,
            number_of_states,
            elapsed,
            timed_out,
            fuel_exhausted,
            graph,
        }
    }

    #[cfg(not(feature = "graph"))]
    #[allow(clippy::too_many_arguments)]
    fn finish<Expr, A, V, F, T, Err>(
        &self,
        halted: Vec<State<Expr, A, V, F, T, Err>>,
        number_of_states: usize,
        elapsed: Duration,
        timed_out: bool,
        fuel_exhausted: bool,
        _graph: (),
    ) -> ExplorationResult<Expr, A, V, F, T, Err>
    where
        F: Ord,
        Expr: Ord,
        T: Ord,
        A: Ord,
    {
        ExplorationResult {
            halted,
            number_of_states,
            elapsed,
            timed_out,
            fuel_exhausted,
        }
    }
}
