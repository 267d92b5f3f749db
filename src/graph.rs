//! In-memory transition graph, captured only when
//! [`crate::config::ExplorerConfig::with_graph_capture`] is enabled. Purely
//! diagnostic — it is never consulted by the fixpoint itself. Rendering to
//! a file format (DOT, GraphViz, ...) is left to a caller-supplied renderer.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::control::Control;
use crate::state::State;

/// Node coloring by control kind, for diagnostic rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Eval,
    Kont,
    HaltedKont,
    Error,
}

impl ControlKind {
    fn of<Expr, A, V, Err>(control: &Control<Expr, A, V, Err>, halted_root: bool) -> Self {
        match control {
            Control::Eval(..) => ControlKind::Eval,
            Control::Error(_) => ControlKind::Error,
            Control::Kont(_) if halted_root => ControlKind::HaltedKont,
            Control::Kont(_) => ControlKind::Kont,
        }
    }

    /// The coloring for `state`'s node in a [`TransitionGraph`].
    pub fn of_state<Expr, A, V, F, T, Err>(state: &State<Expr, A, V, F, T, Err>) -> Self
    where
        F: Ord,
        Expr: Ord,
        T: Ord,
        A: Ord,
    {
        Self::of(&state.control, state.kaddr.is_halt())
    }
}

/// A directed multigraph of state transitions, deduplicated by edge.
pub struct TransitionGraph<Expr, A, V, F, T, Err>
where
    F: Ord,
    Expr: Ord,
    T: Ord,
    A: Ord,
{
    graph: DiGraph<State<Expr, A, V, F, T, Err>, ()>,
    nodes: HashMap<State<Expr, A, V, F, T, Err>, NodeIndex>,
}

impl<Expr, A, V, F, T, Err> TransitionGraph<Expr, A, V, F, T, Err>
where
    Expr: Ord + Clone + Hash + Debug,
    A: Ord + Clone + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
    F: Ord + Clone + Hash + Debug,
    T: Ord + Clone + Hash + Debug,
    Err: Clone + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        TransitionGraph {
            graph: DiGraph::new(),
            nodes: HashMap::new(),
        }
    }

    fn node(&mut self, state: &State<Expr, A, V, F, T, Err>) -> NodeIndex {
        if let Some(idx) = self.nodes.get(state) {
            return *idx;
        }
        let idx = self.graph.add_node(state.clone());
        self.nodes.insert(state.clone(), idx);
        idx
    }

    /// Records one edge `from -> to`; duplicate edges are not re-added.
    pub fn add_edge(
        &mut self,
        from: &State<Expr, A, V, F, T, Err>,
        to: &State<Expr, A, V, F, T, Err>,
    ) {
        let a = self.node(from);
        let b = self.node(to);
        if !self.graph.contains_edge(a, b) {
            self.graph.add_edge(a, b, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn inner(&self) -> &DiGraph<State<Expr, A, V, F, T, Err>, ()> {
        &self.graph
    }

    /// Iterates nodes paired with their [`ControlKind`] coloring.
    pub fn nodes_with_kind(
        &self,
    ) -> impl Iterator<Item = (&State<Expr, A, V, F, T, Err>, ControlKind)> {
        self.graph
            .node_weights()
            .map(|state| (state, ControlKind::of_state(state)))
    }
}

impl<Expr, A, V, F, T, Err> Default for TransitionGraph<Expr, A, V, F, T, Err>
where
    Expr: Ord + Clone + Hash + Debug,
    A: Ord + Clone + Hash + Debug,
    V: Clone + Eq + Hash + Debug,
    F: Ord + Clone + Hash + Debug,
    T: Ord + Clone + Hash + Debug,
    Err: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
