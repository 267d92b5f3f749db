//! Core of an abstract-interpretation engine built on the "Abstracting
//! Abstract Machines" (AAM) recipe: a CESK-style abstract machine whose
//! environment, value store, continuation store, and time are all drawn
//! from finite abstract domains, driven to a fixpoint by a worklist
//! explorer with subsumption-based pruning.
//!
//! Everything language-specific — the surface parser, the concrete
//! `step_eval`/`step_kont` semantics, the value lattice, and the address
//! and time allocation policies — is supplied by the caller through the
//! traits in [`value`], [`time`], and [`semantics`]. This crate only
//! contains the machinery that is the same no matter which language or
//! abstraction the caller plugs in: the stores, the action integrator, and
//! the fixpoint loop.

pub mod action;
pub mod config;
pub mod control;
pub mod env;
pub mod error;
pub mod explorer;
#[cfg(feature = "graph")]
pub mod graph;
pub mod kont;
pub mod kstore;
pub mod semantics;
pub mod state;
pub mod store;
pub mod time;
pub mod value;

pub use action::Action;
pub use config::{ExplorerConfig, WorklistOrder};
pub use control::Control;
pub use env::Env;
pub use error::EngineError;
pub use explorer::{ExplorationResult, Explorer};
#[cfg(feature = "graph")]
pub use graph::{ControlKind, TransitionGraph};
pub use kont::{Kont, KontAddr};
pub use kstore::KontStore;
pub use semantics::Semantics;
pub use state::State;
pub use store::Store;
pub use time::Time;
pub use value::AbstractValue;

pub use smallvec::{self, SmallVec};
