//! Tetra Turns (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetra_turns::{types,core,engine,input,term}`
//! so the binary, integration tests and benchmarks share one import path.

pub use tetra_turns_core as core;
pub use tetra_turns_engine as engine;
pub use tetra_turns_input as input;
pub use tetra_turns_term as term;
pub use tetra_turns_types as types;
