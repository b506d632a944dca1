//! blockduel (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof: the simulation core in
//! [`core`] and the shared plain types in [`types`]. Rendering, input
//! devices and orchestration live outside this workspace; they drive the
//! core through the tick order documented in [`blockduel_core`].

pub use blockduel_core as core;
pub use blockduel_types as types;
