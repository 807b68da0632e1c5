#![allow(missing_docs)] // Public items are documented in the submodules.

//! Transport engine internals for drudesim.
//!
//! Leaves first: the ion lattice, the electron pool and its integrator, the
//! scattering model, the periodic boundary, collision statistics, and the
//! [`TransportEngine`] that composes them.

pub mod boundary;
pub mod electron;
pub mod engine;
pub mod lattice;
pub mod scattering;
pub mod stats;

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

pub use boundary::{BoundaryTracker, Crossing};
pub use electron::Electron;
pub use engine::{EngineSnapshot, TransportEngine};
pub use lattice::Ion;
pub use scattering::{PostCollision, ScatteringModel};
pub use stats::StatisticsAggregator;
