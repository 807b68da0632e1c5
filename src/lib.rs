//! drudesim: a Drude-model conduction engine.
//!
//! Electrons drift through a fixed ion lattice under a uniform field along +x
//! and scatter with a per-tick probability. The [`core::TransportEngine`]
//! owns all state and is stepped once per display frame; [`observables`]
//! turns its counters into physical readouts.
//!
//! ```
//! use drudesim::core::TransportEngine;
//!
//! let mut engine = TransportEngine::new(800.0, 600.0, 50.0, 1.0, 100, Some(42))?;
//! for _ in 0..60 {
//!     engine.step(0.2, 0.05);
//! }
//! assert_eq!(engine.electrons().len(), 100);
//! # Ok::<(), drudesim::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod observables;

#[cfg(feature = "python")]
mod python;

pub use crate::config::TransportConfig;
pub use crate::core::TransportEngine;
pub use crate::error::{Error, Result};
