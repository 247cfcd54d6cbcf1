//! Parameter store and configuration blocks
//!
//! Configuration follows the register-defaults / load-from-store pattern:
//! each block registers its named parameters with default values, the
//! loader (excluded collaborator) overwrites them once at startup, and the
//! immutable [`OffboardConfig`] aggregate is built from the store for the
//! process lifetime.
//!
//! # Blocks
//!
//! - [`TrackerParams`]: the nine PID gains (`PT_*`)
//! - [`FlightParams`]: frame, heights, limits, loop/watchdog rates

mod config;
mod error;
mod flight;
mod storage;
mod tracker;

pub use config::OffboardConfig;
pub use error::ParameterError;
pub use flight::FlightParams;
pub use storage::{ParamFlags, ParamValue, ParameterStore};
pub use tracker::TrackerParams;
