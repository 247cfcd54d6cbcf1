//! Flight mode state machine
//!
//! - [`state`]: `FlightState` and the per-tick event/report types
//! - [`machine`]: `FlightModeStateMachine`, the top-level per-tick driver

mod machine;
mod state;

pub use machine::{FlightModeStateMachine, TickInputs, TickOutput};
pub use state::{ControlEvent, FlightState};
