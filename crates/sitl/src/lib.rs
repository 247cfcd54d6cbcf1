//! offboard_center_sitl - Host simulation harness for the offboard controller
//!
//! Stands in for the excluded collaborators (telemetry transport, autopilot
//! mode reporting, command channel) so the supervisory control core can be
//! exercised end-to-end on the host:
//!
//! - [`signals`]: Shared last-writer-wins snapshots written by "collaborator"
//!   threads and read by the control loop
//! - [`vehicle`]: Minimal velocity-following multirotor kinematics
//! - [`scenario`]: Simulation configuration (serde-loadable)
//! - [`runner`]: Lockstep control-loop driver

pub mod error;
pub mod runner;
pub mod scenario;
pub mod signals;
pub mod vehicle;

pub use error::HarnessError;
pub use runner::LockstepRunner;
pub use scenario::ScenarioConfig;
pub use signals::SharedSignals;
pub use vehicle::QuadModel;
