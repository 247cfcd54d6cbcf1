//! Position tracking and setpoint arbitration
//!
//! This module turns external setpoints into a limited velocity command:
//!
//! - [`pid`]: Per-axis PID calculator with integral clamping
//! - [`limits`]: Independent per-axis velocity/yaw-rate clamp
//! - [`arbiter`]: Chooses the control law from channel freshness

mod arbiter;
mod limits;
mod pid;

pub use arbiter::{CoordFrame, SetpointArbiter};
pub use limits::VelocityLimits;
pub use pid::{GainSet, PidAxis, PidGains, PositionTracker};
