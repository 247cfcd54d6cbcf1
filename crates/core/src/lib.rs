//! offboard_center_core - Pure no_std supervisory flight-mode control logic
//!
//! This crate contains the platform-agnostic decision and control logic for
//! a multirotor flying under external (offboard) velocity/position commands.
//! It can be tested on host without any transport or runtime dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Snapshot inputs**: Telemetry and setpoints enter as last-writer-wins
//!   snapshots; the control loop owns all mutable state
//!
//! # Modules
//!
//! - [`telemetry`]: Feedback, setpoint, and command types
//! - [`tracking`]: PID position tracker, velocity limiter, setpoint arbiter
//! - [`mode`]: Flight state machine driving the per-tick velocity command
//! - [`watchdog`]: Slow-cadence supervisor for freshness and connectivity
//! - [`parameters`]: Parameter store and configuration blocks

#![no_std]

pub mod mode;
pub mod parameters;
pub mod telemetry;
pub mod tracking;
pub mod watchdog;
