//! Immutable configuration aggregate
//!
//! Built once after parameter load and handed to the state machine for the
//! process lifetime.

use super::{FlightParams, ParameterError, ParameterStore, TrackerParams};
use crate::tracking::{CoordFrame, GainSet, VelocityLimits};

/// Complete configuration for the supervisory controller.
///
/// The vertical-profile fields reproduce the tuned takeoff/landing shape:
/// `vz = (target - z) * vertical_gain +/- bias`, capped at `vertical_cap`.
/// Changing them changes flight behavior; the defaults are the values the
/// vehicle was flown with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffboardConfig {
    /// Coordinate frame the setpoints are interpreted in
    pub frame: CoordFrame,
    /// Takeoff target altitude (m)
    pub toff_height: f32,
    /// Landing handoff altitude (m)
    pub land_height: f32,
    /// Per-axis command limits applied by the arbiter
    pub limits: VelocityLimits,
    /// PID gain groups for the position tracker
    pub gains: GainSet,
    /// Control loop rate (Hz)
    pub loop_rate_hz: u32,
    /// Control ticks per watchdog cycle
    pub watchdog_divider: u32,
    /// Clear PID wind-up when (re-)entering tracking. Off by default: the
    /// historical behavior carries wind-up across hover gaps.
    pub reset_tracker_on_entry: bool,

    /// Proportional gain of the takeoff/landing vertical profile
    pub vertical_gain: f32,
    /// Constant climb bias added during takeoff (m/s)
    pub ascend_bias: f32,
    /// Constant descent bias subtracted during landing (m/s)
    pub descend_bias: f32,
    /// Magnitude cap on the takeoff/landing vertical command (m/s)
    pub vertical_cap: f32,
    /// Band below the takeoff height that counts as arrival (m)
    pub altitude_tolerance: f32,
    /// Constant hold-down command while idle on the ground (m/s)
    pub ground_hold_vz: f32,
    /// Altitude above which the vehicle counts as airborne for the
    /// watchdog's connectivity failsafe (m)
    pub airborne_threshold: f32,
}

impl Default for OffboardConfig {
    fn default() -> Self {
        let flight = FlightParams::default();
        Self {
            frame: flight.frame,
            toff_height: flight.toff_height,
            land_height: flight.land_height,
            limits: flight.limits,
            gains: GainSet::default(),
            loop_rate_hz: flight.loop_rate_hz,
            watchdog_divider: flight.watchdog_divider,
            reset_tracker_on_entry: flight.reset_tracker_on_entry,
            vertical_gain: 1.0,
            ascend_bias: 0.1,
            descend_bias: 0.2,
            vertical_cap: 0.5,
            altitude_tolerance: 0.1,
            ground_hold_vz: -0.5,
            airborne_threshold: 0.2,
        }
    }
}

impl OffboardConfig {
    /// Register every configuration parameter with its default value.
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        FlightParams::register_defaults(store)?;
        TrackerParams::register_defaults(store)?;
        Ok(())
    }

    /// Build the immutable aggregate from a loaded store.
    pub fn from_store(store: &ParameterStore) -> Self {
        let flight = FlightParams::from_store(store);
        let tracker = TrackerParams::from_store(store);
        Self {
            frame: flight.frame,
            toff_height: flight.toff_height,
            land_height: flight.land_height,
            limits: flight.limits,
            gains: tracker.gains,
            loop_rate_hz: flight.loop_rate_hz,
            watchdog_divider: flight.watchdog_divider,
            reset_tracker_on_entry: flight.reset_tracker_on_entry,
            ..Self::default()
        }
    }
}
