//! Flight parameter definitions
//!
//! The non-gain configuration surface:
//!
//! - `COOR_TYPE` - coordinate frame selector (0 = local ENU, 1 = heading)
//! - `TOFF_HEIGHT` / `LAND_HEIGHT` - takeoff and land target altitudes (m)
//! - `MAX_VX` / `MAX_VY` / `MAX_VZ` / `MAX_YAWRATE` - per-axis command limits
//! - `LOOP_RATE` - control loop rate in Hz (read-only)
//! - `DOG_DIV` - control ticks per watchdog cycle (read-only)
//! - `PID_RESET` - reset tracker wind-up on tracking entry (0 = keep, the
//!   historical behavior)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::tracking::{CoordFrame, VelocityLimits};

/// Flight parameters loaded from the parameter store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightParams {
    pub frame: CoordFrame,
    pub toff_height: f32,
    pub land_height: f32,
    pub limits: VelocityLimits,
    pub loop_rate_hz: u32,
    pub watchdog_divider: u32,
    pub reset_tracker_on_entry: bool,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            frame: CoordFrame::LocalEnu,
            toff_height: 1.5,
            land_height: 0.3,
            limits: VelocityLimits::default(),
            loop_rate_hz: 20,
            watchdog_divider: 10,
            reset_tracker_on_entry: false,
        }
    }
}

impl FlightParams {
    /// Register all flight parameters with their default values.
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = Self::default();

        store.register("COOR_TYPE", ParamValue::Int(0), ParamFlags::empty())?;
        store.register(
            "TOFF_HEIGHT",
            ParamValue::Float(defaults.toff_height),
            ParamFlags::empty(),
        )?;
        store.register(
            "LAND_HEIGHT",
            ParamValue::Float(defaults.land_height),
            ParamFlags::empty(),
        )?;
        store.register(
            "MAX_VX",
            ParamValue::Float(defaults.limits.max_vx),
            ParamFlags::empty(),
        )?;
        store.register(
            "MAX_VY",
            ParamValue::Float(defaults.limits.max_vy),
            ParamFlags::empty(),
        )?;
        store.register(
            "MAX_VZ",
            ParamValue::Float(defaults.limits.max_vz),
            ParamFlags::empty(),
        )?;
        store.register(
            "MAX_YAWRATE",
            ParamValue::Float(defaults.limits.max_yaw_rate),
            ParamFlags::empty(),
        )?;
        store.register(
            "LOOP_RATE",
            ParamValue::Int(defaults.loop_rate_hz as i32),
            ParamFlags::READ_ONLY,
        )?;
        store.register(
            "DOG_DIV",
            ParamValue::Int(defaults.watchdog_divider as i32),
            ParamFlags::READ_ONLY,
        )?;
        store.register("PID_RESET", ParamValue::Bool(false), ParamFlags::empty())?;
        Ok(())
    }

    /// Load flight parameters from the store, falling back to defaults for
    /// any missing entry.
    pub fn from_store(store: &ParameterStore) -> Self {
        let defaults = Self::default();
        let get_f32 = |name: &str, fallback: f32| {
            store.get(name).map(|v| v.as_f32()).unwrap_or(fallback)
        };

        let frame = match store.get("COOR_TYPE").map(|v| v.as_i32()).unwrap_or(0) {
            0 => CoordFrame::LocalEnu,
            _ => CoordFrame::BodyHeading,
        };

        Self {
            frame,
            toff_height: get_f32("TOFF_HEIGHT", defaults.toff_height),
            land_height: get_f32("LAND_HEIGHT", defaults.land_height),
            limits: VelocityLimits {
                max_vx: get_f32("MAX_VX", defaults.limits.max_vx),
                max_vy: get_f32("MAX_VY", defaults.limits.max_vy),
                max_vz: get_f32("MAX_VZ", defaults.limits.max_vz),
                max_yaw_rate: get_f32("MAX_YAWRATE", defaults.limits.max_yaw_rate),
            },
            loop_rate_hz: store
                .get("LOOP_RATE")
                .map(|v| v.as_i32().max(1) as u32)
                .unwrap_or(defaults.loop_rate_hz),
            watchdog_divider: store
                .get("DOG_DIV")
                .map(|v| v.as_i32().max(1) as u32)
                .unwrap_or(defaults.watchdog_divider),
            reset_tracker_on_entry: store
                .get("PID_RESET")
                .map(|v| v.as_bool())
                .unwrap_or(defaults.reset_tracker_on_entry),
        }
    }
}
