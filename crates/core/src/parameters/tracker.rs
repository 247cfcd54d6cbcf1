//! Position tracker parameter definitions
//!
//! The nine PID gains used by the setpoint arbiter, one `PidGains` group per
//! axis family:
//!
//! - `PT_KP_XY` / `PT_KI_XY` / `PT_KD_XY` - shared by x and y
//! - `PT_KP_Z` / `PT_KI_Z` / `PT_KD_Z`
//! - `PT_KP_YAW` / `PT_KI_YAW` / `PT_KD_YAW`

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::tracking::{GainSet, PidGains};

/// Position tracker gains loaded from the parameter store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerParams {
    pub gains: GainSet,
}

impl TrackerParams {
    /// Register all gain parameters with their default values.
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let defaults = GainSet::default();
        for (name, value) in [
            ("PT_KP_XY", defaults.xy.kp),
            ("PT_KI_XY", defaults.xy.ki),
            ("PT_KD_XY", defaults.xy.kd),
            ("PT_KP_Z", defaults.z.kp),
            ("PT_KI_Z", defaults.z.ki),
            ("PT_KD_Z", defaults.z.kd),
            ("PT_KP_YAW", defaults.yaw.kp),
            ("PT_KI_YAW", defaults.yaw.ki),
            ("PT_KD_YAW", defaults.yaw.kd),
        ] {
            store.register(name, ParamValue::Float(value), ParamFlags::empty())?;
        }
        Ok(())
    }

    /// Load the gain set from the store, falling back to defaults for any
    /// missing entry.
    pub fn from_store(store: &ParameterStore) -> Self {
        let get = |name: &str, fallback: f32| {
            store.get(name).map(|v| v.as_f32()).unwrap_or(fallback)
        };
        let defaults = GainSet::default();

        Self {
            gains: GainSet {
                xy: PidGains::new(
                    get("PT_KP_XY", defaults.xy.kp),
                    get("PT_KI_XY", defaults.xy.ki),
                    get("PT_KD_XY", defaults.xy.kd),
                ),
                z: PidGains::new(
                    get("PT_KP_Z", defaults.z.kp),
                    get("PT_KI_Z", defaults.z.ki),
                    get("PT_KD_Z", defaults.z.kd),
                ),
                yaw: PidGains::new(
                    get("PT_KP_YAW", defaults.yaw.kp),
                    get("PT_KI_YAW", defaults.yaw.ki),
                    get("PT_KD_YAW", defaults.yaw.kd),
                ),
            },
        }
    }
}
