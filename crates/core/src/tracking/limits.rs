//! Per-axis velocity and yaw-rate limits
//!
//! Each command channel is clamped independently and symmetrically to its
//! configured magnitude. This is deliberately *not* a vector-norm clamp:
//! under saturation the commanded heading may change. Matching the observed
//! vehicle behavior, a normalized clamp would be a behavior change.

use crate::telemetry::VelocityCommand;

/// Symmetric per-axis bounds on the outgoing command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityLimits {
    /// Magnitude bound on vx (m/s)
    pub max_vx: f32,
    /// Magnitude bound on vy (m/s)
    pub max_vy: f32,
    /// Magnitude bound on vz (m/s)
    pub max_vz: f32,
    /// Magnitude bound on yaw rate (rad/s)
    pub max_yaw_rate: f32,
}

impl Default for VelocityLimits {
    fn default() -> Self {
        Self {
            max_vx: 1.0,
            max_vy: 1.0,
            max_vz: 1.0,
            max_yaw_rate: 1.0,
        }
    }
}

impl VelocityLimits {
    /// Clamp every channel of `command` to its bound.
    pub fn apply(&self, command: VelocityCommand) -> VelocityCommand {
        VelocityCommand {
            vx: command.vx.clamp(-self.max_vx, self.max_vx),
            vy: command.vy.clamp(-self.max_vy, self.max_vy),
            vz: command.vz.clamp(-self.max_vz, self.max_vz),
            yaw_rate: command.yaw_rate.clamp(-self.max_yaw_rate, self.max_yaw_rate),
        }
    }
}
