//! Telemetry, setpoint, and command types
//!
//! These types model the data exchanged with the external collaborators:
//! pose/velocity feedback from the autopilot, the two independent setpoint
//! channels, the offboard-mode signal, and the outgoing velocity command.
//!
//! All inbound records are last-writer-wins snapshots. The control loop
//! reads the latest value; nothing is queued.

use nalgebra::Vector3;

/// Latest pose and velocity feedback from the vehicle.
///
/// Position/yaw and velocity arrive on separate channels in the transport,
/// so each group carries its own message stamp (seconds).
#[derive(Clone, Copy, Debug)]
pub struct PoseFeedback {
    /// Local position in the ENU-like frame (meters)
    pub position: Vector3<f32>,
    /// Yaw extracted upstream from the vehicle orientation (radians)
    pub yaw: f32,
    /// Stamp of the last position/yaw update (seconds)
    pub position_stamp: f64,
    /// Local velocity (m/s)
    pub velocity: Vector3<f32>,
    /// Stamp of the last velocity update (seconds)
    pub velocity_stamp: f64,
}

impl Default for PoseFeedback {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            yaw: 0.0,
            position_stamp: 0.0,
            velocity: Vector3::zeros(),
            velocity_stamp: 0.0,
        }
    }
}

impl PoseFeedback {
    /// Altitude above the local origin (meters)
    pub fn altitude(&self) -> f32 {
        self.position.z
    }

    /// True when every scalar in the snapshot is a usable number.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.yaw.is_finite()
    }
}

/// Position target on the position setpoint channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionSetpoint {
    /// Target position (meters)
    pub position: Vector3<f32>,
    /// Target yaw (radians)
    pub yaw: f32,
    /// Message stamp (seconds)
    pub stamp: f64,
}

/// Velocity target on the velocity setpoint channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct VelocitySetpoint {
    /// Target velocity (m/s)
    pub velocity: Vector3<f32>,
    /// Target yaw rate (rad/s)
    pub yaw_rate: f32,
    /// Message stamp (seconds)
    pub stamp: f64,
}

/// The two independent external setpoint channels.
///
/// Each channel is `None` until its first message arrives. Whether a present
/// channel is *fresh* is decided by the watchdog from stamp comparison, not
/// stored here.
#[derive(Clone, Copy, Debug, Default)]
pub struct SetpointChannels {
    pub position: Option<PositionSetpoint>,
    pub velocity: Option<VelocitySetpoint>,
}

impl SetpointChannels {
    /// Stamp of the position channel, if any message has arrived.
    pub fn position_stamp(&self) -> Option<f64> {
        self.position.map(|sp| sp.stamp)
    }

    /// Stamp of the velocity channel, if any message has arrived.
    pub fn velocity_stamp(&self) -> Option<f64> {
        self.velocity.map(|sp| sp.stamp)
    }
}

/// Most recent autopilot mode report.
///
/// `ready` is true only while the autopilot confirms the externally-commanded
/// (offboard) flight mode. No history is kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct OffboardSignal {
    pub ready: bool,
}

/// Latest take-off/land request from the user command channel.
///
/// Overwritten on every message; an unconsumed request is discarded when a
/// newer one arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TakeoffLandRequest {
    #[default]
    None,
    TakeOff,
    Land,
}

impl TakeoffLandRequest {
    /// Decode the wire value used by the command message
    /// (1 = take off, 2 = land, anything else = none).
    pub fn from_wire(value: u8) -> Self {
        match value {
            1 => Self::TakeOff,
            2 => Self::Land,
            _ => Self::None,
        }
    }
}

/// Velocity command published once per control tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VelocityCommand {
    /// Linear velocity (m/s)
    pub vx: f32,
    pub vy: f32,
    pub vz: f32,
    /// Yaw rate (rad/s)
    pub yaw_rate: f32,
}

impl VelocityCommand {
    /// All-zero command (hover / hold).
    pub const fn zero() -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            vz: 0.0,
            yaw_rate: 0.0,
        }
    }

    /// Pure vertical command, used by takeoff/landing and ground hold.
    pub const fn vertical(vz: f32) -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            vz,
            yaw_rate: 0.0,
        }
    }

    /// True when every channel is a usable number.
    pub fn is_finite(&self) -> bool {
        self.vx.is_finite() && self.vy.is_finite() && self.vz.is_finite() && self.yaw_rate.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_feedback_default_is_finite() {
        let pose = PoseFeedback::default();
        assert!(pose.is_finite());
        assert!((pose.altitude() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pose_feedback_detects_nan() {
        let mut pose = PoseFeedback::default();
        pose.position.z = f32::NAN;
        assert!(!pose.is_finite());

        let mut pose = PoseFeedback::default();
        pose.yaw = f32::INFINITY;
        assert!(!pose.is_finite());
    }

    #[test]
    fn test_setpoint_channels_stamps() {
        let mut channels = SetpointChannels::default();
        assert!(channels.position_stamp().is_none());
        assert!(channels.velocity_stamp().is_none());

        channels.velocity = Some(VelocitySetpoint {
            stamp: 1.5,
            ..Default::default()
        });
        assert!(channels.position_stamp().is_none());
        assert_eq!(channels.velocity_stamp(), Some(1.5));
    }

    #[test]
    fn test_takeoff_land_request_from_wire() {
        assert_eq!(TakeoffLandRequest::from_wire(1), TakeoffLandRequest::TakeOff);
        assert_eq!(TakeoffLandRequest::from_wire(2), TakeoffLandRequest::Land);
        assert_eq!(TakeoffLandRequest::from_wire(0), TakeoffLandRequest::None);
        assert_eq!(TakeoffLandRequest::from_wire(7), TakeoffLandRequest::None);
    }

    #[test]
    fn test_velocity_command_constructors() {
        let zero = VelocityCommand::zero();
        assert_eq!(zero, VelocityCommand::default());

        let vertical = VelocityCommand::vertical(-0.5);
        assert!((vertical.vz + 0.5).abs() < f32::EPSILON);
        assert!((vertical.vx - 0.0).abs() < f32::EPSILON);
        assert!((vertical.yaw_rate - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_velocity_command_detects_nan() {
        let mut cmd = VelocityCommand::zero();
        assert!(cmd.is_finite());
        cmd.yaw_rate = f32::NAN;
        assert!(!cmd.is_finite());
    }
}
