//! Setpoint arbitration
//!
//! Decides, from the freshness of the two setpoint channels, which control
//! law produces the velocity command while the vehicle is tracking:
//!
//! - velocity only: pass the velocity setpoint through
//! - position only: PID on position/yaw error
//! - both: velocity feed-forward plus PID trim
//!
//! The caller must leave the tracking state when neither channel is fresh;
//! the arbiter is not meant to be invoked in that case and defensively
//! returns a zero command.

use crate::telemetry::{PoseFeedback, SetpointChannels, VelocityCommand};
use crate::tracking::{GainSet, PositionTracker, VelocityLimits};
use crate::watchdog::Freshness;

/// Coordinate frame the setpoints are interpreted in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordFrame {
    /// Local ENU-like frame; full arbitration applies.
    #[default]
    LocalEnu,
    /// Heading-relative frame. Tracking in this frame is not implemented;
    /// the arbiter falls back to a pure hover command so a future
    /// implementation can replace this branch without changing the contract.
    BodyHeading,
}

/// Arbitrates between the position and velocity setpoint channels.
///
/// Owns the per-axis PID state, which persists across tracking entries
/// unless explicitly reset by the caller.
#[derive(Debug)]
pub struct SetpointArbiter {
    frame: CoordFrame,
    gains: GainSet,
    limits: VelocityLimits,
    tracker: PositionTracker,
}

impl SetpointArbiter {
    pub fn new(frame: CoordFrame, gains: GainSet, limits: VelocityLimits) -> Self {
        Self {
            frame,
            gains,
            limits,
            tracker: PositionTracker::new(),
        }
    }

    /// Clear the PID tracker state (wind-up, last errors).
    pub fn reset_tracker(&mut self) {
        self.tracker.reset();
    }

    /// Produce the velocity command for one tracking tick.
    ///
    /// The returned command has already passed through the velocity limiter.
    pub fn solve(
        &mut self,
        pose: &PoseFeedback,
        channels: &SetpointChannels,
        position_fresh: Freshness,
        velocity_fresh: Freshness,
    ) -> VelocityCommand {
        if self.frame == CoordFrame::BodyHeading {
            // Explicit stub: hover until this frame gets a real tracker.
            return VelocityCommand::zero();
        }

        let position = channels.position.filter(|_| position_fresh.is_fresh());
        let velocity = channels.velocity.filter(|_| velocity_fresh.is_fresh());

        let raw = match (velocity, position) {
            (Some(vel_sp), None) => VelocityCommand {
                vx: vel_sp.velocity.x,
                vy: vel_sp.velocity.y,
                vz: vel_sp.velocity.z,
                yaw_rate: vel_sp.yaw_rate,
            },
            (None, Some(pos_sp)) => {
                let trim = self.track(pose, &pos_sp);
                VelocityCommand {
                    vx: trim.0,
                    vy: trim.1,
                    vz: trim.2,
                    yaw_rate: trim.3,
                }
            }
            (Some(vel_sp), Some(pos_sp)) => {
                // Velocity acts as feed-forward, PID trims toward the
                // position target on every axis including yaw.
                let trim = self.track(pose, &pos_sp);
                VelocityCommand {
                    vx: vel_sp.velocity.x + trim.0,
                    vy: vel_sp.velocity.y + trim.1,
                    vz: vel_sp.velocity.z + trim.2,
                    yaw_rate: vel_sp.yaw_rate + trim.3,
                }
            }
            // Neither fresh: the state machine should have left tracking.
            (None, None) => VelocityCommand::zero(),
        };

        self.limits.apply(raw)
    }

    /// PID corrections (x, y, z, yaw) toward the position setpoint.
    fn track(
        &mut self,
        pose: &PoseFeedback,
        target: &crate::telemetry::PositionSetpoint,
    ) -> (f32, f32, f32, f32) {
        let x_error = target.position.x - pose.position.x;
        let y_error = target.position.y - pose.position.y;
        let z_error = target.position.z - pose.position.z;
        let yaw_error = target.yaw - pose.yaw;

        (
            self.tracker.x.update(&self.gains.xy, x_error),
            self.tracker.y.update(&self.gains.xy, y_error),
            self.tracker.z.update(&self.gains.z, z_error),
            self.tracker.yaw.update(&self.gains.yaw, yaw_error),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{PositionSetpoint, VelocitySetpoint};
    use nalgebra::Vector3;

    fn arbiter() -> SetpointArbiter {
        SetpointArbiter::new(
            CoordFrame::LocalEnu,
            GainSet::default(),
            VelocityLimits {
                max_vx: 2.0,
                max_vy: 2.0,
                max_vz: 1.0,
                max_yaw_rate: 1.0,
            },
        )
    }

    fn channels_with_velocity(vx: f32, vy: f32, vz: f32, yaw_rate: f32) -> SetpointChannels {
        SetpointChannels {
            position: None,
            velocity: Some(VelocitySetpoint {
                velocity: Vector3::new(vx, vy, vz),
                yaw_rate,
                stamp: 1.0,
            }),
        }
    }

    fn channels_with_position(x: f32, y: f32, z: f32, yaw: f32) -> SetpointChannels {
        SetpointChannels {
            position: Some(PositionSetpoint {
                position: Vector3::new(x, y, z),
                yaw,
                stamp: 1.0,
            }),
            velocity: None,
        }
    }

    #[test]
    fn test_velocity_only_passes_through() {
        let mut arbiter = arbiter();
        let pose = PoseFeedback::default();
        let channels = channels_with_velocity(0.5, -0.3, 0.2, 0.1);

        let cmd = arbiter.solve(&pose, &channels, Freshness::Stale, Freshness::Fresh);
        assert!((cmd.vx - 0.5).abs() < 1e-6);
        assert!((cmd.vy + 0.3).abs() < 1e-6);
        assert!((cmd.vz - 0.2).abs() < 1e-6);
        assert!((cmd.yaw_rate - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_only_is_limited() {
        let mut arbiter = arbiter();
        let pose = PoseFeedback::default();
        let channels = channels_with_velocity(10.0, 0.0, 0.0, 0.0);

        let cmd = arbiter.solve(&pose, &channels, Freshness::Stale, Freshness::Fresh);
        assert!((cmd.vx - 2.0).abs() < 1e-6, "limiter must cap pass-through");
    }

    #[test]
    fn test_position_only_tracks_error() {
        let mut arbiter = arbiter();
        let pose = PoseFeedback::default();
        // kp=1, target 1m ahead in x: one proportional step.
        let channels = channels_with_position(1.0, 0.0, 0.0, 0.0);

        let cmd = arbiter.solve(&pose, &channels, Freshness::Fresh, Freshness::Stale);
        assert!((cmd.vx - 1.0).abs() < 1e-6, "got {}", cmd.vx);
        assert!((cmd.vy - 0.0).abs() < 1e-6);
        assert!((cmd.yaw_rate - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_both_fresh_sums_feedforward_and_trim() {
        let mut arbiter = arbiter();
        let pose = PoseFeedback::default();
        let channels = SetpointChannels {
            position: Some(PositionSetpoint {
                position: Vector3::new(0.5, 0.0, 0.0),
                yaw: 0.2,
                stamp: 1.0,
            }),
            velocity: Some(VelocitySetpoint {
                velocity: Vector3::new(1.0, 0.0, 0.0),
                yaw_rate: 0.1,
                stamp: 1.0,
            }),
        };

        let cmd = arbiter.solve(&pose, &channels, Freshness::Fresh, Freshness::Fresh);
        // vx = feed-forward 1.0 + kp * 0.5 error
        assert!((cmd.vx - 1.5).abs() < 1e-6, "got {}", cmd.vx);
        // yaw rate = feed-forward 0.1 + kp * 0.2 error
        assert!((cmd.yaw_rate - 0.3).abs() < 1e-5, "got {}", cmd.yaw_rate);
    }

    #[test]
    fn test_present_but_stale_channel_is_ignored() {
        let mut arbiter = arbiter();
        let pose = PoseFeedback::default();
        let mut channels = channels_with_velocity(0.5, 0.0, 0.0, 0.0);
        channels.position = Some(PositionSetpoint {
            position: Vector3::new(100.0, 0.0, 0.0),
            yaw: 0.0,
            stamp: 0.5,
        });

        // Position channel present but stale: pure velocity pass-through.
        let cmd = arbiter.solve(&pose, &channels, Freshness::Stale, Freshness::Fresh);
        assert!((cmd.vx - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_neither_fresh_returns_zero() {
        let mut arbiter = arbiter();
        let pose = PoseFeedback::default();
        let channels = channels_with_velocity(1.0, 1.0, 1.0, 1.0);

        let cmd = arbiter.solve(&pose, &channels, Freshness::Stale, Freshness::Stale);
        assert_eq!(cmd, VelocityCommand::zero());
    }

    #[test]
    fn test_body_heading_frame_hovers() {
        let mut arbiter = SetpointArbiter::new(
            CoordFrame::BodyHeading,
            GainSet::default(),
            VelocityLimits::default(),
        );
        let pose = PoseFeedback::default();
        let channels = channels_with_velocity(1.0, 0.0, 0.0, 0.5);

        let cmd = arbiter.solve(&pose, &channels, Freshness::Fresh, Freshness::Fresh);
        assert_eq!(cmd, VelocityCommand::zero(), "stub frame must hover");
    }

    #[test]
    fn test_tracker_state_persists_between_solves() {
        let mut arbiter = SetpointArbiter::new(
            CoordFrame::LocalEnu,
            GainSet {
                xy: crate::tracking::PidGains::new(0.0, 1.0, 0.0),
                z: crate::tracking::PidGains::default(),
                yaw: crate::tracking::PidGains::default(),
            },
            VelocityLimits {
                max_vx: 100.0,
                max_vy: 100.0,
                max_vz: 100.0,
                max_yaw_rate: 100.0,
            },
        );
        let pose = PoseFeedback::default();
        let channels = channels_with_position(2.0, 0.0, 0.0, 0.0);

        // Integral-only: first solve outputs 0, second sees the accumulated 2.
        let first = arbiter.solve(&pose, &channels, Freshness::Fresh, Freshness::Stale);
        assert!((first.vx - 0.0).abs() < 1e-6);
        let second = arbiter.solve(&pose, &channels, Freshness::Fresh, Freshness::Stale);
        assert!((second.vx - 2.0).abs() < 1e-6);

        arbiter.reset_tracker();
        let third = arbiter.solve(&pose, &channels, Freshness::Fresh, Freshness::Stale);
        assert!((third.vx - 0.0).abs() < 1e-6, "reset must clear wind-up");
    }
}
