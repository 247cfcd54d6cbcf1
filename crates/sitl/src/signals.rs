//! Shared signal container
//!
//! The real system receives pose, setpoints, mode state, and user commands
//! asynchronously. The harness models them as last-writer-wins snapshots,
//! one mutex per logical record so a position and its stamp can never tear.
//! Collaborator threads write through the `publish_*` methods; the control
//! loop takes one consistent [`TickInputs`] snapshot per tick.

use std::sync::Mutex;

use nalgebra::Vector3;
use offboard_center_core::mode::TickInputs;
use offboard_center_core::telemetry::{
    OffboardSignal, PoseFeedback, PositionSetpoint, SetpointChannels, TakeoffLandRequest,
    VelocitySetpoint,
};

/// Snapshot store shared between collaborator threads and the control loop.
#[derive(Debug, Default)]
pub struct SharedSignals {
    pose: Mutex<PoseFeedback>,
    setpoints: Mutex<SetpointChannels>,
    offboard: Mutex<OffboardSignal>,
    request: Mutex<TakeoffLandRequest>,
}

impl SharedSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the position/yaw part of the pose snapshot.
    pub fn publish_pose(&self, position: Vector3<f32>, yaw: f32, stamp: f64) {
        let mut pose = self.pose.lock().unwrap();
        pose.position = position;
        pose.yaw = yaw;
        pose.position_stamp = stamp;
    }

    /// Overwrite the velocity part of the pose snapshot.
    pub fn publish_velocity(&self, velocity: Vector3<f32>, stamp: f64) {
        let mut pose = self.pose.lock().unwrap();
        pose.velocity = velocity;
        pose.velocity_stamp = stamp;
    }

    /// Overwrite the position setpoint channel.
    pub fn publish_position_setpoint(&self, setpoint: PositionSetpoint) {
        self.setpoints.lock().unwrap().position = Some(setpoint);
    }

    /// Overwrite the velocity setpoint channel.
    pub fn publish_velocity_setpoint(&self, setpoint: VelocitySetpoint) {
        self.setpoints.lock().unwrap().velocity = Some(setpoint);
    }

    /// Update the autopilot offboard-ready flag.
    pub fn set_offboard_ready(&self, ready: bool) {
        self.offboard.lock().unwrap().ready = ready;
    }

    /// Overwrite the take-off/land request (latest wins).
    pub fn publish_request(&self, request: TakeoffLandRequest) {
        *self.request.lock().unwrap() = request;
    }

    /// One consistent snapshot of every input record.
    pub fn snapshot(&self) -> TickInputs {
        TickInputs {
            pose: *self.pose.lock().unwrap(),
            setpoints: *self.setpoints.lock().unwrap(),
            offboard: *self.offboard.lock().unwrap(),
            request: *self.request.lock().unwrap(),
        }
    }
}
