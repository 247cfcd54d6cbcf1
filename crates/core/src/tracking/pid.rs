//! Per-axis PID calculator for position tracking
//!
//! Converts a position (or yaw) error into a velocity command contribution.
//! The accumulated error is clamped to a fixed bound *before* it is used,
//! and the current error is accumulated *after* the output is computed.
//! That ordering shapes the transient response and must not be reordered.

/// Fixed bound on the accumulated error, independent of velocity limits.
const ERROR_ACC_LIMIT: f32 = 10.0;

/// PID gains for one axis group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PidGains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

impl PidGains {
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self { kp, ki, kd }
    }
}

/// The three gain groups used by the position tracker.
///
/// The horizontal axes share one group; vertical and yaw each have their own.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GainSet {
    /// Shared gains for the x and y axes
    pub xy: PidGains,
    /// Gains for the z axis
    pub z: PidGains,
    /// Gains for yaw
    pub yaw: PidGains,
}

impl Default for GainSet {
    fn default() -> Self {
        Self {
            xy: PidGains::new(1.0, 0.0, 0.0),
            z: PidGains::new(1.0, 0.0, 0.0),
            yaw: PidGains::new(1.0, 0.0, 0.0),
        }
    }
}

/// Persistent PID state for a single axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct PidAxis {
    /// Error seen on the previous update
    last_error: f32,
    /// Running error accumulation (clamped on use)
    error_acc: f32,
}

impl PidAxis {
    pub const fn new() -> Self {
        Self {
            last_error: 0.0,
            error_acc: 0.0,
        }
    }

    /// One PID update for this axis.
    ///
    /// Order is significant: the accumulator is clamped first, the output is
    /// computed from the clamped value, and only then are last-error and
    /// accumulator updated for the next call.
    pub fn update(&mut self, gains: &PidGains, error: f32) -> f32 {
        self.error_acc = self.error_acc.clamp(-ERROR_ACC_LIMIT, ERROR_ACC_LIMIT);

        let output =
            gains.kp * error + gains.ki * self.error_acc + gains.kd * (error - self.last_error);

        self.last_error = error;
        self.error_acc += error;

        output
    }

    /// Clear accumulated state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Accumulated error as stored (pre-clamp of the next update).
    pub fn accumulated(&self) -> f32 {
        self.error_acc
    }
}

/// Four-axis tracker state: x, y, z, and yaw.
///
/// Owned by the control loop; state persists for the process lifetime unless
/// [`reset`](PositionTracker::reset) is called on tracking entry (an explicit
/// configuration choice, see `OffboardConfig::reset_tracker_on_entry`).
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionTracker {
    pub x: PidAxis,
    pub y: PidAxis,
    pub z: PidAxis,
    pub yaw: PidAxis,
}

impl PositionTracker {
    pub const fn new() -> Self {
        Self {
            x: PidAxis::new(),
            y: PidAxis::new(),
            z: PidAxis::new(),
            yaw: PidAxis::new(),
        }
    }

    /// Clear all four axes.
    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
        self.z.reset();
        self.yaw.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_only() {
        let gains = PidGains::new(1.0, 0.0, 0.0);
        let mut axis = PidAxis::new();

        let output = axis.update(&gains, 5.0);
        assert!((output - 5.0).abs() < 1e-6, "kp=1 error=5 -> 5, got {output}");
        assert!(
            (axis.accumulated() - 5.0).abs() < 1e-6,
            "accumulator should hold 5 after the update"
        );
    }

    #[test]
    fn test_integral_uses_clamped_accumulator() {
        let gains = PidGains::new(0.0, 1.0, 0.0);
        let mut axis = PidAxis {
            last_error: 0.0,
            error_acc: 12.0,
        };

        // 12 exceeds the bound, so the output must see 10, not 12.
        let output = axis.update(&gains, 0.0);
        assert!((output - 10.0).abs() < 1e-6, "got {output}");
        assert!(
            (axis.accumulated() - 10.0).abs() < 1e-6,
            "accumulator clamps to 10 before accumulating a zero error"
        );
    }

    #[test]
    fn test_clamp_applies_on_negative_side() {
        let gains = PidGains::new(0.0, 1.0, 0.0);
        let mut axis = PidAxis {
            last_error: 0.0,
            error_acc: -25.0,
        };

        let output = axis.update(&gains, 0.0);
        assert!((output + 10.0).abs() < 1e-6, "got {output}");
    }

    #[test]
    fn test_derivative_tracks_error_change() {
        let gains = PidGains::new(0.0, 0.0, 2.0);
        let mut axis = PidAxis::new();

        let first = axis.update(&gains, 1.0);
        assert!((first - 2.0).abs() < 1e-6, "kd=2, de=1-0");

        let second = axis.update(&gains, 4.0);
        assert!((second - 6.0).abs() < 1e-6, "kd=2, de=4-1");
    }

    #[test]
    fn test_accumulation_happens_after_output() {
        let gains = PidGains::new(0.0, 1.0, 0.0);
        let mut axis = PidAxis::new();

        // First update: accumulator is still 0 when the output is formed.
        let output = axis.update(&gains, 3.0);
        assert!((output - 0.0).abs() < 1e-6);

        // Second update sees the accumulated 3.
        let output = axis.update(&gains, 0.0);
        assert!((output - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_windup_is_bounded_under_sustained_error() {
        let gains = PidGains::new(0.0, 1.0, 0.0);
        let mut axis = PidAxis::new();

        for _ in 0..100 {
            axis.update(&gains, 4.0);
        }
        // Stored value may exceed the bound by at most one error step; the
        // value used by the output never does.
        let output = axis.update(&gains, 0.0);
        assert!(output <= 10.0 + 1e-6, "integral term must stay bounded, got {output}");
    }

    #[test]
    fn test_reset_clears_state() {
        let gains = PidGains::new(1.0, 1.0, 1.0);
        let mut tracker = PositionTracker::new();
        tracker.x.update(&gains, 2.0);
        tracker.yaw.update(&gains, -1.0);

        tracker.reset();
        assert!((tracker.x.accumulated() - 0.0).abs() < f32::EPSILON);
        assert!((tracker.yaw.accumulated() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_default_gain_set() {
        let gains = GainSet::default();
        assert!((gains.xy.kp - 1.0).abs() < f32::EPSILON);
        assert!((gains.z.ki - 0.0).abs() < f32::EPSILON);
        assert!((gains.yaw.kd - 0.0).abs() < f32::EPSILON);
    }
}
