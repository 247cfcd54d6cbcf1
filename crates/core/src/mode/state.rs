//! Flight state and control event types

/// The single process-wide flight mode.
///
/// The numeric discriminants are the status codes published to the
/// status-reporting collaborator and must stay stable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum FlightState {
    /// Waiting for the autopilot to confirm offboard mode. Sole entry point;
    /// re-entered only through the watchdog's connectivity-loss path.
    #[default]
    WaitingOffboard = 0,
    /// On the ground in offboard mode, held down while armed.
    GroundIdle = 1,
    /// Climbing to the configured takeoff height.
    Takeoff = 2,
    /// Descending to the configured land height.
    Landing = 3,
    /// Following external setpoints through the arbiter.
    Tracking = 4,
    /// Holding position with a zero command.
    Hover = 5,
}

impl FlightState {
    /// Status code published each tick.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a status code. Returns `None` for out-of-range values, which
    /// must never occur under normal transition logic.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::WaitingOffboard),
            1 => Some(Self::GroundIdle),
            2 => Some(Self::Takeoff),
            3 => Some(Self::Landing),
            4 => Some(Self::Tracking),
            5 => Some(Self::Hover),
            _ => None,
        }
    }

    /// States in which the vehicle is (or may be) off the ground.
    pub const fn is_airborne(self) -> bool {
        matches!(self, Self::Takeoff | Self::Landing | Self::Tracking | Self::Hover)
    }
}

/// Conditions reported alongside the per-tick command.
///
/// None of these are fatal; every detected problem is absorbed into a state
/// transition or a neutral command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// Autopilot is not reporting the offboard mode; a safe state was forced.
    NotInOffboard,
    /// Tracking with no fresh setpoint channel (informational notice).
    WaitingForSetpoints,
    /// Non-finite telemetry or command; a zero command was substituted.
    InvalidTelemetry,
    /// Internal invariant violated (e.g., out-of-range state code).
    InvariantViolation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_table_order() {
        assert_eq!(FlightState::WaitingOffboard.code(), 0);
        assert_eq!(FlightState::GroundIdle.code(), 1);
        assert_eq!(FlightState::Takeoff.code(), 2);
        assert_eq!(FlightState::Landing.code(), 3);
        assert_eq!(FlightState::Tracking.code(), 4);
        assert_eq!(FlightState::Hover.code(), 5);
    }

    #[test]
    fn test_code_roundtrip() {
        for code in 0..=5u8 {
            let state = FlightState::from_code(code).unwrap();
            assert_eq!(state.code(), code);
        }
    }

    #[test]
    fn test_out_of_range_code_rejected() {
        assert!(FlightState::from_code(6).is_none());
        assert!(FlightState::from_code(255).is_none());
    }

    #[test]
    fn test_airborne_classification() {
        assert!(!FlightState::WaitingOffboard.is_airborne());
        assert!(!FlightState::GroundIdle.is_airborne());
        assert!(FlightState::Takeoff.is_airborne());
        assert!(FlightState::Landing.is_airborne());
        assert!(FlightState::Tracking.is_airborne());
        assert!(FlightState::Hover.is_airborne());
    }
}
