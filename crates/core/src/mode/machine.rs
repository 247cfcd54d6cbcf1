//! Flight mode state machine
//!
//! Top-level per-tick driver. Each control tick it produces the velocity
//! command for the current state (delegating to the setpoint arbiter while
//! tracking), reports the resulting status code, and then polls the watchdog
//! supervisor. Watchdog side effects (freshness flags, forced transitions)
//! apply starting next tick, so a forced failsafe lags the detecting cycle
//! by up to one control tick.

use heapless::Vec;

use crate::mode::{ControlEvent, FlightState};
use crate::parameters::OffboardConfig;
use crate::telemetry::{
    OffboardSignal, PoseFeedback, SetpointChannels, TakeoffLandRequest, VelocityCommand,
};
use crate::tracking::SetpointArbiter;
use crate::watchdog::WatchdogSupervisor;

/// Snapshot of all external inputs, read once at the top of a tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct TickInputs {
    pub pose: PoseFeedback,
    pub setpoints: SetpointChannels,
    pub offboard: OffboardSignal,
    pub request: TakeoffLandRequest,
}

/// Command and status produced by one control tick.
#[derive(Clone, Debug)]
pub struct TickOutput {
    /// Velocity command to publish this tick
    pub command: VelocityCommand,
    /// State after this tick's transition logic (pre-watchdog)
    pub state: FlightState,
    /// Conditions raised this tick, by the machine or the watchdog
    pub events: Vec<ControlEvent, 4>,
}

impl TickOutput {
    /// Status code for the reporting collaborator.
    pub fn status_code(&self) -> u8 {
        self.state.code()
    }
}

/// Supervisory flight-mode state machine.
///
/// Owns the authoritative [`FlightState`], the setpoint arbiter (and with it
/// all PID state), and the watchdog supervisor. Single writer: only the
/// transition logic in this type mutates the state.
#[derive(Debug)]
pub struct FlightModeStateMachine {
    config: OffboardConfig,
    state: FlightState,
    arbiter: SetpointArbiter,
    watchdog: WatchdogSupervisor,
}

impl FlightModeStateMachine {
    pub fn new(config: OffboardConfig) -> Self {
        let arbiter = SetpointArbiter::new(config.frame, config.gains, config.limits);
        let watchdog = WatchdogSupervisor::new(config.watchdog_divider, config.airborne_threshold);
        Self {
            config,
            state: FlightState::WaitingOffboard,
            arbiter,
            watchdog,
        }
    }

    /// Current flight state.
    pub fn state(&self) -> FlightState {
        self.state
    }

    /// Watchdog cycles spent in live offboard flight (observability only).
    pub fn flight_cycles(&self) -> u32 {
        self.watchdog.flight_cycles()
    }

    /// Force the machine into the state encoded by `code`.
    ///
    /// Out-of-range codes must never occur; they are reported as an
    /// invariant violation and leave the state untouched.
    pub fn force_state_code(&mut self, code: u8) -> Option<ControlEvent> {
        match FlightState::from_code(code) {
            Some(state) => {
                self.transition(state);
                None
            }
            None => Some(ControlEvent::InvariantViolation),
        }
    }

    /// Run one control tick.
    pub fn tick(&mut self, inputs: &TickInputs) -> TickOutput {
        let mut events: Vec<ControlEvent, 4> = Vec::new();

        let command = if inputs.pose.is_finite() {
            self.step(inputs)
        } else {
            self.fail_safe(&mut events)
        };

        // Setpoints may still smuggle a NaN through the arbiter's sums.
        let command = if command.is_finite() {
            command
        } else {
            self.fail_safe(&mut events)
        };

        let state = self.state;

        if let Some(report) =
            self.watchdog
                .poll(&inputs.pose, &inputs.setpoints, &inputs.offboard, self.state)
        {
            for event in report.events {
                events.push(event).ok();
            }
            if let Some(forced) = report.forced_state {
                self.transition(forced);
            }
        }

        TickOutput {
            command,
            state,
            events,
        }
    }

    /// Per-state command output and transition logic.
    fn step(&mut self, inputs: &TickInputs) -> VelocityCommand {
        // Copy: `transition` needs `&mut self` further down.
        let cfg = self.config;
        let altitude = inputs.pose.altitude();

        match self.state {
            FlightState::WaitingOffboard => {
                if inputs.offboard.ready {
                    self.transition(FlightState::GroundIdle);
                }
                VelocityCommand::zero()
            }

            FlightState::GroundIdle => {
                if inputs.request == TakeoffLandRequest::TakeOff {
                    self.transition(FlightState::Takeoff);
                }
                VelocityCommand::vertical(cfg.ground_hold_vz)
            }

            FlightState::Takeoff => {
                let mut vz = (cfg.toff_height - altitude) * cfg.vertical_gain + cfg.ascend_bias;
                if vz > cfg.vertical_cap {
                    vz = cfg.vertical_cap;
                }
                if altitude > cfg.toff_height - cfg.altitude_tolerance {
                    self.transition(FlightState::Hover);
                }
                VelocityCommand::vertical(vz)
            }

            FlightState::Landing => {
                let mut vz = (cfg.land_height - altitude) * cfg.vertical_gain - cfg.descend_bias;
                if vz < -cfg.vertical_cap {
                    vz = -cfg.vertical_cap;
                }
                if altitude < cfg.land_height {
                    self.transition(FlightState::GroundIdle);
                }
                VelocityCommand::vertical(vz)
            }

            FlightState::Tracking => {
                let position_fresh = self.watchdog.position_fresh();
                let velocity_fresh = self.watchdog.velocity_fresh();
                let any_fresh = position_fresh.is_fresh() || velocity_fresh.is_fresh();

                let command = if any_fresh {
                    self.arbiter.solve(
                        &inputs.pose,
                        &inputs.setpoints,
                        position_fresh,
                        velocity_fresh,
                    )
                } else {
                    VelocityCommand::zero()
                };

                if !any_fresh {
                    self.transition(FlightState::Hover);
                }
                // A land request wins over the hover degradation.
                if inputs.request == TakeoffLandRequest::Land {
                    self.transition(FlightState::Landing);
                }
                command
            }

            FlightState::Hover => {
                let any_fresh = self.watchdog.position_fresh().is_fresh()
                    || self.watchdog.velocity_fresh().is_fresh();
                if any_fresh {
                    self.transition(FlightState::Tracking);
                }
                if inputs.request == TakeoffLandRequest::Land {
                    self.transition(FlightState::Landing);
                }
                VelocityCommand::zero()
            }
        }
    }

    /// Substitute a safe command for a tick with unusable numbers.
    fn fail_safe(&mut self, events: &mut Vec<ControlEvent, 4>) -> VelocityCommand {
        if !events.contains(&ControlEvent::InvalidTelemetry) {
            events.push(ControlEvent::InvalidTelemetry).ok();
        }
        if self.state.is_airborne() {
            self.transition(FlightState::Hover);
        }
        VelocityCommand::zero()
    }

    fn transition(&mut self, next: FlightState) {
        if next == FlightState::Tracking
            && self.state != FlightState::Tracking
            && self.config.reset_tracker_on_entry
        {
            self.arbiter.reset_tracker();
        }
        self.state = next;
    }
}
