//! Watchdog supervisor
//!
//! Runs at a slower cadence than the control loop (one cycle every N ticks,
//! divided down from the same tick counter, never a second timer). Each
//! cycle it:
//!
//! 1. checks the autopilot offboard-ready flag and forces a safe state on
//!    connectivity loss (hover when airborne, waiting-for-offboard on the
//!    ground),
//! 2. recomputes per-channel setpoint freshness from cycle-granular stamp
//!    comparison,
//! 3. maintains an informational offboard flight-time counter,
//! 4. raises a waiting-for-setpoints notice while tracking with no fresh
//!    channel.
//!
//! Freshness is "the stamp changed since the previous watchdog cycle". It is
//! a coarse liveness signal, not a max-age timeout: a sender publishing at or
//! below the watchdog rate can legitimately read as stale, and a repeated
//! stamp always does.

use heapless::Vec;

use crate::mode::{ControlEvent, FlightState};
use crate::telemetry::{OffboardSignal, PoseFeedback, SetpointChannels};

/// Liveness of one setpoint channel, recomputed once per watchdog cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    #[default]
    Stale,
}

impl Freshness {
    pub fn is_fresh(self) -> bool {
        self == Freshness::Fresh
    }

    fn from_stamp_change(current: Option<f64>, previous: Option<f64>) -> Self {
        if current.is_some() && current != previous {
            Freshness::Fresh
        } else {
            Freshness::Stale
        }
    }
}

/// Outcome of one watchdog cycle.
#[derive(Clone, Debug, Default)]
pub struct WatchdogReport {
    /// State the supervisor forces, if any. Applied by the state machine
    /// starting next tick.
    pub forced_state: Option<FlightState>,
    /// Informational conditions raised this cycle.
    pub events: Vec<ControlEvent, 2>,
}

/// Slow-cadence supervisor for input freshness and autopilot connectivity.
#[derive(Debug)]
pub struct WatchdogSupervisor {
    /// Control ticks per watchdog cycle
    divider: u32,
    /// Altitude above which a connectivity loss degrades to hover instead of
    /// back to waiting-for-offboard (meters)
    airborne_threshold: f32,

    ticks: u32,

    // Setpoint stamp snapshots from the previous cycle.
    last_position_sp_stamp: Option<f64>,
    last_velocity_sp_stamp: Option<f64>,

    position_fresh: Freshness,
    velocity_fresh: Freshness,

    /// Cycles spent in confirmed offboard flight with live setpoints.
    flight_cycles: u32,
}

impl WatchdogSupervisor {
    pub fn new(divider: u32, airborne_threshold: f32) -> Self {
        Self {
            divider: divider.max(1),
            airborne_threshold,
            ticks: 0,
            last_position_sp_stamp: None,
            last_velocity_sp_stamp: None,
            position_fresh: Freshness::Stale,
            velocity_fresh: Freshness::Stale,
            flight_cycles: 0,
        }
    }

    /// Freshness of the position setpoint channel, as of the last cycle.
    pub fn position_fresh(&self) -> Freshness {
        self.position_fresh
    }

    /// Freshness of the velocity setpoint channel, as of the last cycle.
    pub fn velocity_fresh(&self) -> Freshness {
        self.velocity_fresh
    }

    /// Cycles counted in live offboard flight (observability only).
    pub fn flight_cycles(&self) -> u32 {
        self.flight_cycles
    }

    /// Called once per control tick, after the tick's command was produced.
    ///
    /// Returns `None` between cycles; on a cycle boundary runs the checks and
    /// returns the report. Forced transitions therefore lag the detecting
    /// cycle by up to one control tick.
    pub fn poll(
        &mut self,
        pose: &PoseFeedback,
        channels: &SetpointChannels,
        offboard: &OffboardSignal,
        state: FlightState,
    ) -> Option<WatchdogReport> {
        self.ticks += 1;
        if self.ticks < self.divider {
            return None;
        }
        self.ticks = 0;
        Some(self.run_cycle(pose, channels, offboard, state))
    }

    fn run_cycle(
        &mut self,
        pose: &PoseFeedback,
        channels: &SetpointChannels,
        offboard: &OffboardSignal,
        state: FlightState,
    ) -> WatchdogReport {
        let mut report = WatchdogReport::default();

        self.position_fresh = Freshness::from_stamp_change(
            channels.position_stamp(),
            self.last_position_sp_stamp,
        );
        self.velocity_fresh = Freshness::from_stamp_change(
            channels.velocity_stamp(),
            self.last_velocity_sp_stamp,
        );
        let any_fresh = self.position_fresh.is_fresh() || self.velocity_fresh.is_fresh();

        if !offboard.ready {
            // Connectivity loss is the only condition unsafe enough to force
            // an immediate state change. A non-finite altitude must count as
            // airborne: a grounded verdict would rewind an airborne vehicle
            // to waiting-for-offboard.
            let altitude = pose.altitude();
            let airborne = altitude > self.airborne_threshold || !altitude.is_finite();
            report.events.push(ControlEvent::NotInOffboard).ok();
            report.forced_state = Some(if airborne {
                FlightState::Hover
            } else {
                FlightState::WaitingOffboard
            });
        } else if any_fresh {
            self.flight_cycles = self.flight_cycles.wrapping_add(1);
        } else if state == FlightState::Tracking {
            // Notice only; the state machine's own per-tick check performs
            // the tracking-to-hover transition.
            report.events.push(ControlEvent::WaitingForSetpoints).ok();
        }

        self.last_position_sp_stamp = channels.position_stamp();
        self.last_velocity_sp_stamp = channels.velocity_stamp();

        report
    }
}
