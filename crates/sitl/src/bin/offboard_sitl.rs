//! Scripted offboard mission against the kinematic model
//!
//! Flies the full supervisory sequence in simulation: wait for offboard,
//! take off, track a velocity setpoint, let the setpoint go stale, recover,
//! and land. Pass a scenario JSON path as the first argument to override
//! the defaults.

use std::sync::Arc;

use nalgebra::Vector3;

use offboard_center_core::mode::FlightState;
use offboard_center_core::parameters::OffboardConfig;
use offboard_center_core::telemetry::{TakeoffLandRequest, VelocitySetpoint};
use offboard_center_sitl::{HarnessError, LockstepRunner, ScenarioConfig, SharedSignals};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), HarnessError> {
    let scenario = match std::env::args().nth(1) {
        Some(path) => ScenarioConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ScenarioConfig::default(),
    };

    let signals = Arc::new(SharedSignals::new());
    let mut runner = LockstepRunner::new(OffboardConfig::default(), &scenario, signals.clone());

    println!("=== Offboard SITL ===");
    println!("Loop rate: {} Hz", scenario.loop_rate_hz);

    // Autopilot confirms offboard mode; the machine arms to ground idle.
    signals.set_offboard_ready(true);
    runner.run_ticks(2);
    report(&runner, "offboard confirmed");

    // Take off and climb to the hover height.
    signals.publish_request(TakeoffLandRequest::TakeOff);
    match runner.run_until(FlightState::Hover, 200) {
        Some(ticks) => println!(
            "Takeoff complete after {ticks} ticks (altitude {:.2} m)",
            runner.altitude()
        ),
        None => {
            println!("Takeoff did not complete; aborting");
            return Ok(());
        }
    }
    signals.publish_request(TakeoffLandRequest::None);

    // Track a forward velocity setpoint for three seconds. Each tick gets a
    // re-stamped setpoint so the watchdog keeps the channel fresh.
    let track_ticks = scenario.loop_rate_hz * 3;
    for _ in 0..track_ticks {
        signals.publish_velocity_setpoint(VelocitySetpoint {
            velocity: Vector3::new(0.4, 0.0, 0.0),
            yaw_rate: 0.0,
            stamp: runner.sim_time(),
        });
        let out = runner.step();
        if !out.events.is_empty() {
            println!("  events: {:?}", out.events);
        }
    }
    report(&runner, "tracking phase done");

    // Stop re-stamping: the watchdog marks the channel stale and the
    // machine degrades to hover.
    match runner.run_until(FlightState::Hover, 2 * scenario.loop_rate_hz) {
        Some(_) => report(&runner, "setpoint stale, holding"),
        None => println!("warning: stale degradation did not trigger"),
    }

    // Land.
    signals.publish_request(TakeoffLandRequest::Land);
    match runner.run_until(FlightState::GroundIdle, 300) {
        Some(ticks) => println!(
            "Landed after {ticks} ticks (altitude {:.2} m)",
            runner.altitude()
        ),
        None => println!("warning: landing did not complete"),
    }

    println!(
        "Mission done: {:.1} s simulated, {} live watchdog cycles",
        runner.sim_time(),
        runner.flight_cycles()
    );
    Ok(())
}

fn report(runner: &LockstepRunner, label: &str) {
    println!(
        "[t={:6.2}s] {:?} at {:.2} m -- {label}",
        runner.sim_time(),
        runner.state(),
        runner.altitude()
    );
}
