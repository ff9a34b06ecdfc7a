use rtic::mutex_prelude::*;
use rtt_target::rprintln;

use crate::app::apply_command;
use peripheral_exercises::board::infallible;
use peripheral_exercises::config::TELEMETRY_SIZE;
use peripheral_exercises::datamodel::command::{Command, Effect};
use peripheral_exercises::datamodel::ranging::RangingState;
use peripheral_exercises::datamodel::telemetry_packet::RangingTelemetry;

pub(crate) fn apply_command(mut context: apply_command::Context, command: Command) {
    /*
        entering critical section
    */
    let (effect, state) = context.shared.state.lock(|state: &mut RangingState| {
        let effect = state.apply(command);
        (effect, *state)
    });
    /*
        leaving critical section
    */
    rprintln!("{:?} -> {:?}", command, effect);

    match effect {
        Effect::OutputsCleared => {
            (context.shared.leds, context.shared.display).lock(|leds, display| {
                infallible(leds.all_off());
                infallible(display.off());
            });
        }
        Effect::PeriodChanged(period) => {
            // picked up by the trigger when it re-arms
            rprintln!("measure period now {} ms", period.as_millis());
        }
        Effect::PeriodUnchanged => {
            rprintln!("measure period already at its limit ({} ms)", state.period.as_millis());
        }
        Effect::None => {}
    }

    let last_distance = context.shared.last_distance.lock(|last| *last);
    log_state(&state, last_distance);
}

/// Writes a JSON snapshot of the state to the debug log.
fn log_state(state: &RangingState, last_distance: Option<u16>) {
    let mut buf = [0u8; TELEMETRY_SIZE];
    match RangingTelemetry::new(state, last_distance).encode(&mut buf) {
        Ok(len) => match core::str::from_utf8(&buf[..len]) {
            Ok(json) => rprintln!("state := {}", json),
            Err(_) => rprintln!("[ERROR] telemetry is not valid UTF-8"),
        },
        Err(e) => rprintln!("[ERROR] failed to encode telemetry: {:?}", e),
    }
}
