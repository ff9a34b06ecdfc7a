use core::fmt::Write;

use rtic::{mutex_prelude::*, time::duration::Milliseconds};
use rtt_target::rprintln;

use crate::app::{measure, tick};
use peripheral_exercises::board::infallible;
use peripheral_exercises::datamodel::ranging::RangingState;

/// Plays the role of the hardware timer: re-arms itself with the current period and
/// notifies the measurement task.
pub(crate) fn tick(mut context: tick::Context) {
    let period = context.shared.state.lock(|state| state.period);
    if tick::spawn_after(Milliseconds(period.as_millis())).is_err() {
        rprintln!("[ERROR] failed to re-arm the measurement trigger!");
    }
    // a measurement that is still queued absorbs this notification.
    if measure::spawn().is_err() {
        rprintln!("[WARNING] previous measurement still pending, tick absorbed.");
    }
}

pub(crate) fn measure(mut context: measure::Context) {
    /*
        entering critical section
    */
    let state: RangingState = context.shared.state.lock(|state| *state);
    /*
        leaving critical section
    */
    let sensor = context.local.sensor;
    let cycle = match state.cycle(|| sensor.echo_width_us()) {
        Ok(Some(cycle)) => cycle,
        Ok(None) => return,
        Err(e) => {
            rprintln!("[WARNING] ranging failed: {:?}", e);
            return;
        }
    };

    context.shared.tx.lock(|tx| {
        if tx.write_str(&cycle.report).is_err() {
            rprintln!("[ERROR] failed to send the distance report.");
        }
    });

    if let Some(refresh) = cycle.refresh {
        (
            context.shared.leds,
            context.shared.display,
            context.shared.last_distance,
        )
            .lock(|leds, display, last_distance| {
                infallible(leds.show(refresh.level));
                infallible(display.write(refresh.distance));
                *last_distance = Some(refresh.distance);
            });
    }
}
