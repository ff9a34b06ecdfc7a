use rtt_target::rprintln;
use stm32f4xx_hal::gpio::ExtiPin;

use crate::app::{apply_command, on_switch1, on_switch2};
use peripheral_exercises::keys::KeyEvent;

pub(crate) fn on_switch1(context: on_switch1::Context) {
    context.local.sw1.clear_interrupt_pending_bit();
    notify(KeyEvent::Switch1);
}

pub(crate) fn on_switch2(context: on_switch2::Context) {
    context.local.sw2.clear_interrupt_pending_bit();
    notify(KeyEvent::Switch2);
}

fn notify(key: KeyEvent) {
    let command = key.command();
    if apply_command::spawn(command).is_err() {
        rprintln!("[WARNING] command queue full, dropping {:?} from {:?}", command, key);
    }
}
