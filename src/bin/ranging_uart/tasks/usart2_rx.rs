use embedded_hal::serial::{Read, Write};
use rtic::mutex_prelude::*;
use rtt_target::rprintln;

use crate::app::{apply_command, handle_byte, on_usart2_rxne};
use peripheral_exercises::datamodel::command::Command;
use peripheral_exercises::datamodel::rx_errors::RxError;

/// handles the USART2 RXNE interrupt.
/// Only pulls the byte out of the data register; the rest happens in `handle_byte`.
pub(crate) fn on_usart2_rxne(context: on_usart2_rxne::Context) {
    match context.local.rx.read() {
        Ok(byte) => {
            if handle_byte::spawn(byte).is_err() {
                rprintln!("[WARNING] receive queue full, dropping {:#04x}", byte);
            }
        }
        Err(nb::Error::WouldBlock) => {}
        Err(nb::Error::Other(e)) => {
            rprintln!("[ERROR] {:?}", RxError::from(e));
        }
    }
}

/// Echoes the byte back to the PC, then acts on it if it is a command.
pub(crate) fn handle_byte(mut context: handle_byte::Context, byte: u8) {
    context.shared.tx.lock(|tx| {
        if nb::block!(tx.write(byte)).is_err() {
            rprintln!("[ERROR] failed to echo {:#04x}", byte);
        }
    });

    match Command::from_byte(byte) {
        Some(command) => {
            if apply_command::spawn(command).is_err() {
                rprintln!("[WARNING] command queue full, dropping {:?}", command);
            }
        }
        None => rprintln!("ignored: {:?}", RxError::UnknownCommand(byte)),
    }
}
