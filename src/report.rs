//! Text lines sent to the PC over the UART.

use core::fmt::Write;

use heapless::String;

use crate::config::LINE_SIZE;
use crate::datamodel::ranging::Unit;

pub type Line = String<LINE_SIZE>;

/// `Distancia: <value> cm\r\n` or `Distancia: <value> in\r\n`.
pub fn distance_line(distance: u16, unit: Unit) -> Line {
    let mut line = Line::new();
    // the longest line (u16::MAX) is 22 bytes and always fits
    let _ = write!(line, "Distancia: {} {}\r\n", distance, unit.suffix());
    line
}

/// `>analog_voltage:<value>\r\n`, one ADC sample for a serial plotter.
pub fn analog_line(value: u16) -> Line {
    let mut line = Line::new();
    let _ = write!(line, ">analog_voltage:{}\r\n", value);
    line
}
