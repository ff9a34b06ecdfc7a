//! This module contains RTIC tasks of the UART ranging exercise.
//! Each task is in its own submodule, and is pub(crate) re-exported by this module for usage.
//!

/*
   private interface
*/

/// Task applying commands to the shared state.
mod commands;

/// Interrupt handlers of the two board switches.
mod exti;

/// Tasks handling the periodic measurement trigger and the measurement itself.
mod periodic_measure;

mod usart2_rx;

/*
    public(crate) interface
*/
pub(crate) use commands::apply_command;
pub(crate) use exti::{on_switch1, on_switch2};
pub(crate) use periodic_measure::{measure, tick};
pub(crate) use usart2_rx::{handle_byte, on_usart2_rxne};
