//! Board-independent pieces of the peripheral exercises.
//!
//! Everything in here is `no_std` and generic over `embedded-hal` 0.2, so it can be
//! unit-tested on the host. The RTIC applications under `src/bin` wire these pieces
//! to the Nucleo-F446RE through the [`board`] module.
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bcd;
pub mod blink;
pub mod config;
pub mod cycle;
pub mod datamodel;
pub mod drivers;
pub mod keys;
pub mod led_bar;
pub mod report;
pub mod signal;

/// pin maps and peripheral type aliases for the Nucleo-F446RE.
#[cfg(feature = "board")]
pub mod board;

#[cfg(test)]
pub(crate) mod test_utils;
