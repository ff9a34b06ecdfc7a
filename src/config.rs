//! Compile-time configuration of the exercises.
//!
//! There is no runtime configuration store; the only value that changes while
//! running is the ranging measure period (see [`crate::datamodel::ranging`]).

/// System clock, also the frequency of the DWT/SysTick monotonic.
pub const SYSCLK_HZ: u32 = 84_000_000;
/// Nucleo-F446RE on-board HSE (ST-LINK MCO).
pub const HSE_HZ: u32 = 8_000_000;

pub mod blink {
    /// One period tick of the blink plan, in milliseconds.
    pub const TICK_MS: u32 = 100;
}

pub mod display {
    /// Number shown by the BCD display exercise.
    pub const VALUE: u16 = 127;
}

pub mod ranging {
    /// Measure period of the polled exercise.
    pub const POLLED_PERIOD_MS: u32 = 500;
    /// Key scan period of the polled exercise.
    pub const KEY_SCAN_PERIOD_MS: u32 = 20;
    /// Fixed trigger period of the timer exercise.
    pub const TIMER_PERIOD_MS: u32 = 300;
    /// Initial trigger period of the UART exercise, in microseconds.
    pub const UART_INITIAL_PERIOD_US: u32 = 1_000_000;
    pub const UART_BAUD: u32 = 19_200;
    /// Time the ranging firmware waits before its first measurement.
    pub const STARTUP_DELAY_MS: u32 = 100;
}

pub mod analog {
    pub const UART_BAUD: u32 = 115_200;
    /// ADC and DAC rate, in samples per second.
    pub const SAMPLE_RATE_HZ: u32 = 1_000;
    /// Left shift turning an 8-bit waveform sample into a 12-bit DAC code.
    pub const DAC_SHIFT: u32 = 4;
}

/// Capacity of the text lines sent over the UART.
pub const LINE_SIZE: usize = 32;
/// Capacity of the JSON telemetry snapshot written to the debug log.
pub const TELEMETRY_SIZE: usize = 96;
