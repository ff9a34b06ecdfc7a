//! Drivers for the exercise peripherals, generic over `embedded-hal` 0.2 pins.

pub mod bcd_display;
pub mod hc_sr04;
pub mod leds;

/// A free-running, wrapping tick counter.
///
/// On the board this is the DWT cycle counter, which RTIC's monotonic already
/// keeps enabled.
pub trait TickClock {
    fn ticks(&self) -> u32;

    fn ticks_per_us(&self) -> u32;

    /// Microseconds since `since`, correct across one counter wrap.
    fn elapsed_us(&self, since: u32) -> u32 {
        self.ticks().wrapping_sub(since) / self.ticks_per_us().max(1)
    }

    /// Busy-waits for at least `us` microseconds.
    fn wait_us(&self, us: u32) {
        let start = self.ticks();
        while self.elapsed_us(start) < us {}
    }
}
