//! HC-SR04 ultrasonic range finder.
//!
//! The sensor answers a 10 µs trigger pulse with an echo pulse as long as the
//! sound round trip. Widths are converted with the datasheet factors: 58 µs per
//! centimeter and 148 µs per inch.

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::datamodel::ranging::Unit;
use crate::drivers::TickClock;

const TRIGGER_SETUP_US: u32 = 2;
const TRIGGER_PULSE_US: u32 = 10;
/// A bit over the 23.2 ms echo of the 4 m maximum range.
pub const ECHO_TIMEOUT_US: u32 = 30_000;
pub const US_PER_CM: u32 = 58;
pub const US_PER_INCH: u32 = 148;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorError {
    /// the echo line did not rise, or did not fall, within [`ECHO_TIMEOUT_US`].
    EchoTimeout,
    /// the HAL reported an error on the trigger or echo pin.
    Pin,
}

pub struct HcSr04<TRIG, ECHO, CLK> {
    trigger: TRIG,
    echo: ECHO,
    clock: CLK,
}

impl<TRIG, ECHO, CLK> HcSr04<TRIG, ECHO, CLK>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    CLK: TickClock,
{
    pub fn new(trigger: TRIG, echo: ECHO, clock: CLK) -> Self {
        HcSr04 {
            trigger,
            echo,
            clock,
        }
    }

    pub fn read_centimeters(&mut self) -> Result<u16, SensorError> {
        self.read(Unit::Centimeters)
    }

    pub fn read_inches(&mut self) -> Result<u16, SensorError> {
        self.read(Unit::Inches)
    }

    pub fn read(&mut self, unit: Unit) -> Result<u16, SensorError> {
        let width = self.echo_width_us()?;
        Ok(width_to_distance(width, unit))
    }

    /// Fires the trigger and measures the echo pulse, in microseconds.
    pub fn echo_width_us(&mut self) -> Result<u32, SensorError> {
        self.trigger.set_low().map_err(|_| SensorError::Pin)?;
        self.clock.wait_us(TRIGGER_SETUP_US);
        self.trigger.set_high().map_err(|_| SensorError::Pin)?;
        self.clock.wait_us(TRIGGER_PULSE_US);
        self.trigger.set_low().map_err(|_| SensorError::Pin)?;

        let fired = self.clock.ticks();
        while self.echo.is_low().map_err(|_| SensorError::Pin)? {
            if self.clock.elapsed_us(fired) > ECHO_TIMEOUT_US {
                return Err(SensorError::EchoTimeout);
            }
        }

        let rise = self.clock.ticks();
        while self.echo.is_high().map_err(|_| SensorError::Pin)? {
            if self.clock.elapsed_us(rise) > ECHO_TIMEOUT_US {
                return Err(SensorError::EchoTimeout);
            }
        }
        Ok(self.clock.elapsed_us(rise))
    }
}

/// Converts an echo width to a whole distance, saturating at `u16::MAX`.
pub fn width_to_distance(width_us: u32, unit: Unit) -> u16 {
    let per_unit = match unit {
        Unit::Centimeters => US_PER_CM,
        Unit::Inches => US_PER_INCH,
    };
    let distance = width_us / per_unit;
    if distance > u32::from(u16::MAX) {
        u16::MAX
    } else {
        distance as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{last_level, pin_log, MockClock, MockEcho, MockPin};

    const TRIGGER: u8 = 0;

    fn sensor_with_echo(
        rise: u32,
        fall: u32,
    ) -> (HcSr04<MockPin, MockEcho, MockClock>, crate::test_utils::PinLog) {
        let log = pin_log();
        let clock = MockClock::starting_at(0);
        let echo = MockEcho::new(&clock, rise, fall);
        (HcSr04::new(MockPin::new(TRIGGER, &log), echo, clock), log)
    }

    #[test]
    fn conversion_factors() {
        assert_eq!(width_to_distance(0, Unit::Centimeters), 0);
        assert_eq!(width_to_distance(57, Unit::Centimeters), 0);
        assert_eq!(width_to_distance(58 * 30, Unit::Centimeters), 30);
        assert_eq!(width_to_distance(148 * 12, Unit::Inches), 12);
        assert_eq!(width_to_distance(u32::MAX, Unit::Centimeters), u16::MAX);
    }

    #[test]
    fn trigger_pulse_shape() {
        let (mut sensor, log) = sensor_with_echo(200, 300);
        sensor.echo_width_us().unwrap();
        let levels: Vec<bool> = log.borrow().iter().map(|(_, level)| *level).collect();
        assert_eq!(levels, vec![false, true, false]);
        assert_eq!(last_level(&log, TRIGGER), Some(false));
    }

    #[test]
    fn measures_centimeters() {
        // 25.5 cm worth of echo, the few ticks of loop overhead cannot change the result
        let (mut sensor, _) = sensor_with_echo(100, 100 + 58 * 25 + 29);
        assert_eq!(sensor.read_centimeters(), Ok(25));
    }

    #[test]
    fn measures_inches() {
        let (mut sensor, _) = sensor_with_echo(100, 100 + 148 * 10 + 74);
        assert_eq!(sensor.read_inches(), Ok(10));
    }

    #[test]
    fn missing_echo_times_out() {
        let (mut sensor, _) = sensor_with_echo(u32::MAX, u32::MAX);
        assert_eq!(sensor.read_centimeters(), Err(SensorError::EchoTimeout));
    }

    #[test]
    fn stuck_echo_times_out() {
        let (mut sensor, _) = sensor_with_echo(0, u32::MAX);
        assert_eq!(sensor.read_centimeters(), Err(SensorError::EchoTimeout));
    }

    #[test]
    fn survives_counter_wrap() {
        let log = pin_log();
        let clock = MockClock::starting_at(u32::MAX - 50);
        let rise = 100;
        let echo = MockEcho::new(&clock, rise, rise + 58 * 40 + 29);
        let mut sensor = HcSr04::new(MockPin::new(TRIGGER, &log), echo, clock);
        assert_eq!(sensor.read_centimeters(), Ok(40));
    }
}
