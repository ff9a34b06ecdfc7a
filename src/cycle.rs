//! What one measurement of the ranging exercises produces.
//!
//! The tasks only fire the sensor and push the result to the hardware; deciding
//! whether to measure, which unit to report and what the LEDs and display show
//! happens here.

use crate::datamodel::ranging::RangingState;
use crate::drivers::hc_sr04::{width_to_distance, SensorError};
use crate::led_bar::LedLevel;
use crate::report::{self, Line};

/// New content for the LED bar and the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Refresh {
    pub level: LedLevel,
    pub distance: u16,
}

#[derive(Debug, PartialEq)]
pub struct Cycle {
    /// line for the PC, sent even while on hold.
    pub report: Line,
    /// `None` while on hold.
    pub refresh: Option<Refresh>,
}

impl RangingState {
    /// Runs one measurement against this state.
    ///
    /// `read_echo` fires the sensor and returns the echo width in microseconds. It
    /// is not called while measuring is off, in which case the result is `Ok(None)`.
    pub fn cycle<F>(&self, read_echo: F) -> Result<Option<Cycle>, SensorError>
    where
        F: FnOnce() -> Result<u32, SensorError>,
    {
        if !self.should_measure() {
            return Ok(None);
        }
        let distance = width_to_distance(read_echo()?, self.unit);
        let refresh = if self.should_refresh_outputs() {
            Some(Refresh {
                level: LedLevel::from_distance(distance),
                distance,
            })
        } else {
            None
        };
        Ok(Some(Cycle {
            report: report::distance_line(distance, self.unit),
            refresh,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::command::Command;

    // 30 cm, or 11 in
    const WIDTH_US: u32 = 1_769;

    #[test]
    fn off_does_not_fire_the_sensor() {
        let mut state = RangingState::default();
        state.apply(Command::ToggleMeasuring);
        let result = state.cycle(|| panic!("sensor fired while measuring is off"));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn centimeters_refresh_everything() {
        let state = RangingState::default();
        let cycle = state.cycle(|| Ok(WIDTH_US)).unwrap().unwrap();
        assert_eq!(cycle.report.as_str(), "Distancia: 30 cm\r\n");
        assert_eq!(
            cycle.refresh,
            Some(Refresh {
                level: LedLevel::Three,
                distance: 30
            })
        );
    }

    #[test]
    fn hold_still_reports() {
        let mut state = RangingState::default();
        state.apply(Command::ToggleHold);
        let cycle = state.cycle(|| Ok(WIDTH_US)).unwrap().unwrap();
        assert_eq!(cycle.report.as_str(), "Distancia: 30 cm\r\n");
        assert_eq!(cycle.refresh, None);
    }

    #[test]
    fn leds_follow_the_distance_shown_in_inches() {
        let mut state = RangingState::default();
        state.apply(Command::ToggleUnit);
        let cycle = state.cycle(|| Ok(WIDTH_US)).unwrap().unwrap();
        assert_eq!(cycle.report.as_str(), "Distancia: 11 in\r\n");
        assert_eq!(
            cycle.refresh,
            Some(Refresh {
                level: LedLevel::One,
                distance: 11
            })
        );
    }

    #[test]
    fn timeout_skips_the_cycle() {
        let state = RangingState::default();
        assert_eq!(
            state.cycle(|| Err(SensorError::EchoTimeout)),
            Err(SensorError::EchoTimeout)
        );
    }
}
