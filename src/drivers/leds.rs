//! The three indicator LEDs.

use embedded_hal::digital::v2::OutputPin;

use crate::blink::LedId;
use crate::led_bar::LedLevel;

/// Three push-pull LEDs, LED1 first.
///
/// The bar remembers what it last wrote, so toggling works on pins that cannot
/// read back their output latch.
pub struct LedBar<P> {
    leds: [P; 3],
    lit: [bool; 3],
}

impl<P: OutputPin> LedBar<P> {
    /// Takes the pins and switches every LED off.
    pub fn new(leds: [P; 3]) -> Result<Self, P::Error> {
        let mut bar = LedBar {
            leds,
            lit: [false; 3],
        };
        bar.all_off()?;
        Ok(bar)
    }

    pub fn set(&mut self, led: LedId, on: bool) -> Result<(), P::Error> {
        let index = led.index();
        if on {
            self.leds[index].set_high()?;
        } else {
            self.leds[index].set_low()?;
        }
        self.lit[index] = on;
        Ok(())
    }

    pub fn toggle(&mut self, led: LedId) -> Result<(), P::Error> {
        let on = !self.lit[led.index()];
        self.set(led, on)
    }

    pub fn show(&mut self, level: LedLevel) -> Result<(), P::Error> {
        let pattern = level.pattern();
        for (led, on) in [LedId::Led1, LedId::Led2, LedId::Led3]
            .iter()
            .zip(pattern.iter())
        {
            self.set(*led, *on)?;
        }
        Ok(())
    }

    pub fn all_off(&mut self) -> Result<(), P::Error> {
        self.show(LedLevel::Off)
    }

    pub fn is_on(&self, led: LedId) -> bool {
        self.lit[led.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{last_level, pin_log, MockPin, PinLog};

    fn bar() -> (LedBar<MockPin>, PinLog) {
        let log = pin_log();
        let pins = [
            MockPin::new(0, &log),
            MockPin::new(1, &log),
            MockPin::new(2, &log),
        ];
        (LedBar::new(pins).unwrap(), log)
    }

    fn levels(log: &PinLog) -> [Option<bool>; 3] {
        [last_level(log, 0), last_level(log, 1), last_level(log, 2)]
    }

    #[test]
    fn starts_dark() {
        let (bar, log) = bar();
        assert_eq!(levels(&log), [Some(false); 3]);
        assert!(!bar.is_on(LedId::Led1));
    }

    #[test]
    fn shows_distance_levels() {
        let (mut bar, log) = bar();
        bar.show(LedLevel::from_distance(25)).unwrap();
        assert_eq!(levels(&log), [Some(true), Some(true), Some(false)]);
        bar.show(LedLevel::from_distance(12)).unwrap();
        assert_eq!(levels(&log), [Some(true), Some(false), Some(false)]);
        bar.show(LedLevel::from_distance(45)).unwrap();
        assert_eq!(levels(&log), [Some(true); 3]);
        bar.all_off().unwrap();
        assert_eq!(levels(&log), [Some(false); 3]);
    }

    #[test]
    fn toggle_flips_one_led() {
        let (mut bar, log) = bar();
        bar.toggle(LedId::Led2).unwrap();
        assert!(bar.is_on(LedId::Led2));
        assert_eq!(levels(&log), [Some(false), Some(true), Some(false)]);
        bar.toggle(LedId::Led2).unwrap();
        assert!(!bar.is_on(LedId::Led2));
        assert_eq!(last_level(&log, 1), Some(false));
    }
}
