//! LED on/off/toggle plans for the blink exercise.

use crate::config;

/// One of the three LEDs of the bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedId {
    Led1,
    Led2,
    Led3,
}

impl LedId {
    pub fn index(self) -> usize {
        match self {
            LedId::Led1 => 0,
            LedId::Led2 => 1,
            LedId::Led3 => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    On,
    Off,
    Toggle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedAction {
    Set(LedId, bool),
    Toggle(LedId),
}

/// An action and how long to wait after performing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub action: LedAction,
    pub delay_ms: u32,
}

/// What the blink exercise does with a single LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkPlan {
    pub mode: Mode,
    pub led: LedId,
    /// toggles performed in [`Mode::Toggle`]
    pub cycles: u8,
    /// wait after each toggle, in [`config::blink::TICK_MS`] ticks
    pub period_ticks: u16,
}

impl Default for BlinkPlan {
    fn default() -> Self {
        BlinkPlan {
            mode: Mode::Toggle,
            led: LedId::Led2,
            cycles: 10,
            period_ticks: 5,
        }
    }
}

impl BlinkPlan {
    pub fn period_ms(&self) -> u32 {
        u32::from(self.period_ticks) * config::blink::TICK_MS
    }

    pub fn steps(&self) -> Steps {
        let remaining = match self.mode {
            Mode::On | Mode::Off => 1,
            Mode::Toggle => self.cycles,
        };
        Steps {
            plan: *self,
            remaining,
        }
    }
}

/// Iterator over the steps of a [`BlinkPlan`].
#[derive(Clone, Debug)]
pub struct Steps {
    plan: BlinkPlan,
    remaining: u8,
}

impl Iterator for Steps {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let step = match self.plan.mode {
            Mode::On => Step {
                action: LedAction::Set(self.plan.led, true),
                delay_ms: 0,
            },
            Mode::Off => Step {
                action: LedAction::Set(self.plan.led, false),
                delay_ms: 0,
            },
            Mode::Toggle => Step {
                action: LedAction::Toggle(self.plan.led),
                delay_ms: self.plan.period_ms(),
            },
        };
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.remaining);
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plan_toggles_led2_ten_times() {
        let steps: Vec<Step> = BlinkPlan::default().steps().collect();
        assert_eq!(steps.len(), 10);
        for step in steps {
            assert_eq!(step.action, LedAction::Toggle(LedId::Led2));
            assert_eq!(step.delay_ms, 500);
        }
    }

    #[test]
    fn on_and_off_are_single_steps() {
        let plan = BlinkPlan {
            mode: Mode::On,
            led: LedId::Led3,
            cycles: 10,
            period_ticks: 5,
        };
        let steps: Vec<Step> = plan.steps().collect();
        assert_eq!(
            steps,
            vec![Step {
                action: LedAction::Set(LedId::Led3, true),
                delay_ms: 0
            }]
        );

        let off = BlinkPlan { mode: Mode::Off, ..plan };
        assert_eq!(
            off.steps().next().map(|s| s.action),
            Some(LedAction::Set(LedId::Led3, false))
        );
        assert_eq!(off.steps().count(), 1);
    }

    #[test]
    fn zero_cycles_does_nothing() {
        let plan = BlinkPlan {
            cycles: 0,
            ..BlinkPlan::default()
        };
        assert_eq!(plan.steps().next(), None);
    }

    #[test]
    fn led_indices() {
        assert_eq!(LedId::Led1.index(), 0);
        assert_eq!(LedId::Led2.index(), 1);
        assert_eq!(LedId::Led3.index(), 2);
    }
}
