use crate::datamodel::ranging::{MeasurePeriod, RangingState};

/// Single-byte commands accepted on the PC serial port.
///
/// The two board switches produce the same commands: SW1 is [`Command::ToggleMeasuring`]
/// and SW2 is [`Command::ToggleHold`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `O`
    ToggleMeasuring,
    /// `H`
    ToggleHold,
    /// `I`
    ToggleUnit,
    /// `F`, shorten the measure period
    Faster,
    /// `S`, lengthen the measure period
    Slower,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'O' => Some(Command::ToggleMeasuring),
            b'H' => Some(Command::ToggleHold),
            b'I' => Some(Command::ToggleUnit),
            b'F' => Some(Command::Faster),
            b'S' => Some(Command::Slower),
            _ => None,
        }
    }
}

/// What the caller of [`RangingState::apply`] still has to do on the hardware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// measurement was switched off: turn every LED off and blank the display.
    OutputsCleared,
    /// the trigger has to be re-armed with the new period.
    PeriodChanged(MeasurePeriod),
    /// a period step was requested but the period is already at its bound.
    PeriodUnchanged,
}

impl RangingState {
    pub fn apply(&mut self, command: Command) -> Effect {
        match command {
            Command::ToggleMeasuring => {
                if self.toggle_measuring() {
                    Effect::None
                } else {
                    Effect::OutputsCleared
                }
            }
            Command::ToggleHold => {
                self.toggle_hold();
                Effect::None
            }
            Command::ToggleUnit => {
                self.toggle_unit();
                Effect::None
            }
            Command::Faster => period_effect(self.period.faster(), self.period),
            Command::Slower => period_effect(self.period.slower(), self.period),
        }
    }
}

fn period_effect(changed: bool, period: MeasurePeriod) -> Effect {
    if changed {
        Effect::PeriodChanged(period)
    } else {
        Effect::PeriodUnchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::ranging::Unit;

    #[test]
    fn decodes_known_bytes() {
        assert_eq!(Command::from_byte(b'O'), Some(Command::ToggleMeasuring));
        assert_eq!(Command::from_byte(b'H'), Some(Command::ToggleHold));
        assert_eq!(Command::from_byte(b'I'), Some(Command::ToggleUnit));
        assert_eq!(Command::from_byte(b'F'), Some(Command::Faster));
        assert_eq!(Command::from_byte(b'S'), Some(Command::Slower));
    }

    #[test]
    fn ignores_everything_else() {
        let known = b"OHIFS";
        for byte in 0..=u8::MAX {
            if !known.contains(&byte) {
                assert_eq!(Command::from_byte(byte), None, "byte {:#04x}", byte);
            }
        }
        // lowercase is not accepted
        assert_eq!(Command::from_byte(b'o'), None);
    }

    #[test]
    fn switching_off_clears_outputs() {
        let mut state = RangingState::default();
        assert_eq!(state.apply(Command::ToggleMeasuring), Effect::OutputsCleared);
        assert!(!state.measuring);
        assert_eq!(state.apply(Command::ToggleMeasuring), Effect::None);
        assert!(state.measuring);
    }

    #[test]
    fn hold_and_unit_toggle() {
        let mut state = RangingState::default();
        assert_eq!(state.apply(Command::ToggleHold), Effect::None);
        assert!(state.hold);
        assert_eq!(state.apply(Command::ToggleUnit), Effect::None);
        assert_eq!(state.unit, Unit::Inches);
    }

    #[test]
    fn period_commands_report_changes() {
        let mut state = RangingState::new(MeasurePeriod::from_micros(200_000));
        assert_eq!(
            state.apply(Command::Faster),
            Effect::PeriodChanged(MeasurePeriod::from_micros(100_000))
        );
        assert_eq!(state.apply(Command::Faster), Effect::PeriodUnchanged);
        assert_eq!(
            state.apply(Command::Slower),
            Effect::PeriodChanged(MeasurePeriod::from_micros(200_000))
        );
    }
}
