//! Press detection for the polled switches.

use crate::datamodel::command::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Switch1,
    Switch2,
}

impl KeyEvent {
    /// SW1 starts/stops measuring, SW2 holds the display.
    pub fn command(self) -> Command {
        match self {
            KeyEvent::Switch1 => Command::ToggleMeasuring,
            KeyEvent::Switch2 => Command::ToggleHold,
        }
    }
}

/// Turns sampled switch levels into press events.
///
/// A key only produces an event on the sample where it goes from released to
/// pressed, so holding it down does not keep toggling. When both keys go down on
/// the same sample SW1 wins, the same way a single-value switch read would report it.
#[derive(Default, Debug)]
pub struct KeyScanner {
    pressed: [bool; 2],
}

impl KeyScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scan(&mut self, sw1: bool, sw2: bool) -> Option<KeyEvent> {
        let rose = [sw1 && !self.pressed[0], sw2 && !self.pressed[1]];
        self.pressed = [sw1, sw2];
        if rose[0] {
            Some(KeyEvent::Switch1)
        } else if rose[1] {
            Some(KeyEvent::Switch2)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_fires_once() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.scan(true, false), Some(KeyEvent::Switch1));
        assert_eq!(scanner.scan(true, false), None);
        assert_eq!(scanner.scan(true, false), None);
        assert_eq!(scanner.scan(false, false), None);
        assert_eq!(scanner.scan(true, false), Some(KeyEvent::Switch1));
    }

    #[test]
    fn second_key_while_first_held() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.scan(true, false), Some(KeyEvent::Switch1));
        assert_eq!(scanner.scan(true, true), Some(KeyEvent::Switch2));
        assert_eq!(scanner.scan(false, true), None);
    }

    #[test]
    fn simultaneous_press_prefers_sw1() {
        let mut scanner = KeyScanner::new();
        assert_eq!(scanner.scan(true, true), Some(KeyEvent::Switch1));
        assert_eq!(scanner.scan(true, true), None);
    }

    #[test]
    fn events_map_to_commands() {
        assert_eq!(KeyEvent::Switch1.command(), Command::ToggleMeasuring);
        assert_eq!(KeyEvent::Switch2.command(), Command::ToggleHold);
    }
}
