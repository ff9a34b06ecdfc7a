//! Distance to LED-bar mapping used by the ranging exercises.

/// Below this distance every LED is off. Thresholds apply to the distance as shown,
/// whatever its unit.
pub const NEAR: u16 = 10;
/// From [`NEAR`] up to this distance only LED1 is lit.
pub const MID: u16 = 20;
/// From [`MID`] up to this distance LED1 and LED2 are lit; beyond it all three.
pub const FAR: u16 = 30;

/// How many LEDs of the bar are lit, counting from LED1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedLevel {
    Off,
    One,
    Two,
    Three,
}

impl LedLevel {
    pub fn from_distance(distance: u16) -> Self {
        if distance < NEAR {
            LedLevel::Off
        } else if distance < MID {
            LedLevel::One
        } else if distance < FAR {
            LedLevel::Two
        } else {
            LedLevel::Three
        }
    }

    /// on/off state of LED1, LED2 and LED3.
    pub fn pattern(self) -> [bool; 3] {
        match self {
            LedLevel::Off => [false, false, false],
            LedLevel::One => [true, false, false],
            LedLevel::Two => [true, true, false],
            LedLevel::Three => [true, true, true],
        }
    }
}
