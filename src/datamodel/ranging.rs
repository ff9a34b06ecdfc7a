use serde::Serialize;

use crate::config;

/// Unit the distance is measured and reported in.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Centimeters,
    Inches,
}

impl Unit {
    /// suffix used on the UART report.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Centimeters => "cm",
            Unit::Inches => "in",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Unit::Centimeters => Unit::Inches,
            Unit::Inches => Unit::Centimeters,
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Centimeters
    }
}

/// Period between two measurement triggers, in microseconds.
///
/// Always within `[MIN_US, MAX_US]` and moved in `STEP_US` increments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MeasurePeriod(u32);

impl MeasurePeriod {
    pub const MIN_US: u32 = 100_000;
    pub const MAX_US: u32 = 2_000_000;
    pub const STEP_US: u32 = 100_000;

    /// Clamps `micros` into the allowed range.
    pub fn from_micros(micros: u32) -> Self {
        MeasurePeriod(micros.max(Self::MIN_US).min(Self::MAX_US))
    }

    pub fn as_micros(self) -> u32 {
        self.0
    }

    pub fn as_millis(self) -> u32 {
        self.0 / 1_000
    }

    /// Shortens the period by one step. Returns `false` if already at the minimum.
    pub fn faster(&mut self) -> bool {
        let next = Self::from_micros(self.0.saturating_sub(Self::STEP_US));
        self.replace(next)
    }

    /// Lengthens the period by one step. Returns `false` if already at the maximum.
    pub fn slower(&mut self) -> bool {
        let next = Self::from_micros(self.0.saturating_add(Self::STEP_US));
        self.replace(next)
    }

    fn replace(&mut self, next: Self) -> bool {
        let changed = next != *self;
        *self = next;
        changed
    }
}

impl Default for MeasurePeriod {
    fn default() -> Self {
        MeasurePeriod::from_micros(config::ranging::UART_INITIAL_PERIOD_US)
    }
}

/// Everything the key/command handlers write and the measurement task reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangingState {
    /// measurement enabled
    pub measuring: bool,
    /// keep the last value on the display and LEDs
    pub hold: bool,
    pub unit: Unit,
    pub period: MeasurePeriod,
}

impl RangingState {
    pub fn new(period: MeasurePeriod) -> Self {
        RangingState {
            measuring: true,
            hold: false,
            unit: Unit::Centimeters,
            period,
        }
    }

    /// Returns the new value of the flag.
    pub fn toggle_measuring(&mut self) -> bool {
        self.measuring = !self.measuring;
        self.measuring
    }

    pub fn toggle_hold(&mut self) -> bool {
        self.hold = !self.hold;
        self.hold
    }

    pub fn toggle_unit(&mut self) -> Unit {
        self.unit = self.unit.toggled();
        self.unit
    }

    pub fn should_measure(&self) -> bool {
        self.measuring
    }

    /// LEDs and display only follow new readings while measuring and not on hold.
    pub fn should_refresh_outputs(&self) -> bool {
        self.measuring && !self.hold
    }
}

impl Default for RangingState {
    fn default() -> Self {
        RangingState::new(MeasurePeriod::default())
    }
}
