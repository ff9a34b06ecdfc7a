//! Mock pins and clock shared by the unit tests.

use core::convert::Infallible;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::drivers::TickClock;

/// Every level change of every [`MockPin`] sharing the log, in order.
pub type PinLog = Rc<RefCell<Vec<(u8, bool)>>>;

pub fn pin_log() -> PinLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Output pin that appends `(id, level)` to a shared log.
pub struct MockPin {
    id: u8,
    log: PinLog,
}

impl MockPin {
    pub fn new(id: u8, log: &PinLog) -> Self {
        MockPin {
            id,
            log: Rc::clone(log),
        }
    }
}

impl OutputPin for MockPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.id, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.id, true));
        Ok(())
    }
}

/// Last level written to pin `id`, if it was ever written.
pub fn last_level(log: &PinLog, id: u8) -> Option<bool> {
    log.borrow()
        .iter()
        .rev()
        .find(|(pin, _)| *pin == id)
        .map(|(_, level)| *level)
}

/// Clock where every read of the counter advances time by one microsecond.
pub struct MockClock {
    now: Rc<Cell<u32>>,
}

impl MockClock {
    pub fn starting_at(start: u32) -> Self {
        MockClock {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn handle(&self) -> Rc<Cell<u32>> {
        Rc::clone(&self.now)
    }
}

impl TickClock for MockClock {
    fn ticks(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(1));
        now
    }

    fn ticks_per_us(&self) -> u32 {
        1
    }
}

/// Echo line that is high while the shared clock is inside `[rise, fall)`.
pub struct MockEcho {
    now: Rc<Cell<u32>>,
    rise: u32,
    fall: u32,
}

impl MockEcho {
    pub fn new(clock: &MockClock, rise: u32, fall: u32) -> Self {
        MockEcho {
            now: clock.handle(),
            rise,
            fall,
        }
    }
}

impl InputPin for MockEcho {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        let now = self.now.get();
        Ok(now >= self.rise && now < self.fall)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
