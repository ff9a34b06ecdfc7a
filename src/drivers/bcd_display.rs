//! Three-digit LCD (ITSE0803) behind a CD4543 BCD-to-seven-segment latch.
//!
//! Four data lines carry the BCD code of one digit; each digit has its own
//! select line which latches the code on its falling edge. The digits are
//! loaded one after the other.

use embedded_hal::digital::v2::OutputPin;

use crate::bcd::{bcd_lines, to_bcd_digits, BCD_LINES, BLANK_CODE};

pub const DIGITS: usize = 3;

pub struct BcdDisplay<P> {
    data: [P; BCD_LINES],
    select: [P; DIGITS],
}

impl<P: OutputPin> BcdDisplay<P> {
    /// `data` is b0..b3, `select` is the leftmost digit first.
    pub fn new(data: [P; BCD_LINES], select: [P; DIGITS]) -> Result<Self, P::Error> {
        let mut display = BcdDisplay { data, select };
        for line in display.select.iter_mut() {
            line.set_low()?;
        }
        Ok(display)
    }

    /// Shows `value`; values above 999 show their last three digits.
    pub fn write(&mut self, value: u16) -> Result<(), P::Error> {
        let mut digits = [0u8; DIGITS];
        to_bcd_digits(u32::from(value), &mut digits);
        self.latch_all(&digits)
    }

    /// Blanks every digit.
    pub fn off(&mut self) -> Result<(), P::Error> {
        self.latch_all(&[BLANK_CODE; DIGITS])
    }

    fn latch_all(&mut self, codes: &[u8; DIGITS]) -> Result<(), P::Error> {
        for line in self.select.iter_mut() {
            line.set_low()?;
        }
        for (position, code) in codes.iter().enumerate() {
            self.set_data(*code)?;
            self.select[position].set_high()?;
            self.select[position].set_low()?;
        }
        Ok(())
    }

    fn set_data(&mut self, code: u8) -> Result<(), P::Error> {
        for (line, level) in self.data.iter_mut().zip(bcd_lines(code).iter()) {
            if *level {
                line.set_high()?;
            } else {
                line.set_low()?;
            }
        }
        Ok(())
    }
}
