//! Binary-coded decimal helpers for the CD4543 driven display.

/// Number of data lines between the MCU and the BCD latch (b0..b3).
pub const BCD_LINES: usize = 4;

/// Code the CD4543 renders as an empty digit (any input above 9 blanks the segments).
pub const BLANK_CODE: u8 = 0b1111;

/// Splits `value` into decimal digits, most significant first.
///
/// Exactly `out.len()` digits are produced: shorter numbers are padded with leading
/// zeros and longer numbers keep only their least significant digits.
pub fn to_bcd_digits(mut value: u32, out: &mut [u8]) {
    for digit in out.iter_mut().rev() {
        *digit = (value % 10) as u8;
        value /= 10;
    }
}

/// Line levels for a single BCD code. Index `i` is line `b{i}`.
pub fn bcd_lines(code: u8) -> [bool; BCD_LINES] {
    let mut lines = [false; BCD_LINES];
    for (bit, line) in lines.iter_mut().enumerate() {
        *line = (code >> bit) & 1 == 1;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_digit_value() {
        let mut digits = [0u8; 3];
        to_bcd_digits(127, &mut digits);
        assert_eq!(digits, [1, 2, 7]);
    }

    #[test]
    fn short_value_is_zero_padded() {
        let mut digits = [9u8; 3];
        to_bcd_digits(7, &mut digits);
        assert_eq!(digits, [0, 0, 7]);
    }

    #[test]
    fn long_value_keeps_low_digits() {
        let mut digits = [0u8; 3];
        to_bcd_digits(1234, &mut digits);
        assert_eq!(digits, [2, 3, 4]);
    }

    #[test]
    fn zero_width_output_is_a_no_op() {
        let mut digits: [u8; 0] = [];
        to_bcd_digits(42, &mut digits);
    }

    #[test]
    fn lines_follow_bits() {
        assert_eq!(bcd_lines(0), [false, false, false, false]);
        assert_eq!(bcd_lines(5), [true, false, true, false]);
        assert_eq!(bcd_lines(9), [true, false, false, true]);
        assert_eq!(bcd_lines(BLANK_CODE), [true; 4]);
    }
}
