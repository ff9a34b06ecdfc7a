//! Stored waveforms and the circular generator that plays them on the DAC.

/// Samples in [`RAMP`] and [`ECG`].
pub const SIGNAL_SIZE: usize = 231;

/// Rising ramp 1..=231, handy to check the DAC output on a scope.
pub static RAMP: [u8; SIGNAL_SIZE] = ramp();

const fn ramp() -> [u8; SIGNAL_SIZE] {
    let mut table = [0u8; SIGNAL_SIZE];
    let mut i = 0;
    while i < SIGNAL_SIZE {
        table[i] = (i + 1) as u8;
        i += 1;
    }
    table
}

/// One heartbeat, 231 samples.
pub static ECG: [u8; SIGNAL_SIZE] = [
    76, 77, 78, 77, 79, 86, 81, 76, 84, 93, 85, 80, 89, 95, 89, 85,
    93, 98, 94, 88, 98, 105, 96, 91, 99, 105, 101, 96, 102, 106, 101, 96,
    100, 107, 101, 94, 100, 104, 100, 91, 99, 103, 98, 91, 96, 105, 95, 88,
    95, 100, 94, 85, 93, 99, 92, 84, 91, 96, 87, 80, 83, 92, 86, 78,
    84, 89, 79, 73, 81, 83, 78, 70, 80, 82, 79, 69, 80, 82, 81, 70,
    75, 81, 77, 74, 79, 83, 82, 72, 80, 87, 79, 76, 85, 95, 87, 81,
    88, 93, 88, 84, 87, 94, 86, 82, 85, 94, 85, 82, 85, 95, 86, 83,
    92, 99, 91, 88, 94, 98, 95, 90, 97, 105, 104, 94, 98, 114, 117, 124,
    144, 180, 210, 236, 253, 227, 171, 99, 49, 34, 29, 43, 69, 89, 89, 90,
    98, 107, 104, 98, 104, 110, 102, 98, 103, 111, 101, 94, 103, 108, 102, 95,
    97, 106, 100, 92, 101, 103, 100, 94, 98, 103, 96, 90, 98, 103, 97, 90,
    99, 104, 95, 90, 99, 104, 100, 93, 100, 106, 101, 93, 101, 105, 103, 96,
    105, 112, 105, 99, 103, 108, 99, 96, 102, 106, 99, 90, 92, 100, 87, 80,
    82, 88, 77, 69, 75, 79, 74, 67, 71, 78, 72, 67, 73, 81, 77, 71,
    75, 84, 79, 77, 77, 76, 76,
];

/// A longer, smoother heartbeat trace, 256 samples.
pub static ECG_DETAILED: [u8; 256] = [
    17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 17, 18, 18, 18, 17, 17,
    17, 17, 17, 17, 17, 18, 18, 18, 18, 18, 18, 18, 17, 17, 16, 16,
    16, 16, 17, 17, 18, 18, 18, 17, 17, 17, 17, 18, 18, 19, 21, 22,
    24, 25, 26, 27, 28, 29, 31, 32, 33, 34, 34, 35, 37, 38, 37, 34,
    29, 24, 19, 15, 14, 15, 16, 17, 17, 17, 16, 15, 14, 13, 13, 13,
    13, 13, 13, 13, 12, 12, 10, 6, 2, 3, 15, 43, 88, 145, 199, 237,
    252, 242, 211, 167, 117, 70, 35, 16, 14, 22, 32, 38, 37, 32, 27, 24,
    24, 26, 27, 28, 28, 27, 28, 28, 30, 31, 31, 31, 32, 33, 34, 36,
    38, 39, 40, 41, 42, 43, 45, 47, 49, 51, 53, 55, 57, 60, 62, 65,
    68, 71, 75, 79, 83, 87, 92, 97, 101, 106, 111, 116, 121, 125, 129, 133,
    136, 138, 139, 140, 140, 139, 137, 133, 129, 123, 117, 109, 101, 92, 84, 77,
    70, 64, 58, 52, 47, 42, 39, 36, 34, 31, 30, 28, 27, 26, 25, 25,
    25, 25, 25, 25, 25, 25, 24, 24, 24, 24, 25, 25, 25, 25, 25, 25,
    25, 24, 24, 24, 24, 24, 24, 24, 24, 23, 23, 22, 22, 21, 21, 21,
    20, 20, 20, 20, 20, 19, 19, 18, 18, 18, 19, 19, 19, 19, 18, 17,
    17, 18, 18, 18, 18, 18, 18, 18, 18, 17, 17, 17, 17, 17, 17, 17,
];

/// Walks a sample table forever, wrapping back to the first sample after the last.
#[derive(Debug)]
pub struct SampleGenerator {
    table: &'static [u8],
    index: usize,
}

impl SampleGenerator {
    pub const fn new(table: &'static [u8]) -> Self {
        SampleGenerator { table, index: 0 }
    }

    /// Returns the current sample and moves to the next one.
    ///
    /// An empty table always yields 0.
    pub fn next_sample(&mut self) -> u8 {
        let sample = match self.table.get(self.index) {
            Some(sample) => *sample,
            None => return 0,
        };
        self.index = if self.index + 1 < self.table.len() {
            self.index + 1
        } else {
            0
        };
        sample
    }

    /// index of the sample the next call to [`Self::next_sample`] returns.
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_contents() {
        assert_eq!(RAMP[0], 1);
        assert_eq!(RAMP[SIGNAL_SIZE - 1], 231);
        assert!(RAMP.windows(2).all(|pair| pair[1] == pair[0] + 1));
    }

    #[test]
    fn wraps_after_last_sample() {
        let mut generator = SampleGenerator::new(&RAMP);
        for expected in 1..=231u8 {
            assert_eq!(generator.next_sample(), expected);
        }
        assert_eq!(generator.position(), 0);
        assert_eq!(generator.next_sample(), 1);
        assert_eq!(generator.position(), 1);
    }

    #[test]
    fn plays_ecg_periodically() {
        let mut generator = SampleGenerator::new(&ECG);
        let first_pass: Vec<u8> = (0..ECG.len()).map(|_| generator.next_sample()).collect();
        let second_pass: Vec<u8> = (0..ECG.len()).map(|_| generator.next_sample()).collect();
        assert_eq!(first_pass, ECG.to_vec());
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn detailed_trace_peaks_once() {
        let peak = *ECG_DETAILED.iter().max().unwrap();
        assert_eq!(ECG_DETAILED.iter().filter(|s| **s == peak).count(), 1);
        assert_eq!(ECG_DETAILED.len(), 256);
    }

    #[test]
    fn reset_restarts_table() {
        let mut generator = SampleGenerator::new(&ECG);
        generator.next_sample();
        generator.next_sample();
        generator.reset();
        assert_eq!(generator.next_sample(), ECG[0]);
    }

    #[test]
    fn empty_table_yields_zero() {
        static EMPTY: [u8; 0] = [];
        let mut generator = SampleGenerator::new(&EMPTY);
        assert!(generator.is_empty());
        assert_eq!(generator.next_sample(), 0);
        assert_eq!(generator.position(), 0);
    }
}
