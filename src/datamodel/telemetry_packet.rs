use serde::Serialize;

use crate::datamodel::ranging::{RangingState, Unit};

/// Snapshot of the ranging state, written as JSON to the debug log.
#[derive(Serialize, Debug, PartialEq)]
pub struct RangingTelemetry {
    pub measuring: bool,
    pub hold: bool,
    pub unit: Unit,
    pub period_ms: u32,
    /// last distance shown, in `unit`. `None` before the first reading.
    pub last_distance: Option<u16>,
}

#[derive(Debug, PartialEq)]
pub enum TelemetryError {
    BufferTooSmall,
}

impl RangingTelemetry {
    pub fn new(state: &RangingState, last_distance: Option<u16>) -> Self {
        RangingTelemetry {
            measuring: state.measuring,
            hold: state.hold,
            unit: state.unit,
            period_ms: state.period.as_millis(),
            last_distance,
        }
    }

    /// Serializes into `buf`, returning the number of bytes written.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, TelemetryError> {
        serde_json_core::to_slice(self, buf).map_err(|_| TelemetryError::BufferTooSmall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TELEMETRY_SIZE;
    use crate::datamodel::ranging::MeasurePeriod;

    #[test]
    fn encodes_snapshot() {
        let mut state = RangingState::new(MeasurePeriod::from_micros(300_000));
        state.toggle_unit();
        let packet = RangingTelemetry::new(&state, Some(42));

        let mut buf = [0u8; TELEMETRY_SIZE];
        let len = packet.encode(&mut buf).unwrap();
        let json = core::str::from_utf8(&buf[..len]).unwrap();
        assert_eq!(
            json,
            r#"{"measuring":true,"hold":false,"unit":"Inches","period_ms":300,"last_distance":42}"#
        );
    }

    #[test]
    fn missing_reading_is_null() {
        let packet = RangingTelemetry::new(&RangingState::default(), None);
        let mut buf = [0u8; TELEMETRY_SIZE];
        let len = packet.encode(&mut buf).unwrap();
        let json = core::str::from_utf8(&buf[..len]).unwrap();
        assert!(json.ends_with(r#""last_distance":null}"#), "{}", json);
    }

    #[test]
    fn reports_small_buffer() {
        let packet = RangingTelemetry::new(&RangingState::default(), Some(1));
        let mut buf = [0u8; 8];
        assert_eq!(packet.encode(&mut buf), Err(TelemetryError::BufferTooSmall));
    }
}
