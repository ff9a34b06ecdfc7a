/// Reasons a byte received on the command UART was not acted upon.
///
/// None of these are fatal; the receive task logs them and keeps listening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RxError {
    Overrun,
    Framing,
    Noise,
    Parity,
    /// any other receive error the HAL reports.
    Other,
    /// a byte that is not one of the single-letter commands. It is still echoed.
    UnknownCommand(u8),
}
