/// Failure of one of the hardware capabilities the controller drives.
///
/// None of these are fatal: the polling loop logs them and carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Read, write or mode-set on a GPIO expander bank failed.
    Expander,
    /// The ADC reported an error instead of a sample.
    Analog,
    /// The serial transport failed to accept or deliver a byte.
    Transport,
    /// The monotonic clock could not be read or converted to milliseconds.
    Clock,
}
