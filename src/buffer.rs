use heapless::Vec;

use crate::protocol::LineCapacity;

/// Bytes of the line being assembled.
///
/// Once a line outgrows the capacity the buffer stays in the overflowed
/// state until it is cleared, so the whole line is discarded rather than
/// truncated.
pub(crate) struct LineBuffer {
    bytes: Vec<u8, LineCapacity>,
    overflowed: bool,
}

impl LineBuffer {
    pub(crate) fn new() -> Self {
        LineBuffer {
            bytes: Vec::new(),
            overflowed: false,
        }
    }

    pub(crate) fn push(&mut self, byte: u8) {
        if self.overflowed {
            return;
        }
        if self.bytes.push(byte).is_err() {
            self.overflowed = true;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bytes.is_empty() && !self.overflowed
    }

    pub(crate) fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn clear(&mut self) {
        self.bytes = Vec::new();
        self.overflowed = false;
    }
}
