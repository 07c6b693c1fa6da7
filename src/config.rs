//! Timing and converter settings.
//!
//! The transport itself (19200 baud, 8N1 on the reference board) is brought
//! up by the firmware before the controller is built.

use embedded_time::duration::Milliseconds;

/// Minimum time between accepted level changes on the hold input.
pub const DEBOUNCE_DELAY: Milliseconds = Milliseconds(100);

/// Uninterrupted time at one level before it counts as a deliberate press.
pub const STABLE_TIME: Milliseconds = Milliseconds(1_000);

/// Pause between the blank line and the `##hardcheck` line of an escalation.
pub const ESCALATION_GAP: Milliseconds = Milliseconds(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
}

impl Resolution {
    pub fn bits(&self) -> u8 {
        match self {
            Resolution::Bits9 => 9,
            Resolution::Bits10 => 10,
            Resolution::Bits11 => 11,
            Resolution::Bits12 => 12,
        }
    }

    /// Largest raw count the converter can report at this resolution.
    pub fn max(&self) -> u16 {
        (1u16 << self.bits()) - 1
    }
}

#[derive(Clone, Copy)]
pub struct Config {
    pub debounce_delay: Milliseconds,
    pub stable_time: Milliseconds,
    pub escalation_gap: Milliseconds,
    pub resolution: Resolution,
}

impl Config {
    pub fn with_debounce_delay(mut self, delay: Milliseconds) -> Self {
        self.debounce_delay = delay;
        self
    }

    pub fn with_stable_time(mut self, time: Milliseconds) -> Self {
        self.stable_time = time;
        self
    }

    pub fn with_escalation_gap(mut self, gap: Milliseconds) -> Self {
        self.escalation_gap = gap;
        self
    }

    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_delay: DEBOUNCE_DELAY,
            stable_time: STABLE_TIME,
            escalation_gap: ESCALATION_GAP,
            resolution: Resolution::Bits12,
        }
    }
}
