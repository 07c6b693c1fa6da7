use core::fmt::Write;
use heapless::{consts::*, String};

use crate::expander::{Bit, Level};

macro_rules! frame {
    ($size:tt, $($arg:tt)*) => ({
        let mut f = String::<$size>::new();
        let _ = write!(f, $($arg)*);
        let _ = f.push_str("\r");
        f
    })
}

/// Longest accepted command line, in bytes.
pub type LineCapacity = U64;

pub const HARDCHECK: &str = "##hardcheck";

/// A trimmed command line as assembled from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String<LineCapacity>);

impl Command {
    pub fn new(text: &str) -> Option<Self> {
        let mut line = String::new();
        line.push_str(text).ok()?;
        Some(Command(line))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    /// Relay outputs and digital inputs are both active-low.
    pub fn level(&self) -> Level {
        match self {
            Switch::On => Level::Low,
            Switch::Off => Level::High,
        }
    }

    pub fn from_level(level: Level) -> Self {
        match level {
            Level::Low => Switch::On,
            Level::High => Switch::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputBank {
    A,
    B,
}

/// Relay number as used on the wire, `1..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayId(u8);

impl RelayId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 11;

    pub fn new(number: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&number) {
            Some(RelayId(number))
        } else {
            None
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Relays 1-8 sit on bank A, 9-11 on bank B.
    pub fn location(&self) -> (OutputBank, Bit) {
        let index = self.0 - 1;
        if index < Bit::COUNT {
            (OutputBank::A, Bit::from_index(index))
        } else {
            (OutputBank::B, Bit::from_index(index - Bit::COUNT))
        }
    }
}

/// Input number as used on the wire, `1..=8`. All of them live on input bank A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputId(u8);

impl InputId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(number: u8) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&number) {
            Some(InputId(number))
        } else {
            None
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn bit(&self) -> Bit {
        Bit::from_index(self.0 - 1)
    }
}

/// IN16: bit 7 of input bank B, watched by the hold monitor only.
pub const HOLD_INPUT: Bit = Bit::from_index(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotANumber,
    OutOfRange(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    HardCheck,
    SetRelay(RelayId, Switch),
    ReadInput(InputId),
    SampleAnalog,
    InvalidRelay(Rejection),
    InvalidInput(Rejection),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Input(Switch),
    Analog(u16),
    Blank,
    HardCheck,
}

impl Response {
    pub fn render(&self) -> String<U16> {
        match self {
            Response::Input(Switch::On) => frame!(U16, "on"),
            Response::Input(Switch::Off) => frame!(U16, "off"),
            Response::Analog(raw) => frame!(U16, "{:04}", raw),
            Response::Blank => frame!(U16, ""),
            Response::HardCheck => frame!(U16, "{}", HARDCHECK),
        }
    }
}
