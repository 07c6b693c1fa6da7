//! Capability of an 8-bit I2C GPIO expander (PCF8574 on the reference board).
//!
//! The chip driver lives outside this crate; anything that can set a pin mode,
//! read a level and write a level on bits 0..=7 can stand in for a bank.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// One pin of a bank, always in `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bit(u8);

impl Bit {
    pub const COUNT: u8 = 8;

    pub fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Bit(index))
        } else {
            None
        }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Bit> {
        (0..Self::COUNT).map(Bit)
    }

    pub(crate) const fn from_index(index: u8) -> Self {
        Bit(index & 0x07)
    }
}

pub trait Expander {
    type Error;

    fn pin_mode(&mut self, bit: Bit, mode: PinMode) -> Result<(), Self::Error>;

    fn digital_read(&mut self, bit: Bit) -> Result<Level, Self::Error>;

    fn digital_write(&mut self, bit: Bit, level: Level) -> Result<(), Self::Error>;
}
