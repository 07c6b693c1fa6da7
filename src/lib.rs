//! RS485 command endpoint for a relay / input / analog I/O board.
//!
//! Relays and digital inputs sit behind 8-bit I2C GPIO expanders, the analog
//! input behind an embedded-hal ADC. A single polling [`Controller`] turns
//! CR/LF-terminated ASCII commands into relay writes, input reads and ADC
//! samples, and escalates a held button on IN16 into a `##hardcheck` line.

#![cfg_attr(not(test), no_std)]

pub mod analog;
mod buffer;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod delay;
pub mod error;
pub mod expander;
pub mod ingress;
pub mod input;
pub mod monitor;
pub mod parser;
pub mod protocol;
pub mod relay;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use controller::Controller;
pub use error::Error;
pub use expander::{Bit, Expander, Level, PinMode};
pub use protocol::{Command, InputId, RelayId, Request, Response, Switch};
