use crate::error::Error;
use crate::expander::{Bit, Expander, PinMode};
use crate::protocol::{InputId, Response, Switch};

/// Digital inputs IN1-IN8 on one expander bank. Inputs are active-low.
pub struct Inputs<Bank>
    where
        Bank: Expander,
{
    bank: Bank,
}

impl<Bank> Inputs<Bank>
    where
        Bank: Expander,
{
    pub fn new(bank: Bank) -> Self {
        Self { bank }
    }

    pub fn init(&mut self) -> Result<(), Error> {
        for bit in Bit::all() {
            self.bank.pin_mode(bit, PinMode::Input).map_err(|_| Error::Expander)?;
        }
        Ok(())
    }

    pub fn read(&mut self, input: InputId) -> Result<Response, Error> {
        let level = self.bank.digital_read(input.bit()).map_err(|_| Error::Expander)?;
        let state = Switch::from_level(level);
        match state {
            Switch::On => log::info!("IN{} active (LOW)", input.number()),
            Switch::Off => log::info!("IN{} inactive (HIGH)", input.number()),
        }
        Ok(Response::Input(state))
    }
}
