use crate::debounce::{DebounceState, Escalation, Phase, Timing};
use crate::error::Error;
use crate::expander::{Bit, Expander, PinMode};
use crate::protocol::HOLD_INPUT;

/// Watches IN16 on the second input bank for a held button.
pub struct Monitor<Bank>
    where
        Bank: Expander,
{
    bank: Bank,
    state: DebounceState,
    timing: Timing,
}

impl<Bank> Monitor<Bank>
    where
        Bank: Expander,
{
    pub fn new(bank: Bank, timing: Timing) -> Self {
        Self {
            bank,
            state: DebounceState::new(),
            timing,
        }
    }

    /// IN9-IN16 are all inputs, even though only IN16 is ever read.
    pub fn init(&mut self) -> Result<(), Error> {
        for bit in Bit::all() {
            self.bank.pin_mode(bit, PinMode::Input).map_err(|_| Error::Expander)?;
        }
        Ok(())
    }

    pub fn poll(&mut self, now: u32) -> Result<Option<Escalation>, Error> {
        let level = self.bank.digital_read(HOLD_INPUT).map_err(|_| Error::Expander)?;
        let first = self.state == DebounceState::Uninitialized;
        let escalation = self.state.advance(level, now, &self.timing);
        if first {
            log::info!("IN16 initialised, start level {:?}", level);
        }
        Ok(escalation)
    }

    pub fn rearm(&mut self) {
        self.state.rearm();
    }

    pub fn phase(&self, now: u32) -> Phase {
        self.state.phase(now, &self.timing)
    }
}
