use crate::error::Error;
use crate::expander::{Bit, Expander, Level, PinMode};
use crate::protocol::{OutputBank, RelayId, Switch};

/// Relay outputs spread over two expander banks, driven active-low.
pub struct Relays<BankA, BankB>
    where
        BankA: Expander,
        BankB: Expander,
{
    bank_a: BankA,
    bank_b: BankB,
}

impl<BankA, BankB> Relays<BankA, BankB>
    where
        BankA: Expander,
        BankB: Expander,
{
    pub fn new(bank_a: BankA, bank_b: BankB) -> Self {
        Self { bank_a, bank_b }
    }

    /// Puts every bit of both banks in output mode and switches all relays off.
    pub fn init(&mut self) -> Result<(), Error> {
        for bit in Bit::all() {
            self.bank_a.pin_mode(bit, PinMode::Output).map_err(|_| Error::Expander)?;
            self.bank_b.pin_mode(bit, PinMode::Output).map_err(|_| Error::Expander)?;
            self.bank_a.digital_write(bit, Level::High).map_err(|_| Error::Expander)?;
            self.bank_b.digital_write(bit, Level::High).map_err(|_| Error::Expander)?;
        }
        Ok(())
    }

    pub fn set(&mut self, relay: RelayId, switch: Switch) -> Result<(), Error> {
        let (bank, bit) = relay.location();
        let written = match bank {
            OutputBank::A => self.bank_a.digital_write(bit, switch.level()).map_err(|_| Error::Expander),
            OutputBank::B => self.bank_b.digital_write(bit, switch.level()).map_err(|_| Error::Expander),
        };
        written?;

        log::info!(
            "relay {} {} (bank {:?} bit {})",
            relay.number(),
            if switch == Switch::On { "on" } else { "off" },
            bank,
            bit.index()
        );
        Ok(())
    }
}
