use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use nb::block;

use crate::config::Resolution;
use crate::error::Error;
use crate::protocol::Response;

/// One fixed analog channel (CHA1 on the reference board), reported as raw counts.
pub struct Sampler<Adc, Unit, Pin>
    where
        Adc: OneShot<Unit, u16, Pin>,
        Pin: Channel<Unit>,
{
    adc: Adc,
    pin: Pin,
    resolution: Resolution,
    _unit: PhantomData<Unit>,
}

impl<Adc, Unit, Pin> Sampler<Adc, Unit, Pin>
    where
        Adc: OneShot<Unit, u16, Pin>,
        Pin: Channel<Unit>,
{
    pub fn new(adc: Adc, pin: Pin, resolution: Resolution) -> Self {
        Self {
            adc,
            pin,
            resolution,
            _unit: PhantomData,
        }
    }

    /// Blocks until the conversion finishes. No scaling is applied; counts
    /// above the configured resolution are clamped so the reply stays 4 digits.
    pub fn sample(&mut self) -> Result<Response, Error> {
        let raw: u16 = block!(self.adc.read(&mut self.pin)).map_err(|_| Error::Analog)?;
        let raw = raw.min(self.resolution.max());
        log::info!("ADC sample on CHA1: {:04}", raw);
        Ok(Response::Analog(raw))
    }
}
