use core::convert::TryFrom;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::serial;
use embedded_time::duration::Milliseconds;
use nb::block;

use crate::analog::Sampler;
use crate::config::Config;
use crate::debounce::Timing;
use crate::error::Error;
use crate::expander::Expander;
use crate::ingress::Ingress;
use crate::input::Inputs;
use crate::monitor::Monitor;
use crate::parser;
use crate::protocol::{Command, Request, Response};
use crate::relay::Relays;

/// Single-threaded polling controller for the board.
///
/// Each [`poll`](Controller::poll) drains every byte the transport has ready,
/// dispatching each completed line, then advances the IN16 hold monitor once.
pub struct Controller<'clock, Serial, OutA, OutB, InA, InB, Adc, AdcUnit, AdcPin, Clock, Delay>
    where
        Serial: serial::Read<u8> + serial::Write<u8>,
        OutA: Expander,
        OutB: Expander,
        InA: Expander,
        InB: Expander,
        Adc: OneShot<AdcUnit, u16, AdcPin>,
        AdcPin: Channel<AdcUnit>,
        Clock: embedded_time::Clock<T = u32> + 'clock,
        Delay: DelayMs<u32>,
{
    serial: Serial,
    ingress: Ingress,
    relays: Relays<OutA, OutB>,
    inputs: Inputs<InA>,
    sampler: Sampler<Adc, AdcUnit, AdcPin>,
    monitor: Monitor<InB>,
    clock: &'clock Clock,
    delay: Delay,
    escalation_gap: u32,
}

impl<'clock, Serial, OutA, OutB, InA, InB, Adc, AdcUnit, AdcPin, Clock, Delay>
    Controller<'clock, Serial, OutA, OutB, InA, InB, Adc, AdcUnit, AdcPin, Clock, Delay>
    where
        Serial: serial::Read<u8> + serial::Write<u8>,
        OutA: Expander,
        OutB: Expander,
        InA: Expander,
        InB: Expander,
        Adc: OneShot<AdcUnit, u16, AdcPin>,
        AdcPin: Channel<AdcUnit>,
        Clock: embedded_time::Clock<T = u32> + 'clock,
        Delay: DelayMs<u32>,
{
    /// `outputs` are the relay banks (OUT1-8, OUT9-11), `inputs` the input
    /// banks (IN1-8, IN9-16). The clock must count milliseconds.
    pub fn new(serial: Serial,
               outputs: (OutA, OutB),
               inputs: (InA, InB),
               adc: Adc,
               adc_pin: AdcPin,
               clock: &'clock Clock,
               delay: Delay,
               config: Config,
    ) -> Self {
        Self {
            serial,
            ingress: Ingress::new(),
            relays: Relays::new(outputs.0, outputs.1),
            inputs: Inputs::new(inputs.0),
            sampler: Sampler::new(adc, adc_pin, config.resolution),
            monitor: Monitor::new(inputs.1, Timing::from(&config)),
            clock,
            delay,
            escalation_gap: config.escalation_gap.0,
        }
    }

    /// Configures pin modes and switches every relay off.
    pub fn init(&mut self) -> Result<(), Error> {
        self.relays.init()?;
        self.inputs.init()?;
        self.monitor.init()?;
        log::info!("controller ready, waiting for RS485 commands");
        Ok(())
    }

    pub fn run(&mut self) -> ! {
        loop {
            if let Err(e) = self.poll() {
                log::warn!("poll failed: {:?}", e);
            }
        }
    }

    pub fn poll(&mut self) -> Result<(), Error> {
        let drained = self.drain();
        let watched = self.watch();
        drained.and(watched)
    }

    fn drain(&mut self) -> Result<(), Error> {
        loop {
            match self.serial.read() {
                Ok(byte) => {
                    if let Some(command) = self.ingress.feed(byte) {
                        if let Err(e) = self.dispatch(&command) {
                            log::warn!("command {} failed: {:?}", command.as_str(), e);
                        }
                    }
                }
                Err(nb::Error::WouldBlock) => return Ok(()),
                Err(nb::Error::Other(_)) => return Err(Error::Transport),
            }
        }
    }

    fn watch(&mut self) -> Result<(), Error> {
        let now = self.now()?;
        if self.monitor.poll(now)?.is_some() {
            if let Err(e) = self.escalate() {
                self.monitor.rearm();
                return Err(e);
            }
        }
        Ok(())
    }

    pub fn dispatch(&mut self, command: &Command) -> Result<(), Error> {
        log::info!("received command: {}", command.as_str());

        match parser::parse(command.as_str()) {
            Request::HardCheck => {
                log::info!("##hardcheck received");
            }
            Request::SetRelay(relay, switch) => {
                self.relays.set(relay, switch)?;
            }
            Request::ReadInput(input) => {
                log::debug!("checking IN{}", input.number());
                let response = self.inputs.read(input)?;
                self.send(response)?;
            }
            Request::SampleAnalog => {
                log::debug!("starting ADC sample");
                let response = self.sampler.sample()?;
                self.send(response)?;
            }
            Request::InvalidRelay(rejection) => {
                log::info!("ignoring relay command: {:?}", rejection);
            }
            Request::InvalidInput(rejection) => {
                log::info!("ignoring input command: {:?}", rejection);
            }
            Request::Unknown => {
                log::info!("unknown command or invalid format");
            }
        }
        Ok(())
    }

    // The gap stalls the whole loop, transport intake included.
    fn escalate(&mut self) -> Result<(), Error> {
        self.send(Response::Blank)?;
        self.delay.delay_ms(self.escalation_gap);
        self.send(Response::HardCheck)?;
        log::info!("##hardcheck sent (IN16 held stable)");
        Ok(())
    }

    fn send(&mut self, response: Response) -> Result<(), Error> {
        for byte in response.render().as_bytes() {
            block!(self.serial.write(*byte)).map_err(|_| Error::Transport)?;
        }
        Ok(())
    }

    fn now(&self) -> Result<u32, Error> {
        let instant = self.clock.try_now().map_err(|_| Error::Clock)?;
        let elapsed = Milliseconds::<u32>::try_from(instant.duration_since_epoch())
            .map_err(|_| Error::Clock)?;
        Ok(elapsed.0)
    }
}
