//! Fakes for the hardware capabilities, shared by the unit tests.

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::serial;
use embedded_hal::timer::CountDown;
use embedded_time::duration::Milliseconds;
use embedded_time::{clock, fraction::Fraction, Clock, Instant};
use void::Void;

use crate::expander::{Bit, Expander, Level, PinMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

pub struct Pins {
    pub levels: [Level; 8],
    pub modes: [Option<PinMode>; 8],
    pub writes: Vec<(u8, Level)>,
    pub reads: usize,
    pub failing: bool,
}

/// Expander bank whose state stays visible to the test after the bank is moved.
#[derive(Clone)]
pub struct FakeExpander {
    pins: Rc<RefCell<Pins>>,
}

impl FakeExpander {
    pub fn new() -> Self {
        FakeExpander {
            pins: Rc::new(RefCell::new(Pins {
                levels: [Level::High; 8],
                modes: [None; 8],
                writes: Vec::new(),
                reads: 0,
                failing: false,
            })),
        }
    }

    pub fn level(&self, bit: u8) -> Level {
        self.pins.borrow().levels[bit as usize]
    }

    pub fn set_level(&self, bit: u8, level: Level) {
        self.pins.borrow_mut().levels[bit as usize] = level;
    }

    pub fn mode(&self, bit: u8) -> Option<PinMode> {
        self.pins.borrow().modes[bit as usize]
    }

    pub fn writes(&self) -> Vec<(u8, Level)> {
        self.pins.borrow().writes.clone()
    }

    pub fn reads(&self) -> usize {
        self.pins.borrow().reads
    }

    pub fn fail(&self) {
        self.pins.borrow_mut().failing = true;
    }
}

impl Expander for FakeExpander {
    type Error = FakeError;

    fn pin_mode(&mut self, bit: Bit, mode: PinMode) -> Result<(), FakeError> {
        let mut pins = self.pins.borrow_mut();
        if pins.failing {
            return Err(FakeError);
        }
        pins.modes[bit.index() as usize] = Some(mode);
        Ok(())
    }

    fn digital_read(&mut self, bit: Bit) -> Result<Level, FakeError> {
        let mut pins = self.pins.borrow_mut();
        if pins.failing {
            return Err(FakeError);
        }
        pins.reads += 1;
        Ok(pins.levels[bit.index() as usize])
    }

    fn digital_write(&mut self, bit: Bit, level: Level) -> Result<(), FakeError> {
        let mut pins = self.pins.borrow_mut();
        if pins.failing {
            return Err(FakeError);
        }
        pins.levels[bit.index() as usize] = level;
        pins.writes.push((bit.index(), level));
        Ok(())
    }
}

pub struct FakeAdcUnit;

pub struct FakeChannel;

impl Channel<FakeAdcUnit> for FakeChannel {
    type ID = u8;

    fn channel() -> u8 {
        0
    }
}

struct Conversion {
    value: u16,
    busy: bool,
    failing: bool,
}

/// ADC that answers `WouldBlock` once before every sample.
#[derive(Clone)]
pub struct FakeAdc {
    conversion: Rc<RefCell<Conversion>>,
}

impl FakeAdc {
    pub fn new(value: u16) -> Self {
        FakeAdc {
            conversion: Rc::new(RefCell::new(Conversion {
                value,
                busy: true,
                failing: false,
            })),
        }
    }

    pub fn set(&self, value: u16) {
        self.conversion.borrow_mut().value = value;
    }

    pub fn fail(&self) {
        self.conversion.borrow_mut().failing = true;
    }
}

impl OneShot<FakeAdcUnit, u16, FakeChannel> for FakeAdc {
    type Error = FakeError;

    fn read(&mut self, _pin: &mut FakeChannel) -> nb::Result<u16, FakeError> {
        let mut conversion = self.conversion.borrow_mut();
        if conversion.failing {
            return Err(nb::Error::Other(FakeError));
        }
        if conversion.busy {
            conversion.busy = false;
            return Err(nb::Error::WouldBlock);
        }
        conversion.busy = true;
        Ok(conversion.value)
    }
}

/// Millisecond clock moved by hand.
pub struct MockClock {
    ticks: Cell<u32>,
}

impl MockClock {
    pub fn new(ms: u32) -> Self {
        MockClock {
            ticks: Cell::new(ms),
        }
    }

    pub fn set(&self, ms: u32) {
        self.ticks.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.ticks.set(self.ticks.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        Ok(Instant::new(self.ticks.get()))
    }
}

struct Wire {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    failing_writes: bool,
}

/// Serial port with a queue of pending inbound bytes and a record of everything written.
#[derive(Clone)]
pub struct FakeSerial {
    wire: Rc<RefCell<Wire>>,
}

impl FakeSerial {
    pub fn new() -> Self {
        FakeSerial {
            wire: Rc::new(RefCell::new(Wire {
                rx: VecDeque::new(),
                tx: Vec::new(),
                failing_writes: false,
            })),
        }
    }

    pub fn receive(&self, bytes: &[u8]) {
        self.wire.borrow_mut().rx.extend(bytes.iter().copied());
    }

    pub fn sent(&self) -> Vec<u8> {
        self.wire.borrow().tx.clone()
    }

    pub fn fail_writes(&self, failing: bool) {
        self.wire.borrow_mut().failing_writes = failing;
    }

    pub fn take_sent(&self) -> Vec<u8> {
        core::mem::take(&mut self.wire.borrow_mut().tx)
    }
}

impl serial::Read<u8> for FakeSerial {
    type Error = FakeError;

    fn read(&mut self) -> nb::Result<u8, FakeError> {
        self.wire
            .borrow_mut()
            .rx
            .pop_front()
            .ok_or(nb::Error::WouldBlock)
    }
}

impl serial::Write<u8> for FakeSerial {
    type Error = FakeError;

    fn write(&mut self, word: u8) -> nb::Result<(), FakeError> {
        let mut wire = self.wire.borrow_mut();
        if wire.failing_writes {
            return Err(nb::Error::Other(FakeError));
        }
        wire.tx.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), FakeError> {
        Ok(())
    }
}

struct Countdown {
    started: Vec<(u32, usize)>,
    remaining: u8,
    polls: usize,
}

/// Count-down timer that expires on the fourth `wait`. Each start is logged with
/// the number of bytes the watched serial port had sent at that moment.
#[derive(Clone)]
pub struct FakeTimer {
    countdown: Rc<RefCell<Countdown>>,
    serial: Option<FakeSerial>,
}

impl FakeTimer {
    pub fn new() -> Self {
        FakeTimer {
            countdown: Rc::new(RefCell::new(Countdown {
                started: Vec::new(),
                remaining: 0,
                polls: 0,
            })),
            serial: None,
        }
    }

    pub fn watching(serial: FakeSerial) -> Self {
        FakeTimer {
            serial: Some(serial),
            ..FakeTimer::new()
        }
    }

    pub fn started(&self) -> Vec<(u32, usize)> {
        self.countdown.borrow().started.clone()
    }

    pub fn polls(&self) -> usize {
        self.countdown.borrow().polls
    }
}

impl CountDown for FakeTimer {
    type Time = Milliseconds;

    fn start<T>(&mut self, count: T)
        where
            T: Into<Self::Time>,
    {
        let count: Milliseconds = count.into();
        let sent = self.serial.as_ref().map(|s| s.sent().len()).unwrap_or(0);
        let mut countdown = self.countdown.borrow_mut();
        countdown.started.push((count.0, sent));
        countdown.remaining = 3;
    }

    fn wait(&mut self) -> nb::Result<(), Void> {
        let mut countdown = self.countdown.borrow_mut();
        countdown.polls += 1;
        if countdown.remaining == 0 {
            Ok(())
        } else {
            countdown.remaining -= 1;
            Err(nb::Error::WouldBlock)
        }
    }
}
