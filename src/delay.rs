use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::timer::CountDown;
use embedded_time::duration::Milliseconds;
use nb::block;

/// Blocking millisecond pause on a spare hardware count-down timer.
///
/// Boards whose HAL offers a timer but no `DelayMs` can hand the controller
/// one of these for the escalation gap.
pub struct CountDownDelay<Timer>
    where
        Timer: CountDown,
        Timer::Time: From<Milliseconds>,
{
    timer: Timer,
}

impl<Timer> CountDownDelay<Timer>
    where
        Timer: CountDown,
        Timer::Time: From<Milliseconds>,
{
    pub fn new(timer: Timer) -> Self {
        Self { timer }
    }

    /// Gives the timer back.
    pub fn free(self) -> Timer {
        self.timer
    }

    fn pause(&mut self, ms: u32) {
        // a zero-length count-down never starts on some HALs
        if ms == 0 {
            return;
        }
        self.timer.start(Milliseconds(ms));
        let _ = block!(self.timer.wait());
    }
}

impl<Timer> DelayMs<u32> for CountDownDelay<Timer>
    where
        Timer: CountDown,
        Timer::Time: From<Milliseconds>,
{
    fn delay_ms(&mut self, ms: u32) {
        self.pause(ms);
    }
}

impl<Timer> DelayMs<u16> for CountDownDelay<Timer>
    where
        Timer: CountDown,
        Timer::Time: From<Milliseconds>,
{
    fn delay_ms(&mut self, ms: u16) {
        self.pause(u32::from(ms));
    }
}
