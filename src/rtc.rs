//! Battery-backed real-time clock.

use chrono::NaiveDateTime;
use ds1307::{DateTimeAccess, Ds1307};
use embedded_hal::i2c::I2c;

/// Wall-clock time source consulted on every loop iteration.
pub trait ClockSource {
    type Error;

    /// Checks that the clock chip answers on its bus.
    fn probe(&mut self) -> Result<(), Self::Error>;

    /// Whether the oscillator is keeping time.
    fn is_running(&mut self) -> Result<bool, Self::Error>;

    /// Sets the clock and starts it.
    fn adjust(&mut self, time: &NaiveDateTime) -> Result<(), Self::Error>;

    /// Current date and time, read from the chip on every call.
    fn now(&mut self) -> Result<NaiveDateTime, Self::Error>;
}

impl<I2C: I2c> ClockSource for Ds1307<I2C> {
    type Error = ds1307::Error<I2C::Error>;

    fn probe(&mut self) -> Result<(), Self::Error> {
        // Reading the seconds register only succeeds with the chip on the bus
        self.running().map(|_| ())
    }

    fn is_running(&mut self) -> Result<bool, Self::Error> {
        self.running()
    }

    fn adjust(&mut self, time: &NaiveDateTime) -> Result<(), Self::Error> {
        self.set_datetime(time)?;
        self.set_running()
    }

    fn now(&mut self) -> Result<NaiveDateTime, Self::Error> {
        self.datetime()
    }
}
