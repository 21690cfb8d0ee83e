//! Diagnostic records emitted by the control loop.
//!
//! The library only produces [`Event`]s; where they end up is up to the
//! [`Diagnostics`] sink. The firmware logs them with `defmt` over RTT.

/// One line on the diagnostic stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event<'a> {
    /// The real-time clock did not answer at startup
    ClockMissing,
    /// The clock was stopped and is being seeded with the build time
    ClockNotRunning,
    ClockSetFailed,
    /// Reading the time failed, the display shows a placeholder
    ClockReadFailed,
    /// A fresh temperature in °C
    Temperature(f32),
    /// The sensor gave no usable value, the previous one is kept
    SensorReadFailed,
    /// The time line just written to the display
    Time(&'a str),
    LedWriteFailed,
    DisplayWriteFailed,
}

pub trait Diagnostics {
    fn record(&mut self, event: Event<'_>);
}
