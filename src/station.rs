//! The control loop tying sensor, LED, clock and display together.

use chrono::NaiveDateTime;

use crate::config::{Thresholds, LCD_ROWS};
use crate::diagnostics::{Diagnostics, Event};
use crate::leds::{temperature_to_rgb, LedOutput, Rgb};
use crate::rendering::{
    format_temperature_line, format_time_line, format_unknown_time_line, render_line,
    CharacterDisplay, LcdLine,
};
use crate::rtc::ClockSource;
use crate::sensors::TemperatureSensor;
use crate::timer::IntervalTimer;

/// Startup conditions the firmware cannot run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(all(target_arch = "arm", target_os = "none"), derive(defmt::Format))]
pub enum StartupError {
    /// No real-time clock answered on the bus
    ClockNotFound,
}

/// Result of one sensor poll.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(all(target_arch = "arm", target_os = "none"), derive(defmt::Format))]
pub enum ReadOutcome {
    Updated(f32),
    /// Nothing usable came back, the previous temperature stays
    Failed,
}

/// All state of the thermometer, owned by the entry point.
pub struct Station<S, C, D, L, G> {
    sensor: S,
    clock: C,
    display: D,
    led: L,
    diagnostics: G,
    thresholds: Thresholds,
    temperature: f32,
    color: Rgb,
    read_timer: IntervalTimer,
    lines: [LcdLine; LCD_ROWS as usize],
}

impl<S, C, D, L, G> Station<S, C, D, L, G>
where
    S: TemperatureSensor,
    C: ClockSource,
    D: CharacterDisplay,
    L: LedOutput,
    G: Diagnostics,
{
    pub fn new(sensor: S, clock: C, display: D, led: L, diagnostics: G) -> Self {
        Self {
            sensor,
            clock,
            display,
            led,
            diagnostics,
            thresholds: Thresholds::default(),
            temperature: 0.0,
            color: Rgb::default(),
            read_timer: IntervalTimer::default(),
            lines: [LcdLine::new(), LcdLine::new()],
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Brings up the display and the clock.
    ///
    /// A clock that does not answer is fatal. A clock that answers but is
    /// stopped gets `build_stamp` once and is started.
    pub fn start(mut self, build_stamp: &NaiveDateTime) -> Result<Self, StartupError> {
        self.lines[0] = LcdLine::from_text("Temp: ");
        if render_line(&mut self.display, 0, &self.lines[0]).is_err() {
            self.diagnostics.record(Event::DisplayWriteFailed);
        }

        if self.clock.probe().is_err() {
            self.diagnostics.record(Event::ClockMissing);
            return Err(StartupError::ClockNotFound);
        }

        match self.clock.is_running() {
            Ok(true) => {}
            Ok(false) => {
                self.diagnostics.record(Event::ClockNotRunning);
                if self.clock.adjust(build_stamp).is_err() {
                    self.diagnostics.record(Event::ClockSetFailed);
                }
            }
            Err(_) => self.diagnostics.record(Event::ClockReadFailed),
        }

        Ok(self)
    }

    /// One pass of the busy loop at `now_ms` milliseconds since boot.
    ///
    /// Polls the sensor and recolours the LED when the read interval has
    /// passed, then refreshes the display regardless.
    pub fn tick(&mut self, now_ms: u32) -> Option<ReadOutcome> {
        let mut outcome = None;
        if self.read_timer.is_due(now_ms) {
            outcome = Some(self.poll_sensor());
            self.update_led();
            // Failed reads also count, a dead sensor is not hammered
            self.read_timer.reset(now_ms);
        }
        self.refresh_display();
        outcome
    }

    /// Runs the loop forever on a millisecond counter.
    pub fn run<F: FnMut() -> u32>(&mut self, mut millis: F) -> ! {
        loop {
            self.tick(millis());
        }
    }

    fn poll_sensor(&mut self) -> ReadOutcome {
        match self.sensor.read_temperature() {
            Ok(temperature) if !temperature.is_nan() => {
                self.temperature = temperature;
                self.diagnostics.record(Event::Temperature(temperature));
                ReadOutcome::Updated(temperature)
            }
            _ => {
                self.diagnostics.record(Event::SensorReadFailed);
                ReadOutcome::Failed
            }
        }
    }

    fn update_led(&mut self) {
        self.color = temperature_to_rgb(self.temperature, &self.thresholds);
        if self.led.show(self.color).is_err() {
            self.diagnostics.record(Event::LedWriteFailed);
        }
    }

    fn refresh_display(&mut self) {
        let [temperature_line, time_line] = &mut self.lines;
        format_temperature_line(self.temperature, temperature_line);
        match self.clock.now() {
            Ok(now) => format_time_line(&now, time_line),
            Err(_) => {
                self.diagnostics.record(Event::ClockReadFailed);
                format_unknown_time_line(time_line);
            }
        }
        self.diagnostics.record(Event::Time(time_line.text().as_str()));

        for (row, line) in (0u8..).zip(self.lines.iter()) {
            if render_line(&mut self.display, row, line).is_err() {
                self.diagnostics.record(Event::DisplayWriteFailed);
            }
        }
    }

    /// Last good temperature in °C (0 until the first successful read).
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Time of the last read attempt, successful or not.
    pub fn last_read_ms(&self) -> u32 {
        self.read_timer.last()
    }

    pub fn lines(&self) -> &[LcdLine] {
        &self.lines
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn led(&self) -> &L {
        &self.led
    }

    pub fn diagnostics(&self) -> &G {
        &self.diagnostics
    }
}
