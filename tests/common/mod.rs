//! Fake peripherals for driving a `Station` on the host.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use thermoclock::config::LCD_COLUMNS;
use thermoclock::datetime::clock_epoch;
use chrono::{Duration, NaiveDateTime};
use thermoclock::diagnostics::{Diagnostics, Event};
use thermoclock::leds::{LedOutput, Rgb};
use thermoclock::rendering::CharacterDisplay;
use thermoclock::rtc::ClockSource;
use thermoclock::sensors::TemperatureSensor;

/// Milliseconds since boot, shared between the test and the fake clock.
pub type Millis = Rc<Cell<u32>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// Sensor that replays a script of readings; `None` is a failed read.
/// Once the script is exhausted every read fails.
pub struct ScriptedSensor {
    script: VecDeque<Option<f32>>,
    pub reads: usize,
}

impl ScriptedSensor {
    pub fn new(script: &[Option<f32>]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            reads: 0,
        }
    }
}

impl TemperatureSensor for ScriptedSensor {
    type Error = BusError;

    fn read_temperature(&mut self) -> Result<f32, BusError> {
        self.reads += 1;
        self.script.pop_front().flatten().ok_or(BusError)
    }
}

/// DS1307 stand-in that keeps time from the shared millisecond counter.
pub struct FakeClock {
    millis: Millis,
    pub present: bool,
    pub running: bool,
    pub readable: bool,
    /// `is_running` fails on the bus
    pub status_unreadable: bool,
    /// `adjust` fails on the bus
    pub read_only: bool,
    set_at: NaiveDateTime,
    set_at_ms: u32,
    pub adjusted: Vec<NaiveDateTime>,
}

impl FakeClock {
    pub fn running_at(millis: &Millis, time: NaiveDateTime) -> Self {
        Self {
            millis: millis.clone(),
            present: true,
            running: true,
            readable: true,
            status_unreadable: false,
            read_only: false,
            set_at: time,
            set_at_ms: millis.get(),
            adjusted: Vec::new(),
        }
    }

    pub fn stopped(millis: &Millis) -> Self {
        let mut clock = Self::running_at(millis, clock_epoch());
        clock.running = false;
        clock
    }

    pub fn missing(millis: &Millis) -> Self {
        let mut clock = Self::running_at(millis, clock_epoch());
        clock.present = false;
        clock
    }
}

impl ClockSource for FakeClock {
    type Error = BusError;

    fn probe(&mut self) -> Result<(), BusError> {
        if self.present {
            Ok(())
        } else {
            Err(BusError)
        }
    }

    fn is_running(&mut self) -> Result<bool, BusError> {
        if self.status_unreadable {
            return Err(BusError);
        }
        Ok(self.running)
    }

    fn adjust(&mut self, time: &NaiveDateTime) -> Result<(), BusError> {
        if self.read_only {
            return Err(BusError);
        }
        self.adjusted.push(*time);
        self.set_at = *time;
        self.set_at_ms = self.millis.get();
        self.running = true;
        Ok(())
    }

    fn now(&mut self) -> Result<NaiveDateTime, BusError> {
        if !self.readable {
            return Err(BusError);
        }
        if !self.running {
            return Ok(self.set_at);
        }
        let elapsed = self.millis.get().wrapping_sub(self.set_at_ms) / 1000;
        Ok(self.set_at + Duration::seconds(i64::from(elapsed)))
    }
}

/// Character grid that remembers what was written where.
pub struct FakeLcd {
    pub rows: [[u8; LCD_COLUMNS]; 2],
    pub writes: usize,
    /// Every write fails
    pub broken: bool,
}

impl FakeLcd {
    pub fn new() -> Self {
        Self {
            rows: [[b' '; LCD_COLUMNS]; 2],
            writes: 0,
            broken: false,
        }
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::new()
        }
    }

    /// Row content with trailing blanks trimmed and the degree glyph as `°`.
    pub fn row_text(&self, row: usize) -> String {
        let text: String = self.rows[row]
            .iter()
            .map(|&c| if c == 0xDF { '°' } else { c as char })
            .collect();
        text.trim_end().to_string()
    }
}

impl CharacterDisplay for FakeLcd {
    type Error = BusError;

    fn write_at(&mut self, col: u8, row: u8, codes: &[u8]) -> Result<(), BusError> {
        if self.broken {
            return Err(BusError);
        }
        let row = &mut self.rows[row as usize];
        for (cell, code) in row[col as usize..].iter_mut().zip(codes) {
            *cell = *code;
        }
        self.writes += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeLed {
    pub shown: Vec<Rgb>,
}

impl LedOutput for FakeLed {
    type Error = Infallible;

    fn show(&mut self, color: Rgb) -> Result<(), Infallible> {
        self.shown.push(color);
        Ok(())
    }
}

/// Keeps every diagnostic record as its debug text.
#[derive(Default)]
pub struct Recorder {
    pub records: Vec<String>,
}

impl Recorder {
    pub fn count(&self, record: &str) -> usize {
        self.records.iter().filter(|r| r.as_str() == record).count()
    }
}

impl Diagnostics for Recorder {
    fn record(&mut self, event: Event<'_>) {
        self.records.push(format!("{event:?}"));
    }
}
