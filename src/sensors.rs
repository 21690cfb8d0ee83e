//! Temperature sources: the DHT11 and a bench-test ramp.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::Thresholds;

/// A source of temperature readings in Celsius.
pub trait TemperatureSensor {
    type Error;

    /// Blocking read of the current temperature.
    fn read_temperature(&mut self) -> Result<f32, Self::Error>;
}

/// One DHT11 measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(all(target_arch = "arm", target_os = "none"), derive(defmt::Format))]
pub struct Reading {
    pub temperature: f32,
    pub humidity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(all(target_arch = "arm", target_os = "none"), derive(defmt::Format))]
pub enum DhtError<E> {
    /// The line did not change level in time
    Timeout,
    /// Frame checksum does not match its payload
    ChecksumMismatch,
    Pin(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(error: E) -> Self {
        DhtError::Pin(error)
    }
}

/// Start signal: the host holds the line low for at least 18ms
const START_LOW_MS: u32 = 18;
/// Wait after releasing the line before looking for the response
const RELEASE_US: u32 = 40;
/// A bit is 1 when the line is still high this long after its rising edge
const BIT_SAMPLE_US: u32 = 35;
/// Longest level the protocol uses is ~80us
const LEVEL_TIMEOUT_US: u32 = 100;

/// DHT11 driver on an open-drain GPIO.
///
/// The pin must read back the bus level while released, e.g. an
/// `InOutPin` on the RP2040.
pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Releases the line so the sensor sits idle until the first read.
    pub fn new(mut pin: P, delay: D) -> Result<Self, DhtError<P::Error>> {
        pin.set_high()?;
        Ok(Self { pin, delay })
    }

    /// Runs one start-signal / 40 bit transfer
    /// returns the decoded Reading
    pub fn read(&mut self) -> Result<Reading, DhtError<P::Error>> {
        let frame = self.read_frame()?;
        decode(&frame)
    }

    fn read_frame(&mut self) -> Result<[u8; 5], DhtError<P::Error>> {
        self.pin.set_low()?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high()?;
        self.delay.delay_us(RELEASE_US);

        // Response: sensor pulls low ~80us, then high ~80us. It may still be
        // idle (pulled up) when the release delay ends.
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; 5];
        for byte in frame.iter_mut() {
            for _ in 0..8 {
                self.wait_for(true)?;
                self.delay.delay_us(BIT_SAMPLE_US);
                let bit = self.pin.is_high()?;
                *byte = (*byte << 1) | u8::from(bit);
                if bit {
                    self.wait_for(false)?;
                }
            }
        }
        Ok(frame)
    }

    fn wait_for(&mut self, high: bool) -> Result<(), DhtError<P::Error>> {
        for _ in 0..LEVEL_TIMEOUT_US {
            if self.pin.is_high()? == high {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(DhtError::Timeout)
    }
}

impl<P, D> TemperatureSensor for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    type Error = DhtError<P::Error>;

    fn read_temperature(&mut self) -> Result<f32, Self::Error> {
        self.read().map(|r| r.temperature)
    }
}

/// Decodes a 5 byte DHT11 frame
/// param frame: humidity integer, humidity decimal, temperature integer,
/// temperature decimal (bit 7 = below zero, low nibble = tenths), checksum
/// returns Reading, or ChecksumMismatch
pub fn decode<E>(frame: &[u8; 5]) -> Result<Reading, DhtError<E>> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(DhtError::ChecksumMismatch);
    }
    let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x0F) * 0.1;
    let temperature = if frame[3] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };
    Ok(Reading {
        temperature,
        humidity: frame[0],
    })
}

/// Bench-test temperature source: climbs 0.1C per read and falls back to
/// 20C once it is 3C past the upper threshold.
pub struct RampSimulator {
    current: f32,
    ceiling: f32,
}

const RAMP_STEP: f32 = 0.10;
const RAMP_RESTART: f32 = 20.0;

impl RampSimulator {
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            current: 0.0,
            ceiling: f32::from(thresholds.max) + 3.0,
        }
    }

    pub fn starting_at(mut self, temperature: f32) -> Self {
        self.current = temperature;
        self
    }
}

impl TemperatureSensor for RampSimulator {
    type Error = core::convert::Infallible;

    fn read_temperature(&mut self) -> Result<f32, Self::Error> {
        self.current += RAMP_STEP;
        if self.current >= self.ceiling {
            self.current = RAMP_RESTART;
        }
        Ok(self.current)
    }
}
