//! RP2040 side of the library traits.

use cortex_m::delay::Delay;
use defmt::{error, info, warn};
use hd44780_driver::bus::DataBus;
use hd44780_driver::error::Error as LcdError;
use hd44780_driver::{Cursor, CursorBlink, Display, DisplayMode, HD44780};

use thermoclock::diagnostics::{Diagnostics, Event};
use thermoclock::rendering::CharacterDisplay;

/// DDRAM address of the first column on the second row
const ROW_OFFSET: u8 = 0x40;

/// HD44780 16x2 in 4-bit mode.
pub struct Lcd<B: DataBus> {
    lcd: HD44780<B>,
    delay: Delay,
}

impl<B: DataBus> Lcd<B> {
    /// Resets the controller and turns the display on, cursor hidden.
    pub fn new(mut lcd: HD44780<B>, mut delay: Delay) -> Result<Self, LcdError> {
        lcd.reset(&mut delay)?;
        lcd.clear(&mut delay)?;
        lcd.set_display_mode(
            DisplayMode {
                display: Display::On,
                cursor_visibility: Cursor::Invisible,
                cursor_blink: CursorBlink::Off,
            },
            &mut delay,
        )?;
        Ok(Self { lcd, delay })
    }
}

impl<B: DataBus> CharacterDisplay for Lcd<B> {
    type Error = LcdError;

    fn write_at(&mut self, col: u8, row: u8, codes: &[u8]) -> Result<(), Self::Error> {
        self.lcd
            .set_cursor_pos(row * ROW_OFFSET + col, &mut self.delay)?;
        self.lcd.write_bytes(codes, &mut self.delay)
    }
}

/// Sends diagnostic records to the debug probe over RTT.
pub struct DefmtLog;

impl Diagnostics for DefmtLog {
    fn record(&mut self, event: Event<'_>) {
        match event {
            Event::ClockMissing => error!("Couldn't find RTC"),
            Event::ClockNotRunning => warn!("RTC is not running, setting build time"),
            Event::ClockSetFailed => error!("Failed to set RTC"),
            Event::ClockReadFailed => warn!("Failed to read RTC"),
            Event::Temperature(celsius) => info!("Temperature: {=f32} C", celsius),
            Event::SensorReadFailed => warn!("Failed to read from DHT sensor!"),
            Event::Time(line) => info!("{=str}", line),
            Event::LedWriteFailed => warn!("Failed to set LED duty"),
            Event::DisplayWriteFailed => warn!("Failed to write to LCD"),
        }
    }
}
