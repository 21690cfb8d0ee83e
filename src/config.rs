//! Compile-time configuration.
//!
//! There is no runtime configuration surface: thresholds, geometry and the
//! poll interval are all fixed when the firmware is built.

/// Columns on the character display.
pub const LCD_COLUMNS: usize = 16;

/// Rows on the character display.
pub const LCD_ROWS: u8 = 2;

/// HD44780 (ROM A00) character code for the degree sign.
pub const DEGREE_CHAR: u8 = 0xDF;

/// Reference temperatures (°C) for the LED colour.
/// At or below `min` the LED is fully blue, above `max` fully red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(all(target_arch = "arm", target_os = "none"), derive(defmt::Format))]
pub struct Thresholds {
    pub min: i16,
    pub max: i16,
}

impl Thresholds {
    pub const fn new(min: i16, max: i16) -> Self {
        Self { min, max }
    }

    /// Width of the interpolation band in °C.
    pub fn span(&self) -> f32 {
        f32::from(self.max) - f32::from(self.min)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        // Ideal room range is 22C - 27C
        Self::new(22, 27)
    }
}
