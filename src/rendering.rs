//! Two-line text layout for the character display.

use core::convert::Infallible;
use core::fmt::Write as _;

use chrono::NaiveDateTime;
use heapless::{String, Vec};
use ufmt::uWrite;

use crate::config::{DEGREE_CHAR, LCD_COLUMNS};
use crate::datetime::write_time;

/// A 16x2 character display.
pub trait CharacterDisplay {
    type Error;

    /// Writes raw character codes starting at (`col`, `row`).
    fn write_at(&mut self, col: u8, row: u8, codes: &[u8]) -> Result<(), Self::Error>;
}

/// One display row: at most [`LCD_COLUMNS`] HD44780 character codes.
///
/// Text written past the last column is dropped. `°` maps to the LCD's
/// degree glyph, anything else outside printable ASCII becomes `?`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LcdLine {
    codes: Vec<u8, LCD_COLUMNS>,
}

impl LcdLine {
    pub fn new() -> Self {
        Self { codes: Vec::new() }
    }

    pub fn from_text(text: &str) -> Self {
        let mut line = Self::new();
        line.push_str(text);
        line
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    /// The row as it appears on the glass, blank-filled to full width.
    pub fn padded(&self) -> [u8; LCD_COLUMNS] {
        let mut row = [b' '; LCD_COLUMNS];
        row[..self.codes.len()].copy_from_slice(&self.codes);
        row
    }

    /// Readable copy of the line, with the degree glyph shown as `°`.
    pub fn text(&self) -> String<{ LCD_COLUMNS * 2 }> {
        let mut text = String::new();
        for &code in self.codes.iter() {
            let c = if code == DEGREE_CHAR { '°' } else { code as char };
            // Capacity covers a full line of two-byte glyphs
            let _ = text.push(c);
        }
        text
    }

    fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            let code = match c {
                '°' => DEGREE_CHAR,
                ' '..='~' => c as u8,
                _ => b'?',
            };
            if self.codes.push(code).is_err() {
                break;
            }
        }
    }
}

impl core::fmt::Write for LcdLine {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl uWrite for LcdLine {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.push_str(s);
        Ok(())
    }
}

/// `Temp: ` followed by the temperature in a 5 wide field with 2 decimals,
/// a degree sign and `C`
/// param temperature: °C
/// param line: line to overwrite
pub fn format_temperature_line(temperature: f32, line: &mut LcdLine) {
    line.clear();
    let _ = write!(line, "Temp: {:5.2}°C", temperature);
}

/// `HH:MM:SS`
/// param time: clock reading
/// param line: line to overwrite
pub fn format_time_line(time: &NaiveDateTime, line: &mut LcdLine) {
    line.clear();
    let _ = write_time(line, time);
}

/// Placeholder shown while the clock cannot be read.
pub fn format_unknown_time_line(line: &mut LcdLine) {
    line.clear();
    line.push_str("--:--:--");
}

/// Writes a line at the start of `row`, blanking the rest of the row
/// param display: LCD instance
/// param row: 0 for the top line
/// param line: the line to show
pub fn render_line<D: CharacterDisplay>(
    display: &mut D,
    row: u8,
    line: &LcdLine,
) -> Result<(), D::Error> {
    display.write_at(0, row, &line.padded())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_line() {
        let mut line = LcdLine::new();
        format_temperature_line(24.5, &mut line);
        assert_eq!(line.text().as_str(), "Temp: 24.50°C");
        assert_eq!(line.len(), 13);
        assert_eq!(line.codes()[11], DEGREE_CHAR);
    }

    #[test]
    fn test_temperature_line_pads_narrow_values() {
        let mut line = LcdLine::new();
        format_temperature_line(0.0, &mut line);
        assert_eq!(line.text().as_str(), "Temp:  0.00°C");
        format_temperature_line(-5.25, &mut line);
        assert_eq!(line.text().as_str(), "Temp: -5.25°C");
    }

    #[test]
    fn test_line_never_exceeds_columns() {
        let mut line = LcdLine::new();
        for temp in [-1000.0, -40.0, 0.0, 9.99, 99.99, 123.456, 12345.678, f32::MAX] {
            format_temperature_line(temp, &mut line);
            assert!(line.len() <= LCD_COLUMNS, "{temp} gave {}", line.len());
        }
        format_temperature_line(12345.678, &mut line);
        assert_eq!(line.text().as_str(), "Temp: 12345.68°C");
        format_temperature_line(123456.0, &mut line);
        assert_eq!(line.text().as_str(), "Temp: 123456.00°");
    }

    #[test]
    fn test_time_line() {
        let mut line = LcdLine::new();
        let time = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 3, 7)
            .unwrap();
        format_time_line(&time, &mut line);
        assert_eq!(line.text().as_str(), "09:03:07");
        format_unknown_time_line(&mut line);
        assert_eq!(line.text().as_str(), "--:--:--");
    }

    #[test]
    fn test_unknown_glyphs_become_question_marks() {
        let line = LcdLine::from_text("a\u{e9}b\tc");
        assert_eq!(line.text().as_str(), "a?b?c");
    }

    #[test]
    fn test_padded_row() {
        let line = LcdLine::from_text("12:00:00");
        assert_eq!(&line.padded(), b"12:00:00        ");
    }

    #[test]
    fn test_render_line_writes_full_row() {
        struct Recorder(std::vec::Vec<(u8, u8, std::vec::Vec<u8>)>);

        impl CharacterDisplay for Recorder {
            type Error = Infallible;

            fn write_at(&mut self, col: u8, row: u8, codes: &[u8]) -> Result<(), Infallible> {
                self.0.push((col, row, codes.to_vec()));
                Ok(())
            }
        }

        let mut display = Recorder(std::vec::Vec::new());
        render_line(&mut display, 1, &LcdLine::from_text("Hi")).unwrap();
        assert_eq!(display.0.len(), 1);
        assert_eq!(display.0[0].0, 0);
        assert_eq!(display.0[0].1, 1);
        assert_eq!(display.0[0].2.len(), LCD_COLUMNS);
        assert_eq!(&display.0[0].2[..3], b"Hi ");
    }
}
