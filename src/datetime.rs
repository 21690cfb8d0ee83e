//! Wall-clock helpers on top of `chrono`: the build stamp and `HH:MM:SS`.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use ufmt::{uWrite, uwrite};

/// Why the build stamp could not be turned into a clock setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(all(target_arch = "arm", target_os = "none"), derive(defmt::Format))]
pub enum StampError {
    /// Not in the `Mmm dd yyyy` / `HH:MM:SS` shape, or not a real date
    Malformed,
    /// Outside the 2000..=2099 range of the DS1307 year register
    OutOfRange,
}

/// 2000-01-01 00:00:00, the DS1307 power-on value.
pub fn clock_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Parses the compiler-style build stamp
/// param date: e.g. `"Jan  1 2024"`
/// param time: e.g. `"12:00:00"`
/// returns the stamp as a clock setting
pub fn parse_build_stamp(date: &str, time: &str) -> Result<NaiveDateTime, StampError> {
    let date = NaiveDate::parse_from_str(date, "%b %e %Y").map_err(|_| StampError::Malformed)?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S").map_err(|_| StampError::Malformed)?;
    if !(2000..=2099).contains(&date.year()) {
        return Err(StampError::OutOfRange);
    }
    Ok(date.and_time(time))
}

/// Writes `HH:MM:SS`
/// param f: output buffer
/// param time: clock reading
pub fn write_time<W: uWrite + ?Sized>(f: &mut W, time: &NaiveDateTime) -> Result<(), W::Error> {
    write_padded(f, time.hour())?;
    f.write_char(':')?;
    write_padded(f, time.minute())?;
    f.write_char(':')?;
    write_padded(f, time.second())
}

/// Writes a number below 100 with a leading zero if < 10
/// param f: output buffer
/// param num: number to write
pub fn write_padded<W: uWrite + ?Sized>(f: &mut W, num: u32) -> Result<(), W::Error> {
    if num < 10 {
        f.write_char('0')?;
    }
    uwrite!(f, "{}", num)
}
