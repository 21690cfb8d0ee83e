//! Temperature to colour mapping and the RGB LED it drives.

use embedded_hal::pwm::SetDutyCycle;

use crate::config::Thresholds;

pub const MAX_DUTY: u8 = 255;

/// Duty values for the three LED channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(all(target_arch = "arm", target_os = "none"), derive(defmt::Format))]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0, 0, MAX_DUTY);
    pub const RED: Rgb = Rgb::new(MAX_DUTY, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Maps a temperature onto a blue-to-red blend.
///
/// Below `min` the LED is fully blue, above `max` fully red, in between red
/// grows linearly and blue takes the remainder. Green is never lit.
/// param temperature: °C
/// param thresholds: blue and red reference points
/// returns Rgb duty values
pub fn temperature_to_rgb(temperature: f32, thresholds: &Thresholds) -> Rgb {
    if temperature < f32::from(thresholds.min) {
        return Rgb::BLUE;
    }
    if temperature > f32::from(thresholds.max) {
        return Rgb::RED;
    }
    let fraction = (temperature - f32::from(thresholds.min)) / thresholds.span();
    let red = libm::roundf(fraction * f32::from(MAX_DUTY)).clamp(0.0, f32::from(MAX_DUTY)) as u8;
    Rgb::new(red, 0, MAX_DUTY - red)
}

/// Something that can show a colour.
pub trait LedOutput {
    type Error;

    fn show(&mut self, color: Rgb) -> Result<(), Self::Error>;
}

/// Common-cathode RGB LED on three PWM channels.
pub struct RgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle<Error = R::Error>,
    B: SetDutyCycle<Error = R::Error>,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }

    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}

impl<R, G, B> LedOutput for RgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle<Error = R::Error>,
    B: SetDutyCycle<Error = R::Error>,
{
    type Error = R::Error;

    fn show(&mut self, color: Rgb) -> Result<(), Self::Error> {
        let max = u16::from(MAX_DUTY);
        self.red.set_duty_cycle_fraction(u16::from(color.red), max)?;
        self.green.set_duty_cycle_fraction(u16::from(color.green), max)?;
        self.blue.set_duty_cycle_fraction(u16::from(color.blue), max)
    }
}
