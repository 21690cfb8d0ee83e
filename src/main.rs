//! Thermoclock firmware for the Raspberry Pi Pico.
//!
//! Wiring:
//! - DHT11 data: GPIO7 (10k pull-up)
//! - DS1307: SDA GPIO8, SCL GPIO9 (I2C0)
//! - RGB LED: red GPIO10, green GPIO11, blue GPIO12 (PWM5A, PWM5B, PWM6A)
//! - LCD1602: RS GPIO0, E GPIO1, D4-D7 GPIO2-GPIO5, RW to GND
//!
//! Build with `cargo build --release --target thumbv6m-none-eabi`.

#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_main)]

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod firmware;
#[cfg(all(target_arch = "arm", target_os = "none"))]
mod hardware;

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {
    eprintln!("thermoclock is RP2040 firmware, build it with --target thumbv6m-none-eabi");
    std::process::exit(1);
}
