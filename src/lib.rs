// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]

//! # Thermoclock
//! ## An RGB thermometer and desk clock for the Raspberry Pi Pico
//!
//! Features:
//! - DHT11 temperature polling every 2 seconds
//! - RGB LED blending from blue (cold) to red (warm) between two thresholds
//! - 16x2 character LCD showing temperature and DS1307 clock time
//! - Clock seeded with the build time when found stopped
//!
//! Everything here is hardware independent and runs on the host:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```
//! The binary (`main.rs`) wires the RP2040 peripherals to these traits.

pub mod config;
pub mod datetime;
pub mod diagnostics;
pub mod leds;
pub mod rendering;
pub mod rtc;
pub mod sensors;
pub mod station;
pub mod timer;
