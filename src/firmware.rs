//! Board bring-up and the `#[entry]` point.

use defmt::{info, warn};
use defmt_rtt as _;
use hd44780_driver::HD44780;
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;

use bsp::entry;
use bsp::hal::{
    clocks::{init_clocks_and_plls, Clock},
    fugit::RateExtU32,
    gpio::{FunctionI2C, Pin, PullUp},
    pac,
    pwm::Slices,
    watchdog::Watchdog,
    Sio, Timer, I2C,
};

use ds1307::Ds1307;
use thermoclock::config::Thresholds;
use thermoclock::datetime::{clock_epoch, parse_build_stamp};
use thermoclock::leds::RgbLed;
use thermoclock::station::Station;

#[cfg(not(feature = "simulate-sensor"))]
use bsp::hal::gpio::InOutPin;
#[cfg(not(feature = "simulate-sensor"))]
use thermoclock::sensors::Dht11;
#[cfg(feature = "simulate-sensor")]
use thermoclock::sensors::RampSimulator;

use crate::hardware::{DefmtLog, Lcd};

#[entry]
fn main() -> ! {
    info!("Thermoclock starting");
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // Microsecond timer: delays for the DHT11 and the loop's millisecond clock
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());

    // Set up DHT11
    let thresholds = Thresholds::default();
    #[cfg(not(feature = "simulate-sensor"))]
    let sensor = {
        let line = InOutPin::new(pins.gpio7.into_pull_up_input());
        let Ok(dht) = Dht11::new(line, timer) else {
            defmt::panic!("DHT11 pin setup failed");
        };
        dht
    };
    #[cfg(feature = "simulate-sensor")]
    let sensor = RampSimulator::new(&thresholds).starting_at(20.0);

    // Set up RGB LED
    let pwm_slices = Slices::new(pac.PWM, &mut pac.RESETS);
    let mut pwm5 = pwm_slices.pwm5;
    pwm5.set_ph_correct();
    pwm5.enable();
    let mut pwm6 = pwm_slices.pwm6;
    pwm6.set_ph_correct();
    pwm6.enable();
    let mut red = pwm5.channel_a;
    red.output_to(pins.gpio10);
    let mut green = pwm5.channel_b;
    green.output_to(pins.gpio11);
    let mut blue = pwm6.channel_a;
    blue.output_to(pins.gpio12);
    let led = RgbLed::new(red, green, blue);

    // Set up LCD1602
    let mut lcd_delay = delay;
    let Ok(lcd) = HD44780::new_4bit(
        pins.gpio0.into_push_pull_output(),
        pins.gpio1.into_push_pull_output(),
        pins.gpio2.into_push_pull_output(),
        pins.gpio3.into_push_pull_output(),
        pins.gpio4.into_push_pull_output(),
        pins.gpio5.into_push_pull_output(),
        &mut lcd_delay,
    ) else {
        defmt::panic!("LCD init failed");
    };
    let Ok(display) = Lcd::new(lcd, lcd_delay) else {
        defmt::panic!("LCD reset failed");
    };

    // Set up DS1307
    let sda: Pin<_, FunctionI2C, PullUp> = pins.gpio8.reconfigure();
    let scl: Pin<_, FunctionI2C, PullUp> = pins.gpio9.reconfigure();
    let i2c = I2C::i2c0(
        pac.I2C0,
        sda,
        scl,
        100.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    let rtc = Ds1307::new(i2c);

    let build_stamp = parse_build_stamp(
        env!("THERMOCLOCK_BUILD_DATE"),
        env!("THERMOCLOCK_BUILD_TIME"),
    )
    .unwrap_or_else(|e| {
        warn!("Unusable build stamp ({}), using 2000-01-01", e);
        clock_epoch()
    });

    let station = Station::new(sensor, rtc, display, led, DefmtLog)
        .with_thresholds(thresholds)
        .start(&build_stamp);

    let mut station = match station {
        Ok(station) => station,
        Err(e) => {
            defmt::error!("Halting: {}", e);
            loop {
                cortex_m::asm::nop();
            }
        }
    };

    info!("Thermoclock ready");

    // Milliseconds since boot, wraps after ~49.7 days
    station.run(|| (timer.get_counter().ticks() / 1_000) as u32)
}
