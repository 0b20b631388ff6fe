//! firmware for the pattern blinker board
//!
//! LED1 on `D3` and LED2 on `D5` show one bit of an 8-bit pattern per step,
//! always in opposite states.  Pressing the button on `D2` (active low,
//! internal pull-up) inverts the pattern.
//!
//! On any other target than AVR only the library is of interest; the binary
//! is an empty stub there.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(all(target_arch = "avr", not(debug_assertions)))]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use pattern_blinker::{BlinkConfig, Blinker};
#[cfg(target_arch = "avr")]
use pattern_blinker_board::{Delay, Pins};

#[cfg(all(target_arch = "avr", debug_assertions, feature = "serial_trace"))]
use pattern_blinker::trace;

//==========================================================

/// Both LEDs on is a state the blink loop never produces, so it marks a
/// panic in debug builds.
#[cfg(all(target_arch = "avr", debug_assertions))]
#[panic_handler]
fn panic(_pi: &core::panic::PanicInfo<'_>) -> ! {
    avr_device::interrupt::disable();
    // SAFETY: nothing else runs after a panic, the aliasing pins are never used again
    let (mut led1, mut led2) = unsafe {
        (
            pattern_blinker_board::PORTD.pin(3),
            pattern_blinker_board::PORTD.pin(5),
        )
    };
    led1.configure_as_output();
    led2.configure_as_output();
    led1.drive_high();
    led2.drive_high();
    loop {}
}

//==========================================================

#[cfg(target_arch = "avr")]
#[pattern_blinker_board::entry]
fn main() -> ! {
    let dp = pattern_blinker_board::Peripherals::take().unwrap();

    let pins = Pins::new(arduino_hal::pins!(dp));
    let led1 = pins.d3.into_output();
    let led2 = pins.d5.into_output();
    let button = pins.d2.into_pull_up_input();

    #[cfg(all(debug_assertions, feature = "serial_trace"))]
    let mut serial = arduino_hal::default_serial!(dp, pins, 57600);
    #[cfg(all(debug_assertions, feature = "serial_trace"))]
    trace::trace_start(&mut serial, &BlinkConfig::DEFAULT).ok();

    let mut blinker = Blinker::new(led1, led2, button, Delay::new(), BlinkConfig::DEFAULT);

    // the board pins cannot fail, so run never returns
    match blinker.run(|_tick| {
        #[cfg(all(debug_assertions, feature = "serial_trace"))]
        trace::trace_tick(&mut serial, _tick).ok();
    }) {
        Ok(never) | Err(never) => match never {},
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {}
