//! Board Support Crate for the pattern blinker board (ATmega328P, Arduino Uno pinout).
//!
//! This crate provides register-level abstractions for the hardware of the board: volatile
//! register handles, GPIO pin descriptors, timer descriptors and a few byte-range primitives.
//! Serial output goes through the HAL's USART on `D0`/`D1`.  The pins are named by what is
//! printed on the PCB instead of the MCU names.
//!
//! Everything except the peripheral constructors compiles on the host, where registers can be
//! backed by ordinary memory with [`Reg::from_mut`].
//!
//! # Getting Started
//! A rough skeleton for an application looks like this:
//!
//! ```ignore
//! #![no_std]
//! #![no_main]
//!
//! // Pull in the panic handler from panic-halt
//! extern crate panic_halt;
//!
//! use pattern_blinker_board::prelude::*;
//!
//! #[pattern_blinker_board::entry]
//! fn main() -> ! {
//!     // Get the peripheral singletons for interacting with them.
//!     let dp = pattern_blinker_board::Peripherals::take().unwrap();
//!     let pins = pattern_blinker_board::Pins::new(arduino_hal::pins!(dp));
//!
//!     let mut led = pins.d13.into_output();
//!     loop {
//!         led.toggle();
//!         pattern_blinker_board::delay_ms(500);
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

#[macro_use]
extern crate bitflags;

pub mod gpio;
pub mod mem;
mod pins;
pub mod register;
pub mod timer;

pub use crate::gpio::GpioPin;
pub use crate::pins::*;
pub use crate::register::{Level, Reg, RegisterWidth};

// Expose hal & pac crates
#[cfg(target_arch = "avr")]
pub use arduino_hal as hal;
#[cfg(target_arch = "avr")]
pub use arduino_hal::pac;

/// See [`avr_device::entry`](https://docs.rs/avr-device/latest/avr_device/attr.entry.html).
#[cfg(target_arch = "avr")]
pub use arduino_hal::entry;

#[cfg(target_arch = "avr")]
pub use crate::pac::Peripherals;

/// system clock of the board
pub const CPU_FREQUENCY_HZ: u32 = 16_000_000;

pub mod prelude {
    pub use embedded_hal::blocking::delay::DelayMs as _;
    pub use embedded_hal::digital::v2::InputPin as _;
    pub use embedded_hal::digital::v2::OutputPin as _;
    pub use embedded_hal::digital::v2::StatefulOutputPin as _;
    pub use embedded_hal::digital::v2::ToggleableOutputPin as _;
}

/// Busy-Delay
///
/// **Note**: For just delaying, using [`pattern_blinker_board::delay_ms()`][delay_ms] is probably
/// the better choice.  This type is more useful when an `embedded-hal` driver needs a delay
/// implementation.
///
/// [delay_ms]: fn.delay_ms.html
#[cfg(target_arch = "avr")]
pub type Delay = arduino_hal::Delay;

/// Wait (busy spin) for `ms` milliseconds
#[cfg(target_arch = "avr")]
pub fn delay_ms(ms: u16) {
    use prelude::*;

    Delay::new().delay_ms(ms)
}
