//! Application logic of the pattern blinker, kept apart from the firmware
//! entry point so it can be exercised on the host.

#![cfg_attr(not(test), no_std)]

pub mod blink;
pub mod trace;

pub use crate::blink::{BlinkConfig, Blinker, Tick};
