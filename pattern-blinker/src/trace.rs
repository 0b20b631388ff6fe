//! utility functions for debug traces over a serial port

use crate::blink::{BlinkConfig, Tick};
use ufmt::uWrite;

const HEX_CHARS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
];

pub fn send_hex_byte<W: uWrite>(serial: &mut W, b: u8) -> Result<(), W::Error> {
    ufmt::uwrite!(
        serial,
        "{}{}",
        HEX_CHARS[((b & 0xF0) >> 4) as usize],
        HEX_CHARS[(b & 0xF) as usize]
    )
}

pub fn send_u16<W: uWrite>(serial: &mut W, n: u16) -> Result<(), W::Error> {
    send_hex_byte(serial, ((n & 0xFF00) >> 8) as u8)?;
    send_hex_byte(serial, (n & 0xFF) as u8)
}

/// banner written once after reset
pub fn trace_start<W: uWrite>(serial: &mut W, config: &BlinkConfig) -> Result<(), W::Error> {
    ufmt::uwrite!(serial, "pattern-blinker: pattern=0x")?;
    send_hex_byte(serial, config.initial_pattern)?;
    ufmt::uwrite!(
        serial,
        " speed={}ms debounce={}ms\r\n",
        config.speed_ms,
        config.debounce_ms
    )
}

/// one line per confirmed press, quiet otherwise
pub fn trace_tick<W: uWrite>(serial: &mut W, tick: &Tick) -> Result<(), W::Error> {
    if !tick.pressed {
        return Ok(());
    }
    ufmt::uwrite!(serial, "press: pattern=0x")?;
    send_hex_byte(serial, tick.pattern)?;
    ufmt::uwrite!(serial, " at bit {} ({})\r\n", tick.position, tick.lit)
}
