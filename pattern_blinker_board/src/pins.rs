use crate::gpio::GpioPin;
use crate::register::Reg;

#[cfg(target_arch = "avr")]
use arduino_hal::hal::port::{PD0, PD1};
#[cfg(target_arch = "avr")]
use arduino_hal::port::{mode, Pin};

/// Data-space addresses of the three registers of one I/O port.
///
/// The addresses are supplied explicitly instead of being derived from the
/// output register, so a port on a different register map only needs a new
/// constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    /// PINx
    pub input: usize,
    /// DDRx
    pub direction: usize,
    /// PORTx
    pub output: usize,
}

/// ATmega328P port B, `D8`..`D13`
pub const PORTB: Port = Port {
    input: 0x23,
    direction: 0x24,
    output: 0x25,
};

/// ATmega328P port C, `A0`..`A5`
pub const PORTC: Port = Port {
    input: 0x26,
    direction: 0x27,
    output: 0x28,
};

/// ATmega328P port D, `D0`..`D7`
pub const PORTD: Port = Port {
    input: 0x29,
    direction: 0x2A,
    output: 0x2B,
};

impl Port {
    /// Descriptor for line `bit` of this port.
    ///
    /// # Safety
    /// The port addresses must be valid registers on the running device.
    /// Pins of one port alias the same registers; all of them must stay on
    /// one thread of control.
    pub unsafe fn pin(&self, bit: u8) -> GpioPin<'static> {
        GpioPin::new(
            Reg::at(self.output),
            Reg::at(self.direction),
            Reg::at(self.input),
            bit,
        )
    }
}

/// Pins of the board, with the names they have on the PCB
///
/// `D0` and `D1` stay HAL pins, so they can be handed to the HAL's USART
/// (`arduino_hal::default_serial!(dp, pins, 57600)` works on this struct).
#[cfg(target_arch = "avr")]
pub struct Pins {
    /// `A0`
    pub a0: GpioPin<'static>,
    /// `A1`
    pub a1: GpioPin<'static>,
    /// `A2`
    pub a2: GpioPin<'static>,
    /// `A3`
    pub a3: GpioPin<'static>,
    /// `A4`
    ///
    /// * SDA (2-wire serial bus data input/output line)
    pub a4: GpioPin<'static>,
    /// `A5`
    ///
    /// * SCL (2-wire serial bus clock line)
    pub a5: GpioPin<'static>,

    /// `RX/D0`
    pub d0: Pin<mode::Input<mode::Floating>, PD0>,
    /// `TX/D1`
    pub d1: Pin<mode::Input<mode::Floating>, PD1>,
    /// `D2`
    ///
    /// * INT0 (external interrupt 0)
    pub d2: GpioPin<'static>,
    /// `D3`
    ///
    /// * OC2B (timer 2 compare B)
    pub d3: GpioPin<'static>,
    /// `D4`
    pub d4: GpioPin<'static>,
    /// `D5`
    ///
    /// * OC0B (timer 0 compare B)
    pub d5: GpioPin<'static>,
    /// `D6`
    pub d6: GpioPin<'static>,
    /// `D7`
    pub d7: GpioPin<'static>,
    /// `D8`
    pub d8: GpioPin<'static>,
    /// `D9`
    pub d9: GpioPin<'static>,
    /// `D10`
    pub d10: GpioPin<'static>,
    /// `D11/MOSI`
    pub d11: GpioPin<'static>,
    /// `D12/MISO`
    pub d12: GpioPin<'static>,
    /// `D13/SCK/LED`
    pub d13: GpioPin<'static>,
}

#[cfg(target_arch = "avr")]
impl Pins {
    /// Takes over the HAL's pin set (`arduino_hal::pins!(dp)`), so no other
    /// code can claim the lines.
    pub fn new(pins: arduino_hal::Pins) -> Self {
        let arduino_hal::Pins { d0, d1, .. } = pins;
        // SAFETY: the HAL pin set owned the three ports and is gone, except
        // for D0/D1 which are kept as HAL pins
        unsafe {
            Pins {
                a0: PORTC.pin(0),
                a1: PORTC.pin(1),
                a2: PORTC.pin(2),
                a3: PORTC.pin(3),
                a4: PORTC.pin(4),
                a5: PORTC.pin(5),
                d0,
                d1,
                d2: PORTD.pin(2),
                d3: PORTD.pin(3),
                d4: PORTD.pin(4),
                d5: PORTD.pin(5),
                d6: PORTD.pin(6),
                d7: PORTD.pin(7),
                d8: PORTB.pin(0),
                d9: PORTB.pin(1),
                d10: PORTB.pin(2),
                d11: PORTB.pin(3),
                d12: PORTB.pin(4),
                d13: PORTB.pin(5),
            }
        }
    }
}
