//! GPIO pin descriptors on top of the register layer

use crate::register::{Level, Reg};
use core::convert::Infallible;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

/// One GPIO line: output (PORTx), direction (DDRx) and input (PINx)
/// registers of its port, plus the bit index of the line within them.
///
/// The pin does not track its direction.  Driving a pin configured as input
/// (or sensing an output) is not checked; on AVR, writing the output register
/// of an input pin switches its pull-up.
pub struct GpioPin<'a> {
    output: Reg<'a, u8>,
    direction: Reg<'a, u8>,
    input: Reg<'a, u8>,
    bit: u8,
}

impl<'a> GpioPin<'a> {
    pub fn new(output: Reg<'a, u8>, direction: Reg<'a, u8>, input: Reg<'a, u8>, bit: u8) -> Self {
        debug_assert!(bit < 8, "pin bit out of range");
        GpioPin {
            output,
            direction,
            input,
            bit,
        }
    }

    pub fn configure_as_output(&mut self) {
        self.direction.set(self.bit);
    }

    pub fn configure_as_input(&mut self) {
        self.direction.clear(self.bit);
    }

    /// input with the internal pull-up enabled, reads HIGH while open
    pub fn into_pull_up_input(mut self) -> Self {
        self.configure_as_input();
        self.drive_high();
        self
    }

    pub fn into_output(mut self) -> Self {
        self.configure_as_output();
        self
    }

    pub fn drive_high(&mut self) {
        self.output.set(self.bit);
    }

    pub fn drive_low(&mut self) {
        self.output.clear(self.bit);
    }

    pub fn toggle(&mut self) {
        self.output.toggle(self.bit);
    }

    pub fn write(&mut self, level: Level) {
        self.output.write_bit(self.bit, level);
    }

    /// fresh read of the input register
    pub fn sense(&self) -> Level {
        self.input.read_bit(self.bit)
    }

    /// level latched in the output register
    pub fn output_level(&self) -> Level {
        self.output.read_bit(self.bit)
    }

    pub fn is_output(&self) -> bool {
        self.direction.is_set(self.bit)
    }
}

//==========================================================
// embedded-hal

impl OutputPin for GpioPin<'_> {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive_high();
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive_low();
        Ok(())
    }
}

impl StatefulOutputPin for GpioPin<'_> {
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.output_level() == Level::High)
    }

    fn is_set_low(&self) -> Result<bool, Self::Error> {
        Ok(self.output_level() == Level::Low)
    }
}

impl ToggleableOutputPin for GpioPin<'_> {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Self::Error> {
        GpioPin::toggle(self);
        Ok(())
    }
}

impl InputPin for GpioPin<'_> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.sense() == Level::High)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(self.sense() == Level::Low)
    }
}

//==========================================================
