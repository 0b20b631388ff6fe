//! Timer/counter descriptors
//!
//! The blinker itself busy-waits and never starts a timer; these descriptors
//! name the control, counter and compare registers of the three ATmega328P
//! timers so other firmware built on this crate can drive them.
//!
//! Note that 16-bit timer registers go through the AVR TEMP register: the
//! low byte must be read first and the high byte written first.

use crate::register::{Reg, RegisterWidth};

bitflags! {
    /// clock select field (CSn2:0) of the second control register
    pub struct ClockSelect: u8 {
        const CS0 = 0b0000_0001;
        const CS1 = 0b0000_0010;
        const CS2 = 0b0000_0100;

        const NO_CLOCK = 0;
        const DIRECT = Self::CS0.bits;
        const PRESCALE_8 = Self::CS1.bits;
        const PRESCALE_64 = Self::CS1.bits | Self::CS0.bits;
        const PRESCALE_256 = Self::CS2.bits;
        const PRESCALE_1024 = Self::CS2.bits | Self::CS0.bits;
        const EXT_FALLING = Self::CS2.bits | Self::CS1.bits;
        const EXT_RISING = Self::CS2.bits | Self::CS1.bits | Self::CS0.bits;

        const MASK = Self::EXT_RISING.bits;
    }
}

impl ClockSelect {
    /// clock divisor, `None` when stopped or clocked from the Tn pin
    pub fn divisor(self) -> Option<u16> {
        if self == ClockSelect::DIRECT {
            Some(1)
        } else if self == ClockSelect::PRESCALE_8 {
            Some(8)
        } else if self == ClockSelect::PRESCALE_64 {
            Some(64)
        } else if self == ClockSelect::PRESCALE_256 {
            Some(256)
        } else if self == ClockSelect::PRESCALE_1024 {
            Some(1024)
        } else {
            None
        }
    }
}

/// compare value giving `target_hz` in CTC mode
///
/// reversing the formula F = clock / (divisor * (1 + compare))
///
/// `None` when `target_hz` or `divisor` is zero, or when the requested rate
/// is faster than one tick of the divided clock.  The result is not range
/// checked: 8-bit timers only take values up to 255, so convert with
/// `u8::try_from` before calling `set_compare_a` on a [`Timer8`].
pub const fn compare_for(clock_hz: u32, target_hz: u32, divisor: u32) -> Option<u32> {
    if target_hz == 0 || divisor == 0 {
        return None;
    }
    let ticks = clock_hz / target_hz / divisor;
    if ticks == 0 {
        None
    } else {
        Some(ticks - 1)
    }
}

//==========================================================

/// one timer/counter peripheral, `T` is the counter width
pub struct Timer<'a, T: RegisterWidth> {
    /// TCCRnA, waveform generation mode
    control_a: Reg<'a, u8>,
    /// TCCRnB, clock select
    control_b: Reg<'a, u8>,
    /// TCCRnC, only on 16-bit timers
    control_c: Option<Reg<'a, u8>>,
    counter: Reg<'a, T>,
    compare_a: Reg<'a, T>,
    compare_b: Reg<'a, T>,
}

pub type Timer8<'a> = Timer<'a, u8>;
pub type Timer16<'a> = Timer<'a, u16>;

impl<'a> Timer<'a, u8> {
    pub fn new(
        control_a: Reg<'a, u8>,
        control_b: Reg<'a, u8>,
        counter: Reg<'a, u8>,
        compare_a: Reg<'a, u8>,
        compare_b: Reg<'a, u8>,
    ) -> Self {
        Timer {
            control_a,
            control_b,
            control_c: None,
            counter,
            compare_a,
            compare_b,
        }
    }
}

impl<'a> Timer<'a, u16> {
    pub fn new(
        control_a: Reg<'a, u8>,
        control_b: Reg<'a, u8>,
        control_c: Reg<'a, u8>,
        counter: Reg<'a, u16>,
        compare_a: Reg<'a, u16>,
        compare_b: Reg<'a, u16>,
    ) -> Self {
        Timer {
            control_a,
            control_b,
            control_c: Some(control_c),
            counter,
            compare_a,
            compare_b,
        }
    }
}

impl<'a, T: RegisterWidth> Timer<'a, T> {
    /// Writes the mode and clock select, and on 16-bit timers zeroes the
    /// third control register.  Starts counting unless `prescaler` is
    /// `NO_CLOCK`.
    pub fn init(&mut self, mode: u8, prescaler: ClockSelect) {
        self.control_a.write(mode);
        self.control_b.write(prescaler.bits());
        if let Some(control_c) = &self.control_c {
            control_c.write(0);
        }
    }

    pub fn set_counter(&mut self, value: T) {
        self.counter.write(value);
    }

    pub fn counter(&self) -> T {
        self.counter.read()
    }

    pub fn set_compare_a(&mut self, value: T) {
        self.compare_a.write(value);
    }

    pub fn set_compare_b(&mut self, value: T) {
        self.compare_b.write(value);
    }

    /// enable the clock source
    pub fn start(&mut self, prescaler: ClockSelect) {
        self.control_b.or(prescaler.bits());
    }

    /// clear the clock select field, the counter holds its value
    pub fn stop(&mut self) {
        self.control_b.and(!ClockSelect::MASK.bits());
    }

    pub fn clock(&self) -> ClockSelect {
        ClockSelect::from_bits_truncate(self.control_b.read())
    }
}

//==========================================================
// ATmega328P

/// TC0: TCCR0A, TCCR0B, TCNT0, OCR0A, OCR0B
#[cfg(target_arch = "avr")]
const TC0_BASE: usize = 0x44;
/// TC1: TCCR1A, TCCR1B, TCCR1C, -, TCNT1, ICR1, OCR1A, OCR1B
#[cfg(target_arch = "avr")]
const TC1_BASE: usize = 0x80;
/// TC2: TCCR2A, TCCR2B, TCNT2, OCR2A, OCR2B
#[cfg(target_arch = "avr")]
const TC2_BASE: usize = 0xB0;

/// # Safety
/// `base` must be the TCCRnA address of an 8-bit timer laid out like TC0.
#[cfg(target_arch = "avr")]
unsafe fn timer8_at(base: usize) -> Timer8<'static> {
    Timer8::new(
        Reg::at(base),
        Reg::at(base + 1),
        Reg::at(base + 2),
        Reg::at(base + 3),
        Reg::at(base + 4),
    )
}

#[cfg(target_arch = "avr")]
pub fn timer0(_tc0: crate::pac::TC0) -> Timer8<'static> {
    // SAFETY: the TC0 singleton proves exclusive ownership
    unsafe { timer8_at(TC0_BASE) }
}

#[cfg(target_arch = "avr")]
pub fn timer1(_tc1: crate::pac::TC1) -> Timer16<'static> {
    // SAFETY: the TC1 singleton proves exclusive ownership
    unsafe {
        Timer16::new(
            Reg::at(TC1_BASE),
            Reg::at(TC1_BASE + 1),
            Reg::at(TC1_BASE + 2),
            Reg::at(TC1_BASE + 4),
            Reg::at(TC1_BASE + 8),
            Reg::at(TC1_BASE + 10),
        )
    }
}

#[cfg(target_arch = "avr")]
pub fn timer2(_tc2: crate::pac::TC2) -> Timer8<'static> {
    // SAFETY: the TC2 singleton proves exclusive ownership
    unsafe { timer8_at(TC2_BASE) }
}
