//! Volatile access to memory-mapped registers
//!
//! A [`Reg`] is a handle to one fixed-location register.  Every access goes
//! through [`core::ptr::read_volatile`] / [`core::ptr::write_volatile`], so the
//! compiler can neither cache a read nor merge or drop a write.
//!
//! The 8-bit and 16-bit flavours share one implementation, parameterized by
//! [`RegisterWidth`].
//!
//! Read-modify-write operations (`set`, `clear`, `toggle`, `or`, ...) are not
//! atomic with respect to interrupts.  This firmware never enables them; code
//! that does must wrap these sequences in `avr_device::interrupt::free`.

use core::marker::PhantomData;
use core::ops::{BitAnd, BitOr, BitXor, Not};
use ufmt::{uDisplay, uWrite, Formatter};

//==========================================================

/// logic level of a single register bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(original: bool) -> Level {
        if original {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(original: Level) -> bool {
        original == Level::High
    }
}

/// convert to u8
impl From<Level> for u8 {
    fn from(original: Level) -> u8 {
        match original {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl uDisplay for Level {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

//==========================================================

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
}

/// storage type of a register, `u8` or `u16`
pub trait RegisterWidth:
    sealed::Sealed
    + Copy
    + PartialEq
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// number of bits in the register
    const WIDTH: u8;
    const ZERO: Self;
    const ONE: Self;

    /// `1 << bit`, shifted in the register's own width
    fn mask(bit: u8) -> Self;
}

impl RegisterWidth for u8 {
    const WIDTH: u8 = 8;
    const ZERO: u8 = 0;
    const ONE: u8 = 1;

    #[inline(always)]
    fn mask(bit: u8) -> u8 {
        debug_assert!(bit < Self::WIDTH, "bit index out of range");
        Self::ONE << bit
    }
}

impl RegisterWidth for u16 {
    const WIDTH: u8 = 16;
    const ZERO: u16 = 0;
    const ONE: u16 = 1;

    #[inline(always)]
    fn mask(bit: u8) -> u16 {
        debug_assert!(bit < Self::WIDTH, "bit index out of range");
        Self::ONE << bit
    }
}

//==========================================================

/// handle to one memory-mapped register
///
/// `Reg` holds a raw pointer, so it is neither `Send` nor `Sync`: it can only
/// be used from the single thread of control that created it.
pub struct Reg<'a, T: RegisterWidth> {
    ptr: *mut T,
    _cell: PhantomData<&'a mut T>,
}

impl<T: RegisterWidth> Reg<'static, T> {
    /// Register at a fixed data-space address.
    ///
    /// # Safety
    /// `addr` must be a valid, suitably aligned register address for `T`
    /// on the running device. Several handles to the same address may exist;
    /// the caller must keep all of them on one thread of control.
    #[inline(always)]
    pub const unsafe fn at(addr: usize) -> Self {
        Reg {
            ptr: addr as *mut T,
            _cell: PhantomData,
        }
    }
}

impl<'a, T: RegisterWidth> Reg<'a, T> {
    /// Register backed by ordinary memory, used for simulation and tests.
    pub fn from_mut(cell: &'a mut T) -> Self {
        Reg {
            ptr: cell as *mut T,
            _cell: PhantomData,
        }
    }

    #[inline(always)]
    pub fn read(&self) -> T {
        // SAFETY: ptr is valid for the lifetime of the handle, see `at` and `from_mut`
        unsafe { core::ptr::read_volatile(self.ptr) }
    }

    #[inline(always)]
    pub fn write(&self, value: T) {
        // SAFETY: ptr is valid for the lifetime of the handle, see `at` and `from_mut`
        unsafe { core::ptr::write_volatile(self.ptr, value) }
    }

    /// read, transform, write back
    #[inline(always)]
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        self.write(f(self.read()));
    }

    // whole register

    #[inline(always)]
    pub fn or(&self, mask: T) {
        self.modify(|r| r | mask);
    }

    #[inline(always)]
    pub fn and(&self, mask: T) {
        self.modify(|r| r & mask);
    }

    #[inline(always)]
    pub fn xor(&self, mask: T) {
        self.modify(|r| r ^ mask);
    }

    #[inline(always)]
    pub fn not(&self) {
        self.modify(|r| !r);
    }

    // single bit

    #[inline(always)]
    pub fn set(&self, bit: u8) {
        self.or(T::mask(bit));
    }

    #[inline(always)]
    pub fn clear(&self, bit: u8) {
        self.and(!T::mask(bit));
    }

    #[inline(always)]
    pub fn toggle(&self, bit: u8) {
        self.xor(T::mask(bit));
    }

    #[inline(always)]
    pub fn read_bit(&self, bit: u8) -> Level {
        Level::from(self.is_set(bit))
    }

    #[inline(always)]
    pub fn write_bit(&self, bit: u8, level: Level) {
        match level {
            Level::High => self.set(bit),
            Level::Low => self.clear(bit),
        }
    }

    #[inline(always)]
    pub fn is_set(&self, bit: u8) -> bool {
        self.read() & T::mask(bit) != T::ZERO
    }

    #[inline(always)]
    pub fn is_unset(&self, bit: u8) -> bool {
        self.read() & T::mask(bit) == T::ZERO
    }
}

//==========================================================
