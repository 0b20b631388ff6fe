//! Byte-range primitives

use core::ops::Range;

pub fn mem_set(dst: &mut [u8], value: u8) {
    for b in dst.iter_mut() {
        *b = value;
    }
}

pub fn mem_clear(dst: &mut [u8]) {
    mem_set(dst, 0);
}

/// Copies `src` into the front of `dst`.
///
/// # Panics
/// if `dst` is shorter than `src`
pub fn mem_copy(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst[..src.len()].iter_mut().zip(src.iter()) {
        *d = *s;
    }
}

/// Moves the bytes of `src` to start at `dest`, all within `buf`; the two
/// ranges may overlap.
///
/// # Panics
/// if either range falls outside `buf`
pub fn mem_move(buf: &mut [u8], src: Range<usize>, dest: usize) {
    let len = src.end.saturating_sub(src.start);
    assert!(src.end <= buf.len() && dest + len <= buf.len(), "range out of bounds");

    if dest < src.start {
        // front to back, each byte is read before it is overwritten
        for i in 0..len {
            buf[dest + i] = buf[src.start + i];
        }
    } else if dest > src.start {
        for i in (0..len).rev() {
            buf[dest + i] = buf[src.start + i];
        }
    }
}

/// Difference of the first pair of bytes that differ within the first
/// `size` bytes, zero when they all match.
///
/// # Panics
/// if either slice is shorter than `size`
pub fn mem_compare(a: &[u8], b: &[u8], size: usize) -> i16 {
    a[..size]
        .iter()
        .zip(b[..size].iter())
        .find(|(x, y)| x != y)
        .map_or(0, |(&x, &y)| i16::from(x) - i16::from(y))
}
