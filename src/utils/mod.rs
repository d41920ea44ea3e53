//! Fixed-point phase helpers and table lookup.
//!
//! The oscillator phase is a signed 32-bit accumulator. Its upper bits select
//! a table entry and its lower `FRACTION_BITS` bits are the interpolation
//! fraction between that entry and the next one. Phase arithmetic wraps
//! modulo 2^32, which is a whole number of table cycles.

pub mod parameter_interpolator;

use crate::resources::sine::FRACTION_BITS;

const FRACTION_MASK: u32 = (1 << FRACTION_BITS) - 1;
const FRACTION_SCALE: f32 = 1.0 / (1u32 << FRACTION_BITS) as f32;

/// Converts a scaled value to a phase increment.
///
/// Truncates toward zero, then wraps modulo 2^32. Values beyond the `i32`
/// range alias onto the accumulator instead of saturating.
#[inline]
pub fn to_increment(value: f64) -> i32 {
    value as i64 as i32
}

/// Table index of a phase, already wrapped by `mask`.
#[inline]
pub fn phase_index(phase: i32, mask: u32) -> usize {
    ((phase as u32 >> FRACTION_BITS) & mask) as usize
}

/// Interpolation fraction of a phase in `0.0..1.0`.
#[inline]
pub fn phase_fraction(phase: i32) -> f32 {
    (phase as u32 & FRACTION_MASK) as f32 * FRACTION_SCALE
}

/// Two-point interpolation between adjacent entries of `table`.
///
/// `table` must hold at least `mask + 2` samples.
#[inline]
pub fn lookup_linear(table: &[f32], phase: i32, mask: u32) -> f32 {
    let index = phase_index(phase, mask);
    let a = table[index];
    let b = table[index + 1];

    a + (b - a) * phase_fraction(phase)
}
