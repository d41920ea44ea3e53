//! Shared sine wavetable.
//!
//! One cycle of a sine with `2^bits` entries plus a guard point, so every
//! index `i` in `0..size` has a neighbour at `i + 1` for linear interpolation.
//! The table is read through a 32-bit fixed-point phase laid out as
//! `index << FRACTION_BITS | fraction`.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

use crate::utils::lookup_linear;

/// Size of the shared table as a power of two (8192 entries).
pub const SINE_SIZE_BITS: u32 = 13;

/// Smallest supported table size as a power of two.
pub const MIN_BITS: u32 = 4;

/// Largest supported table size. Index and fraction must both fit in 32 bits.
pub const MAX_BITS: u32 = 32 - FRACTION_BITS;

/// Number of phase bits used for the interpolation fraction.
pub const FRACTION_BITS: u32 = 16;

/// Phase units per table entry.
pub const FRACTION_ONE: f64 = (1u32 << FRACTION_BITS) as f64;

static SHARED: Once<SineTable> = Once::new();

#[derive(Debug, Clone, PartialEq)]
pub struct SineTable {
    samples: Box<[f32]>,
    bits: u32,
}

impl SineTable {
    /// Generates a table with `2^bits` entries. `bits` is clamped to
    /// `MIN_BITS..=MAX_BITS`.
    pub fn new(bits: u32) -> Self {
        let bits = bits.clamp(MIN_BITS, MAX_BITS);
        let size = 1usize << bits;
        let step = core::f64::consts::TAU / size as f64;

        let mut samples: Vec<f32> = (0..size).map(|i| (i as f64 * step).sin() as f32).collect();
        samples.push(samples[0]);

        log::debug!("Generated sine table with {} entries", size);

        Self {
            samples: samples.into_boxed_slice(),
            bits,
        }
    }

    /// Wraps a table supplied by the host. The last sample is the guard point
    /// and must repeat the first one for a seamless cycle.
    pub fn from_samples(samples: Box<[f32]>) -> Result<Self, TableError> {
        let len = samples.len();

        if len < (1 << MIN_BITS) + 1 {
            return Err(TableError::TooShort { len });
        }

        let size = len - 1;

        if !size.is_power_of_two() {
            return Err(TableError::NotPowerOfTwo { len });
        }

        let bits = size.trailing_zeros();

        if bits > MAX_BITS {
            return Err(TableError::TooLong { len });
        }

        Ok(Self { samples, bits })
    }

    /// Process-wide table of `2^SINE_SIZE_BITS` entries, generated on first use.
    pub fn shared() -> &'static SineTable {
        SHARED.call_once(|| Self::new(SINE_SIZE_BITS))
    }

    /// Number of entries in one cycle, excluding the guard point.
    #[inline]
    pub fn size(&self) -> usize {
        1 << self.bits
    }

    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub fn mask(&self) -> u32 {
        (1u32 << self.bits) - 1
    }

    /// All samples including the guard point.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Phase units per radian of phase offset.
    pub fn radians_to_increment(&self) -> f64 {
        self.size() as f64 * FRACTION_ONE / core::f64::consts::TAU
    }

    /// Phase units per sample for a frequency of 1 Hz.
    pub fn cps_to_increment(&self, sample_dur: f64) -> f64 {
        self.size() as f64 * sample_dur * FRACTION_ONE
    }

    /// Linearly interpolated value at a fixed-point phase. Any phase is valid.
    #[inline]
    pub fn lookup(&self, phase: i32) -> f32 {
        lookup_linear(&self.samples, phase, self.mask())
    }
}

/// Reasons a host-supplied table is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    TooShort { len: usize },
    NotPowerOfTwo { len: usize },
    TooLong { len: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => write!(
                f,
                "sine table of {len} samples is shorter than {} + 1",
                1 << MIN_BITS
            ),
            Self::NotPowerOfTwo { len } => write!(
                f,
                "sine table of {len} samples is not a power of two plus a guard point"
            ),
            Self::TooLong { len } => write!(
                f,
                "sine table of {len} samples exceeds 2^{MAX_BITS} + 1"
            ),
        }
    }
}

impl core::error::Error for TableError {}
