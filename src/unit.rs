//! Host-facing unit interface.
//!
//! A host declares once, per unit, whether each input arrives as one value
//! per sample (audio rate) or one value per block (control rate), and then
//! calls the unit once per block.

use dyn_clone::DynClone;

/// Rate class of an input, fixed for the lifetime of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rate {
    /// One value per output sample.
    Audio,
    /// One value per block.
    Control,
}

/// Value of one input for the current block.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Audio(&'a [f32]),
    Control(f32),
}

impl Input<'_> {
    /// Block value of the input: the scalar, or the first sample of a buffer.
    /// An empty buffer reads as `0.0`.
    #[inline]
    pub fn first(&self) -> f32 {
        match self {
            Self::Audio(buffer) => buffer.first().copied().unwrap_or(0.0),
            Self::Control(value) => *value,
        }
    }

    /// Number of samples this input can supply, capped at `len`.
    #[inline]
    pub fn limit(&self, len: usize) -> usize {
        match self {
            Self::Audio(buffer) => len.min(buffer.len()),
            Self::Control(_) => len,
        }
    }

    /// Value at sample `index`. A scalar holds for the whole block.
    ///
    /// `index` must be below `limit()`.
    #[inline]
    pub(crate) fn at(&self, index: usize) -> f32 {
        match self {
            Self::Audio(buffer) => buffer[index],
            Self::Control(value) => *value,
        }
    }
}

/// Inputs of one call, in host order.
#[derive(Debug, Clone, Copy)]
pub struct UnitInputs<'a> {
    /// Frequency in Hz
    pub frequency: Input<'a>,
    /// Phase offset in radians
    pub phase: Input<'a>,
    /// Feedback amount, always per block
    pub feedback: f32,
}

/// Block-processing unit driven by the host's audio callback.
pub trait Unit: DynClone + Send {
    /// Renders `out.len()` samples.
    fn next(&mut self, inputs: &UnitInputs<'_>, out: &mut [f32]);
}

dyn_clone::clone_trait_object!(Unit);
