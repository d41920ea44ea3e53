//! Linear interpolation of control-rate parameters across a block.

/// Ramp of a block-rate value, scaled into phase units.
///
/// Starts at the value latched in the previous block and advances by
/// `(new - previous) / size` per sample, so the block ends one step short of
/// the new value and the next block picks up exactly there. An unchanged
/// value gets a slope of exactly zero.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BlockRamp {
    value: f64,
    increment: f64,
}

impl BlockRamp {
    pub fn new(previous: f32, new_value: f32, scale: f64, size: usize) -> Self {
        let increment = if new_value != previous && size > 0 {
            (new_value as f64 - previous as f64) / size as f64 * scale
        } else {
            0.0
        };

        Self {
            value: previous as f64 * scale,
            increment,
        }
    }

    /// Returns the current value and advances by one sample.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        let value = self.value;
        self.value += self.increment;
        value
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn increment(&self) -> f64 {
        self.increment
    }
}
