#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod oscillator;
pub mod resources;
pub mod unit;
pub mod utils;

/// Default audio sample rate in Hz.
pub const SAMPLE_RATE: f32 = 48000.0;

/// Default number of samples rendered per call (one control period).
pub const BLOCK_SIZE: usize = 64;

/// Sample rate context for DSP calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRate {
    /// Sample rate in Hz
    pub sample_rate_hz: f32,
    /// Duration of one sample in seconds (1.0 / sample_rate_hz)
    pub sample_dur: f64,
}

impl SampleRate {
    /// Create a new sample rate context.
    pub fn new(sample_rate_hz: f32) -> Self {
        Self {
            sample_rate_hz,
            sample_dur: 1.0 / sample_rate_hz as f64,
        }
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}
