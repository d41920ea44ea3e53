//! Sine oscillator with phase modulation and self-feedback.
//!
//! Reads the shared sine table through a 32-bit fixed-point phase. Frequency
//! and phase inputs may each be audio rate or control rate; the combination
//! selects one of four render routines when the oscillator is created.
//! Control-rate values that change between blocks are ramped linearly over
//! the block.
//!
//! Each sample's output feeds back into the phase of the next one:
//! - positive feedback adds `previous * feedback` (through-zero, brightening)
//! - negative feedback adds `previous² * feedback` (sign-stable distortion)

// Based on the SinOp unit generator from cian-plugins for SuperCollider.

use crate::resources::sine::SineTable;
use crate::unit::{Input, Rate, Unit, UnitInputs};
use crate::utils::parameter_interpolator::BlockRamp;
use crate::utils::to_increment;
use crate::SampleRate;

/// Render routine, named after the rates of the frequency and phase inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcFunction {
    AudioAudio,
    AudioControl,
    ControlAudio,
    ControlControl,
}

impl CalcFunction {
    pub fn select(frequency: Rate, phase: Rate) -> Self {
        match (frequency, phase) {
            (Rate::Audio, Rate::Audio) => Self::AudioAudio,
            (Rate::Audio, Rate::Control) => Self::AudioControl,
            (Rate::Control, Rate::Audio) => Self::ControlAudio,
            (Rate::Control, Rate::Control) => Self::ControlControl,
        }
    }
}

/// Block values of the inputs at the time the oscillator is created.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InitialValues {
    /// Frequency in Hz
    pub frequency: f32,
    /// Phase offset in radians
    pub phase: f32,
    pub feedback: f32,
}

impl InitialValues {
    pub fn new(frequency: f32, phase: f32, feedback: f32) -> Self {
        Self {
            frequency,
            phase,
            feedback,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SinOp<'a> {
    table: &'a SineTable,
    calc_function: CalcFunction,

    // Oscillator state.
    phase: i32,
    previous_output: f32,

    // Block values latched for ramping control-rate inputs.
    previous_frequency: f32,
    previous_phase: f32,

    radians_to_increment: f64,
    cps_to_increment: f64,
}

impl<'a> SinOp<'a> {
    pub fn new(
        table: &'a SineTable,
        sample_rate: SampleRate,
        frequency_rate: Rate,
        phase_rate: Rate,
        initial: InitialValues,
    ) -> Self {
        let calc_function = CalcFunction::select(frequency_rate, phase_rate);

        let mut op = Self {
            table,
            calc_function,
            phase: 0,
            previous_output: 0.0,
            previous_frequency: initial.frequency,
            previous_phase: initial.phase,
            radians_to_increment: table.radians_to_increment(),
            cps_to_increment: table.cps_to_increment(sample_rate.sample_dur),
        };

        log::debug!(
            "SinOp with {:?} at {} Hz, table size {}",
            calc_function,
            sample_rate.sample_rate_hz,
            table.size()
        );

        // Prime phase and feedback state with one throwaway sample.
        let mut warm_up = [0.0];
        op.next_kk(initial.frequency, initial.phase, initial.feedback, &mut warm_up);

        op
    }

    #[inline]
    pub fn calc_function(&self) -> CalcFunction {
        self.calc_function
    }

    /// Raw phase accumulator.
    #[inline]
    pub fn phase(&self) -> i32 {
        self.phase
    }

    #[inline]
    pub fn previous_output(&self) -> f32 {
        self.previous_output
    }

    /// Renders one block with the routine bound at construction.
    ///
    /// Control-rate inputs given as buffers are read from their first sample,
    /// audio-rate inputs given as scalars are held for the block. Audio
    /// buffers shorter than `out` limit the number of samples written.
    pub fn render(&mut self, frequency: Input<'_>, phase: Input<'_>, feedback: f32, out: &mut [f32]) {
        match self.calc_function {
            CalcFunction::AudioAudio => self.next_aa(frequency, phase, feedback, out),
            CalcFunction::AudioControl => self.next_ak(frequency, phase.first(), feedback, out),
            CalcFunction::ControlAudio => self.next_ka(frequency.first(), phase, feedback, out),
            CalcFunction::ControlControl => {
                self.next_kk(frequency.first(), phase.first(), feedback, out)
            }
        }
    }

    fn next_aa(&mut self, frequency: Input<'_>, phase: Input<'_>, feedback: f32, out: &mut [f32]) {
        let len = phase.limit(frequency.limit(out.len()));
        let cps_to_increment = self.cps_to_increment;
        let radians_to_increment = self.radians_to_increment;

        self.render_block(
            len,
            feedback,
            out,
            |i| to_increment(frequency.at(i) as f64 * cps_to_increment),
            |i, fb| to_increment((phase.at(i) + fb) as f64 * radians_to_increment),
        );
    }

    fn next_ak(&mut self, frequency: Input<'_>, phase: f32, feedback: f32, out: &mut [f32]) {
        let len = frequency.limit(out.len());
        let cps_to_increment = self.cps_to_increment;
        let radians_to_increment = self.radians_to_increment;
        let mut phase_ramp = BlockRamp::new(self.previous_phase, phase, radians_to_increment, len);

        self.render_block(
            len,
            feedback,
            out,
            |i| to_increment(frequency.at(i) as f64 * cps_to_increment),
            |_, fb| to_increment(phase_ramp.next() + fb as f64 * radians_to_increment),
        );

        self.previous_phase = phase;
    }

    fn next_ka(&mut self, frequency: f32, phase: Input<'_>, feedback: f32, out: &mut [f32]) {
        let len = phase.limit(out.len());
        let radians_to_increment = self.radians_to_increment;
        let mut frequency_ramp = BlockRamp::new(
            self.previous_frequency,
            frequency,
            self.cps_to_increment,
            len,
        );

        self.render_block(
            len,
            feedback,
            out,
            |_| to_increment(frequency_ramp.next()),
            |i, fb| to_increment((phase.at(i) + fb) as f64 * radians_to_increment),
        );

        self.previous_frequency = frequency;
    }

    fn next_kk(&mut self, frequency: f32, phase: f32, feedback: f32, out: &mut [f32]) {
        let radians_to_increment = self.radians_to_increment;
        let mut frequency_ramp = BlockRamp::new(
            self.previous_frequency,
            frequency,
            self.cps_to_increment,
            out.len(),
        );
        let mut phase_ramp =
            BlockRamp::new(self.previous_phase, phase, radians_to_increment, out.len());

        self.render_block(
            out.len(),
            feedback,
            out,
            |_| to_increment(frequency_ramp.next()),
            |_, fb| to_increment(phase_ramp.next() + fb as f64 * radians_to_increment),
        );

        self.previous_frequency = frequency;
        self.previous_phase = phase;
    }

    /// Inner loop shared by all routines. `increment` yields the phase
    /// increment of sample `i`, `offset` its phase offset given the feedback
    /// term.
    #[inline]
    fn render_block(
        &mut self,
        len: usize,
        feedback: f32,
        out: &mut [f32],
        mut increment: impl FnMut(usize) -> i32,
        mut offset: impl FnMut(usize, f32) -> i32,
    ) {
        let table = self.table;
        let mut phase = self.phase;
        let mut previous = self.previous_output;

        for (i, out_sample) in out[..len].iter_mut().enumerate() {
            let fb = feedback_term(previous, feedback);

            // Wraps modulo 2^32 on purpose: a whole number of table cycles.
            phase = phase.wrapping_add(increment(i));
            let phase_offset = offset(i, fb);

            previous = table.lookup(phase.wrapping_add(phase_offset));
            *out_sample = previous;
        }

        self.phase = phase;
        self.previous_output = previous;
    }
}

impl Unit for SinOp<'_> {
    fn next(&mut self, inputs: &UnitInputs<'_>, out: &mut [f32]) {
        self.render(inputs.frequency, inputs.phase, inputs.feedback, out);
    }
}

/// Phase contribution of the previous output sample, in radians.
#[inline]
pub fn feedback_term(previous: f32, feedback: f32) -> f32 {
    if feedback > 0.0 {
        previous * feedback
    } else if feedback < 0.0 {
        previous * previous * feedback
    } else {
        0.0
    }
}
