//! Basic oscillator implementation
//!
//! Waveforms are computed from the sample index, so every render starts at
//! phase 0 and no state is carried between calls.

use super::signal::{check_sample_rate, samples_for, Signal, FULL_SCALE};
use crate::error::{Result, SynthError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Saw,
    Square,
}

/// A stateless oscillator that renders fixed-length waveforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    waveform: Waveform,
    frequency: f64,
    sample_rate: u32,
}

impl Oscillator {
    /// Create a new oscillator
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: u32) -> Self {
        Self {
            waveform,
            frequency,
            sample_rate,
        }
    }

    /// Get the frequency
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Get the waveform
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Render `duration` seconds of the waveform at full scale
    ///
    /// A frequency of 0 Hz renders silence.
    pub fn render(&self, duration: f64) -> Result<Signal> {
        check_sample_rate(self.sample_rate)?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SynthError::invalid(format!(
                "duration must be greater than 0 seconds, got {duration}"
            )));
        }
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(SynthError::invalid(format!(
                "frequency must be 0 Hz or more, got {}",
                self.frequency
            )));
        }

        let count = samples_for(duration, self.sample_rate);
        debug!(
            "rendering {:?} at {} Hz: {} samples",
            self.waveform, self.frequency, count
        );

        if self.frequency == 0.0 {
            return Ok(Signal::silence(count));
        }

        Ok(Signal::from_f64(
            (0..count).map(|i| FULL_SCALE * self.value_at(i)),
        ))
    }

    /// Normalized waveform value (-1.0..=1.0) at sample index `i`
    fn value_at(&self, i: usize) -> f64 {
        let cycles = self.frequency * i as f64 / self.sample_rate as f64;
        match self.waveform {
            Waveform::Sine => (2.0 * PI * cycles).sin(),
            Waveform::Triangle => {
                let p = cycles.fract();
                if p < 0.25 {
                    4.0 * p
                } else if p < 0.75 {
                    2.0 - 4.0 * p
                } else {
                    4.0 * p - 4.0
                }
            }
            Waveform::Saw => 2.0 * cycles.fract() - 1.0,
            Waveform::Square => {
                if cycles.fract() < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Generate a full-scale sine wave starting at phase 0
pub fn generate_sine_wave(frequency: f64, duration: f64, sample_rate: u32) -> Result<Signal> {
    Oscillator::new(Waveform::Sine, frequency, sample_rate).render(duration)
}
