//! Low frequency amplitude modulation (vibrato)

use super::signal::{check_sample_rate, Signal};
use crate::error::{Result, SynthError};
use log::debug;
use std::f64::consts::PI;

/// Sine LFO applied as a gain of `1 + depth * sin(...)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vibrato {
    rate: f64,
    depth: f64,
}

impl Vibrato {
    /// Create a vibrato with LFO `rate` in Hz and `depth` as a fraction (0.0 to 1.0)
    pub fn new(rate: f64, depth: f64) -> Result<Self> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(SynthError::invalid(format!(
                "vibrato rate must be 0 Hz or more, got {rate}"
            )));
        }
        if !(0.0..=1.0).contains(&depth) {
            return Err(SynthError::invalid(format!(
                "vibrato depth must be between 0.0 and 1.0, got {depth}"
            )));
        }
        Ok(Self { rate, depth })
    }

    /// Get LFO rate
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Get modulation depth
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Gain applied at sample index `i`
    pub fn gain(&self, i: usize, sample_rate: u32) -> f64 {
        let t = i as f64 / sample_rate as f64;
        1.0 + self.depth * (2.0 * PI * self.rate * t).sin()
    }

    /// Modulate a signal, returning a new signal of the same length
    pub fn apply(&self, signal: &Signal, sample_rate: u32) -> Result<Signal> {
        check_sample_rate(sample_rate)?;
        debug!(
            "vibrato at {} Hz, depth {} over {} samples",
            self.rate,
            self.depth,
            signal.len()
        );
        Ok(signal.map_indexed(|i, sample| sample as f64 * self.gain(i, sample_rate)))
    }
}

impl Default for Vibrato {
    fn default() -> Self {
        Self {
            rate: 5.0,
            depth: 0.02,
        }
    }
}

/// Apply vibrato with the given LFO frequency and depth
pub fn apply_vibrato(
    signal: &Signal,
    sample_rate: u32,
    lfo_frequency: f64,
    depth: f64,
) -> Result<Signal> {
    Vibrato::new(lfo_frequency, depth)?.apply(signal, sample_rate)
}
