//! ADSR envelope generator
//!
//! Attack-Decay-Sustain-Release envelope for amplitude shaping. The envelope
//! is laid out over a fixed-length signal: attack, decay and release take
//! their configured time and sustain fills whatever is left.

use super::signal::{check_sample_rate, samples_for, Signal};
use crate::error::{Result, SynthError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Envelope stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Decay,
    Sustain,
    Release,
}

/// What to do when attack, decay and release do not fit in the signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Reject the envelope with `SynthError::EnvelopeOverflow`
    #[default]
    Fail,
    /// Drop sustain and shrink attack, decay and release proportionally
    Redistribute,
}

/// ADSR parameters: times in seconds, sustain as a level in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    attack: f64,
    decay: f64,
    sustain: f64,
    release: f64,
}

impl Adsr {
    /// Create validated ADSR parameters
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Result<Self> {
        for (name, value) in [("attack", attack), ("decay", decay), ("release", release)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SynthError::invalid(format!(
                    "{name} must be 0 seconds or more, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&sustain) {
            return Err(SynthError::invalid(format!(
                "sustain level must be between 0.0 and 1.0, got {sustain}"
            )));
        }

        Ok(Self {
            attack,
            decay,
            sustain,
            release,
        })
    }

    pub fn attack(&self) -> f64 {
        self.attack
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn sustain(&self) -> f64 {
        self.sustain
    }

    pub fn release(&self) -> f64 {
        self.release
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.2,
            sustain: 0.7,
            release: 0.3,
        }
    }
}

/// Sample lengths of each stage for one concrete signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segments {
    pub attack: usize,
    pub decay: usize,
    pub sustain: usize,
    pub release: usize,
    level: f64,
}

impl Segments {
    /// Total length covered by all four stages
    pub fn total(&self) -> usize {
        self.attack + self.decay + self.sustain + self.release
    }

    /// Sustain level these segments hold during the plateau
    pub fn sustain_level(&self) -> f64 {
        self.level
    }

    /// Stage that sample `i` falls into, `None` past the end
    pub fn stage(&self, i: usize) -> Option<EnvelopeStage> {
        let decay_start = self.attack;
        let sustain_start = decay_start + self.decay;
        let release_start = sustain_start + self.sustain;

        if i < decay_start {
            Some(EnvelopeStage::Attack)
        } else if i < sustain_start {
            Some(EnvelopeStage::Decay)
        } else if i < release_start {
            Some(EnvelopeStage::Sustain)
        } else if i < self.total() {
            Some(EnvelopeStage::Release)
        } else {
            None
        }
    }

    /// Envelope gain at sample `i`
    ///
    /// Zero-length stages are never entered, so no ratio divides by zero.
    pub fn level(&self, i: usize) -> f64 {
        let decay_start = self.attack;
        let sustain_start = decay_start + self.decay;
        let release_start = sustain_start + self.sustain;

        match self.stage(i) {
            Some(EnvelopeStage::Attack) => i as f64 / self.attack as f64,
            Some(EnvelopeStage::Decay) => {
                let progress = (i - decay_start) as f64 / self.decay as f64;
                1.0 - (1.0 - self.level) * progress
            }
            Some(EnvelopeStage::Sustain) => self.level,
            Some(EnvelopeStage::Release) => {
                let progress = (i - release_start) as f64 / self.release as f64;
                self.level * (1.0 - progress)
            }
            None => 0.0,
        }
    }
}

/// ADSR envelope bound to an overflow policy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Envelope {
    adsr: Adsr,
    policy: OverflowPolicy,
}

impl Envelope {
    /// Create an envelope that fails on overflow
    pub fn new(adsr: Adsr) -> Self {
        Self {
            adsr,
            policy: OverflowPolicy::Fail,
        }
    }

    /// Set the overflow policy (builder pattern)
    pub fn with_policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn adsr(&self) -> &Adsr {
        &self.adsr
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Lay the stages out over a signal of `total` samples
    pub fn segments(&self, total: usize, sample_rate: u32) -> Result<Segments> {
        check_sample_rate(sample_rate)?;

        let attack = samples_for(self.adsr.attack, sample_rate);
        let decay = samples_for(self.adsr.decay, sample_rate);
        let release = samples_for(self.adsr.release, sample_rate);
        let required = attack
            .checked_add(decay)
            .and_then(|sum| sum.checked_add(release));

        if let Some(required) = required.filter(|&required| required <= total) {
            return Ok(Segments {
                attack,
                decay,
                sustain: total - required,
                release,
                level: self.adsr.sustain,
            });
        }

        // Stage lengths saturate at usize::MAX, so their sum may not fit in usize
        let required_wide = attack as u128 + decay as u128 + release as u128;
        match self.policy {
            OverflowPolicy::Fail => Err(SynthError::EnvelopeOverflow {
                required: required.unwrap_or(usize::MAX),
                available: total,
            }),
            OverflowPolicy::Redistribute => {
                let shrink = |len: usize| (len as u128 * total as u128 / required_wide) as usize;
                let attack = shrink(attack);
                let decay = shrink(decay);
                debug!(
                    "envelope needs {} samples, shrinking to fit {}",
                    required_wide, total
                );
                Ok(Segments {
                    attack,
                    decay,
                    sustain: 0,
                    release: total - attack - decay,
                    level: self.adsr.sustain,
                })
            }
        }
    }

    /// Shape a signal, returning a new signal of the same length
    pub fn apply(&self, signal: &Signal, sample_rate: u32) -> Result<Signal> {
        let segments = self.segments(signal.len(), sample_rate)?;
        debug!(
            "envelope segments: attack={} decay={} sustain={} release={}",
            segments.attack, segments.decay, segments.sustain, segments.release
        );
        Ok(signal.map_indexed(|i, sample| sample as f64 * segments.level(i)))
    }
}

/// Apply an ADSR envelope, failing if the stages overrun the signal
pub fn apply_adsr(signal: &Signal, sample_rate: u32, adsr: &Adsr) -> Result<Signal> {
    Envelope::new(*adsr).apply(signal, sample_rate)
}
