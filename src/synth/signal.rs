//! Signal type: an ordered run of 16-bit PCM samples

use crate::error::{Result, SynthError};

/// Full-scale amplitude used by every generator
pub const FULL_SCALE: f64 = 32767.0;

/// Round a floating point amplitude and clamp it into the 16-bit range
pub fn to_sample(value: f64) -> i16 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Check that a sample rate can be used as a time base
pub fn check_sample_rate(sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(SynthError::invalid("sample rate must be greater than 0"));
    }
    Ok(())
}

/// Number of samples covering `seconds` at `sample_rate`, rounded to nearest
pub fn samples_for(seconds: f64, sample_rate: u32) -> usize {
    (seconds * sample_rate as f64).round() as usize
}

/// An immutable sequence of 16-bit samples at an implicit sample rate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signal {
    samples: Vec<i16>,
}

impl Signal {
    /// Wrap already quantized samples
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }

    /// A run of zero samples
    pub fn silence(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    /// Build a signal by quantizing floating point values
    pub fn from_f64<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            samples: values.into_iter().map(to_sample).collect(),
        }
    }

    /// Join signals end to end, preserving their order
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Signal>,
    {
        let mut samples = Vec::new();
        for part in parts {
            samples.extend_from_slice(&part.samples);
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds at the given sample rate
    pub fn duration_secs(&self, sample_rate: u32) -> f64 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / sample_rate as f64
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> i32 {
        self.samples
            .iter()
            .map(|&s| (s as i32).abs())
            .max()
            .unwrap_or(0)
    }

    /// Produce a new signal by transforming each sample with its index
    pub(crate) fn map_indexed<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, i16) -> f64,
    {
        Self {
            samples: self
                .samples
                .iter()
                .enumerate()
                .map(|(i, &s)| to_sample(f(i, s)))
                .collect(),
        }
    }
}

impl From<Vec<i16>> for Signal {
    fn from(samples: Vec<i16>) -> Self {
        Self::new(samples)
    }
}

impl AsRef<[i16]> for Signal {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}
