//! Configuration schema definitions

use crate::synth::{Adsr, NoteTable, OverflowPolicy, Vibrato, Waveform};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for Lilt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiltConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Single tone settings
    #[serde(default)]
    pub tone: ToneConfig,

    /// Envelope for the single tone
    #[serde(default)]
    pub envelope: EnvelopeConfig,

    /// Vibrato applied to the vibrato render
    #[serde(default)]
    pub vibrato: VibratoConfig,

    /// Scale render settings
    #[serde(default)]
    pub scale: ScaleConfig,

    /// Output file locations
    #[serde(default)]
    pub output: OutputConfig,
}

impl LiltConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate audio settings
        if self.audio.sample_rate == 0 {
            bail!("Sample rate must be greater than 0");
        }

        // Validate tone settings
        if !self.tone.duration.is_finite() || self.tone.duration <= 0.0 {
            bail!("Tone duration must be greater than 0 seconds");
        }
        if !self.tone.frequency.is_finite() || self.tone.frequency < 0.0 {
            bail!("Tone frequency must be 0 Hz or more");
        }
        self.envelope.to_adsr().context("invalid envelope")?;
        self.vibrato.to_vibrato().context("invalid vibrato")?;

        // Validate scale settings
        if !self.scale.note_duration.is_finite() || self.scale.note_duration <= 0.0 {
            bail!("Scale note duration must be greater than 0 seconds");
        }
        if !self.scale.gap.is_finite() || self.scale.gap < 0.0 {
            bail!("Scale gap must be 0 seconds or more");
        }
        if self.scale.notes.is_empty() {
            bail!("Scale must contain at least one note");
        }
        for note in &self.scale.notes {
            note.validate()?;
        }
        self.scale.envelope.to_adsr().context("invalid scale envelope")?;

        Ok(())
    }
}

/// Audio output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_sample_rate() -> u32 {
    44100
}

/// Single tone settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneConfig {
    /// Frequency in Hz (default: 440, A4)
    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// Duration in seconds (default: 2.0)
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Oscillator waveform (default: sine)
    #[serde(default)]
    pub waveform: Waveform,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            duration: default_duration(),
            waveform: Waveform::default(),
        }
    }
}

fn default_frequency() -> f64 {
    440.0
}
fn default_duration() -> f64 {
    2.0
}

/// ADSR settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Attack time in seconds (default: 0.1)
    #[serde(default = "default_attack")]
    pub attack: f64,

    /// Decay time in seconds (default: 0.2)
    #[serde(default = "default_decay")]
    pub decay: f64,

    /// Sustain level 0.0-1.0 (default: 0.7)
    #[serde(default = "default_sustain")]
    pub sustain: f64,

    /// Release time in seconds (default: 0.3)
    #[serde(default = "default_release")]
    pub release: f64,

    /// Behaviour when the stages do not fit the note (default: fail)
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

impl EnvelopeConfig {
    /// Convert to validated ADSR parameters
    pub fn to_adsr(&self) -> crate::error::Result<Adsr> {
        Adsr::new(self.attack, self.decay, self.sustain, self.release)
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: default_attack(),
            decay: default_decay(),
            sustain: default_sustain(),
            release: default_release(),
            overflow: OverflowPolicy::default(),
        }
    }
}

fn default_attack() -> f64 {
    0.1
}
fn default_decay() -> f64 {
    0.2
}
fn default_sustain() -> f64 {
    0.7
}
fn default_release() -> f64 {
    0.3
}

/// Vibrato settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibratoConfig {
    /// LFO rate in Hz (default: 5.0)
    #[serde(default = "default_vibrato_rate")]
    pub rate: f64,

    /// Modulation depth 0.0-1.0 (default: 0.02)
    #[serde(default = "default_vibrato_depth")]
    pub depth: f64,
}

impl VibratoConfig {
    /// Convert to a validated vibrato
    pub fn to_vibrato(&self) -> crate::error::Result<Vibrato> {
        Vibrato::new(self.rate, self.depth)
    }
}

impl Default for VibratoConfig {
    fn default() -> Self {
        Self {
            rate: default_vibrato_rate(),
            depth: default_vibrato_depth(),
        }
    }
}

fn default_vibrato_rate() -> f64 {
    5.0
}
fn default_vibrato_depth() -> f64 {
    0.02
}

/// Scale render settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Length of each note in seconds (default: 0.5)
    #[serde(default = "default_note_duration")]
    pub note_duration: f64,

    /// Silence between notes in seconds (default: 0)
    #[serde(default)]
    pub gap: f64,

    /// Per-note envelope
    #[serde(default)]
    pub envelope: ScaleEnvelopeConfig,

    /// Notes in playback order (default: C major, C4 to C5)
    #[serde(default = "NoteTable::c_major")]
    pub notes: NoteTable,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            note_duration: default_note_duration(),
            gap: 0.0,
            envelope: ScaleEnvelopeConfig::default(),
            notes: NoteTable::c_major(),
        }
    }
}

fn default_note_duration() -> f64 {
    0.5
}

/// ADSR settings for scale notes
///
/// Same keys as `EnvelopeConfig`, but missing keys take the shorter scale
/// defaults (0.05 / 0.1 / 0.6 / 0.2) so they fit a 0.5 s note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleEnvelopeConfig {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
    pub overflow: OverflowPolicy,
}

impl ScaleEnvelopeConfig {
    /// Convert to validated ADSR parameters
    pub fn to_adsr(&self) -> crate::error::Result<Adsr> {
        Adsr::new(self.attack, self.decay, self.sustain, self.release)
    }
}

impl Default for ScaleEnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: 0.05,
            decay: 0.1,
            sustain: 0.6,
            release: 0.2,
            overflow: OverflowPolicy::Fail,
        }
    }
}

/// Output file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the files are written to (default: current directory)
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Enveloped tone file name
    #[serde(default = "default_tone_file")]
    pub tone: String,

    /// Tone with vibrato file name
    #[serde(default = "default_vibrato_file")]
    pub vibrato: String,

    /// Scale file name
    #[serde(default = "default_scale_file")]
    pub scale: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            tone: default_tone_file(),
            vibrato: default_vibrato_file(),
            scale: default_scale_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_tone_file() -> String {
    "synth_adsr.wav".to_string()
}
fn default_vibrato_file() -> String {
    "synth_vibrato.wav".to_string()
}
fn default_scale_file() -> String {
    "synth_scale.wav".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LiltConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.tone.frequency, 440.0);
        assert_eq!(config.scale.notes.len(), 8);
    }

    #[test]
    fn test_default_audio_config() {
        let yaml = "{}";
        let config: AudioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sample_rate, 44100);
    }

    #[test]
    fn test_envelope_config() {
        let yaml = r#"
attack: 0.01
sustain: 0.5
overflow: redistribute
"#;
        let config: EnvelopeConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.attack, 0.01);
        assert_eq!(config.decay, 0.2); // default
        assert_eq!(config.sustain, 0.5);
        assert_eq!(config.overflow, OverflowPolicy::Redistribute);
        assert_eq!(config.to_adsr().unwrap().sustain(), 0.5);
    }

    #[test]
    fn test_scale_config_defaults() {
        let config: ScaleConfig = serde_yaml::from_str("note_duration: 0.25").unwrap();
        assert_eq!(config.note_duration, 0.25);
        assert_eq!(config.envelope.attack, 0.05);
        assert_eq!(config.envelope.sustain, 0.6);
        assert_eq!(config.notes, NoteTable::c_major());
    }

    #[test]
    fn test_partial_scale_envelope_keeps_scale_defaults() {
        let yaml = r#"
envelope:
  attack: 0.01
"#;
        let config: ScaleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.envelope.attack, 0.01);
        assert_eq!(config.envelope.decay, 0.1);
        assert_eq!(config.envelope.sustain, 0.6);
        assert_eq!(config.envelope.release, 0.2);
        assert_eq!(config.envelope.overflow, OverflowPolicy::Fail);
    }

    #[test]
    fn test_scale_notes_keep_order() {
        let yaml = r#"
notes:
  - { name: G4, frequency: 392.0 }
  - { name: E4, frequency: 329.63 }
  - { name: C4, frequency: 261.63 }
"#;
        let config: ScaleConfig = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = config.notes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["G4", "E4", "C4"]);
    }

    #[test]
    fn test_invalid_sample_rate() {
        let mut config = LiltConfig::default();
        config.audio.sample_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_low_sample_rate_accepted() {
        let mut config = LiltConfig::default();
        config.audio.sample_rate = 1000;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_sustain() {
        let mut config = LiltConfig::default();
        config.envelope.sustain = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_tone_duration() {
        let mut config = LiltConfig::default();
        config.tone.duration = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_vibrato_depth() {
        let mut config = LiltConfig::default();
        config.vibrato.depth = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_scale() {
        let mut config = LiltConfig::default();
        config.scale.notes = NoteTable::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_note_frequency() {
        let mut config = LiltConfig::default();
        config.scale.notes = NoteTable::new().with("bad", -1.0);
        assert!(config.validate().is_err());
    }
}
