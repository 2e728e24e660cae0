//! Render engine for Lilt
//!
//! Turns a validated configuration into signals and WAV files.

mod recorder;

pub use recorder::{write_wav, write_wav_with_format, Recorder, WavFormat, HEADER_LEN};

use crate::config::LiltConfig;
use crate::error::Result;
use crate::synth::{Note, Sequencer, Signal};
use log::info;
use std::path::PathBuf;

/// The renders produced from one configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    /// Single tone shaped by the envelope
    Tone,
    /// The enveloped tone with vibrato
    Vibrato,
    /// The note table played in order
    Scale,
}

impl RenderKind {
    pub const ALL: [RenderKind; 3] = [RenderKind::Tone, RenderKind::Vibrato, RenderKind::Scale];

    pub fn name(&self) -> &'static str {
        match self {
            RenderKind::Tone => "tone",
            RenderKind::Vibrato => "vibrato",
            RenderKind::Scale => "scale",
        }
    }
}

/// A rendered signal and where it belongs
#[derive(Debug, Clone)]
pub struct Render {
    pub kind: RenderKind,
    pub path: PathBuf,
    pub signal: Signal,
}

/// The main render engine
pub struct Engine {
    config: LiltConfig,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: LiltConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &LiltConfig {
        &self.config
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.config.audio.sample_rate
    }

    fn tone_sequencer(&self) -> Result<Sequencer> {
        let envelope = &self.config.envelope;
        Ok(Sequencer::new(self.sample_rate(), envelope.to_adsr()?)
            .with_waveform(self.config.tone.waveform)
            .with_policy(envelope.overflow))
    }

    fn scale_sequencer(&self) -> Result<Sequencer> {
        let scale = &self.config.scale;
        Ok(Sequencer::new(self.sample_rate(), scale.envelope.to_adsr()?)
            .with_waveform(self.config.tone.waveform)
            .with_policy(scale.envelope.overflow)
            .with_gap(scale.gap))
    }

    fn tone_note(&self) -> Note {
        Note::new("tone", self.config.tone.frequency)
    }

    /// Render the enveloped tone
    pub fn render_tone(&self) -> Result<Signal> {
        self.tone_sequencer()?
            .note(&self.tone_note(), self.config.tone.duration)
    }

    /// Render the enveloped tone with vibrato
    pub fn render_vibrato(&self) -> Result<Signal> {
        self.tone_sequencer()?
            .with_vibrato(self.config.vibrato.to_vibrato()?)
            .note(&self.tone_note(), self.config.tone.duration)
    }

    /// Render the note table as one continuous voice
    pub fn render_scale(&self) -> Result<Signal> {
        let scale = &self.config.scale;
        self.scale_sequencer()?.voice(&scale.notes, scale.note_duration)
    }

    /// Render one kind of output
    pub fn render(&self, kind: RenderKind) -> Result<Signal> {
        match kind {
            RenderKind::Tone => self.render_tone(),
            RenderKind::Vibrato => self.render_vibrato(),
            RenderKind::Scale => self.render_scale(),
        }
    }

    /// Configured output path for a kind of render
    pub fn output_path(&self, kind: RenderKind) -> PathBuf {
        let output = &self.config.output;
        let file = match kind {
            RenderKind::Tone => &output.tone,
            RenderKind::Vibrato => &output.vibrato,
            RenderKind::Scale => &output.scale,
        };
        output.dir.join(file)
    }

    /// Render every output; fails before anything is written if any render fails
    pub fn render_all(&self) -> Result<Vec<Render>> {
        RenderKind::ALL
            .iter()
            .map(|&kind| -> Result<Render> {
                Ok(Render {
                    kind,
                    path: self.output_path(kind),
                    signal: self.render(kind)?,
                })
            })
            .collect()
    }

    /// Render every output and write each to its configured path
    pub fn write_all(&self) -> Result<Vec<Render>> {
        let renders = self.render_all()?;
        for render in &renders {
            write_wav(&render.path, &render.signal, self.sample_rate())?;
            info!("{} render written to {:?}", render.kind.name(), render.path);
        }
        Ok(renders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;
    use crate::synth::{apply_adsr, apply_vibrato, generate_sine_wave, Adsr, OverflowPolicy};
    use tempfile::tempdir;

    fn test_config() -> LiltConfig {
        LiltConfig::default()
    }

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new(test_config());
        assert_eq!(engine.sample_rate(), 44100);
    }

    #[test]
    fn test_render_tone() {
        let engine = Engine::new(test_config());
        let tone = engine.render_tone().unwrap();

        let raw = generate_sine_wave(440.0, 2.0, 44100).unwrap();
        let expected = apply_adsr(&raw, 44100, &Adsr::default()).unwrap();
        assert_eq!(tone.len(), 88200);
        assert_eq!(tone, expected);
    }

    #[test]
    fn test_render_vibrato() {
        let engine = Engine::new(test_config());
        let tone = engine.render_tone().unwrap();
        let vibrato = engine.render_vibrato().unwrap();

        assert_eq!(vibrato, apply_vibrato(&tone, 44100, 5.0, 0.02).unwrap());
    }

    #[test]
    fn test_render_scale() {
        let engine = Engine::new(test_config());
        let scale = engine.render_scale().unwrap();
        assert_eq!(scale.len(), 176400);
    }

    #[test]
    fn test_scale_overflow_fails() {
        let mut config = test_config();
        config.scale.note_duration = 0.1;
        let engine = Engine::new(config);
        assert!(matches!(
            engine.render_scale(),
            Err(SynthError::EnvelopeOverflow { .. })
        ));
    }

    #[test]
    fn test_scale_with_partial_envelope_renders() {
        let yaml = "scale:\n  envelope:\n    attack: 0.01\n";
        let config: LiltConfig = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();

        let engine = Engine::new(config);
        assert_eq!(engine.render_scale().unwrap().len(), 176400);
    }

    #[test]
    fn test_scale_overflow_redistributes() {
        let mut config = test_config();
        config.scale.note_duration = 0.1;
        config.scale.envelope.overflow = OverflowPolicy::Redistribute;
        let engine = Engine::new(config);
        assert_eq!(engine.render_scale().unwrap().len(), 8 * 4410);
    }

    #[test]
    fn test_output_paths() {
        let mut config = test_config();
        config.output.dir = PathBuf::from("/tmp/renders");
        let engine = Engine::new(config);

        assert_eq!(
            engine.output_path(RenderKind::Tone),
            PathBuf::from("/tmp/renders/synth_adsr.wav")
        );
        assert_eq!(
            engine.output_path(RenderKind::Vibrato),
            PathBuf::from("/tmp/renders/synth_vibrato.wav")
        );
        assert_eq!(
            engine.output_path(RenderKind::Scale),
            PathBuf::from("/tmp/renders/synth_scale.wav")
        );
    }

    #[test]
    fn test_write_all() {
        let dir = tempdir().unwrap();
        let mut config = test_config();
        config.output.dir = dir.path().to_path_buf();
        let engine = Engine::new(config);

        let renders = engine.write_all().unwrap();
        assert_eq!(renders.len(), 3);

        let sizes: Vec<u64> = renders
            .iter()
            .map(|r| std::fs::metadata(&r.path).unwrap().len())
            .collect();
        assert_eq!(sizes, [176444, 176444, 352844]);
    }

    #[test]
    fn test_write_all_writes_nothing_on_render_failure() {
        let dir = tempdir().unwrap();
        let mut config = test_config();
        config.output.dir = dir.path().to_path_buf();
        config.scale.note_duration = 0.1;
        let engine = Engine::new(config);

        assert!(engine.write_all().is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
