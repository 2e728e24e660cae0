//! Note sequencing
//!
//! Each note is rendered on its own (oscillator, envelope, optional vibrato)
//! and the results are joined end to end in the order given.

use super::envelope::{Adsr, Envelope, OverflowPolicy};
use super::note::Note;
use super::oscillator::{Oscillator, Waveform};
use super::signal::{check_sample_rate, samples_for, Signal};
use super::vibrato::Vibrato;
use crate::error::{Result, SynthError};
use log::debug;

/// Renders single notes and note sequences with shared settings
#[derive(Debug, Clone, PartialEq)]
pub struct Sequencer {
    sample_rate: u32,
    waveform: Waveform,
    envelope: Envelope,
    vibrato: Option<Vibrato>,
    gap: f64,
}

impl Sequencer {
    /// Create a sine sequencer with no vibrato and no gaps
    pub fn new(sample_rate: u32, adsr: Adsr) -> Self {
        Self {
            sample_rate,
            waveform: Waveform::Sine,
            envelope: Envelope::new(adsr),
            vibrato: None,
            gap: 0.0,
        }
    }

    /// Set the oscillator waveform
    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Set the envelope overflow policy
    pub fn with_policy(mut self, policy: OverflowPolicy) -> Self {
        self.envelope = self.envelope.with_policy(policy);
        self
    }

    /// Apply vibrato after the envelope
    pub fn with_vibrato(mut self, vibrato: Vibrato) -> Self {
        self.vibrato = Some(vibrato);
        self
    }

    /// Insert `seconds` of silence between consecutive notes
    pub fn with_gap(mut self, seconds: f64) -> Self {
        self.gap = seconds;
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn vibrato(&self) -> Option<&Vibrato> {
        self.vibrato.as_ref()
    }

    /// Render one note lasting `duration` seconds
    pub fn note(&self, note: &Note, duration: f64) -> Result<Signal> {
        note.validate()?;
        debug!("note {} ({} Hz) for {}s", note.name, note.frequency, duration);

        let raw =
            Oscillator::new(self.waveform, note.frequency, self.sample_rate).render(duration)?;
        let shaped = self.envelope.apply(&raw, self.sample_rate)?;
        match &self.vibrato {
            Some(vibrato) => vibrato.apply(&shaped, self.sample_rate),
            None => Ok(shaped),
        }
    }

    /// Render notes in order and join them; any failure aborts the whole voice
    pub fn voice<'a, I>(&self, notes: I, per_note_duration: f64) -> Result<Signal>
    where
        I: IntoIterator<Item = &'a Note>,
    {
        check_sample_rate(self.sample_rate)?;
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(SynthError::invalid(format!(
                "gap must be 0 seconds or more, got {}",
                self.gap
            )));
        }

        let gap = Signal::silence(samples_for(self.gap, self.sample_rate));
        let mut parts = Vec::new();
        for (index, note) in notes.into_iter().enumerate() {
            if index > 0 && !gap.is_empty() {
                parts.push(gap.clone());
            }
            parts.push(self.note(note, per_note_duration)?);
        }

        let voice = Signal::concat(&parts);
        debug!("voice of {} parts, {} samples", parts.len(), voice.len());
        Ok(voice)
    }
}

/// Render a single enveloped sine note
pub fn synthesize_note(
    note: &Note,
    duration: f64,
    adsr: &Adsr,
    sample_rate: u32,
) -> Result<Signal> {
    Sequencer::new(sample_rate, *adsr).note(note, duration)
}

/// Render a sequence of enveloped sine notes back to back
pub fn synthesize_voice(
    notes: &[Note],
    per_note_duration: f64,
    adsr: &Adsr,
    sample_rate: u32,
) -> Result<Signal> {
    Sequencer::new(sample_rate, *adsr).voice(notes, per_note_duration)
}
