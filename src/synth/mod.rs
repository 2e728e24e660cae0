//! Synthesis pipeline
//!
//! Oscillator -> envelope -> vibrato -> sequencer. Every stage takes a
//! signal by reference and returns a new one.

mod envelope;
mod note;
mod oscillator;
mod signal;
mod vibrato;
mod voice;

pub use envelope::{apply_adsr, Adsr, Envelope, EnvelopeStage, OverflowPolicy, Segments};
pub use note::{Note, NoteTable};
pub use oscillator::{generate_sine_wave, Oscillator, Waveform};
pub use signal::{to_sample, Signal, FULL_SCALE};
pub use vibrato::{apply_vibrato, Vibrato};
pub use voice::{synthesize_note, synthesize_voice, Sequencer};
