//! Lilt - Deterministic tone and scale synthesis
//!
//! Generates sine tones, shapes them with ADSR envelopes, adds vibrato,
//! strings notes into scales and writes the result as 16-bit PCM WAV.

pub mod config;
pub mod engine;
pub mod error;
pub mod synth;

pub use config::LiltConfig;
pub use engine::Engine;
pub use error::{Result, SynthError};
