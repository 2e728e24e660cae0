//! WAV file recorder
//!
//! Writes signals as canonical 16-bit mono PCM WAV files: a 44-byte RIFF
//! header followed by little-endian samples.

use crate::error::{Result, SynthError};
use crate::synth::Signal;
use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Size of the canonical RIFF/WAVE header in bytes
pub const HEADER_LEN: u64 = 44;

/// Container metadata for a PCM WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Mono 16-bit PCM at the given sample rate
    pub fn mono16(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
        }
    }

    /// Only mono 16-bit PCM is written
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::invalid("sample rate must be greater than 0"));
        }
        if self.channels != 1 {
            return Err(SynthError::invalid(format!(
                "only mono output is supported, got {} channels",
                self.channels
            )));
        }
        if self.bits_per_sample != 16 {
            return Err(SynthError::invalid(format!(
                "only 16-bit output is supported, got {} bits",
                self.bits_per_sample
            )));
        }
        Ok(())
    }

    /// Bytes per sample frame
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    /// Bytes per second of audio
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Size of the data chunk holding `frames` sample frames
    pub fn data_len(&self, frames: usize) -> u64 {
        frames as u64 * self.block_align() as u64
    }

    fn spec(&self) -> WavSpec {
        WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: SampleFormat::Int,
        }
    }
}

fn io_error(path: &Path, err: hound::Error) -> SynthError {
    let source = match err {
        hound::Error::IoError(e) => e,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
    };
    SynthError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// WAV file recorder
///
/// The file is closed when the recorder is finalized or dropped, on both
/// success and error paths. A dropped recorder leaves a file whose contents
/// should not be trusted.
pub struct Recorder {
    writer: WavWriter<BufWriter<File>>,
    path: PathBuf,
    format: WavFormat,
    samples_written: u64,
}

impl Recorder {
    /// Create a new recorder
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `format` - Container metadata (mono 16-bit only)
    pub fn create(path: &Path, format: WavFormat) -> Result<Self> {
        format.validate()?;

        let writer = WavWriter::create(path, format.spec()).map_err(|e| io_error(path, e))?;

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            format,
            samples_written: 0,
        })
    }

    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// Get the number of samples written
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Get the duration recorded in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples_written as f64 / self.format.sample_rate as f64
    }

    /// Write a single sample
    pub fn write_sample(&mut self, sample: i16) -> Result<()> {
        self.writer
            .write_sample(sample)
            .map_err(|e| io_error(&self.path, e))?;
        self.samples_written += 1;
        Ok(())
    }

    /// Write every sample of a signal, in order
    pub fn write_signal(&mut self, signal: &Signal) -> Result<()> {
        for &sample in signal.samples() {
            self.write_sample(sample)?;
        }
        Ok(())
    }

    /// Patch the header sizes, flush and close the file
    pub fn finalize(self) -> Result<()> {
        let Self { writer, path, .. } = self;
        writer.finalize().map_err(|e| io_error(&path, e))
    }
}

/// Write a signal as a mono 16-bit WAV file
pub fn write_wav(path: &Path, signal: &Signal, sample_rate: u32) -> Result<()> {
    write_wav_with_format(path, signal, WavFormat::mono16(sample_rate))
}

/// Write a signal with explicit container metadata
pub fn write_wav_with_format(path: &Path, signal: &Signal, format: WavFormat) -> Result<()> {
    let mut recorder = Recorder::create(path, format)?;
    recorder.write_signal(signal)?;
    recorder.finalize()?;

    info!(
        "wrote {} samples ({:.2}s) to {:?}",
        signal.len(),
        signal.duration_secs(format.sample_rate),
        path
    );
    Ok(())
}
