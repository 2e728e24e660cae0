//! CLI interface for Lilt

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deterministic tone and scale synthesis to WAV
#[derive(Parser)]
#[command(name = "lilt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a single enveloped tone to a WAV file
    Tone {
        /// Configuration file path (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(short, long)]
        frequency: Option<f64>,

        /// Duration in seconds
        #[arg(short, long)]
        duration: Option<f64>,

        /// Apply the configured vibrato
        #[arg(long)]
        vibrato: bool,
    },

    /// Render the configured note table as one continuous voice
    Scale {
        /// Configuration file path (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Length of each note in seconds
        #[arg(short, long)]
        note_duration: Option<f64>,
    },

    /// Render the tone, vibrato and scale files named in the configuration
    Render {
        /// Configuration file path (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "lilt.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
