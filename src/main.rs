//! Lilt - Deterministic tone and scale synthesis

use anyhow::{Context, Result};
use clap::Parser;
use lilt::config::{self, LiltConfig};
use lilt::engine::{self, Engine};
use std::path::Path;

mod cli;

use cli::{Cli, Commands};

/// Load and validate a config file, or fall back to the defaults
fn load(path: Option<&Path>) -> Result<LiltConfig> {
    match path {
        Some(path) => {
            println!("Loading configuration from {:?}...", path);
            config::load_config(path)
        }
        None => Ok(LiltConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Tone {
            config: config_path,
            output,
            frequency,
            duration,
            vibrato,
        } => {
            let mut cfg = load(config_path.as_deref())?;
            if let Some(frequency) = frequency {
                cfg.tone.frequency = frequency;
            }
            if let Some(duration) = duration {
                cfg.tone.duration = duration;
            }
            cfg.validate()?;

            println!("Rendering tone:");
            println!("  Frequency: {} Hz", cfg.tone.frequency);
            println!("  Duration: {} s", cfg.tone.duration);
            println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
            println!(
                "  Envelope: attack {}s, decay {}s, sustain {}, release {}s",
                cfg.envelope.attack, cfg.envelope.decay, cfg.envelope.sustain, cfg.envelope.release
            );
            if vibrato {
                println!(
                    "  Vibrato: {} Hz, depth {:.0}%",
                    cfg.vibrato.rate,
                    cfg.vibrato.depth * 100.0
                );
            }

            let engine = Engine::new(cfg);
            let signal = if vibrato {
                engine.render_vibrato()?
            } else {
                engine.render_tone()?
            };
            engine::write_wav(&output, &signal, engine.sample_rate())
                .with_context(|| format!("failed to write {:?}", output))?;
            println!("Recorded {} samples to {:?}", signal.len(), output);
        }

        Commands::Scale {
            config: config_path,
            output,
            note_duration,
        } => {
            let mut cfg = load(config_path.as_deref())?;
            if let Some(note_duration) = note_duration {
                cfg.scale.note_duration = note_duration;
            }
            cfg.validate()?;

            println!("Rendering scale:");
            for note in &cfg.scale.notes {
                println!("  {}: {} Hz", note.name, note.frequency);
            }

            let engine = Engine::new(cfg);
            let signal = engine.render_scale()?;
            engine::write_wav(&output, &signal, engine.sample_rate())
                .with_context(|| format!("failed to write {:?}", output))?;
            println!(
                "Recorded {:.2}s to {:?}",
                signal.duration_secs(engine.sample_rate()),
                output
            );
        }

        Commands::Render { config: config_path } => {
            let cfg = load(config_path.as_deref())?;
            cfg.validate()?;

            println!("Rendering to {:?}...", cfg.output.dir);
            let engine = Engine::new(cfg);
            for render in engine.write_all()? {
                println!(
                    "  {}: {} samples -> {:?}",
                    render.kind.name(),
                    render.signal.len(),
                    render.path
                );
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!(
                        "  Tone: {} Hz for {} s ({:?})",
                        cfg.tone.frequency, cfg.tone.duration, cfg.tone.waveform
                    );
                    println!(
                        "  Envelope: {} / {} / {} / {} ({:?} on overflow)",
                        cfg.envelope.attack,
                        cfg.envelope.decay,
                        cfg.envelope.sustain,
                        cfg.envelope.release,
                        cfg.envelope.overflow
                    );
                    println!("  Vibrato: {} Hz, depth {}", cfg.vibrato.rate, cfg.vibrato.depth);
                    println!(
                        "  Scale: {} notes, {} s each",
                        cfg.scale.notes.len(),
                        cfg.scale.note_duration
                    );
                    for note in &cfg.scale.notes {
                        println!("    - {} ({} Hz)", note.name, note.frequency);
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../lilt.example.yaml");

            let path = "lilt.yaml";
            if Path::new(path).exists() {
                println!("lilt.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created lilt.yaml with example configuration.");
            }
        }
    }

    Ok(())
}
