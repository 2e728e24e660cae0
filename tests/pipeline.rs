//! End-to-end checks of the public synthesis pipeline

use lilt::engine::write_wav;
use lilt::synth::{
    apply_adsr, apply_vibrato, generate_sine_wave, synthesize_note, synthesize_voice, Adsr,
    Envelope, Note, NoteTable,
};
use lilt::SynthError;
use tempfile::tempdir;

#[test]
fn adsr_scenario_on_two_second_tone() {
    let adsr = Adsr::default();
    let segments = Envelope::new(adsr).segments(88200, 44100).unwrap();

    assert_eq!(
        (segments.attack, segments.decay, segments.sustain, segments.release),
        (4410, 8820, 61740, 13230)
    );
    assert_eq!(segments.level(4410), 1.0);
}

#[test]
fn full_pipeline_stays_in_range_and_writes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tone.wav");

    let raw = generate_sine_wave(440.0, 2.0, 44100).unwrap();
    let shaped = apply_adsr(&raw, 44100, &Adsr::default()).unwrap();
    let modulated = apply_vibrato(&shaped, 44100, 5.0, 0.02).unwrap();

    assert_eq!(raw.len(), 88200);
    assert_eq!(shaped.len(), 88200);
    assert_eq!(modulated.len(), 88200);
    assert!(modulated.peak() <= 32768);

    write_wav(&path, &modulated, 44100).unwrap();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 176444);

    let reader = hound::WavReader::open(&path).unwrap();
    let samples: Vec<i16> = reader.into_samples().map(|s| s.unwrap()).collect();
    assert_eq!(samples.as_slice(), modulated.samples());
}

#[test]
fn scale_concatenates_every_note() {
    let table = NoteTable::c_major();
    let adsr = Adsr::new(0.05, 0.1, 0.6, 0.2).unwrap();

    let voice = synthesize_voice(table.notes(), 0.5, &adsr, 44100).unwrap();
    let total: usize = table
        .iter()
        .map(|note| synthesize_note(note, 0.5, &adsr, 44100).unwrap().len())
        .sum();

    assert_eq!(voice.len(), total);
    assert_eq!(voice.len(), 176400);
}

#[test]
fn invalid_note_leaves_no_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scale.wav");

    let notes = vec![Note::new("C4", 261.63), Note::new("broken", f64::INFINITY)];
    let result = synthesize_voice(&notes, 0.5, &Adsr::new(0.05, 0.1, 0.6, 0.2).unwrap(), 44100)
        .and_then(|voice| write_wav(&path, &voice, 44100));

    assert!(matches!(result, Err(SynthError::InvalidParameter(_))));
    assert!(!path.exists());
}
