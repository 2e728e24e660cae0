//! Named notes and ordered note tables

use crate::error::{Result, SynthError};
use serde::{Deserialize, Serialize};

/// A named pitch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    /// Frequency in Hz; 0 is a rest
    pub frequency: f64,
}

impl Note {
    /// Create a new note
    pub fn new(name: impl Into<String>, frequency: f64) -> Self {
        Self {
            name: name.into(),
            frequency,
        }
    }

    /// A silent note
    pub fn rest() -> Self {
        Self::new("rest", 0.0)
    }

    /// Check if this note is silent
    pub fn is_rest(&self) -> bool {
        self.frequency == 0.0
    }

    /// Reject negative or non-finite frequencies
    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency < 0.0 {
            return Err(SynthError::invalid(format!(
                "note '{}' has invalid frequency {}",
                self.name, self.frequency
            )));
        }
        Ok(())
    }
}

/// An ordered list of notes; insertion order is playback order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteTable {
    notes: Vec<Note>,
}

impl NoteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { notes: Vec::new() }
    }

    /// Build a table from (name, frequency) pairs, keeping their order
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            notes: pairs
                .into_iter()
                .map(|(name, frequency)| Note::new(name, frequency))
                .collect(),
        }
    }

    /// One octave of C major, C4 to C5
    pub fn c_major() -> Self {
        Self::from_pairs([
            ("C4", 261.63),
            ("D4", 293.66),
            ("E4", 329.63),
            ("F4", 349.23),
            ("G4", 392.00),
            ("A4", 440.00),
            ("B4", 493.88),
            ("C5", 523.25),
        ])
    }

    /// Append a note (builder pattern)
    pub fn with(mut self, name: impl Into<String>, frequency: f64) -> Self {
        self.notes.push(Note::new(name, frequency));
        self
    }

    /// First note with the given name
    pub fn get(&self, name: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.name == name)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl<'a> IntoIterator for &'a NoteTable {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

impl From<Vec<Note>> for NoteTable {
    fn from(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_major_order() {
        let table = NoteTable::c_major();
        let names: Vec<&str> = table.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["C4", "D4", "E4", "F4", "G4", "A4", "B4", "C5"]);
        assert_eq!(table.get("A4").map(|n| n.frequency), Some(440.0));
    }

    #[test]
    fn test_insertion_order_kept() {
        let table = NoteTable::new()
            .with("G4", 392.0)
            .with("C4", 261.63)
            .with("G4", 392.0);

        assert_eq!(table.len(), 3);
        assert_eq!(table.notes()[0].name, "G4");
        assert_eq!(table.notes()[1].name, "C4");
        assert_eq!(table.notes()[2].name, "G4");
    }

    #[test]
    fn test_note_validation() {
        assert!(Note::new("A4", 440.0).validate().is_ok());
        assert!(Note::rest().validate().is_ok());
        assert!(Note::rest().is_rest());
        assert!(Note::new("bad", -1.0).validate().is_err());
        assert!(Note::new("bad", f64::NAN).validate().is_err());
    }

    #[test]
    fn test_note_table_yaml() {
        let yaml = r#"
- name: E4
  frequency: 329.63
- name: C4
  frequency: 261.63
"#;
        let table: NoteTable = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.notes()[0], Note::new("E4", 329.63));
        assert_eq!(table.notes()[1], Note::new("C4", 261.63));
    }
}
