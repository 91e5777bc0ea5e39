//! MIDI setlist output.
//!
//! Builds the program-change sequence for a setlist and encodes it as a
//! Standard MIDI File.

/// Event listing for inspecting written files
pub mod dump;
/// Setlist sequence model and encoding
pub mod sequence;

pub use sequence::{bpm_to_micros_per_quarter, MidiEvent, Sequence};
