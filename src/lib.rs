//! `setlist-midi` - `Planning Center` service plan to MIDI setlist.
//!
//! Finds a service plan, collects its songs with tempo, meter and key, and
//! writes a Standard MIDI File with one program change per song for
//! lighting and clock hardware to follow.

// Re-export public modules for use in integration tests and as a library
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod midi;
pub mod planning_center;
pub mod setlist;
