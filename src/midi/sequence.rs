//! Setlist MIDI sequence.
//!
//! A single track holding a name, a fixed tempo and one program change per
//! song. The program number is the song's position in the setlist; markers
//! are spaced a fixed number of ticks apart regardless of tempo.

use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use std::io::Write;
use std::path::Path;

use crate::constants::midi::{
    CHANNELS, DEFAULT_BPM, MAX_PROGRAMS, SEQUENCE_NAME, SONG_SPACING_TICKS, TICKS_PER_QUARTER,
};
use crate::error::{Error, Result};
use crate::planning_center::Song;

/// An event in the setlist track
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiEvent {
    /// Sequence/track name meta event
    SequenceName(String),
    /// Tempo meta event
    Tempo {
        /// Microseconds per quarter note
        micros_per_quarter: u32,
    },
    /// Program change marking one song
    ProgramChange {
        /// MIDI channel (0-15)
        channel: u8,
        /// Program number (0-127)
        program: u8,
        /// Ticks since the previous event
        delta: u32,
    },
    /// End-of-track meta event
    EndOfTrack,
}

impl MidiEvent {
    /// Ticks since the previous event in the track
    pub const fn delta(&self) -> u32 {
        match self {
            Self::ProgramChange { delta, .. } => *delta,
            _ => 0,
        }
    }

    fn to_track_event(&self) -> TrackEvent<'_> {
        let kind = match self {
            Self::SequenceName(name) => TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes())),
            Self::Tempo { micros_per_quarter } => {
                TrackEventKind::Meta(MetaMessage::Tempo(u24::new(*micros_per_quarter)))
            }
            Self::ProgramChange { channel, program, .. } => TrackEventKind::Midi {
                channel: u4::new(*channel),
                message: MidiMessage::ProgramChange { program: u7::new(*program) },
            },
            Self::EndOfTrack => TrackEventKind::Meta(MetaMessage::EndOfTrack),
        };
        TrackEvent { delta: u28::new(self.delta()), kind }
    }
}

/// Convert beats per minute to the tempo event's microseconds per quarter note
pub const fn bpm_to_micros_per_quarter(bpm: u32) -> u32 {
    60_000_000 / bpm
}

/// One-track setlist sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    ticks_per_quarter: u16,
    events: Vec<MidiEvent>,
}

impl Sequence {
    /// Build the setlist track for `songs` on `channel`.
    ///
    /// Fails when the channel is not 0-15 or when there are more songs than
    /// MIDI program numbers.
    pub fn from_songs(songs: &[Song], channel: u8) -> Result<Self> {
        if channel >= CHANNELS {
            return Err(Error::Midi(format!("channel {channel} is out of range 0-15")));
        }
        if songs.len() > MAX_PROGRAMS {
            return Err(Error::Midi(format!(
                "{} songs exceed the {MAX_PROGRAMS} available program numbers",
                songs.len()
            )));
        }

        let mut events = Vec::with_capacity(songs.len() + 3);
        events.push(MidiEvent::SequenceName(SEQUENCE_NAME.to_string()));
        events.push(MidiEvent::Tempo { micros_per_quarter: bpm_to_micros_per_quarter(DEFAULT_BPM) });

        let mut last_tick = 0;
        for program in (0u8..).take(songs.len()) {
            let tick = u32::from(program) * SONG_SPACING_TICKS;
            events.push(MidiEvent::ProgramChange { channel, program, delta: tick - last_tick });
            last_tick = tick;
        }
        events.push(MidiEvent::EndOfTrack);

        Ok(Self { ticks_per_quarter: TICKS_PER_QUARTER, events })
    }

    /// Events in track order
    pub fn events(&self) -> &[MidiEvent] {
        &self.events
    }

    /// Header resolution in ticks per quarter note
    pub const fn ticks_per_quarter(&self) -> u16 {
        self.ticks_per_quarter
    }

    fn to_smf(&self) -> Smf<'_> {
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(self.ticks_per_quarter)),
        ));
        smf.tracks.push(self.events.iter().map(MidiEvent::to_track_event).collect());
        smf
    }

    /// Encode as a format 0 Standard MIDI File
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.to_smf()
            .write(&mut buf)
            .map_err(|e| Error::Midi(format!("Failed to encode sequence: {e}")))?;
        Ok(buf)
    }

    /// Write the file to `path`, replacing anything already there
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        let mut file = fs_err::File::create(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        file.write_all(&bytes).map_err(|e| Error::io(e, path.to_path_buf()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote MIDI file");
        Ok(())
    }
}
