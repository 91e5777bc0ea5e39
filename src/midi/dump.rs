//! Human-readable listing of a MIDI file's events.

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::error::{Error, Result};

/// One line per event: absolute tick, delta and a short description
pub fn describe(bytes: &[u8]) -> Result<Vec<String>> {
    let smf = Smf::parse(bytes).map_err(|e| Error::Midi(format!("Not a readable MIDI file: {e}")))?;

    let timing = match smf.header.timing {
        Timing::Metrical(tpq) => format!("{} ticks/quarter", tpq.as_int()),
        Timing::Timecode(fps, sub) => format!("{fps:?} timecode, {sub} subframes"),
    };
    let mut lines = vec![format!(
        "format {:?}, {} track(s), {timing}",
        smf.header.format,
        smf.tracks.len()
    )];

    for (n, track) in smf.tracks.iter().enumerate() {
        lines.push(format!("track {n}:"));
        let mut tick = 0u64;
        for event in track {
            let delta = event.delta.as_int();
            tick += u64::from(delta);
            lines.push(format!("  {tick:>6} (+{delta:<4}) {}", describe_kind(&event.kind)));
        }
    }

    Ok(lines)
}

fn describe_kind(kind: &TrackEventKind<'_>) -> String {
    match kind {
        TrackEventKind::Midi { channel, message: MidiMessage::ProgramChange { program } } => {
            format!("program change ch {} -> {}", channel.as_int(), program.as_int())
        }
        TrackEventKind::Midi { channel, message } => format!("midi ch {} {message:?}", channel.as_int()),
        TrackEventKind::Meta(MetaMessage::TrackName(name)) => {
            format!("sequence name {:?}", String::from_utf8_lossy(name))
        }
        TrackEventKind::Meta(MetaMessage::Tempo(t)) => {
            let micros = t.as_int();
            format!("tempo {micros} us/quarter ({} bpm)", 60_000_000 / micros.max(1))
        }
        TrackEventKind::Meta(MetaMessage::EndOfTrack) => "end of track".to_string(),
        TrackEventKind::Meta(other) => format!("meta {other:?}"),
        TrackEventKind::SysEx(data) | TrackEventKind::Escape(data) => format!("sysex {} bytes", data.len()),
    }
}
