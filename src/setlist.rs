//! Setlist export pipeline.
//!
//! Resolves the service type, picks the plan, extracts its songs and writes
//! the MIDI file. A missing plan or an empty plan ends the run before any
//! file is touched.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::midi::Sequence;
use crate::planning_center::{
    fetch_plan_songs, resolve_service_type, select_plan, Plan, PlanSelection, PlanningCenterApi,
    ServiceType, Song,
};

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No plan matched the selection
    NoPlan {
        /// The service type that was searched
        service_type: ServiceType,
    },
    /// The plan was found but has no song items
    NoSongs {
        /// The selected plan
        plan: Plan,
    },
    /// The MIDI file was written
    Written {
        /// The selected plan
        plan: Plan,
        /// Songs in setlist order; index is the program number
        songs: Vec<Song>,
        /// Where the file was written
        path: PathBuf,
    },
}

/// Run the whole export for `selection`
pub async fn run(
    api: &dyn PlanningCenterApi,
    config: &Config,
    selection: PlanSelection,
) -> Result<Outcome> {
    let service_type = resolve_service_type(api, &config.target_service_type_name).await?;

    let person_id = match selection {
        PlanSelection::NextScheduled { .. } => config.require_person_id()?,
        PlanSelection::ByDate(_) => config.person_id.as_str(),
    };

    let Some(plan) = select_plan(api, &service_type.id, person_id, selection).await? else {
        return Ok(Outcome::NoPlan { service_type });
    };

    let songs = fetch_plan_songs(api, &service_type.id, &plan.id).await?;
    if songs.is_empty() {
        return Ok(Outcome::NoSongs { plan });
    }

    Sequence::from_songs(&songs, config.midi_channel)?.write_to(&config.output_path)?;
    tracing::info!(path = %config.output_path.display(), songs = songs.len(), "MIDI file created");

    Ok(Outcome::Written { plan, songs, path: config.output_path.clone() })
}

/// One line of the setlist printout; absent metadata prints blank
pub fn format_song_line(position: usize, song: &Song) -> String {
    let bpm = song.bpm.map(|b| b.to_string()).unwrap_or_default();
    format!(
        "{position}. {} | BPM:{bpm} | TS:{} | Key:{}",
        song.title,
        song.meter.as_deref().unwrap_or_default(),
        song.key.as_deref().unwrap_or_default(),
    )
}
