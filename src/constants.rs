//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Planning Center API constants.
pub mod api {
    /// Root of the Planning Center Services v2 API.
    pub const DEFAULT_BASE_URL: &str = "https://api.planningcenteronline.com/services/v2";

    /// Sort key requested for plan listings.
    pub const PLAN_ORDER: &str = "sort_date";

    /// Side-loaded resources requested alongside plan items.
    pub const ITEM_INCLUDES: &str = "arrangement,key,song";

    /// Item type (case-insensitive) that marks a song line in a plan.
    pub const SONG_ITEM_TYPE: &str = "song";

    /// Service type looked up when none is configured.
    pub const DEFAULT_SERVICE_TYPE: &str = "Celebration Service";
}

/// MIDI output constants.
pub mod midi {
    /// Ticks per quarter note written in the file header.
    pub const TICKS_PER_QUARTER: u16 = 480;

    /// Fixed spacing between consecutive song markers.
    pub const SONG_SPACING_TICKS: u32 = 480;

    /// Tempo written at the start of the track.
    pub const DEFAULT_BPM: u32 = 120;

    /// Label stored in the sequence-name meta event.
    pub const SEQUENCE_NAME: &str = "Celebration Service Setlist";

    /// Number of distinct MIDI program numbers.
    pub const MAX_PROGRAMS: usize = 128;

    /// Number of MIDI channels.
    pub const CHANNELS: u8 = 16;

    /// Output file written when none is configured.
    pub const DEFAULT_OUTPUT: &str = "weekly_setlist_with_meta.mid";
}
