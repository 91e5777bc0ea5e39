//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{api, midi};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// `Planning Center` Online application ID
    pub app_id: String,
    /// `Planning Center` Online secret
    pub secret: String,
    /// Person whose schedule drives the next-scheduled lookup
    pub person_id: String,
    /// Service type name, matched case-insensitively
    pub target_service_type_name: String,
    /// API root all request paths are appended to
    pub base_url: String,
    /// Where the MIDI file is written
    pub output_path: PathBuf,
    /// Channel for program-change events (0-15)
    pub midi_channel: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            secret: String::new(),
            person_id: String::new(),
            target_service_type_name: api::DEFAULT_SERVICE_TYPE.to_string(),
            base_url: api::DEFAULT_BASE_URL.to_string(),
            output_path: PathBuf::from(midi::DEFAULT_OUTPUT),
            midi_channel: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(app_id) = var("PCO_APP_ID") {
            config.app_id = app_id;
        }
        if let Some(secret) = var("PCO_SECRET") {
            config.secret = secret;
        }
        if let Some(person_id) = var("PCO_PERSON_ID") {
            config.person_id = person_id;
        }
        if let Some(name) = var("PCO_SERVICE_TYPE").filter(|s| !s.trim().is_empty()) {
            config.target_service_type_name = name;
        }
        if let Some(url) = var("PCO_BASE_URL").filter(|s| !s.trim().is_empty()) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = var("MIDI_OUTPUT").filter(|s| !s.trim().is_empty()) {
            config.output_path = PathBuf::from(shellexpand::tilde(&path).to_string());
        }
        if let Some(channel) = var("MIDI_CHANNEL") {
            config.midi_channel = parse_channel(&channel)?;
        }

        Ok(config)
    }

    /// Check if `Planning Center` is configured
    pub fn has_planning_center_credentials(&self) -> bool {
        !self.app_id.is_empty() && !self.secret.is_empty()
    }

    /// Ensure credentials are present before any request is made
    pub fn validate(&self) -> Result<()> {
        if !self.has_planning_center_credentials() {
            return Err(Error::config(
                "Planning Center credentials are missing",
                "Set PCO_APP_ID and PCO_SECRET environment variables",
            ));
        }
        Ok(())
    }

    /// The configured person id, required by the next-scheduled lookup
    pub fn require_person_id(&self) -> Result<&str> {
        if self.person_id.is_empty() {
            return Err(Error::config(
                "No person configured for the scheduled lookup",
                "Set PCO_PERSON_ID to the id from your Planning Center People profile",
            ));
        }
        Ok(&self.person_id)
    }
}

fn parse_channel(raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|c| *c < midi::CHANNELS)
        .ok_or_else(|| {
            Error::config(
                format!("MIDI_CHANNEL {raw:?} is not a channel number"),
                "Use a channel between 0 and 15",
            )
        })
}
