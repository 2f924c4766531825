//! Host-communication configuration parsing and validation.
//!
//! The original firmware selected these capabilities with build-time
//! options; here they are one [`HostConfig`] struct parsed from TOML and
//! evaluated once at startup. Every field has a default, so an empty
//! config file yields a fully featured image.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{AppError, Result};

/// Wire names for the named single-shot host events.
///
/// Each field is the fragment sent after the `//action:` marker. Setting a
/// field to the empty string in the TOML removes the event from the image
/// entirely (normalised to `None` during validation), matching the
/// original's ability to omit any subset of these.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ActionNames {
    /// Event emitted when the firmware halts on an unrecoverable fault.
    #[serde(default = "default_kill")]
    pub kill: Option<String>,
    /// Event asking the host to pause the print stream.
    #[serde(default = "default_pause")]
    pub pause: Option<String>,
    /// Event reporting that the printer has paused on its own.
    #[serde(default = "default_paused")]
    pub paused: Option<String>,
    /// Event asking the host to resume the print stream.
    #[serde(default = "default_resume")]
    pub resume: Option<String>,
    /// Event reporting that the printer has resumed on its own.
    #[serde(default = "default_resumed")]
    pub resumed: Option<String>,
    /// Event asking the host to cancel the print job.
    #[serde(default = "default_cancel")]
    pub cancel: Option<String>,
}

impl Default for ActionNames {
    fn default() -> Self {
        Self {
            kill: default_kill(),
            pause: default_pause(),
            paused: default_paused(),
            resume: default_resume(),
            resumed: default_resumed(),
            cancel: default_cancel(),
        }
    }
}

fn default_kill() -> Option<String> {
    Some("poweroff".into())
}

fn default_pause() -> Option<String> {
    Some("pause".into())
}

fn default_paused() -> Option<String> {
    Some("paused".into())
}

fn default_resume() -> Option<String> {
    Some("resume".into())
}

fn default_resumed() -> Option<String> {
    Some("resumed".into())
}

fn default_cancel() -> Option<String> {
    Some("cancel".into())
}

fn default_true() -> bool {
    true
}

/// Global host-communication configuration parsed from `hostlink.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct HostConfig {
    /// Master switch for the whole notifier subsystem.
    #[serde(default = "default_true")]
    pub host_actions: bool,
    /// Master switch for the interactive prompt subsystem.
    #[serde(default = "default_true")]
    pub prompt_support: bool,
    /// Filament-runout sensor integration.
    #[serde(default = "default_true")]
    pub filament_sensor: bool,
    /// Advanced pause-flow integration (pause responses, resume injection).
    #[serde(default = "default_true")]
    pub advanced_pause: bool,
    /// Wait-for-user flag integration.
    #[serde(default = "default_true")]
    pub resume_continue: bool,
    /// Wire names for the named single-shot events.
    #[serde(default)]
    pub actions: ActionNames,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host_actions: true,
            prompt_support: true,
            filament_sensor: true,
            advanced_pause: true,
            resume_continue: true,
            actions: ActionNames::default(),
        }
    }
}

impl HostConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and normalise it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&mut self) -> Result<()> {
        if self.prompt_support && !self.host_actions {
            return Err(AppError::Config(
                "prompt_support requires host_actions (prompts ride on the notifier)".into(),
            ));
        }

        // An empty wire name means the event is omitted from the image.
        for slot in [
            &mut self.actions.kill,
            &mut self.actions.pause,
            &mut self.actions.paused,
            &mut self.actions.resume,
            &mut self.actions.resumed,
            &mut self.actions.cancel,
        ] {
            if slot.as_deref().is_some_and(str::is_empty) {
                *slot = None;
            }
        }

        Ok(())
    }
}
