use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chat_core::OrderingPolicy;
use chat_logging::{chat_info, chat_warn, LogDestination};
use ron::error::SpannedError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SETTINGS_FILENAME: &str = "chat_client.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ordering {
    #[default]
    LastResolvedWins,
    LatestIssuedOnly,
}

/// User-editable client settings. The backend endpoint is fixed and not listed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub ordering: Ordering,
    pub log_to_file: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            ordering: Ordering::default(),
            log_to_file: true,
        }
    }
}

impl ClientSettings {
    pub fn ordering_policy(&self) -> OrderingPolicy {
        match self.ordering {
            Ordering::LastResolvedWins => OrderingPolicy::LastResolvedWins,
            Ordering::LatestIssuedOnly => OrderingPolicy::LatestIssuedOnly,
        }
    }

    /// Terminal output is reserved for the conversation, so logging is file-only or off.
    pub fn log_destination(&self) -> Option<LogDestination> {
        self.log_to_file.then_some(LogDestination::File)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: SpannedError,
    },
}

/// Reads `{dir}/chat_client.ron`. A missing file yields defaults.
pub fn read_settings(dir: &Path) -> Result<ClientSettings, SettingsError> {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(ClientSettings::default());
        }
        Err(source) => return Err(SettingsError::Read { path, source }),
    };

    ron::from_str(&content).map_err(|source| SettingsError::Parse { path, source })
}

/// Called once logging is up, so a broken file is reported rather than lost.
pub fn report_settings(loaded: &Result<ClientSettings, SettingsError>) {
    match loaded {
        Ok(settings) => chat_info!("Using settings {:?}", settings),
        Err(err) => chat_warn!("{}; using defaults", err),
    }
}
