//! Host OS and the per-user directories gvoice reads and writes.

use std::fmt;
use std::path::PathBuf;

use crate::constants::APP_NAME;
use crate::error::{GvError, GvResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The OS this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// `<user data dir>/gvoice`, e.g. `~/.local/share/gvoice` on Linux.
    pub fn data_dir() -> GvResult<PathBuf> {
        app_dir(dirs::data_dir(), "data")
    }

    /// `<user config dir>/gvoice`, e.g. `~/.config/gvoice` on Linux.
    pub fn config_dir() -> GvResult<PathBuf> {
        app_dir(dirs::config_dir(), "config")
    }

    /// Default home of the rolling log files.
    pub fn log_dir() -> GvResult<PathBuf> {
        Ok(Self::data_dir()?.join("logs"))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        }
    }
}

fn app_dir(base: Option<PathBuf>, kind: &str) -> GvResult<PathBuf> {
    base.map(|b| b.join(APP_NAME))
        .ok_or_else(|| GvError::Config(format!("could not determine the user {kind} directory")))
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
