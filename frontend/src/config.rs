//! Frontend configuration: `retroport.toml` plus command-line overrides.
//!
//! ```toml
//! machine = "probe"
//! scale = 1
//!
//! [video]
//! standard = "pal"        # pal | ntsc
//! resolution = "hires"    # hires | lores
//! allow_hz_change = true
//!
//! [ports]
//! port1 = "joystick"      # retropad | cd32 | joystick | keyboard | none
//! port2 = "joystick"
//! port3 = "none"
//! port4 = "none"
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use retroport_core::input::{ControllerClass, PortConfig, PortError};
use retroport_core::session::SessionConfig;
use retroport_core::video::{VideoConfig, VideoStandard};
use serde::Deserialize;
use thiserror::Error;

pub const MAX_SCALE: u32 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown controller class {name:?} for port {port}")]
    UnknownClass { port: usize, name: String },
    #[error(transparent)]
    Port(#[from] PortError),
    #[error("scale must be between 1 and {MAX_SCALE}, got {0}")]
    InvalidScale(u32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Standard {
    #[default]
    Pal,
    Ntsc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[default]
    Hires,
    Lores,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoSection {
    pub standard: Standard,
    pub resolution: Resolution,
    pub allow_hz_change: bool,
}

impl Default for VideoSection {
    fn default() -> Self {
        Self {
            standard: Standard::Pal,
            resolution: Resolution::Hires,
            allow_hz_change: true,
        }
    }
}

/// Controller class names, one per port (1-based as in the file).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortsSection {
    pub port1: String,
    pub port2: String,
    pub port3: String,
    pub port4: String,
}

impl Default for PortsSection {
    fn default() -> Self {
        let [port1, port2, port3, port4] = PortConfig::default()
            .classes
            .map(|class| class.name().to_string());
        Self {
            port1,
            port2,
            port3,
            port4,
        }
    }
}

impl PortsSection {
    /// Mutable access by 0-based port index.
    pub fn get_mut(&mut self, port: usize) -> Option<&mut String> {
        match port {
            0 => Some(&mut self.port1),
            1 => Some(&mut self.port2),
            2 => Some(&mut self.port3),
            3 => Some(&mut self.port4),
            _ => None,
        }
    }

    fn names(&self) -> [&str; 4] {
        [&self.port1, &self.port2, &self.port3, &self.port4]
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Machine run when none is named on the command line.
    pub machine: Option<String>,
    pub scale: u32,
    pub video: VideoSection,
    pub ports: PortsSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            machine: None,
            scale: 1,
            video: VideoSection::default(),
            ports: PortsSection::default(),
        }
    }
}

/// `<config dir>/retroport/retroport.toml`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("retroport").join("retroport.toml"))
}

/// Load the configuration.
///
/// An explicitly given file must exist. The default file is optional.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("no config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse(&text, &path)?;
    log::info!("loaded config from {}", path.display());
    Ok(config)
}

/// Parse configuration text; `path` is only used in error messages.
pub fn parse(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Validate and convert into the session's configuration.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        if self.scale == 0 || self.scale > MAX_SCALE {
            return Err(ConfigError::InvalidScale(self.scale));
        }

        let mut ports = PortConfig::default();
        for (port, name) in self.ports.names().into_iter().enumerate() {
            let class = ControllerClass::from_name(name).ok_or_else(|| ConfigError::UnknownClass {
                port: port + 1,
                name: name.to_string(),
            })?;
            if !class.offered_on(port) {
                return Err(PortError::NotOffered { port, class }.into());
            }
            ports.classes[port] = class;
        }

        let video = VideoConfig {
            standard: match self.video.standard {
                Standard::Pal => VideoStandard::Pal,
                Standard::Ntsc => VideoStandard::Ntsc,
            },
            hires: self.video.resolution == Resolution::Hires,
            allow_hz_change: self.video.allow_hz_change,
        };

        Ok(SessionConfig { video, ports })
    }
}
