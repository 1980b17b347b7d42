use crate::controller::ControllerOptions;
use crate::map_sync::MapConfig;
use crate::probe::ProbeConfig;
use crate::resolver::ProviderConfig;

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("map zoom {0} is out of range, it must be at most {max}", max = MapConfig::MAX_ZOOM)]
    ZoomOutOfRange(u8),
    #[error("local address probe is enabled but no rendezvous servers are given")]
    NoRendezvousServers,
    #[error(r#"provider URI "{0}" must have a scheme and a host"#)]
    ProviderNotAbsolute(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewConfig {
    #[serde(default = "ViewConfig::default_track_loading")]
    pub track_loading: bool,
}

impl ViewConfig {
    fn default_track_loading() -> bool {
        true
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            track_loading: Self::default_track_loading(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "Config::default_log_level")]
    pub log_level: log::Level,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub map: MapConfig,
}

impl Config {
    fn default_log_level() -> log::Level {
        log::Level::Info
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.zoom > MapConfig::MAX_ZOOM {
            return Err(ConfigError::ZoomOutOfRange(self.map.zoom));
        }
        if self.probe.enabled && self.probe.rendezvous.is_empty() {
            return Err(ConfigError::NoRendezvousServers);
        }
        let uri = &self.provider.uri;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(ConfigError::ProviderNotAbsolute(uri.to_string()));
        }
        Ok(())
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            track_loading: self.view.track_loading,
            probe_local_address: self.probe.enabled,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            provider: ProviderConfig::default(),
            probe: ProbeConfig::default(),
            view: ViewConfig::default(),
            map: MapConfig::default(),
        }
    }
}

pub fn parse_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let toml_string = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&toml_string)?;
    config.validate()?;
    Ok(config)
}
