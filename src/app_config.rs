use crate::domain::Coordinate;
use crate::position::PositionOptions;
use config::{Config, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    api: Api,
    location: LocationConfig,
    queue: Queue,
    connectivity: Connectivity,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::with_prefix("GEOCHECK").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn location(&self) -> &LocationConfig {
        &self.location
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }
}

#[derive(Debug, Deserialize)]
pub struct Api {
    url: String,
    token: String,
    #[serde(with = "humantime_serde")]
    timeout: Duration,
}

impl Api {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Settings of the device position, see `location_config_deserializer` for validation.
#[derive(Debug)]
pub struct LocationConfig {
    pub(crate) coordinate: Option<Coordinate>,
    pub(crate) watch_interval: Duration,
    pub(crate) watch: PositionOptions,
    pub(crate) single_shot: PositionOptions,
}

impl LocationConfig {
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate.clone()
    }

    pub fn watch_interval(&self) -> Duration {
        self.watch_interval
    }

    pub fn watch_options(&self) -> PositionOptions {
        self.watch
    }

    pub fn single_shot_options(&self) -> PositionOptions {
        self.single_shot
    }
}

#[derive(Debug, Deserialize)]
pub struct Queue {
    storage_directory: PathBuf,
    storage_key: String,
}

impl Queue {
    pub fn storage_directory(&self) -> &Path {
        &self.storage_directory
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

#[derive(Debug, Deserialize)]
pub struct Connectivity {
    probe_path: String,
    #[serde(with = "humantime_serde")]
    poll_interval: Duration,
    retry_ms: u64,
    retry_max_delay_ms: u64,
}

impl Connectivity {
    pub fn probe_path(&self) -> &str {
        &self.probe_path
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn retry_ms(&self) -> u64 {
        self.retry_ms
    }

    pub fn retry_max_delay_ms(&self) -> Duration {
        Duration::from_millis(self.retry_max_delay_ms)
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                api: Api {
                    url: "https://attendance.url".to_string(),
                    token: "token".to_string(),
                    timeout: Duration::from_secs(5),
                },
                location: LocationConfig {
                    coordinate: Some(Coordinate::new(51.8615899, 4.3580323)),
                    watch_interval: Duration::from_secs(1),
                    watch: PositionOptions::watch(),
                    single_shot: PositionOptions::single_shot(),
                },
                queue: Queue {
                    storage_directory: std::env::temp_dir(),
                    storage_key: "offline_check_ins".to_string(),
                },
                connectivity: Connectivity {
                    probe_path: "/health".to_string(),
                    poll_interval: Duration::from_secs(1),
                    retry_ms: 10,
                    retry_max_delay_ms: 100,
                },
            },
        }
    }

    pub fn api_url(mut self, url: String) -> Self {
        self.config.api.url = url;
        self
    }

    pub fn probe_path(mut self, path: &str) -> Self {
        self.config.connectivity.probe_path = path.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
