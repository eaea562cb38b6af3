//! Game configuration. Loaded from `config/prefs.json`, then overridden by
//! whatever the launcher passes in.

use crate::game::error::ConfigError;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CONFIG_PATH: &str = "config/prefs.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_num_star_systems")]
    pub num_star_systems: usize,
    #[serde(default = "default_num_background_stars")]
    pub num_background_stars: usize,
    #[serde(default = "default_num_nebulae")]
    pub num_nebulae: usize,
    #[serde(default)]
    pub debug_enabled: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_screen_width() -> u32 {
    1200
}
fn default_screen_height() -> u32 {
    800
}
fn default_fps() -> u32 {
    60
}
fn default_num_star_systems() -> usize {
    10
}
fn default_num_background_stars() -> usize {
    200
}
fn default_num_nebulae() -> usize {
    5
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: default_screen_width(),
            screen_height: default_screen_height(),
            fps: default_fps(),
            num_star_systems: default_num_star_systems(),
            num_background_stars: default_num_background_stars(),
            num_nebulae: default_num_nebulae(),
            debug_enabled: false,
            log_level: default_log_level(),
        }
    }
}

/// Values supplied on top of the config file; `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub fps: Option<u32>,
    pub num_star_systems: Option<usize>,
    pub num_background_stars: Option<usize>,
    pub num_nebulae: Option<usize>,
    pub debug_enabled: Option<bool>,
    pub log_level: Option<String>,
}

impl GameConfig {
    /// Defaults, then the file at `path` if it exists, then `overrides`.
    pub fn load(path: &Path, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let data = std::fs::read_to_string(path)?;
            info!("Loaded configuration from {}", path.display());
            Self::from_json(&data)?
        } else {
            Self::default()
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.screen_width {
            self.screen_width = v;
        }
        if let Some(v) = overrides.screen_height {
            self.screen_height = v;
        }
        if let Some(v) = overrides.fps {
            self.fps = v;
        }
        if let Some(v) = overrides.num_star_systems {
            self.num_star_systems = v;
        }
        if let Some(v) = overrides.num_background_stars {
            self.num_background_stars = v;
        }
        if let Some(v) = overrides.num_nebulae {
            self.num_nebulae = v;
        }
        if let Some(v) = overrides.debug_enabled {
            self.debug_enabled = v;
        }
        if let Some(v) = &overrides.log_level {
            self.log_level = v.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("fps", self.fps),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::Invalid {
            field: "log_level",
            reason: format!("unrecognised level {:?}", self.log_level),
        })
    }

    /// Milliseconds per frame at the configured rate.
    pub fn frame_millis(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }
}
