//! Settings for the preview binary, read from `settings.toml`.  The setting
//! being previewed lives in its own `[setting]` table.

use crate::common_structs::{Colour, Setting};
use crate::error::InvalidInput;
use config::{Config, ConfigError, FileFormat, Source};
use serde::Deserialize;
use std::time::Duration;

fn default_console() -> bool {
    true
}

fn default_ws_port() -> u16 {
    3030
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSettings {
    /// Frame clock in milliseconds.  0 keeps waits exact.
    #[serde(default)]
    pub tick_ms: u64,
    /// Print every frame to the terminal
    #[serde(default = "default_console")]
    pub console: bool,
    #[serde(default)]
    pub ws_server: bool,
    #[serde(default = "default_ws_port")]
    pub ws_port: u16,
    /// Fixed seed for the random patterns
    #[serde(default)]
    pub seed: Option<u64>,
    /// Advance to the next pattern every this many seconds.  0 stays put.
    #[serde(default)]
    pub jukebox_secs: u64,
    pub setting: SettingSection,
}

/// The `[setting]` table.  Keys are snake_case here because config folds
/// keys to lower case.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingSection {
    #[serde(default)]
    pub name: String,
    pub colors: Vec<String>,
    #[serde(default)]
    pub white_values: Vec<i32>,
    #[serde(default)]
    pub brightness_values: Vec<i32>,
    pub flashing_pattern: String,
    pub delay_time: i64,
}

impl PreviewSettings {
    /// Load `<name>.toml`
    pub fn load(name: &str) -> Result<Self, ConfigError> {
        Self::from_source(config::File::with_name(name))
    }

    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Self::from_source(config::File::from_str(toml, FileFormat::Toml))
    }

    fn from_source<S: Source + Send + Sync + 'static>(source: S) -> Result<Self, ConfigError> {
        Config::builder().add_source(source).build()?.try_deserialize()
    }

    pub fn tick(&self) -> Option<Duration> {
        (self.tick_ms > 0).then(|| Duration::from_millis(self.tick_ms))
    }
}

impl TryFrom<SettingSection> for Setting {
    type Error = InvalidInput;

    fn try_from(section: SettingSection) -> Result<Self, Self::Error> {
        let colors = section
            .colors
            .iter()
            .map(|c| c.parse())
            .collect::<Result<Vec<Colour>, _>>()?;
        let setting = Setting {
            name: section.name,
            colors,
            white_values: section.white_values,
            brightness_values: section.brightness_values,
            flashing_pattern: section.flashing_pattern,
            delay_time: section.delay_time,
        };
        setting.validate()?;
        Ok(setting)
    }
}
