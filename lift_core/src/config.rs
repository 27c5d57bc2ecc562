//! Configuration file support for Liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.

use crate::types::PlanMonth;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub reminder: ReminderConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Daily reminder time configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_reminder_hour")]
    pub hour: u32,

    #[serde(default = "default_reminder_minute")]
    pub minute: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            hour: default_reminder_hour(),
            minute: default_reminder_minute(),
        }
    }
}

impl ReminderConfig {
    /// "HH:MM" rendering for display and scheduler handoff
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Work/rest day numbers per month, keyed "YYYY-MM"
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_work_days")]
    pub work_days: HashMap<String, Vec<u32>>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            work_days: default_work_days(),
        }
    }
}

impl ScheduleConfig {
    /// Configured work days for a month; empty when none are configured
    pub fn work_days_for(&self, month: PlanMonth) -> BTreeSet<u32> {
        self.work_days
            .get(&month.to_string())
            .map(|days| days.iter().copied().collect())
            .unwrap_or_default()
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("liftplan")
}

fn default_reminder_hour() -> u32 {
    19
}

fn default_reminder_minute() -> u32 {
    0
}

fn default_work_days() -> HashMap<String, Vec<u32>> {
    HashMap::from([("2025-09".to_string(), vec![8, 9, 12, 15, 16, 17, 19, 23, 26])])
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("liftplan").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.reminder.hour, 19);
        assert_eq!(config.reminder.minute, 0);
        assert_eq!(config.reminder.time_label(), "19:00");

        let september = PlanMonth::new(2025, 9).unwrap();
        let work_days = config.schedule.work_days_for(september);
        assert_eq!(
            work_days,
            [8, 9, 12, 15, 16, 17, 19, 23, 26].into_iter().collect()
        );
    }

    #[test]
    fn test_unconfigured_month_has_no_work_days() {
        let config = Config::default();
        let october = PlanMonth::new(2025, 10).unwrap();
        assert!(config.schedule.work_days_for(october).is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.reminder.hour, parsed.reminder.hour);
        assert_eq!(config.schedule.work_days, parsed.schedule.work_days);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[reminder]
hour = 7
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reminder.hour, 7);
        assert_eq!(config.reminder.minute, 0); // default
        assert!(!config.schedule.work_days.is_empty()); // default schedule kept
    }

    #[test]
    fn test_save_and_load_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.reminder.hour = 6;
        config.reminder.minute = 30;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.reminder.time_label(), "06:30");
    }
}
