use log::warn;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use std::{
    fs,
    path::{Path, PathBuf},
};

pub mod commands;
pub mod drops;
pub mod logging;

pub use commands::CommandsConfig;
pub use drops::DropsConfig;
pub use logging::LoggingConfig;

const CONFIG_ROOT_FOLDER: &str = "config/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't read configuration file at {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(
        "Couldn't parse config at {path:?}. Reason: {reason}. This is probably caused by a config update; just delete the old config and start again"
    )]
    Parse { path: PathBuf, reason: String },
    #[error("Couldn't create config root folder {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid value in {file}: {message}")]
    Invalid { file: &'static str, message: String },
}

/// Settings of the host server itself.
#[derive(Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdvancedConfiguration {
    pub logging: LoggingConfig,
    pub commands: CommandsConfig,
}

/// Everything needed to start the server and its random drops plugin.
#[derive(Default)]
pub struct Configuration {
    pub advanced: AdvancedConfiguration,
    pub drops: DropsConfig,
}

impl Configuration {
    /// Loads every configuration file below `exec_dir/config/`, writing defaults for missing ones.
    pub fn load(exec_dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            advanced: AdvancedConfiguration::load(exec_dir)?,
            drops: DropsConfig::load(exec_dir)?,
        })
    }
}

pub trait LoadConfiguration {
    fn load(exec_dir: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config_dir = exec_dir.join(CONFIG_ROOT_FOLDER);
        if !config_dir.exists() {
            log::debug!("creating new config root folder");
            fs::create_dir(&config_dir).map_err(|source| ConfigError::CreateDir {
                path: config_dir.clone(),
                source,
            })?;
        }
        let path = config_dir.join(Self::get_path());

        let config = if path.exists() {
            let file_content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;

            toml::from_str(&file_content).map_err(|err| ConfigError::Parse {
                path: path.clone(),
                reason: err.message().to_string(),
            })?
        } else {
            let content = Self::default();

            match toml::to_string(&content) {
                Ok(serialized) => {
                    if let Err(err) = fs::write(&path, serialized) {
                        warn!("Couldn't write default config to {:?}. Reason: {}", &path, err);
                    }
                }
                Err(err) => warn!("Couldn't serialize default config {:?}: {}", &path, err),
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn get_path() -> &'static Path;

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadConfiguration for AdvancedConfiguration {
    fn get_path() -> &'static Path {
        Path::new("features.toml")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::{Configuration, ConfigError, DropsConfig, LoadConfiguration};

    #[test]
    fn missing_files_are_written_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuration::load(dir.path()).unwrap();

        assert!(!config.drops.enabled_on_start);
        assert_eq!(config.drops.mob_chance_percent, 30);
        assert_eq!(config.drops.max_amount, 10);
        assert!(dir.path().join("config/randomdrops.toml").exists());
        assert!(dir.path().join("config/features.toml").exists());
    }

    #[test]
    fn existing_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/randomdrops.toml"),
            "mob_chance_percent = 75\nseed = 42\n",
        )
        .unwrap();

        let drops = DropsConfig::load(dir.path()).unwrap();
        assert_eq!(drops.mob_chance_percent, 75);
        assert_eq!(drops.seed, Some(42));
        assert_eq!(drops.max_amount, 10);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/randomdrops.toml"),
            "max_amount = 0\n",
        )
        .unwrap();

        assert!(matches!(
            DropsConfig::load(dir.path()),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config/randomdrops.toml"), "max_amount = \"ten\"").unwrap();

        assert!(matches!(
            DropsConfig::load(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
