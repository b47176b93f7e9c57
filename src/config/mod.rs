use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    errors::Result,
    utils::{self, write_atomic},
};

const CONFIG_FILE: &str = "config.json";

/// Presentation settings consumed by view collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "it-IT".into(),
            currency: "EUR".into(),
        }
    }
}

impl Config {
    /// Renders an amount with the configured currency. Deliberately
    /// locale-naive; a host with real locale needs formats upstream.
    pub fn format_amount(&self, amount: f64) -> String {
        match self.currency.as_str() {
            "EUR" => format!("{:.2} €", amount),
            other => format!("{:.2} {}", amount, other),
        }
    }
}

/// Loads and saves the configuration file under the app data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}
