//! # Machine Configuration
//!
//! What a machine is mounted with: its id, accepted denominations, the
//! change it starts with and the items it sells.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VENDING_*`)
//! 2. Config file (`VENDING_CONFIG`, JSON in the `MachineInit` shape)
//! 3. Defaults (this file)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vending_core::validation::{validate_denominations, validate_item_name};
use vending_core::{
    ChangeBox, ChangeMoneyUnit, ItemForSale, MachineInit, Money, ValidationError,
    VendingMachineItem, DEFAULT_DENOMINATIONS,
};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid denomination list '{0}'")]
    Denominations(String),

    #[error("Invalid config: {0}")]
    Validation(#[from] ValidationError),
}

/// Machine configuration.
///
/// Serializes as a `MachineInit` with an extra optional `denominations` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    #[serde(flatten)]
    pub init: MachineInit,

    /// Accepted denominations. Default: the stock five.
    #[serde(default = "default_denominations")]
    pub denominations: Vec<i64>,
}

fn default_denominations() -> Vec<i64> {
    DEFAULT_DENOMINATIONS.to_vec()
}

impl Default for MachineConfig {
    /// Development machine: a little change and three drinks.
    fn default() -> Self {
        let drink = |name: &str, price: i64, sell_price: i64, stock: i64| {
            ItemForSale::new(
                VendingMachineItem {
                    name: name.to_string(),
                    image: format!("/images/{}.png", name.to_lowercase()),
                    price: Money::from_units(price),
                },
                Money::from_units(sell_price),
                stock,
            )
        };

        MachineConfig {
            init: MachineInit {
                id: "vm-dev".to_string(),
                change_box: ChangeBox {
                    units: vec![
                        ChangeMoneyUnit::new(100, 10),
                        ChangeMoneyUnit::new(500, 5),
                        ChangeMoneyUnit::new(1000, 5),
                    ],
                },
                items: vec![
                    drink("Cola", 1100, 1100, 5),
                    drink("Water", 600, 600, 10),
                    drink("Coffee", 700, 700, 3),
                ],
            },
            denominations: default_denominations(),
        }
    }
}

impl MachineConfig {
    /// Builds the configuration from environment variables over defaults.
    ///
    /// ## Environment Variables
    /// - `VENDING_CONFIG`: JSON file replacing the defaults
    /// - `VENDING_MACHINE_ID`: Override machine id
    /// - `VENDING_DENOMINATIONS`: Comma-separated list, e.g. "100,500,1000"
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("VENDING_CONFIG") {
            Ok(path) => MachineConfig::from_file(path)?,
            Err(_) => MachineConfig::default(),
        };

        if let Ok(id) = std::env::var("VENDING_MACHINE_ID") {
            config.init.id = id;
        }

        if let Ok(list) = std::env::var("VENDING_DENOMINATIONS") {
            config.denominations = parse_denominations(&list)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        MachineConfig::from_json_str(&raw)
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: MachineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the denomination list and item names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_denominations(&self.denominations)?;
        for item in &self.init.items {
            validate_item_name(&item.name)?;
        }
        Ok(())
    }
}

/// Parses "100, 500,1000" into values.
pub fn parse_denominations(list: &str) -> Result<Vec<i64>, ConfigError> {
    list.split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::Denominations(list.to_string()))
}
