use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::{RuleTable, RulesConfig};
use crate::error::{CatalogError, Result};

const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_PER_PAGE: usize = 12;

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# storefront configuration file
# Location: ~/.storefront/config.toml

[catalog]
# Products per page in listings
# Default: 12
per_page = 12

# Default products file used when --products is omitted
# Example: products = "/srv/catalog/products.json"

# Subcategory rules. A category defined here replaces the builtin rules of the
# same name; new categories are added. Categories without rules are grouped
# by brand.
#
# [rules.gabinetes]
# display_name = "Gabinetes"
#
# [[rules.gabinetes.types]]
# id = "atx"
# name = "ATX"
# keywords = ["atx", "mid tower"]
# priority = 1
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default, skip_serializing_if = "RulesConfig::is_empty")]
    pub rules: RulesConfig,
}

/// Listing defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<PathBuf>,
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            products: None,
        }
    }
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| CatalogError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;

        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Builtin rules merged with the `[rules]` section
    pub fn rule_table(&self) -> Result<RuleTable> {
        RuleTable::builtin().with_config(&self.rules)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog.per_page" => Some(self.catalog.per_page.to_string()),
            "catalog.products" => Some(
                self.catalog
                    .products
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "catalog.per_page" => {
                let per_page = value.trim().parse::<usize>().map_err(|e| {
                    CatalogError::ConfigValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    }
                })?;
                if per_page == 0 {
                    return Err(CatalogError::InvalidPageSize);
                }
                self.catalog.per_page = per_page;
                Ok(())
            }
            "catalog.products" => {
                let trimmed = value.trim();
                self.catalog.products = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
                Ok(())
            }
            _ => Err(CatalogError::ConfigKeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        ["catalog.per_page", "catalog.products"]
            .iter()
            .map(|key| (key.to_string(), self.get(key).unwrap_or_default()))
            .collect()
    }
}
