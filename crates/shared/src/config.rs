//! Application configuration management.

use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineConfig {
    /// Costing configuration.
    #[serde(default)]
    pub costing: CostingConfig,
    /// Query/listing configuration.
    #[serde(default)]
    pub query: QueryConfig,
}

/// Costing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CostingConfig {
    /// Decimal places used for component unit costs when allocating a
    /// parent cost across disassembled components. Unit costs round
    /// toward zero, and the unallocated remainder is expensed.
    #[serde(default = "default_allocation_scale")]
    pub allocation_scale: u32,
}

fn default_allocation_scale() -> u32 {
    4
}

impl Default for CostingConfig {
    fn default() -> Self {
        Self {
            allocation_scale: default_allocation_scale(),
        }
    }
}

/// Query/listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Default page size for ledger listings.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

fn default_page_size() -> u32 {
    100
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STRATUM").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
