use crate::error::{AssemblyError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Difficulty target carried into every header as raw text
pub const DEFAULT_DIFFICULTY_TARGET: &str =
    "0000ffff00000000000000000000000000000000000000000000000000000000";

const DEFAULT_MEMPOOL_PATH: &str = "mempool";
const DEFAULT_OUTPUT_PATH: &str = "output.txt";

/// Optional gates on top of the fee-positivity rule. Both are off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicySettings {
    /// Reject transactions whose fee is below `min_transaction_fee`
    pub enforce_min_fee: bool,
    /// Leave out transactions once the block would exceed `max_block_size`
    pub enforce_block_size: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub max_block_size: u64,
    /// In whole coins
    pub max_coin_value: u64,
    /// In blocks
    pub coinbase_maturity: u32,
    pub signature_operation_limit: u32,
    pub min_transaction_size: u64,
    pub min_transaction_fee: u64,
    pub mempool_path: PathBuf,
    pub output_path: PathBuf,
    pub difficulty_target: String,
    pub block_version: u32,
    /// Value of the single coinbase output
    pub coinbase_reward: u64,
    pub policy: PolicySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_block_size: 1_000_000,
            max_coin_value: 21_000_000,
            coinbase_maturity: 100,
            signature_operation_limit: 20_000,
            min_transaction_size: 100,
            min_transaction_fee: 1_000,
            mempool_path: PathBuf::from(DEFAULT_MEMPOOL_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            difficulty_target: DEFAULT_DIFFICULTY_TARGET.to_string(),
            block_version: 1,
            coinbase_reward: 0,
            policy: PolicySettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Settings> {
        let settings: Settings = toml::from_str(text)?;
        settings.check()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Settings> {
        let text = fs::read_to_string(path)
            .map_err(|e| AssemblyError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Largest value, in the smallest currency unit, an amount may reach
    pub fn max_money(&self) -> u64 {
        self.max_coin_value.saturating_mul(100_000_000)
    }

    pub fn with_mempool_path(mut self, path: impl Into<PathBuf>) -> Settings {
        self.mempool_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Settings {
        self.output_path = path.into();
        self
    }

    fn check(&self) -> Result<()> {
        if self.difficulty_target.is_empty() {
            return Err(AssemblyError::Config(
                "difficulty_target must not be empty".to_string(),
            ));
        }
        if self.coinbase_reward > self.max_money() {
            return Err(AssemblyError::Config(format!(
                "coinbase_reward {} exceeds the money supply of {}",
                self.coinbase_reward,
                self.max_money()
            )));
        }
        Ok(())
    }
}
