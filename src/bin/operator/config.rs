//! Configuration for the operator CLI.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): connection details, keys,
//!   contract addresses
//! - CLI arguments: the operation to perform and its literals

use alloy::primitives::{Address, I256, U256};
use clap::{Parser, Subcommand, ValueEnum};
use copywallet_ops::{Chain, num};
use fastnum::{D256, UD256, decimal::Context};

/// Environment configuration (connection details, credentials, addresses).
#[derive(derive_more::Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Chain ID (e.g., 42161 for Arbitrum, 10 for Optimism)
    pub chain_id: u64,

    /// RPC URL for the node
    pub node_rpc_url: String,

    /// Private key for signing transactions
    #[debug("***")]
    pub private_key: String,

    /// Target copy-wallet contract address
    pub wallet_address: String,

    /// Deployment configuration contract address (admin operations only)
    pub configs_address: Option<String>,

    /// Aggregator contract address, required for chains without a preset
    pub aggregator_address: Option<String>,

    /// Collateral token address, required for chains without a preset
    pub collateral_token_address: Option<String>,

    /// Collateral token decimals, required for chains without a preset
    pub collateral_decimals: Option<u8>,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Parse the copy-wallet address.
    pub fn wallet_address(&self) -> Result<Address, alloy::primitives::hex::FromHexError> {
        self.wallet_address.parse()
    }

    /// Parse the configuration contract address, if set.
    pub fn configs_address(
        &self,
    ) -> Result<Option<Address>, alloy::primitives::hex::FromHexError> {
        self.configs_address.as_deref().map(str::parse).transpose()
    }

    /// Resolve the chain description: a network preset for known chain IDs,
    /// otherwise built from the custom-chain variables.
    pub fn chain(&self) -> Result<Chain, ConfigError> {
        match self.chain_id {
            42161 => Ok(Chain::arbitrum()),
            10 => Ok(Chain::optimism()),
            id => {
                let (Some(aggregator), Some(token), Some(decimals)) = (
                    self.aggregator_address.as_deref(),
                    self.collateral_token_address.as_deref(),
                    self.collateral_decimals,
                ) else {
                    return Err(ConfigError::UnsupportedChain(id));
                };
                let aggregator = aggregator
                    .parse()
                    .map_err(|_| ConfigError::InvalidAddress("aggregator_address"))?;
                let token = token
                    .parse()
                    .map_err(|_| ConfigError::InvalidAddress("collateral_token_address"))?;
                Ok(Chain::custom(id, aggregator, token, decimals))
            }
        }
    }
}

/// Order side for the place-order operation.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Side {
    Long,
    Short,
}

/// One-shot operator commands for copy-trading wallets.
#[derive(Debug, Parser)]
#[command(name = "operator")]
#[command(about = "One-shot operator commands for copy-trading wallets")]
pub struct Cli {
    #[command(subcommand)]
    pub operation: Operation,
}

#[derive(Debug, Subcommand)]
pub enum Operation {
    /// Place (or increase) an order copied from a source trader
    PlaceOrder {
        /// Source trader address being copied
        #[arg(long)]
        source: String,

        /// Index of the copied position on the source side
        #[arg(long, default_value_t = 0)]
        source_index: u64,

        /// Trading pair index
        #[arg(long)]
        pair_index: u64,

        /// Order side
        #[arg(long, value_enum)]
        side: Side,

        /// Collateral amount in collateral token (e.g., "100")
        #[arg(long)]
        collateral: String,

        /// Leverage in raw contract units
        #[arg(long)]
        leverage: u64,

        /// Acceptable execution price (e.g., "3550.58")
        #[arg(long)]
        price: String,

        /// Take-profit level, 0 to leave unset
        #[arg(long, default_value = "0")]
        take_profit: String,

        /// Stop-loss level, 0 to leave unset
        #[arg(long, default_value = "0")]
        stop_loss: String,
    },

    /// Close the position at the given index
    CloseOrder {
        #[arg(long)]
        index: u64,
    },

    /// Add collateral to (default) or remove it from a position
    ModifyCollateral {
        #[arg(long)]
        index: u64,

        /// Amount in collateral token (e.g., "20")
        #[arg(long)]
        amount: String,

        /// Remove collateral instead of adding it
        #[arg(long)]
        withdraw: bool,
    },

    /// Replace the stop-loss/take-profit levels of a position
    UpdateSltp {
        #[arg(long)]
        index: u64,

        /// Take-profit level, 0 to clear
        #[arg(long, default_value = "0")]
        take_profit: String,

        /// Stop-loss level, 0 to clear
        #[arg(long, default_value = "0")]
        stop_loss: String,
    },

    /// Approve and deposit owner funds, allocating them to a position
    Deposit {
        #[arg(long)]
        index: u64,

        /// Amount in collateral token (e.g., "100")
        #[arg(long)]
        amount: String,
    },

    /// Scan a position index range and charge every unpaid closing fee
    ChargeFees {
        /// First position index to probe
        #[arg(long, default_value_t = 0)]
        start: u64,

        /// Number of indices to probe
        #[arg(long, default_value_t = 100)]
        count: u64,
    },

    /// Register an executor on the configuration contract
    AddExecutor {
        #[arg(long)]
        executor: String,
    },

    /// Transfer configuration contract ownership
    TransferOwnership {
        #[arg(long)]
        new_owner: String,
    },
}

/// Parse an operator-typed decimal literal into token units at the
/// converter's decimals.
pub fn parse_amount(value: &str, converter: num::Converter) -> Result<U256, ConfigError> {
    let decimal = UD256::from_str(value, Context::default())
        .map_err(|_| ConfigError::InvalidAmount(value.to_string()))?;
    Ok(converter.to_unsigned(decimal))
}

/// Signed variant of [`parse_amount`], for owner-level collateral
/// adjustments.
pub fn parse_signed_amount(value: &str, converter: num::Converter) -> Result<I256, ConfigError> {
    let decimal = D256::from_str(value, Context::default())
        .map_err(|_| ConfigError::InvalidAmount(value.to_string()))?;
    Ok(converter.to_signed(decimal))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid decimal amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid {0} value")]
    InvalidAddress(&'static str),

    #[error(
        "No preset for chain id {0}: set aggregator_address, collateral_token_address and collateral_decimals"
    )]
    UnsupportedChain(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_scales_to_decimals() {
        assert_eq!(
            parse_amount("100", num::Converter::new(6)).unwrap(),
            U256::from(100_000000u64)
        );
        assert_eq!(
            parse_amount("3550.58", num::Converter::prices()).unwrap(),
            U256::from(3_550_580_000_000_000_000_000u128)
        );
        assert!(parse_amount("not-a-number", num::Converter::new(6)).is_err());
    }

    #[test]
    fn test_parse_signed_amount() {
        assert_eq!(
            parse_signed_amount("-20", num::Converter::new(6)).unwrap(),
            I256::try_from(-20_000000i64).unwrap()
        );
    }

    #[test]
    fn test_env_config_debug_redacts_private_key() {
        let config = EnvConfig {
            chain_id: 42161,
            node_rpc_url: "http://localhost:8545".to_string(),
            private_key: "super-secret".to_string(),
            wallet_address: "0x0000000000000000000000000000000000000000".to_string(),
            configs_address: None,
            aggregator_address: None,
            collateral_token_address: None,
            collateral_decimals: None,
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }

    #[test]
    fn test_chain_presets_and_custom() {
        let config = EnvConfig {
            chain_id: 42161,
            node_rpc_url: String::new(),
            private_key: String::new(),
            wallet_address: String::new(),
            configs_address: None,
            aggregator_address: None,
            collateral_token_address: None,
            collateral_decimals: None,
        };
        assert_eq!(config.chain().unwrap().collateral_decimals(), 6);

        let unsupported = EnvConfig {
            chain_id: 8453,
            ..config
        };
        assert!(matches!(
            unsupported.chain(),
            Err(ConfigError::UnsupportedChain(8453))
        ));
    }
}
