//! Error types for the operator CLI.

use copywallet_ops::error::WalletError;

use crate::config::ConfigError;

/// Main error type for the operator CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("Alloy contract error: {0}")]
    AlloyContract(#[from] alloy::contract::Error),

    #[error("Alloy signer error: {0}")]
    AlloySigner(#[from] alloy::signers::local::LocalSignerError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(#[from] url::ParseError),

    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] alloy::primitives::hex::FromHexError),

    #[error("configs_address must be set for admin operations")]
    ConfigsAddressMissing,
}

pub type Result<T> = std::result::Result<T, Error>;
