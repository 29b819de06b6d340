//! One-shot operator CLI for copy-trading wallets.
//!
//! Loads the signer and target addresses from the environment, builds the
//! requested transaction, submits it and prints the hash. No retry loop, no
//! persistent state.

mod config;
mod error;
mod ops;

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
    rpc::client::RpcClient,
    signers::local::PrivateKeySigner,
};
use clap::Parser;
use std::process::exit;
use tracing::error;
use url::Url;

use config::{Cli, EnvConfig};
use ops::Operator;

#[tokio::main]
async fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Parse environment configuration
    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to parse environment configuration: {}", e);
            exit(1);
        }
    };

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Resolve the chain description
    let chain = match env_config.chain() {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("Invalid chain configuration: {}", e);
            exit(1);
        }
    };

    // Parse addresses
    let wallet_address: Address = match env_config.wallet_address() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid wallet address: {}", e);
            exit(1);
        }
    };

    let configs_address = match env_config.configs_address() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Invalid configs address: {}", e);
            exit(1);
        }
    };

    // Parse private key
    let private_key: PrivateKeySigner = match env_config.private_key.parse() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Invalid private key: {}", e);
            exit(1);
        }
    };

    let signer = EthereumWallet::new(private_key);

    // Parse RPC URL
    let node_url = match Url::parse(&env_config.node_rpc_url) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid RPC URL: {}", e);
            exit(1);
        }
    };

    let provider = DynProvider::new(
        ProviderBuilder::new()
            .wallet(signer)
            .connect_client(RpcClient::new_http(node_url)),
    );

    let operator = Operator::new(provider, chain, wallet_address, configs_address);
    if let Err(e) = operator.run(cli.operation).await {
        error!(%e, "Operation failed");
        exit(1);
    }
}
