//! Copy-trading wallet operations SDK.
//!
//! # Overview
//!
//! Control plane for smart-contract copy-trading wallets: batched on-chain
//! state reads and atomic command batches against the wallet contract's
//! `execute` entry point.
//!
//! Use [`reader::BatchReader`] to poll state across many accounts/indices in a
//! single aggregator round trip, then [`command::CommandBatch`] +
//! [`wallet::CopyWallet::execute`] to apply the resulting wallet operations in
//! one transaction.
//!
//! The `operator` binary wraps the common one-shot flows: placing and closing
//! orders, collateral changes, stop-loss/take-profit updates, close-fee
//! charging and deployment administration.
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * Submission only: a returned pending transaction means the network
//!   accepted the submission, confirmation tracking is up to the caller.
//!
//! * No retry policy anywhere in the SDK, failures propagate to the caller.

pub mod abi;
pub mod admin;
pub mod command;
pub mod error;
pub mod num;
pub mod reader;
pub mod wallet;

use alloy::primitives::{Address, address};

/// Canonical Multicall3 deployment, identical across supported networks.
/// See <https://github.com/mds1/multicall3#deployments>.
const MULTICALL3: Address = address!("0xcA11bde05977b3631167028862bE2a173976CA11");

#[derive(Clone, Debug)]
/// Chain a copy-wallet deployment is operating on.
pub struct Chain {
    chain_id: u64,
    aggregator: Address,
    collateral_token: Address,
    collateral_decimals: u8,
}

impl Chain {
    /// Arbitrum deployment: GNS-v8 style wallets, USDC collateral.
    pub fn arbitrum() -> Self {
        Self {
            chain_id: 42161,
            aggregator: MULTICALL3,
            collateral_token: address!("0xaf88d065e77c8cC2239327C5EDb3A432268e5831"),
            collateral_decimals: 6,
        }
    }

    /// Optimism deployment: SNX-v2 style wallets, sUSD collateral.
    pub fn optimism() -> Self {
        Self {
            chain_id: 10,
            aggregator: MULTICALL3,
            collateral_token: address!("0x8c6f28f2F1A3C87F0f938b96d27520d9751ec8d9"),
            collateral_decimals: 18,
        }
    }

    pub fn custom(
        chain_id: u64,
        aggregator: Address,
        collateral_token: Address,
        collateral_decimals: u8,
    ) -> Self {
        Self {
            chain_id,
            aggregator,
            collateral_token,
            collateral_decimals,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address of the on-chain aggregator used for batched reads.
    pub fn aggregator(&self) -> Address {
        self.aggregator
    }

    pub fn collateral_token(&self) -> Address {
        self.collateral_token
    }

    /// Decimals of the collateral token, 6 for USDC, 18 for sUSD.
    pub fn collateral_decimals(&self) -> u8 {
        self.collateral_decimals
    }

    /// Converter for collateral token amounts.
    pub fn collateral_converter(&self) -> num::Converter {
        num::Converter::new(self.collateral_decimals)
    }
}
