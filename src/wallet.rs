//! Copy-wallet contract handle.

use alloy::{
    network::Ethereum,
    primitives::{Address, Bytes, U256},
    providers::{PendingTransactionBuilder, Provider},
};
use tracing::debug;

use crate::{
    abi::copy_wallet::ICopyWallet,
    command::CommandBatch,
    error::{ProviderError, WalletError},
    reader::{BatchCall, BatchReader},
};

/// Handle over one copy-trading wallet contract.
///
/// Holds the wallet address and the caller's connected provider; the signing
/// credential stays owned by the caller and is only borrowed per submission.
#[derive(Clone, Debug)]
pub struct CopyWallet<P> {
    instance: ICopyWallet::ICopyWalletInstance<P>,
}

impl<P: Provider + Clone> CopyWallet<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            instance: ICopyWallet::new(address, provider),
        }
    }

    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Submits the batch as one signed `execute` transaction.
    ///
    /// The wallet contract applies the commands in the supplied order within
    /// that single transaction; either every command takes effect or the whole
    /// transaction reverts. A returned pending transaction means the
    /// submission was accepted, not that the batch is finalized.
    ///
    /// An empty batch is rejected locally, nothing is submitted.
    pub async fn execute(
        &self,
        batch: &CommandBatch,
    ) -> Result<PendingTransactionBuilder<Ethereum>, WalletError> {
        if batch.is_empty() {
            return Err(ProviderError::EmptyBatch);
        }
        let (codes, payloads) = batch.encode();
        debug!(
            wallet = %self.address(),
            commands = codes.len(),
            "submitting command batch"
        );
        self.instance
            .execute(codes, payloads)
            .send()
            .await
            .map_err(WalletError::from)
    }

    /// Encoded `execute` calldata for the batch, without submitting.
    pub fn calldata(&self, batch: &CommandBatch) -> Result<Bytes, WalletError> {
        if batch.is_empty() {
            return Err(ProviderError::EmptyBatch);
        }
        let (codes, payloads) = batch.encode();
        Ok(self.instance.execute(codes, payloads).calldata().clone())
    }

    /// Whether the closing fee for the position at `index` was already
    /// charged.
    pub async fn has_close_charged(&self, index: u64) -> Result<bool, WalletError> {
        self.instance
            .hasCloseCharged(U256::from(index))
            .call()
            .await
            .map_err(WalletError::from)
    }

    /// Charges the closing fee for the position at `index`.
    pub async fn charge_close_fee(
        &self,
        index: u64,
    ) -> Result<PendingTransactionBuilder<Ethereum>, WalletError> {
        self.instance
            .chargeCloseFee(U256::from(index))
            .send()
            .await
            .map_err(WalletError::from)
    }

    /// Wallet balance available to the owner, in collateral token units.
    pub async fn available_fund(&self) -> Result<U256, WalletError> {
        self.instance
            .availableFund()
            .call()
            .await
            .map_err(WalletError::from)
    }

    /// Probes `hasCloseCharged` for `count` position indices starting at
    /// `start` in one batched read and returns the indices whose closing fee
    /// is still unpaid, in index order.
    pub async fn uncharged_close_fees(
        &self,
        reader: &BatchReader<P>,
        start: u64,
        count: u64,
    ) -> Result<Vec<u64>, WalletError> {
        let address = self.address();
        let calls = (start..start + count).map(|index| {
            BatchCall::new(
                address,
                ICopyWallet::hasCloseChargedCall {
                    index: U256::from(index),
                },
            )
        });
        let charged = reader.read(calls).await?;
        Ok(charged
            .into_iter()
            .zip(start..)
            .filter_map(|(charged, index)| (!charged).then_some(index))
            .collect())
    }
}
