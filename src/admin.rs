//! Deployment administration.

use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::{PendingTransactionBuilder, Provider},
};

use crate::{abi::configs::IConfigs, error::WalletError};

/// Handle over the deployment-wide configuration contract.
#[derive(Clone, Debug)]
pub struct Configs<P> {
    instance: IConfigs::IConfigsInstance<P>,
}

impl<P: Provider + Clone> Configs<P> {
    pub fn new(address: Address, provider: P) -> Self {
        Self {
            instance: IConfigs::new(address, provider),
        }
    }

    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Registers an address allowed to relay wallet operations.
    pub async fn add_executor(
        &self,
        executor: Address,
    ) -> Result<PendingTransactionBuilder<Ethereum>, WalletError> {
        self.instance
            .addExecutor(executor)
            .send()
            .await
            .map_err(WalletError::from)
    }

    pub async fn remove_executor(
        &self,
        executor: Address,
    ) -> Result<PendingTransactionBuilder<Ethereum>, WalletError> {
        self.instance
            .removeExecutor(executor)
            .send()
            .await
            .map_err(WalletError::from)
    }

    pub async fn transfer_ownership(
        &self,
        new_owner: Address,
    ) -> Result<PendingTransactionBuilder<Ethereum>, WalletError> {
        self.instance
            .transferOwnership(new_owner)
            .send()
            .await
            .map_err(WalletError::from)
    }

    pub async fn owner(&self) -> Result<Address, WalletError> {
        self.instance.owner().call().await.map_err(WalletError::from)
    }
}
