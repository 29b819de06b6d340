//! Operation implementations.
//!
//! Each operation is one-shot: build one transaction (or one batched scan
//! plus independent follow-up transactions), submit, log the hash, return.

use alloy::{
    primitives::{Address, U256},
    providers::DynProvider,
};
use copywallet_ops::{
    Chain,
    abi::erc20::IERC20,
    admin::Configs,
    command::{Command, CommandBatch, OrderKind, PlaceOrder},
    num,
    reader::BatchReader,
    wallet::CopyWallet,
};
use itertools::Itertools;
use tracing::info;

use crate::{
    config::{Operation, Side, parse_amount, parse_signed_amount},
    error::{Error, Result},
};

/// One-shot operator over a single copy wallet.
#[derive(Debug)]
pub struct Operator {
    provider: DynProvider,
    chain: Chain,
    wallet: CopyWallet<DynProvider>,
    reader: BatchReader<DynProvider>,
    configs_address: Option<Address>,
}

impl Operator {
    pub fn new(
        provider: DynProvider,
        chain: Chain,
        wallet_address: Address,
        configs_address: Option<Address>,
    ) -> Self {
        let wallet = CopyWallet::new(wallet_address, provider.clone());
        let reader = BatchReader::new(&chain, provider.clone());
        Self {
            provider,
            chain,
            wallet,
            reader,
            configs_address,
        }
    }

    pub async fn run(&self, operation: Operation) -> Result<()> {
        match operation {
            Operation::PlaceOrder {
                source,
                source_index,
                pair_index,
                side,
                collateral,
                leverage,
                price,
                take_profit,
                stop_loss,
            } => {
                let prices = num::Converter::prices();
                let command = Command::PerpPlaceOrder(PlaceOrder {
                    source: source.parse()?,
                    source_index: U256::from(source_index),
                    pair_index: U256::from(pair_index),
                    is_long: matches!(side, Side::Long),
                    collateral: parse_amount(&collateral, self.chain.collateral_converter())?,
                    leverage: U256::from(leverage),
                    price: parse_amount(&price, prices)?,
                    take_profit: parse_amount(&take_profit, prices)?,
                    stop_loss: parse_amount(&stop_loss, prices)?,
                    kind: OrderKind::Increase,
                });
                self.submit(CommandBatch::new().with(command)).await
            }

            Operation::CloseOrder { index } => {
                // The wallet itself is the source of its own copied positions
                let command = Command::PerpCloseOrder {
                    source: self.wallet.address(),
                    index: U256::from(index),
                };
                self.submit(CommandBatch::new().with(command)).await
            }

            Operation::ModifyCollateral {
                index,
                amount,
                withdraw,
            } => {
                let command = Command::PerpModifyCollateral {
                    index: U256::from(index),
                    amount: parse_amount(&amount, self.chain.collateral_converter())?,
                    increase: !withdraw,
                };
                self.submit(CommandBatch::new().with(command)).await
            }

            Operation::UpdateSltp {
                index,
                take_profit,
                stop_loss,
            } => {
                let prices = num::Converter::prices();
                let command = Command::PerpUpdateSltp {
                    index: U256::from(index),
                    take_profit: parse_amount(&take_profit, prices)?,
                    stop_loss: parse_amount(&stop_loss, prices)?,
                };
                self.submit(CommandBatch::new().with(command)).await
            }

            Operation::Deposit { index, amount } => self.deposit(index, &amount).await,

            Operation::ChargeFees { start, count } => self.charge_fees(start, count).await,

            Operation::AddExecutor { executor } => {
                let pending = self.configs()?.add_executor(executor.parse()?).await?;
                info!(tx_hash = %pending.tx_hash(), "executor registration submitted");
                Ok(())
            }

            Operation::TransferOwnership { new_owner } => {
                let pending = self
                    .configs()?
                    .transfer_ownership(new_owner.parse()?)
                    .await?;
                info!(tx_hash = %pending.tx_hash(), "ownership transfer submitted");
                Ok(())
            }
        }
    }

    /// Approve the collateral spend, then deposit and allocate it to the
    /// position in one two-command batch. The wallet contract applies the
    /// owner deposit before the position allocation that spends it.
    async fn deposit(&self, index: u64, amount: &str) -> Result<()> {
        let converter = self.chain.collateral_converter();
        let units = parse_amount(amount, converter)?;

        let token = IERC20::new(self.chain.collateral_token(), self.provider.clone());
        let approval = token.approve(self.wallet.address(), units).send().await?;
        info!(tx_hash = %approval.tx_hash(), "collateral approval submitted");

        let batch = CommandBatch::new()
            .with(Command::OwnerModifyCollateral {
                amount: parse_signed_amount(amount, converter)?,
            })
            .with(Command::PerpModifyCollateral {
                index: U256::from(index),
                amount: units,
                increase: true,
            });
        self.submit(batch).await
    }

    /// Probe the index range for unpaid closing fees in one batched read,
    /// then charge each unpaid index with an independent transaction; the
    /// submissions are issued concurrently and awaited together.
    async fn charge_fees(&self, start: u64, count: u64) -> Result<()> {
        let unpaid = self
            .wallet
            .uncharged_close_fees(&self.reader, start, count)
            .await?;
        if unpaid.is_empty() {
            info!(start, count, "no unpaid closing fees in range");
            return Ok(());
        }

        info!(?unpaid, "charging closing fees");
        let pending = futures::future::try_join_all(
            unpaid.iter().map(|&index| self.wallet.charge_close_fee(index)),
        )
        .await?;
        info!(
            tx_hashes = %pending.iter().map(|p| p.tx_hash().to_string()).join(", "),
            "closing fee transactions submitted"
        );
        Ok(())
    }

    async fn submit(&self, batch: CommandBatch) -> Result<()> {
        let pending = self.wallet.execute(&batch).await?;
        info!(
            wallet = %self.wallet.address(),
            commands = batch.len(),
            tx_hash = %pending.tx_hash(),
            "command batch submitted"
        );
        Ok(())
    }

    fn configs(&self) -> Result<Configs<DynProvider>> {
        let address = self.configs_address.ok_or(Error::ConfigsAddressMissing)?;
        Ok(Configs::new(address, self.provider.clone()))
    }
}
