//! Batched read-only contract calls.
//!
//! Probing state for K accounts/indices one call at a time costs K RPC round
//! trips; routing the calls through the on-chain aggregator collapses them to
//! one. [`BatchReader`] encodes each call into `(target, calldata)`, submits
//! the list to Multicall3 `aggregate` and decodes each raw result slot, in
//! input order.

use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes},
    providers::Provider,
    sol_types::SolCall,
};
use itertools::Itertools;
use tracing::debug;

use crate::{Chain, abi::multicall::IMulticall3, error::WalletError};

/// Default number of sub-calls per `aggregate` round trip.
/// Keeps a single `eth_call` comfortably under common node gas caps even for
/// storage-heavy probe functions, with some buffer.
const DEFAULT_CALLS_PER_BATCH: usize = 500;

/// One read-only invocation to be batched: a target contract and a typed
/// call against it.
#[derive(Clone, Debug)]
pub struct BatchCall<C> {
    pub target: Address,
    pub call: C,
}

impl<C> BatchCall<C> {
    pub fn new(target: Address, call: C) -> Self {
        Self { target, call }
    }
}

/// Order-preserving batched reader over the on-chain aggregator.
///
/// The `aggregate` flavor is strict: if any sub-call reverts, the whole
/// aggregate call reverts and the entire read fails. No partial results are
/// synthesized.
#[derive(Clone, Debug)]
pub struct BatchReader<P> {
    instance: IMulticall3::IMulticall3Instance<P>,
    block_id: BlockId,
    calls_per_batch: usize,
}

impl<P: Provider + Clone> BatchReader<P> {
    /// Creates a reader against the chain's aggregator, reading at the
    /// latest block.
    pub fn new(chain: &Chain, provider: P) -> Self {
        Self {
            instance: IMulticall3::new(chain.aggregator(), provider),
            block_id: BlockId::Number(alloy::eips::BlockNumberOrTag::Latest),
            calls_per_batch: DEFAULT_CALLS_PER_BATCH,
        }
    }

    /// Sets the block to read at (default: latest).
    pub fn at_block(mut self, block: BlockId) -> Self {
        self.block_id = block;
        self
    }

    /// Sets the number of sub-calls per aggregate round trip.
    pub fn calls_per_batch(mut self, calls: usize) -> Self {
        assert!(calls > 0, "at least one call per batch");
        self.calls_per_batch = calls;
        self
    }

    /// Executes the calls as aggregate round trips and decodes each result
    /// against the call's return type.
    ///
    /// The output has the same length and order as the input. An empty input
    /// resolves to an empty output without touching the network.
    pub async fn read<C: SolCall>(
        &self,
        calls: impl IntoIterator<Item = BatchCall<C>>,
    ) -> Result<Vec<C::Return>, WalletError> {
        let raw = self
            .read_raw(
                calls
                    .into_iter()
                    .map(|c| (c.target, c.call.abi_encode().into())),
            )
            .await?;
        raw.iter()
            .map(|data| C::abi_decode_returns(data).map_err(WalletError::from))
            .collect()
    }

    /// Executes pre-encoded `(target, calldata)` pairs and returns the raw
    /// result bytes per call, order preserved. Escape hatch for call lists
    /// mixing functions with different return types.
    pub async fn read_raw(
        &self,
        calls: impl IntoIterator<Item = (Address, Bytes)>,
    ) -> Result<Vec<Bytes>, WalletError> {
        let chunks = calls
            .into_iter()
            .map(|(target, call_data)| IMulticall3::Call {
                target,
                callData: call_data,
            })
            .chunks(self.calls_per_batch);
        let batches = chunks
            .into_iter()
            .map(|chunk| chunk.collect::<Vec<_>>())
            .collect::<Vec<_>>();

        // An empty read resolves locally, no aggregator call is made
        if batches.is_empty() {
            return Ok(vec![]);
        }

        debug!(
            round_trips = batches.len(),
            calls_per_batch = self.calls_per_batch,
            "aggregating batched read"
        );
        let batch_futs = batches.into_iter().map(|batch| {
            let call = self.instance.aggregate(batch).block(self.block_id);
            async move { call.call().await }
        });

        Ok(futures::future::try_join_all(batch_futs)
            .await
            .map_err(WalletError::from)?
            .into_iter()
            .flat_map(|ret| ret.returnData)
            .collect())
    }
}
