use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, Bytes, TxHash, B256};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider};
use async_trait::async_trait;
use tracing::instrument;

use super::{ProfileStore, WriteReceipt};
use crate::{
    error::StoreError,
    solidity_types::{IERC725YInstanceT, IERC725Y},
};

/// Talks to the profile contract itself through its ERC725Y interface.
///
/// Writes need a provider with a wallet attached. The wallet must be a
/// controller of the profile (or the profile's owner) for writes to succeed.
#[derive(Clone)]
pub struct Erc725Store {
    provider: DynProvider,
}

impl Erc725Store {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    fn contract(&self, profile: Address) -> IERC725YInstanceT {
        IERC725Y::new(profile, self.provider.clone())
    }
}

#[async_trait]
impl ProfileStore for Erc725Store {
    #[instrument(skip(self, keys), fields(subsys = "ProfileStore", keys = keys.len()))]
    async fn get_data_batch(
        &self,
        profile: Address,
        keys: &[B256],
    ) -> Result<Vec<Bytes>, StoreError> {
        self.contract(profile)
            .getDataBatch(keys.to_vec())
            .call()
            .await
            .map_err(|e| StoreError::RemoteRead(e.into()))
    }

    #[instrument(skip(self, keys, values), fields(subsys = "ProfileStore", keys = keys.len()))]
    async fn set_data_batch(
        &self,
        profile: Address,
        keys: Vec<B256>,
        values: Vec<Bytes>,
    ) -> Result<TxHash, StoreError> {
        let pending = self
            .contract(profile)
            .setDataBatch(keys, values)
            .send()
            .await
            .map_err(|e| StoreError::RemoteWrite(e.into()))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!("setDataBatch submitted: {tx_hash}");
        Ok(tx_hash)
    }

    #[instrument(skip(self), fields(subsys = "ProfileStore"))]
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<WriteReceipt, StoreError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|e| StoreError::Confirmation {
                hash: tx_hash,
                source: e.into(),
            })?;

        confirmed(tx_hash, receipt.status(), receipt.block_number())
    }
}

/// A mined transaction only counts as written when its status is success
fn confirmed(
    tx_hash: TxHash,
    status: bool,
    block_number: Option<u64>,
) -> Result<WriteReceipt, StoreError> {
    if !status {
        return Err(StoreError::Reverted(tx_hash));
    }

    Ok(WriteReceipt {
        tx_hash,
        block_number,
    })
}
