//! The profile's ERC725Y key/value storage, as seen by the reader and reconciler.

mod erc725;
mod memory;

use alloy_primitives::{Address, Bytes, TxHash, B256};
use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoreError;

pub use erc725::Erc725Store;
pub use memory::{AppliedBatch, MemoryProfileStore};

/// Keys and values written together in one `setDataBatch` transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WriteBatch {
    pub keys: Vec<B256>,
    pub values: Vec<Bytes>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: B256, value: Bytes) {
        self.keys.push(key);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReceipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
}

/// Batched access to a profile's data store.
///
/// Reads are positional: the i-th returned value belongs to the i-th key.
/// Implementations do not retry.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_data_batch(
        &self,
        profile: Address,
        keys: &[B256],
    ) -> Result<Vec<Bytes>, StoreError>;

    /// Submits the write and returns as soon as the transaction is accepted
    async fn set_data_batch(
        &self,
        profile: Address,
        keys: Vec<B256>,
        values: Vec<Bytes>,
    ) -> Result<TxHash, StoreError>;

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<WriteReceipt, StoreError>;

    async fn get_data(&self, profile: Address, key: B256) -> Result<Bytes, StoreError> {
        let mut values = self.get_data_batch(profile, &[key]).await?;
        if values.len() != 1 {
            return Err(StoreError::ResponseLength {
                expected: 1,
                actual: values.len(),
            });
        }
        Ok(values.remove(0))
    }

    /// Submits `batch` and waits for it to be confirmed
    async fn submit(&self, profile: Address, batch: WriteBatch) -> Result<WriteReceipt, StoreError> {
        let tx_hash = self
            .set_data_batch(profile, batch.keys, batch.values)
            .await?;
        tracing::debug!("submitted {tx_hash}, waiting for confirmation");
        self.wait_for_confirmation(tx_hash).await
    }
}
