use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use alloy_primitives::{keccak256, Address, Bytes, TxHash, B256};
use anyhow::anyhow;
use async_trait::async_trait;
use tracing::instrument;

use super::{ProfileStore, WriteBatch, WriteReceipt};
use crate::error::StoreError;

/// A write that went through, in the order it was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedBatch {
    pub tx_hash: TxHash,
    pub profile: Address,
    pub batch: WriteBatch,
}

#[derive(Debug, Clone)]
enum TxOutcome {
    Mined(u64),
    Reverted,
}

#[derive(Default)]
struct MemoryState {
    data: BTreeMap<(Address, B256), Bytes>,
    transactions: BTreeMap<TxHash, TxOutcome>,
    history: Vec<AppliedBatch>,
    next_block: u64,
    reject_next_write: Option<String>,
    revert_next_write: bool,
    fail_next_read: Option<String>,
}

/// In-memory stand-in for a set of profiles.
///
/// Every write is mined instantly and atomically. Writing an empty value
/// deletes the key, so unset and cleared keys both read back empty.
#[derive(Clone, Default)]
pub struct MemoryProfileStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a value without going through a transaction
    pub fn insert(&self, profile: Address, key: B256, value: impl Into<Bytes>) {
        let value = value.into();
        let mut state = self.write();
        if value.is_empty() {
            state.data.remove(&(profile, key));
        } else {
            state.data.insert((profile, key), value);
        }
    }

    pub fn get(&self, profile: Address, key: B256) -> Bytes {
        self.read()
            .data
            .get(&(profile, key))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of non-empty keys across all profiles
    pub fn len(&self) -> usize {
        self.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn history(&self) -> Vec<AppliedBatch> {
        self.read().history.clone()
    }

    /// The next `set_data_batch` fails before anything is submitted,
    /// like a signature request the user declined
    pub fn reject_next_write(&self, reason: impl Into<String>) {
        self.write().reject_next_write = Some(reason.into());
    }

    /// The next write is accepted but its receipt reports a revert
    pub fn revert_next_write(&self) {
        self.write().revert_next_write = true;
    }

    pub fn fail_next_read(&self, reason: impl Into<String>) {
        self.write().fail_next_read = Some(reason.into());
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    #[instrument(skip(self, keys), fields(subsys = "ProfileStore", keys = keys.len()))]
    async fn get_data_batch(
        &self,
        profile: Address,
        keys: &[B256],
    ) -> Result<Vec<Bytes>, StoreError> {
        if let Some(reason) = self.write().fail_next_read.take() {
            return Err(StoreError::RemoteRead(anyhow!(reason)));
        }

        let state = self.read();
        Ok(keys
            .iter()
            .map(|key| state.data.get(&(profile, *key)).cloned().unwrap_or_default())
            .collect())
    }

    #[instrument(skip(self, keys, values), fields(subsys = "ProfileStore", keys = keys.len()))]
    async fn set_data_batch(
        &self,
        profile: Address,
        keys: Vec<B256>,
        values: Vec<Bytes>,
    ) -> Result<TxHash, StoreError> {
        let mut state = self.write();

        if let Some(reason) = state.reject_next_write.take() {
            return Err(StoreError::RemoteWrite(anyhow!(reason)));
        }

        if keys.len() != values.len() {
            return Err(StoreError::RemoteWrite(anyhow!(
                "{} keys but {} values",
                keys.len(),
                values.len()
            )));
        }

        state.next_block += 1;
        let block = state.next_block;
        let tx_hash = keccak256(block.to_be_bytes());

        if std::mem::take(&mut state.revert_next_write) {
            state.transactions.insert(tx_hash, TxOutcome::Reverted);
            return Ok(tx_hash);
        }

        for (key, value) in keys.iter().zip(values.iter()) {
            if value.is_empty() {
                state.data.remove(&(profile, *key));
            } else {
                state.data.insert((profile, *key), value.clone());
            }
        }

        state.transactions.insert(tx_hash, TxOutcome::Mined(block));
        state.history.push(AppliedBatch {
            tx_hash,
            profile,
            batch: WriteBatch { keys, values },
        });

        Ok(tx_hash)
    }

    #[instrument(skip(self), fields(subsys = "ProfileStore"))]
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<WriteReceipt, StoreError> {
        match self.read().transactions.get(&tx_hash) {
            Some(TxOutcome::Mined(block)) => Ok(WriteReceipt {
                tx_hash,
                block_number: Some(*block),
            }),
            Some(TxOutcome::Reverted) => Err(StoreError::Reverted(tx_hash)),
            None => Err(StoreError::Confirmation {
                hash: tx_hash,
                source: anyhow!("unknown transaction"),
            }),
        }
    }
}
