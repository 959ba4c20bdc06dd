//! Read-modify-write of an assistant's configuration.
//!
//! Every operation re-reads the profile, computes the full replacement for
//! all of the assistant's keys and writes them in a single `setDataBatch`.
//! A failed or rejected write changes nothing on-chain.

use alloy_primitives::{Address, Bytes};
use serde::Serialize;
use tracing::instrument;

use crate::{
    address_list,
    error::{CodecError, Result},
    fields::FieldValues,
    reader::{AssistantContext, ConfigReader, ConfigSnapshot},
    status::Transition,
    store::{ProfileStore, WriteBatch, WriteReceipt},
    validation::TipConfig,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub transition: Transition,
    pub batch: WriteBatch,
    pub receipt: WriteReceipt,
}

pub struct ConfigReconciler<S> {
    reader: ConfigReader<S>,
}

impl<S: ProfileStore> ConfigReconciler<S> {
    pub fn new(store: S) -> Self {
        Self {
            reader: ConfigReader::new(store),
        }
    }

    pub fn reader(&self) -> &ConfigReader<S> {
        &self.reader
    }

    /// Subscribes the assistant to every supported type and stores `values`
    #[instrument(skip(self, ctx, values), fields(profile = %ctx.profile, assistant = %ctx.assistant))]
    pub async fn save(
        &self,
        ctx: &AssistantContext,
        values: &FieldValues,
    ) -> Result<ReconcileOutcome> {
        // bad input should fail before anything is read or signed
        let fields = ctx.schema.encode(values)?;

        let snapshot = self.reader.fetch(ctx).await?;
        let transition = Transition::for_save(snapshot.status());
        let batch = plan_save(&snapshot, ctx, fields)?;

        self.commit(ctx.profile, transition, batch).await
    }

    pub async fn save_tip(
        &self,
        ctx: &AssistantContext,
        tip: &TipConfig,
    ) -> Result<ReconcileOutcome> {
        self.save(ctx, &tip.to_field_values()).await
    }

    /// Unsubscribes the assistant everywhere and clears its fields
    #[instrument(skip(self, ctx), fields(profile = %ctx.profile, assistant = %ctx.assistant))]
    pub async fn deactivate(&self, ctx: &AssistantContext) -> Result<ReconcileOutcome> {
        let snapshot = self.reader.fetch(ctx).await?;
        let batch = plan_deactivate(&snapshot, ctx)?;

        self.commit(ctx.profile, Transition::Deactivating, batch)
            .await
    }

    async fn commit(
        &self,
        profile: Address,
        transition: Transition,
        batch: WriteBatch,
    ) -> Result<ReconcileOutcome> {
        tracing::info!(?transition, keys = batch.len(), "writing assistant configuration");

        let receipt = self.reader.store().submit(profile, batch.clone()).await?;

        tracing::info!(
            tx_hash = %receipt.tx_hash,
            target = %transition.target(),
            "assistant configuration confirmed"
        );

        Ok(ReconcileOutcome {
            transition,
            batch,
            receipt,
        })
    }
}

/// The batch that subscribes the assistant to every type in `snapshot` and
/// stores the already encoded `fields`
pub fn plan_save(
    snapshot: &ConfigSnapshot,
    ctx: &AssistantContext,
    fields: Bytes,
) -> Result<WriteBatch, CodecError> {
    let mut batch = WriteBatch::new();

    for type_config in &snapshot.types {
        let mut assistants = type_config.assistants.clone();
        address_list::insert_unique(&mut assistants, ctx.assistant);
        batch.push(type_config.key, list_value(&assistants)?);
    }

    batch.push(ctx.executive_key(), fields);
    Ok(batch)
}

/// The batch that removes the assistant from every list in `snapshot` and
/// clears its fields
pub fn plan_deactivate(
    snapshot: &ConfigSnapshot,
    ctx: &AssistantContext,
) -> Result<WriteBatch, CodecError> {
    let mut batch = WriteBatch::new();

    for type_config in &snapshot.types {
        let mut assistants = type_config.assistants.clone();
        address_list::remove_all(&mut assistants, ctx.assistant);
        batch.push(type_config.key, list_value(&assistants)?);
    }

    batch.push(ctx.executive_key(), Bytes::new());
    Ok(batch)
}

fn list_value(assistants: &[Address]) -> Result<Bytes, CodecError> {
    if assistants.is_empty() {
        Ok(Bytes::new())
    } else {
        address_list::encode(assistants)
    }
}
