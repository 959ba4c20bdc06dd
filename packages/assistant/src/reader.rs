use alloy_primitives::{Address, B256};
use serde::Serialize;
use tracing::instrument;

use crate::{
    address_list,
    constants::{supported_transaction_types, Network},
    error::{Result, StoreError},
    fields::{FieldSchema, FieldValues},
    keys::{executive_config_key, type_config_key},
    status::AssistantStatus,
    store::ProfileStore,
    validation::TipConfig,
};

/// Which profile and assistant an operation targets, and the shape of its data
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantContext {
    pub profile: Address,
    pub assistant: Address,
    pub transaction_types: Vec<B256>,
    pub schema: FieldSchema,
}

impl AssistantContext {
    pub fn new(
        profile: Address,
        assistant: Address,
        transaction_types: Vec<B256>,
        schema: FieldSchema,
    ) -> Self {
        Self {
            profile,
            assistant,
            transaction_types,
            schema,
        }
    }

    /// The tip assistant deployed on `network`
    pub fn tip_assistant(profile: Address, network: Network) -> Self {
        Self::with_tip_assistant(profile, network.tip_assistant())
    }

    /// A tip assistant deployed at a custom address
    pub fn with_tip_assistant(profile: Address, assistant: Address) -> Self {
        Self::new(
            profile,
            assistant,
            supported_transaction_types(),
            FieldSchema::tip_assistant(),
        )
    }

    pub fn executive_key(&self) -> B256 {
        executive_config_key(self.assistant)
    }

    /// Every key the assistant's configuration touches, type keys first
    pub fn keys(&self) -> Vec<B256> {
        self.transaction_types
            .iter()
            .map(|type_id| type_config_key(*type_id))
            .chain(std::iter::once(self.executive_key()))
            .collect()
    }
}

/// The assistants subscribed to one transaction type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeConfig {
    pub type_id: B256,
    pub key: B256,
    pub assistants: Vec<Address>,
    pub subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSnapshot {
    pub types: Vec<TypeConfig>,
    pub is_subscribed: bool,
    pub field_values: Option<FieldValues>,
}

impl ConfigSnapshot {
    pub fn status(&self) -> AssistantStatus {
        AssistantStatus::from_parts(self.is_subscribed, self.field_values.is_some())
    }

    /// Transaction types the assistant is currently subscribed to
    pub fn selected_types(&self) -> Vec<B256> {
        self.types
            .iter()
            .filter(|t| t.subscribed)
            .map(|t| t.type_id)
            .collect()
    }

    pub fn tip_config(&self) -> Result<Option<TipConfig>> {
        match &self.field_values {
            Some(values) => Ok(Some(TipConfig::from_field_values(values)?)),
            None => Ok(None),
        }
    }
}

/// Reads an assistant's configuration from a profile in one batched call
pub struct ConfigReader<S> {
    store: S,
}

impl<S: ProfileStore> ConfigReader<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    #[instrument(skip(self, ctx), fields(profile = %ctx.profile, assistant = %ctx.assistant))]
    pub async fn fetch(&self, ctx: &AssistantContext) -> Result<ConfigSnapshot> {
        let keys = ctx.keys();
        let mut values = self.store.get_data_batch(ctx.profile, &keys).await?;

        if values.len() != keys.len() {
            return Err(StoreError::ResponseLength {
                expected: keys.len(),
                actual: values.len(),
            }
            .into());
        }

        // keys() puts the executive key last
        let executive_value = values.pop().unwrap_or_default();

        let mut types = Vec::with_capacity(ctx.transaction_types.len());
        for ((type_id, key), value) in ctx.transaction_types.iter().zip(keys).zip(values) {
            let assistants = address_list::decode(&value)?;
            let subscribed = assistants.contains(&ctx.assistant);
            types.push(TypeConfig {
                type_id: *type_id,
                key,
                assistants,
                subscribed,
            });
        }

        let is_subscribed = types.iter().any(|t| t.subscribed);

        let field_values = if executive_value.is_empty() {
            None
        } else {
            Some(ctx.schema.decode(&executive_value)?)
        };

        let snapshot = ConfigSnapshot {
            types,
            is_subscribed,
            field_values,
        };
        tracing::debug!(status = %snapshot.status(), "fetched assistant configuration");

        Ok(snapshot)
    }
}
