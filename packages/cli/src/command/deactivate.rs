use alloy_primitives::Address;
use anyhow::Result;
use serde::Serialize;
use tip_assistant::{ConfigReconciler, ReconcileOutcome};

use crate::context::CliContext;

#[derive(Debug, Serialize)]
pub struct Deactivate {
    pub profile: Address,
    pub signer: Address,
    pub outcome: ReconcileOutcome,
}

pub struct DeactivateArgs {
    pub profile: Address,
}

impl Deactivate {
    pub async fn run(ctx: &CliContext, DeactivateArgs { profile }: DeactivateArgs) -> Result<Self> {
        let (store, signer) = ctx.signing_store().await?;

        let outcome = ConfigReconciler::new(store)
            .deactivate(&ctx.assistant_context(profile))
            .await?;

        Ok(Self {
            profile,
            signer,
            outcome,
        })
    }
}
