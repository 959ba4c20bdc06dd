use alloy_primitives::Address;
use anyhow::Result;
use serde::Serialize;
use tip_assistant::{ConfigReconciler, InstallationChecker, ReconcileOutcome, TipConfig};

use crate::context::CliContext;

#[derive(Debug, Serialize)]
pub struct Save {
    pub profile: Address,
    pub signer: Address,
    pub tip: TipConfig,
    pub outcome: ReconcileOutcome,
}

pub struct SaveArgs {
    pub profile: Address,
    pub destination: String,
    pub percentage: String,
}

impl Save {
    pub async fn run(
        ctx: &CliContext,
        SaveArgs {
            profile,
            destination,
            percentage,
        }: SaveArgs,
    ) -> Result<Self> {
        // reject bad input before connecting or signing anything
        let tip = TipConfig::from_input(&destination, &percentage, profile)?;

        let (store, signer) = ctx.signing_store().await?;
        let assistant_ctx = ctx.assistant_context(profile);

        if let Ok(delegate) = ctx.delegate_address(None) {
            let checker = InstallationChecker::new(store.clone());
            if !checker.is_installed(profile, delegate).await? {
                tracing::warn!(
                    "the assistant protocol delegate {delegate} is not installed on {profile}, \
                     the tip will not trigger until it is"
                );
            }
        }

        let outcome = ConfigReconciler::new(store)
            .save_tip(&assistant_ctx, &tip)
            .await?;

        Ok(Self {
            profile,
            signer,
            tip,
            outcome,
        })
    }
}
