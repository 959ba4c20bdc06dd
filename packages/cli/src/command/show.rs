use alloy_primitives::Address;
use anyhow::Result;
use serde::Serialize;
use tip_assistant::{AssistantStatus, ConfigReader, ConfigSnapshot, TipConfig};

use crate::context::CliContext;

#[derive(Debug, Serialize)]
pub struct Show {
    pub profile: Address,
    pub assistant: Address,
    pub status: AssistantStatus,
    pub tip: Option<TipConfig>,
    pub snapshot: ConfigSnapshot,
}

pub struct ShowArgs {
    pub profile: Address,
}

impl Show {
    pub async fn run(ctx: &CliContext, ShowArgs { profile }: ShowArgs) -> Result<Self> {
        let assistant_ctx = ctx.assistant_context(profile);
        let reader = ConfigReader::new(ctx.query_store().await?);

        let snapshot = reader.fetch(&assistant_ctx).await?;

        // fields written by another client may be out of this client's range
        let tip = match snapshot.tip_config() {
            Ok(tip) => tip,
            Err(err) => {
                tracing::warn!("stored tip settings are not usable: {err}");
                None
            }
        };

        Ok(Self {
            profile,
            assistant: assistant_ctx.assistant,
            status: snapshot.status(),
            tip,
            snapshot,
        })
    }
}
