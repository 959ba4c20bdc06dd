use alloy_primitives::Address;
use anyhow::Result;
use serde::Serialize;
use tip_assistant::{Installer, WriteReceipt};

use crate::context::CliContext;

#[derive(Debug, Serialize)]
pub struct Install {
    pub profile: Address,
    pub delegate: Address,
    /// `None` when the delegate was already installed
    pub receipt: Option<WriteReceipt>,
}

pub struct InstallArgs {
    pub profile: Address,
    pub delegate: Option<Address>,
}

impl Install {
    pub async fn run(ctx: &CliContext, InstallArgs { profile, delegate }: InstallArgs) -> Result<Self> {
        let delegate = ctx.delegate_address(delegate)?;
        let (store, _) = ctx.signing_store().await?;

        let receipt = Installer::new(store)
            .install_delegate(profile, delegate)
            .await?;

        Ok(Self {
            profile,
            delegate,
            receipt,
        })
    }
}
