use alloy_primitives::Address;
use anyhow::Result;
use serde::Serialize;
use tip_assistant::InstallationChecker;

use crate::context::CliContext;

#[derive(Debug, Serialize)]
pub struct CheckInstalled {
    pub profile: Address,
    pub installed_delegate: Option<Address>,
    pub expected_delegate: Option<Address>,
    /// Unknown when there is no delegate to compare against
    pub installed: Option<bool>,
}

pub struct CheckInstalledArgs {
    pub profile: Address,
    pub delegate: Option<Address>,
}

impl CheckInstalled {
    pub async fn run(
        ctx: &CliContext,
        CheckInstalledArgs { profile, delegate }: CheckInstalledArgs,
    ) -> Result<Self> {
        let expected_delegate = ctx.delegate_address(delegate).ok();
        let checker = InstallationChecker::new(ctx.query_store().await?);

        let installed_delegate = checker.installed_delegate(profile).await?;
        let installed = expected_delegate.map(|expected| installed_delegate == Some(expected));

        Ok(Self {
            profile,
            installed_delegate,
            expected_delegate,
            installed,
        })
    }
}
