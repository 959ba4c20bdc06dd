use alloy_primitives::Address;
use anyhow::Result;
use serde::Serialize;
use tip_assistant::{Installer, PermissionGrant, Permissions};

use crate::context::CliContext;

#[derive(Debug, Serialize)]
pub struct GrantPermissions {
    pub profile: Address,
    #[serde(flatten)]
    pub grant: PermissionGrant,
    pub permissions: Vec<&'static str>,
}

pub struct GrantPermissionsArgs {
    pub profile: Address,
    pub controller: Option<Address>,
    pub protocol_only: bool,
}

impl GrantPermissions {
    pub async fn run(
        ctx: &CliContext,
        GrantPermissionsArgs {
            profile,
            controller,
            protocol_only,
        }: GrantPermissionsArgs,
    ) -> Result<Self> {
        let (store, signer) = ctx.signing_store().await?;
        let controller = controller.unwrap_or(signer);

        let requested = if protocol_only {
            Permissions::assistant_protocol()
        } else {
            Permissions::default_controller() | Permissions::assistant_protocol()
        };

        let grant = Installer::new(store)
            .grant_permissions(profile, controller, requested)
            .await?;

        Ok(Self {
            profile,
            permissions: grant.current.names(),
            grant,
        })
    }
}
