//! Whether the assistant protocol's universal receiver delegate is installed on
//! a profile, and the writes that install it.

use alloy_primitives::{Address, Bytes};
use serde::Serialize;
use tracing::instrument;

use crate::{
    constants::LSP1_DELEGATE_KEY,
    error::{CodecError, Result},
    permissions::{permissions_key, Permissions},
    store::{ProfileStore, WriteBatch, WriteReceipt},
};

pub struct InstallationChecker<S> {
    store: S,
}

impl<S: ProfileStore> InstallationChecker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read failures are returned as errors so "not installed" and
    /// "could not check" stay distinguishable
    #[instrument(skip(self), fields(subsys = "Installation"))]
    pub async fn is_installed(&self, profile: Address, expected_delegate: Address) -> Result<bool> {
        let installed = self.installed_delegate(profile).await?;
        Ok(installed == Some(expected_delegate))
    }

    #[instrument(skip(self), fields(subsys = "Installation"))]
    pub async fn installed_delegate(&self, profile: Address) -> Result<Option<Address>> {
        let value = self.store.get_data(profile, LSP1_DELEGATE_KEY).await?;

        match value.len() {
            0 => Ok(None),
            20 => Ok(Some(Address::from_slice(&value))),
            len => Err(CodecError::MalformedData(format!(
                "universal receiver delegate must be 20 bytes, got {len}"
            ))
            .into()),
        }
    }

    #[instrument(skip(self), fields(subsys = "Installation"))]
    pub async fn permissions(&self, profile: Address, controller: Address) -> Result<Permissions> {
        let value = self
            .store
            .get_data(profile, permissions_key(controller))
            .await?;
        Ok(Permissions::decode(&value)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGrant {
    pub controller: Address,
    pub previous: Permissions,
    pub current: Permissions,
    /// `None` when the controller already held every requested permission
    pub receipt: Option<WriteReceipt>,
}

pub struct Installer<S> {
    checker: InstallationChecker<S>,
}

impl<S: ProfileStore> Installer<S> {
    pub fn new(store: S) -> Self {
        Self {
            checker: InstallationChecker::new(store),
        }
    }

    pub fn checker(&self) -> &InstallationChecker<S> {
        &self.checker
    }

    /// Points the profile's universal receiver delegate at `delegate`.
    /// Returns `None` without writing if it already does.
    #[instrument(skip(self), fields(subsys = "Installation"))]
    pub async fn install_delegate(
        &self,
        profile: Address,
        delegate: Address,
    ) -> Result<Option<WriteReceipt>> {
        let current = self.checker.installed_delegate(profile).await?;
        if current == Some(delegate) {
            tracing::info!("delegate already installed");
            return Ok(None);
        }

        if let Some(previous) = current {
            tracing::warn!(%previous, "replacing existing universal receiver delegate");
        }

        let mut batch = WriteBatch::new();
        batch.push(LSP1_DELEGATE_KEY, Bytes::copy_from_slice(delegate.as_slice()));

        let receipt = self.checker.store().submit(profile, batch).await?;
        tracing::info!(tx_hash = %receipt.tx_hash, "delegate installed");
        Ok(Some(receipt))
    }

    /// Adds `requested` to the controller's permissions. Existing bits are kept.
    #[instrument(skip(self), fields(subsys = "Installation"))]
    pub async fn grant_permissions(
        &self,
        profile: Address,
        controller: Address,
        requested: Permissions,
    ) -> Result<PermissionGrant> {
        let previous = self.checker.permissions(profile, controller).await?;
        let current = previous | requested;

        if current == previous {
            tracing::info!("controller already holds the requested permissions");
            return Ok(PermissionGrant {
                controller,
                previous,
                current,
                receipt: None,
            });
        }

        let mut batch = WriteBatch::new();
        batch.push(permissions_key(controller), current.encode());

        let receipt = self.checker.store().submit(profile, batch).await?;
        tracing::info!(tx_hash = %receipt.tx_hash, permissions = ?current.names(), "permissions granted");

        Ok(PermissionGrant {
            controller,
            previous,
            current,
            receipt: Some(receipt),
        })
    }
}
