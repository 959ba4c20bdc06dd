use std::time::Duration;

use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider};
use anyhow::{bail, Context, Result};
use tip_assistant::{
    constants::{Network, MAINNET_CHAIN_ID, TESTNET_CHAIN_ID},
    AssistantContext, Erc725Store,
};
use utils::evm_client::{EvmQueryClient, EvmSigningClient};

use crate::config::Config;

pub struct CliContext {
    pub config: Config,
}

impl CliContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn network(&self) -> Network {
        self.config.network
    }

    pub fn assistant_address(&self) -> Address {
        self.config.network_config().assistant_address
    }

    pub fn delegate_address(&self, explicit: Option<Address>) -> Result<Address> {
        explicit
            .or(self.config.network_config().delegate_address)
            .with_context(|| {
                format!(
                    "no delegate address given and none configured for {}",
                    self.network()
                )
            })
    }

    pub fn assistant_context(&self, profile: Address) -> AssistantContext {
        AssistantContext::with_tip_assistant(profile, self.assistant_address())
    }

    /// A read-only store over the network's query endpoint
    pub async fn query_store(&self) -> Result<Erc725Store> {
        let endpoint = self.config.evm_chain().query_client_endpoint()?;
        let client = EvmQueryClient::new(endpoint).await?;
        self.check_chain_id(&client.provider).await?;

        Ok(Erc725Store::new(client.provider))
    }

    /// A store that signs writes with the configured credential.
    /// Also returns the signer address, which must control the profile.
    pub async fn signing_store(&self) -> Result<(Erc725Store, Address)> {
        let credential = self
            .config
            .credential
            .clone()
            .context("write commands need a credential, set TIP_ASSISTANT_CREDENTIAL")?;

        let mut client_config = self.config.evm_chain().signing_client_config(credential)?;
        if let Some(hd_index) = self.config.hd_index {
            client_config = client_config.with_hd_index(hd_index);
        }
        if let Some(poll_interval_ms) = self.config.poll_interval_ms {
            client_config = client_config.with_poll_interval(Duration::from_millis(poll_interval_ms));
        }

        let client = EvmSigningClient::new(client_config).await?;
        self.check_chain_id(&client.provider).await?;

        let signer = client.address();
        Ok((Erc725Store::new(client.provider), signer))
    }

    async fn check_chain_id(&self, provider: &DynProvider) -> Result<()> {
        let reported = provider.get_chain_id().await?;
        let configured = self.config.network_config().chain_id;

        check_network(self.network(), configured, reported)
    }
}

/// Refuses an endpoint that belongs to the other LUKSO network, since the
/// assistant address is per network and writing the wrong one would subscribe
/// an address with no deployment. Unknown chains (local forks and the like)
/// only warn.
pub fn check_network(network: Network, configured: u64, reported: u64) -> Result<()> {
    if reported == configured {
        return Ok(());
    }

    if reported == MAINNET_CHAIN_ID || reported == TESTNET_CHAIN_ID {
        let detected = Network::from_chain_id(reported);
        bail!(
            "endpoint is on {detected} (chain id {reported}) but {network} expects chain id {configured}, pass `--network {detected}`"
        );
    }

    tracing::warn!("endpoint reports chain id {reported}, expected {configured} for {network}");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matching_chain_passes() {
        assert!(check_network(Network::Mainnet, MAINNET_CHAIN_ID, MAINNET_CHAIN_ID).is_ok());
        assert!(check_network(Network::Testnet, TESTNET_CHAIN_ID, TESTNET_CHAIN_ID).is_ok());
    }

    #[test]
    fn other_lukso_network_is_refused() {
        let err = check_network(Network::Testnet, TESTNET_CHAIN_ID, MAINNET_CHAIN_ID).unwrap_err();
        assert!(err.to_string().contains("--network mainnet"));

        let err = check_network(Network::Mainnet, MAINNET_CHAIN_ID, TESTNET_CHAIN_ID).unwrap_err();
        assert!(err.to_string().contains("--network testnet"));
    }

    #[test]
    fn unknown_chain_only_warns() {
        assert!(check_network(Network::Testnet, TESTNET_CHAIN_ID, 31337).is_ok());
        // a testnet entry reconfigured for a local chain still refuses mainnet
        assert!(check_network(Network::Testnet, 31337, MAINNET_CHAIN_ID).is_err());
    }
}
