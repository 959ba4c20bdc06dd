pub mod signing;

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder, WsConnect};
use alloy_signer_local::PrivateKeySigner;
use anyhow::Result;
use signing::make_signer;
use std::{str::FromStr, sync::Arc, time::Duration};

use crate::{credential::Credential, error::EvmClientError};

#[derive(Clone)]
pub struct EvmQueryClient {
    pub endpoint: EvmEndpoint,
    pub provider: DynProvider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvmEndpoint {
    WebSocket(url::Url),
    Http(url::Url),
}

impl FromStr for EvmEndpoint {
    type Err = EvmClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = url::Url::parse(s).map_err(|e| EvmClientError::ParseEndpoint(e.to_string()))?;
        match url.scheme() {
            "ws" | "wss" => Ok(EvmEndpoint::WebSocket(url)),
            "http" | "https" => Ok(EvmEndpoint::Http(url)),
            scheme => Err(EvmClientError::ParseEndpoint(format!(
                "could not determine endpoint from scheme {scheme} (full url: {s})"
            ))),
        }
    }
}

impl std::fmt::Display for EvmEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvmEndpoint::WebSocket(url) => write!(f, "{}", url),
            EvmEndpoint::Http(url) => write!(f, "{}", url),
        }
    }
}

impl EvmEndpoint {
    pub async fn to_provider(&self) -> std::result::Result<DynProvider, EvmClientError> {
        Ok(match self {
            EvmEndpoint::WebSocket(url) => {
                let ws = WsConnect::new(url.clone());
                DynProvider::new(
                    ProviderBuilder::new()
                        .connect_ws(ws)
                        .await
                        .map_err(|e| EvmClientError::WebSocketProvider(e.into()))?,
                )
            }
            EvmEndpoint::Http(url) => {
                DynProvider::new(ProviderBuilder::new().connect_http(url.clone()))
            }
        })
    }
}

impl EvmQueryClient {
    pub async fn new(endpoint: EvmEndpoint) -> std::result::Result<Self, EvmClientError> {
        Ok(EvmQueryClient {
            provider: endpoint.to_provider().await?,
            endpoint,
        })
    }

    pub async fn chain_id(&self) -> std::result::Result<u64, EvmClientError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| EvmClientError::ChainId(e.into()))
    }
}

impl std::fmt::Debug for EvmQueryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmQueryClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Clone)]
pub struct EvmSigningClient {
    pub config: EvmSigningClientConfig,
    pub provider: DynProvider,
    /// The signer is the same as the default signer in the provider's wallet,
    /// kept separately so the controller address is available without a provider roundtrip
    pub signer: Arc<PrivateKeySigner>,
}

#[derive(Debug, Clone)]
pub struct EvmSigningClientConfig {
    pub endpoint: EvmEndpoint,
    pub credential: Credential,
    pub hd_index: Option<u32>,
    /// The interval at which to poll the provider for receipts
    /// if unset, will use the default of the provider (which may differ across networks)
    pub poll_interval: Option<Duration>,
}

impl EvmSigningClientConfig {
    pub fn new(endpoint: EvmEndpoint, credential: Credential) -> Self {
        Self {
            endpoint,
            credential,
            hd_index: None,
            poll_interval: None,
        }
    }

    pub fn with_hd_index(mut self, hd_index: u32) -> Self {
        self.hd_index = Some(hd_index);
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = Some(poll_interval);
        self
    }
}

impl EvmSigningClient {
    pub async fn new(config: EvmSigningClientConfig) -> Result<Self> {
        let signer = make_signer(&config.credential, config.hd_index)?;

        let wallet: EthereumWallet = signer.clone().into();

        // the default builder already fills gas, nonce and chain id
        let builder = ProviderBuilder::new().wallet(wallet);

        let provider = match &config.endpoint {
            EvmEndpoint::WebSocket(url) => {
                let ws = WsConnect::new(url.clone());
                DynProvider::new(
                    builder
                        .connect_ws(ws)
                        .await
                        .map_err(|e| EvmClientError::WebSocketProvider(e.into()))?,
                )
            }
            EvmEndpoint::Http(url) => DynProvider::new(builder.connect_http(url.clone())),
        };

        if let Some(poll_interval) = config.poll_interval {
            provider.client().set_poll_interval(poll_interval);
        }

        tracing::debug!(
            "Created signing client for {} at {}",
            signer.address(),
            config.endpoint
        );

        Ok(Self {
            config,
            provider,
            signer: Arc::new(signer),
        })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

impl std::fmt::Debug for EvmSigningClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmSigningClient")
            .field("endpoint", &self.config.endpoint)
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_endpoint() {
        let endpoint = EvmEndpoint::from_str("ws://localhost:8545").unwrap();
        assert!(matches!(endpoint, EvmEndpoint::WebSocket(_)));

        let endpoint = EvmEndpoint::from_str("http://localhost:8545").unwrap();
        assert!(matches!(endpoint, EvmEndpoint::Http(_)));

        let endpoint = EvmEndpoint::from_str("https://rpc.mainnet.lukso.network").unwrap();
        assert!(matches!(endpoint, EvmEndpoint::Http(_)));

        let endpoint = EvmEndpoint::from_str("wss://localhost:8545").unwrap();
        assert!(matches!(endpoint, EvmEndpoint::WebSocket(_)));

        let err = EvmEndpoint::from_str("localhost:8545").unwrap_err();
        assert!(matches!(err, EvmClientError::ParseEndpoint(_)));

        let err = EvmEndpoint::from_str("ftp://localhost:8545").unwrap_err();
        assert!(matches!(err, EvmClientError::ParseEndpoint(_)));
    }

    #[tokio::test]
    async fn signing_client_exposes_signer_address() {
        // http providers are lazy, nothing is dialed until the first request
        let config = EvmSigningClientConfig::new(
            "http://localhost:8545".parse().unwrap(),
            Credential::new(
                "test test test test test test test test test test test junk".to_string(),
            ),
        );
        let client = EvmSigningClient::new(config).await.unwrap();

        assert_eq!(
            client.address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
                .parse::<Address>()
                .unwrap()
        );
    }
}
