use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tip_assistant::constants::Network;
use utils::{
    config::{ConfigExt, EvmChainConfig},
    credential::Credential,
};

/// The fully parsed and validated config struct we use in the application
/// this is built up from the ConfigBuilder which can load from multiple sources (in order of preference):
///
/// 1. cli args
/// 2. environment variables
/// 3. config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// The network commands run against.
    /// Default is `testnet`
    pub network: Network,

    /// The log-level to use, in the format of [tracing directives](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#directives).
    /// Default is `["info"]`
    pub log_level: Vec<String>,

    /// Replaces the selected network's endpoints when set
    pub http_endpoint: Option<String>,

    /// Signing credential for write commands (usually None, set via env var)
    pub credential: Option<Credential>,

    pub hd_index: Option<u32>,

    /// How often to poll for receipts, in milliseconds
    pub poll_interval_ms: Option<u64>,

    pub mainnet: NetworkConfig,
    pub testnet: NetworkConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub http_endpoint: Option<String>,
    #[serde(default)]
    pub ws_endpoints: Vec<String>,
    /// The tip assistant contract
    pub assistant_address: Address,
    /// The assistant protocol's universal receiver delegate, needed by `install`
    pub delegate_address: Option<Address>,
}

impl NetworkConfig {
    pub fn defaults(network: Network) -> Self {
        Self {
            chain_id: network.chain_id(),
            http_endpoint: Some(network.rpc_endpoint().to_string()),
            ws_endpoints: Vec::new(),
            assistant_address: network.tip_assistant(),
            delegate_address: None,
        }
    }

    pub fn evm_chain(&self) -> EvmChainConfig {
        EvmChainConfig {
            chain_id: self.chain_id,
            http_endpoint: self.http_endpoint.clone(),
            ws_endpoints: self.ws_endpoints.clone(),
        }
    }
}

impl Config {
    pub fn network_config(&self) -> &NetworkConfig {
        match self.network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }

    /// Connection settings for the selected network, with the endpoint override applied
    pub fn evm_chain(&self) -> EvmChainConfig {
        let mut chain = self.network_config().evm_chain();
        if let Some(endpoint) = &self.http_endpoint {
            chain.http_endpoint = Some(endpoint.clone());
            chain.ws_endpoints.clear();
        }
        chain
    }
}

impl ConfigExt for Config {
    const DIRNAME: &'static str = "tip-assistant";
    const FILENAME: &'static str = "tip-assistant.toml";

    fn log_levels(&self) -> impl Iterator<Item = &str> {
        self.log_level.iter().map(|s| s.as_str())
    }
}

/// Default values for the config struct
/// these are only used to fill in holes after all the parsing and loading is done
impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            log_level: vec!["info".to_string()],
            http_endpoint: None,
            credential: None,
            hd_index: None,
            poll_interval_ms: None,
            mainnet: NetworkConfig::defaults(Network::Mainnet),
            testnet: NetworkConfig::defaults(Network::Testnet),
        }
    }
}

#[cfg(test)]
mod test {
    use alloy_primitives::address;
    use tip_assistant::constants::{MAINNET_RPC_ENDPOINT, MAINNET_TIP_ASSISTANT};
    use utils::config::ConfigBuilder;

    use super::*;
    use crate::args::CliArgs;

    fn args(home: &tempfile::TempDir) -> CliArgs {
        CliArgs {
            home: Some(home.path().to_path_buf()),
            // purposefully missing, so no real .env is picked up
            dotenv: Some(home.path().join("does-not-exist")),
            ..Default::default()
        }
    }

    #[test]
    fn builtin_network_defaults() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_var_unset("TIP_ASSISTANT_CREDENTIAL", || {
            let config: Config = ConfigBuilder::new(args(&dir)).build().unwrap();

            assert_eq!(config.network, Network::Testnet);
            assert_eq!(config.mainnet.assistant_address, MAINNET_TIP_ASSISTANT);
            assert_eq!(
                config.mainnet.http_endpoint.as_deref(),
                Some(MAINNET_RPC_ENDPOINT)
            );
            assert!(config.credential.is_none());
        });
    }

    #[test]
    fn file_env_and_args_layering() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(Config::FILENAME),
            r#"
            [default]
            network = "mainnet"

            [default.mainnet]
            delegate_address = "0x5555555555555555555555555555555555555555"

            [cli]
            log_level = ["debug"]
            "#,
        )
        .unwrap();

        temp_env::with_var("TIP_ASSISTANT_CREDENTIAL", Some("test test junk"), || {
            let config: Config = ConfigBuilder::new(args(&dir)).build().unwrap();

            assert_eq!(config.network, Network::Mainnet);
            assert_eq!(config.log_level, vec!["debug".to_string()]);
            assert_eq!(
                config.network_config().delegate_address,
                Some(address!("0x5555555555555555555555555555555555555555"))
            );
            // untouched keys keep their built-in defaults
            assert_eq!(config.mainnet.assistant_address, MAINNET_TIP_ASSISTANT);
            assert_eq!(
                config.credential.as_ref().map(|c| c.as_str()),
                Some("test test junk")
            );

            let mut args = args(&dir);
            args.network = Some(Network::Testnet);
            args.http_endpoint = Some("http://localhost:8545".to_string());
            let config: Config = ConfigBuilder::new(args).build().unwrap();

            assert_eq!(config.network, Network::Testnet);
            let chain = config.evm_chain();
            assert_eq!(chain.http_endpoint.as_deref(), Some("http://localhost:8545"));
            assert!(chain.ws_endpoints.is_empty());
        });
    }

    #[test]
    fn network_env_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        temp_env::with_var("TIP_ASSISTANT_NETWORK", Some("Mainnet"), || {
            let config: Config = ConfigBuilder::new(args(&dir)).build().unwrap();
            assert_eq!(config.network, Network::Mainnet);
        });
    }
}
