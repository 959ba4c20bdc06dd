use std::{fmt, str::FromStr};

use alloy_primitives::{address, b256, Address, B256};
use serde::{Deserialize, Serialize};

/// LUKSO mainnet chain id, every other chain is treated as testnet
pub const MAINNET_CHAIN_ID: u64 = 42;
pub const TESTNET_CHAIN_ID: u64 = 4201;

pub const MAINNET_TIP_ASSISTANT: Address = address!("0x0c3dc7ea7521c79b99a667f2024d76714d33def2");
pub const TESTNET_TIP_ASSISTANT: Address = address!("0xf24c39a4d55994e70059443622fc166f05b5ff14");

pub const MAINNET_RPC_ENDPOINT: &str = "https://rpc.mainnet.lukso.network";
pub const TESTNET_RPC_ENDPOINT: &str = "https://rpc.testnet.lukso.network";

/// keccak256("LSP0ValueReceived")
pub const LSP0_VALUE_RECEIVED: B256 =
    b256!("0x9c4705229491d365fb5434052e12a386d6771d976bea61070a8c694e8affea3d");

/// keccak256("LSP1UniversalReceiverDelegate")
pub const LSP1_DELEGATE_KEY: B256 =
    b256!("0x0cfc51aec37c55a4d0b1a65c6255c4bf2fbdf6277f3cc0730c45b828b6db8b47");

/// Transaction type of an incoming native token transfer
pub fn lsp0_value_received() -> B256 {
    LSP0_VALUE_RECEIVED
}

pub fn lsp1_delegate_key() -> B256 {
    LSP1_DELEGATE_KEY
}

/// The transaction types the tip assistant reacts to
pub fn supported_transaction_types() -> Vec<B256> {
    vec![LSP0_VALUE_RECEIVED]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn from_chain_id(chain_id: u64) -> Self {
        if chain_id == MAINNET_CHAIN_ID {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Mainnet => MAINNET_CHAIN_ID,
            Network::Testnet => TESTNET_CHAIN_ID,
        }
    }

    pub fn tip_assistant(&self) -> Address {
        match self {
            Network::Mainnet => MAINNET_TIP_ASSISTANT,
            Network::Testnet => TESTNET_TIP_ASSISTANT,
        }
    }

    pub fn rpc_endpoint(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_RPC_ENDPOINT,
            Network::Testnet => TESTNET_RPC_ENDPOINT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(format!("unknown network `{other}`, expected mainnet or testnet")),
        }
    }
}

impl TryFrom<String> for Network {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod test {
    use alloy_primitives::keccak256;

    use super::*;

    #[test]
    fn well_known_hashes() {
        assert_eq!(lsp0_value_received(), keccak256("LSP0ValueReceived"));
        assert_eq!(lsp1_delegate_key(), keccak256("LSP1UniversalReceiverDelegate"));
    }

    #[test]
    fn network_from_chain_id() {
        assert_eq!(Network::from_chain_id(42), Network::Mainnet);
        assert_eq!(Network::from_chain_id(4201), Network::Testnet);
        assert_eq!(Network::from_chain_id(31337), Network::Testnet);

        assert_eq!(Network::Mainnet.tip_assistant(), MAINNET_TIP_ASSISTANT);
        assert_eq!(Network::Testnet.rpc_endpoint(), TESTNET_RPC_ENDPOINT);
    }

    #[test]
    fn network_parse() {
        assert_eq!("MainNet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(Network::Testnet.to_string().parse::<Network>().unwrap(), Network::Testnet);
        assert!("devnet".parse::<Network>().is_err());
    }

    #[test]
    fn network_serde_matches_parse() {
        let network: Network = serde_json::from_str("\"Mainnet\"").unwrap();
        assert_eq!(network, Network::Mainnet);
        assert_eq!(serde_json::to_string(&Network::Testnet).unwrap(), "\"testnet\"");
        assert!(serde_json::from_str::<Network>("\"devnet\"").is_err());
    }
}
