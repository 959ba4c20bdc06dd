use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tip_assistant::constants::Network;
use utils::{config::CliEnvExt, credential::Credential, serde::deserialize_vec_string};

#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[command(version, about = "Configure the Tip Assistant on a LUKSO Universal Profile", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub args: CliArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the data keys the assistant uses on the selected network
    Keys {
        /// Derive keys for a custom assistant deployment
        #[arg(long)]
        assistant: Option<Address>,
    },

    /// Read and print the assistant configuration of a profile
    Show {
        #[arg(long)]
        profile: Address,
    },

    /// Check whether the assistant protocol delegate is installed on a profile
    CheckInstalled {
        #[arg(long)]
        profile: Address,

        /// Defaults to the configured delegate for the network
        #[arg(long)]
        delegate: Option<Address>,
    },

    /// Subscribe the assistant and store the tip settings
    Save {
        #[arg(long)]
        profile: Address,

        /// Where tips are sent
        #[arg(long)]
        destination: String,

        /// Whole percentage of each incoming transfer, 1 to 100
        #[arg(long)]
        percentage: String,
    },

    /// Unsubscribe the assistant and clear its settings
    Deactivate {
        #[arg(long)]
        profile: Address,
    },

    /// Install the assistant protocol as the profile's universal receiver delegate
    Install {
        #[arg(long)]
        profile: Address,

        /// Defaults to the configured delegate for the network
        #[arg(long)]
        delegate: Option<Address>,
    },

    /// Add the permissions a controller needs to manage assistants
    GrantPermissions {
        #[arg(long)]
        profile: Address,

        /// Defaults to the signer's own address
        #[arg(long)]
        controller: Option<Address>,

        /// Only request the universal receiver delegate permissions
        #[arg(long)]
        protocol_only: bool,
    },
}

/// This struct is used for both args and environment variables
/// the basic idea is that every env var can be overriden by a cli arg
/// and these override the config file
/// env vars follow the pattern of TIP_ASSISTANT_{UPPERCASE_ARG_NAME}
#[derive(Debug, Args, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliArgs {
    /// The home directory of the application, where the tip-assistant.toml configuration file is stored
    /// if not provided here or in an env var, a series of default directories will be tried
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<PathBuf>,

    /// The path to an optional dotenv file to try and load
    /// if not set, will be the current working directory's .env
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dotenv: Option<PathBuf>,

    /// Log level in the format of comma-separated tracing directives.
    #[arg(long, global = true, value_delimiter = ',')]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(deserialize_with = "deserialize_vec_string")]
    pub log_level: Vec<String>,

    /// mainnet or testnet
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,

    /// Overrides the network's configured RPC endpoint
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_endpoint: Option<String>,

    /// Mnemonic or 0x-prefixed private key of a profile controller
    /// (usually leave this as None and set it in env)
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,

    /// Derivation index when the credential is a mnemonic
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hd_index: Option<u32>,
}

impl CliEnvExt for CliArgs {
    const ENV_VAR_PREFIX: &'static str = "TIP_ASSISTANT";
    const TOML_IDENTIFIER: &'static str = "cli";

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn dotenv_path(&self) -> Option<PathBuf> {
        self.dotenv.clone()
    }
}
