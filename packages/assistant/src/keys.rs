//! ERC725Y data key derivation.
//!
//! Keys follow the LSP2 `Mapping` layout:
//! `keccak256(name)[0..10] || 0x0000 || discriminator[0..20]`

use alloy_primitives::{keccak256, Address, B256};

use crate::error::CodecError;

/// Namespace for the per-transaction-type list of subscribed assistants
pub const TYPE_CONFIG_NAME: &str = "UAPTypeConfig";
/// Namespace for an assistant's own field configuration
pub const EXECUTIVE_CONFIG_NAME: &str = "UAPExecutiveConfig";

const NAME_PREFIX_LEN: usize = 10;
const RESERVED_LEN: usize = 2;
const DISCRIMINATOR_LEN: usize = 20;

/// Derives the mapping key for `name` and `discriminator`.
///
/// Only the first 20 bytes of the discriminator are used. A shorter
/// discriminator is right-padded with zeros.
pub fn mapping_key(name: &str, discriminator: &[u8]) -> B256 {
    let name_hash = keccak256(name.as_bytes());

    let mut key = B256::ZERO;
    key[..NAME_PREFIX_LEN].copy_from_slice(&name_hash[..NAME_PREFIX_LEN]);

    let take = discriminator.len().min(DISCRIMINATOR_LEN);
    let start = NAME_PREFIX_LEN + RESERVED_LEN;
    key[start..start + take].copy_from_slice(&discriminator[..take]);

    key
}

/// Same as [`mapping_key`], with the discriminator given as hex (with or without `0x`)
pub fn mapping_key_hex(name: &str, discriminator: &str) -> Result<B256, CodecError> {
    let stripped = discriminator.strip_prefix("0x").unwrap_or(discriminator);
    let bytes = const_hex::decode(stripped)
        .map_err(|e| CodecError::InvalidInput(format!("discriminator `{discriminator}`: {e}")))?;

    if bytes.is_empty() {
        return Err(CodecError::InvalidInput(
            "discriminator must not be empty".to_string(),
        ));
    }

    Ok(mapping_key(name, &bytes))
}

pub fn type_config_key(type_id: B256) -> B256 {
    mapping_key(TYPE_CONFIG_NAME, type_id.as_slice())
}

pub fn executive_config_key(assistant: Address) -> B256 {
    mapping_key(EXECUTIVE_CONFIG_NAME, assistant.as_slice())
}
