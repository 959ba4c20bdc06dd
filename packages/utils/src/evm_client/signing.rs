use alloy_signer::k256::SecretKey;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};

use crate::error::EvmClientError;

pub fn make_signer(
    credentials: &str,
    hd_index: Option<u32>,
) -> Result<PrivateKeySigner, EvmClientError> {
    let hd_index = hd_index.unwrap_or_default();

    match credentials.strip_prefix("0x") {
        Some(stripped) => {
            // if the string begins with `0x`, it is a private key
            // and so we can't derive additional keys from it
            if hd_index > 0 {
                return Err(EvmClientError::DerivationWithPrivateKey);
            }
            let private_key =
                const_hex::decode(stripped).map_err(|e| EvmClientError::Signer(e.into()))?;
            let secret_key = SecretKey::from_slice(&private_key)
                .map_err(|e| EvmClientError::Signer(anyhow::anyhow!("{e}")))?;
            Ok(PrivateKeySigner::from_signing_key(secret_key.into()))
        }
        None => MnemonicBuilder::<English>::default()
            .phrase(credentials)
            .index(hd_index)
            .map_err(|e| EvmClientError::Signer(e.into()))?
            .build()
            .map_err(|e| EvmClientError::Signer(e.into())),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ANVIL_MNEMONIC: &str = "test test test test test test test test test test test junk";
    const ANVIL_KEY_0: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn mnemonic_and_private_key_agree() {
        let from_mnemonic = make_signer(ANVIL_MNEMONIC, None).unwrap();
        let from_key = make_signer(ANVIL_KEY_0, None).unwrap();

        assert_eq!(from_mnemonic.address(), from_key.address());
    }

    #[test]
    fn hd_index_derives_distinct_accounts() {
        let first = make_signer(ANVIL_MNEMONIC, Some(0)).unwrap();
        let second = make_signer(ANVIL_MNEMONIC, Some(1)).unwrap();

        assert_ne!(first.address(), second.address());
    }

    #[test]
    fn private_key_rejects_hd_index() {
        let err = make_signer(ANVIL_KEY_0, Some(1)).unwrap_err();
        assert!(matches!(err, EvmClientError::DerivationWithPrivateKey));
    }

    #[test]
    fn malformed_private_key() {
        let err = make_signer("0xnothex", None).unwrap_err();
        assert!(matches!(err, EvmClientError::Signer(_)));
    }
}
