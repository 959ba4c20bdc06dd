use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A wrapper around a credential string that zeroizes on drop
/// This holds either a mnemonic phrase or a `0x`-prefixed private key
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(credential: String) -> Self {
        Self(credential)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Credential {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Credential {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl FromStr for Credential {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

// never print the secret itself, config structs get logged at debug level
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let credential = Credential::new("test test test junk".to_string());
        assert_eq!(format!("{credential:?}"), "Credential(***)");
        assert_eq!(credential.as_str(), "test test test junk");
    }

    #[test]
    fn serde_is_transparent() {
        let credential: Credential = serde_json::from_str("\"0xabc\"").unwrap();
        assert_eq!(&*credential, "0xabc");
        assert_eq!(serde_json::to_string(&credential).unwrap(), "\"0xabc\"");
    }
}
