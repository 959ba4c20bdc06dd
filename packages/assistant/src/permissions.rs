//! LSP6 controller permissions, stored as a `bytes32` bitmap under
//! `AddressPermissions:Permissions:<controller>`.

use std::ops::{BitOr, BitOrAssign};

use alloy_primitives::{b256, Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// `keccak256("AddressPermissions")[0..6] || keccak256("Permissions")[0..4] || 0x0000`
const PERMISSIONS_KEY_PREFIX: B256 =
    b256!("0x4b80742de2bf82acb36300000000000000000000000000000000000000000000");

pub fn permissions_key(controller: Address) -> B256 {
    let mut key = PERMISSIONS_KEY_PREFIX;
    key[12..].copy_from_slice(controller.as_slice());
    key
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permissions(U256);

macro_rules! permission_bits {
    ($($name:ident = $bit:expr),* $(,)?) => {
        impl Permissions {
            $(pub const $name: Self = Self(U256::from_limbs([$bit, 0, 0, 0]));)*

            const NAMED: &'static [(&'static str, Self)] = &[$((stringify!($name), Self::$name)),*];
        }
    };
}

permission_bits! {
    CHANGEOWNER = 0x1,
    ADDCONTROLLER = 0x2,
    EDITPERMISSIONS = 0x4,
    ADDEXTENSIONS = 0x8,
    CHANGEEXTENSIONS = 0x10,
    ADDUNIVERSALRECEIVERDELEGATE = 0x20,
    CHANGEUNIVERSALRECEIVERDELEGATE = 0x40,
    REENTRANCY = 0x80,
    SUPER_TRANSFERVALUE = 0x100,
    TRANSFERVALUE = 0x200,
    SUPER_CALL = 0x400,
    CALL = 0x800,
    SUPER_STATICCALL = 0x1000,
    STATICCALL = 0x2000,
    SUPER_DELEGATECALL = 0x4000,
    DELEGATECALL = 0x8000,
    DEPLOY = 0x10000,
    SUPER_SETDATA = 0x20000,
    SETDATA = 0x40000,
    ENCRYPT = 0x80000,
    DECRYPT = 0x100000,
    SIGN = 0x200000,
    EXECUTE_RELAY_CALL = 0x400000,
}

impl Permissions {
    pub const NONE: Self = Self(U256::ZERO);

    /// What a browser extension grants a freshly added controller
    pub fn default_controller() -> Self {
        Self::SUPER_SETDATA
            | Self::SETDATA
            | Self::SIGN
            | Self::ENCRYPT
            | Self::DECRYPT
            | Self::SUPER_CALL
            | Self::CALL
            | Self::SUPER_STATICCALL
            | Self::STATICCALL
            | Self::SUPER_TRANSFERVALUE
            | Self::TRANSFERVALUE
            | Self::DEPLOY
            | Self::EXECUTE_RELAY_CALL
            | Self::EDITPERMISSIONS
            | Self::ADDCONTROLLER
    }

    /// Needed by the controller that installs the assistant protocol delegate
    pub fn assistant_protocol() -> Self {
        Self::ADDUNIVERSALRECEIVERDELEGATE | Self::CHANGEUNIVERSALRECEIVERDELEGATE
    }

    pub fn bits(&self) -> U256 {
        self.0
    }

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_zero()
    }

    /// Names of the known permissions that are set
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(_, permission)| self.contains(*permission))
            .map(|(name, _)| *name)
            .collect()
    }

    /// An unset key reads back empty and means no permissions
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        match data.len() {
            0 => Ok(Self::NONE),
            32 => Ok(Self(U256::from_be_slice(data))),
            len => Err(CodecError::MalformedData(format!(
                "permissions value must be 32 bytes, got {len}"
            ))),
        }
    }

    pub fn encode(&self) -> Bytes {
        Bytes::copy_from_slice(&self.0.to_be_bytes::<32>())
    }
}

impl BitOr for Permissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Permissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
