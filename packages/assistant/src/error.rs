use alloy_primitives::TxHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Address list has {0} entries, more than a uint16 count can hold")]
    CapacityExceeded(usize),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing value for field `{0}`")]
    MissingField(String),

    #[error("ABI error: {0}")]
    Abi(#[from] alloy_dyn_abi::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Remote read failed: {0:#}")]
    RemoteRead(anyhow::Error),

    #[error("Remote write failed: {0:#}")]
    RemoteWrite(anyhow::Error),

    #[error("Waiting for confirmation of {hash} failed: {source:#}")]
    Confirmation {
        hash: TxHash,
        source: anyhow::Error,
    },

    #[error("Transaction {0} reverted")]
    Reverted(TxHash),

    #[error("Batched read returned {actual} values for {expected} keys")]
    ResponseLength { expected: usize, actual: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Tip amount must be between 1 and 100 without decimals (got `{0}`)")]
    TipPercentage(String),

    #[error("Invalid destination address `{0}`")]
    DestinationAddress(String),

    #[error("Destination address cannot be the profile itself")]
    SelfDestination,
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T, E = AssistantError> = std::result::Result<T, E>;
