//! Input checks for the tip settings, run before anything is encoded.

use std::str::FromStr;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CodecError, ValidationError},
    fields::{FieldValues, TIP_ADDRESS_FIELD, TIP_AMOUNT_FIELD},
};

pub const MIN_TIP_PERCENTAGE: u8 = 1;
pub const MAX_TIP_PERCENTAGE: u8 = 100;

/// Whole percentages only, digits and nothing else
pub fn validate_tip_percentage(input: &str) -> Result<u8, ValidationError> {
    let input = input.trim();
    let invalid = || ValidationError::TipPercentage(input.to_string());

    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // anything too long for a u8 is out of range anyway
    let value = input.parse::<u8>().map_err(|_| invalid())?;
    if !(MIN_TIP_PERCENTAGE..=MAX_TIP_PERCENTAGE).contains(&value) {
        return Err(invalid());
    }

    Ok(value)
}

pub fn validate_destination(input: &str, own: Address) -> Result<Address, ValidationError> {
    let input = input.trim();
    let destination = Address::from_str(input)
        .map_err(|_| ValidationError::DestinationAddress(input.to_string()))?;

    if destination == own {
        return Err(ValidationError::SelfDestination);
    }

    Ok(destination)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipConfig {
    pub tip_address: Address,
    pub tip_percentage: u8,
}

impl TipConfig {
    pub fn from_input(
        destination: &str,
        percentage: &str,
        own: Address,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            tip_address: validate_destination(destination, own)?,
            tip_percentage: validate_tip_percentage(percentage)?,
        })
    }

    pub fn to_field_values(&self) -> FieldValues {
        FieldValues::from([
            (
                TIP_ADDRESS_FIELD.to_string(),
                self.tip_address.to_checksum(None),
            ),
            (
                TIP_AMOUNT_FIELD.to_string(),
                self.tip_percentage.to_string(),
            ),
        ])
    }

    /// Typed view of decoded fields. Values written by other clients may fall
    /// outside the range this client accepts, which is reported as malformed.
    pub fn from_field_values(values: &FieldValues) -> Result<Self, CodecError> {
        let field = |name: &str| {
            values
                .get(name)
                .ok_or_else(|| CodecError::MissingField(name.to_string()))
        };

        let tip_address = Address::from_str(field(TIP_ADDRESS_FIELD)?)
            .map_err(|e| CodecError::MalformedData(format!("{TIP_ADDRESS_FIELD}: {e}")))?;
        let tip_percentage = validate_tip_percentage(field(TIP_AMOUNT_FIELD)?)
            .map_err(|e| CodecError::MalformedData(e.to_string()))?;

        Ok(Self {
            tip_address,
            tip_percentage,
        })
    }
}
