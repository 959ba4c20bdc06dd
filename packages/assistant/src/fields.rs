//! Positional ABI encoding of an assistant's typed configuration fields.

use std::collections::BTreeMap;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::Bytes;

use crate::error::CodecError;

/// Field name to display/edit string, e.g. `tipAmount -> "10"`
pub type FieldValues = BTreeMap<String, String>;

pub const TIP_ADDRESS_FIELD: &str = "tipAddress";
pub const TIP_AMOUNT_FIELD: &str = "tipAmount";

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: DynSolType,
}

/// The ordered list of fields stored under an assistant's executive config key
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Builds a schema from `(name, solidity type)` pairs, e.g. `("tipAmount", "uint256")`
    pub fn parse<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, CodecError> {
        let fields = pairs
            .into_iter()
            .map(|(name, kind)| {
                Ok(FieldSpec {
                    name: name.to_string(),
                    kind: DynSolType::parse(kind)?,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;

        Ok(Self { fields })
    }

    /// `(address tipAddress, uint256 tipAmount)`
    pub fn tip_assistant() -> Self {
        Self::new(vec![
            FieldSpec {
                name: TIP_ADDRESS_FIELD.to_string(),
                kind: DynSolType::Address,
            },
            FieldSpec {
                name: TIP_AMOUNT_FIELD.to_string(),
                kind: DynSolType::Uint(256),
            },
        ])
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Coerces every raw value to its declared type and encodes them in schema order.
    /// Only the type shape is checked here.
    pub fn encode(&self, values: &FieldValues) -> Result<Bytes, CodecError> {
        let encoded = self
            .fields
            .iter()
            .map(|field| {
                let raw = values
                    .get(&field.name)
                    .ok_or_else(|| CodecError::MissingField(field.name.clone()))?;
                field.kind.coerce_str(raw.trim()).map_err(|e| {
                    CodecError::InvalidInput(format!(
                        "field `{}` is not a valid {}: {e}",
                        field.name, field.kind
                    ))
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;

        Ok(DynSolValue::Tuple(encoded).abi_encode_params().into())
    }

    /// Decodes a non-empty stored value. Callers treat the empty value as "unset"
    /// before getting here.
    pub fn decode(&self, data: &[u8]) -> Result<FieldValues, CodecError> {
        let kinds = self.fields.iter().map(|field| field.kind.clone()).collect();

        let DynSolValue::Tuple(decoded) = DynSolType::Tuple(kinds).abi_decode_params(data)? else {
            return Err(CodecError::MalformedData(
                "field config did not decode to a tuple".to_string(),
            ));
        };

        if decoded.len() != self.fields.len() {
            return Err(CodecError::MalformedData(format!(
                "expected {} fields, decoded {}",
                self.fields.len(),
                decoded.len()
            )));
        }

        // the decoder ignores dirty padding and trailing words, a stored value
        // must be exactly the canonical encoding of what it decodes to
        let canonical = DynSolValue::Tuple(decoded.clone()).abi_encode_params();
        if canonical.as_slice() != data {
            return Err(CodecError::MalformedData(format!(
                "field config is not canonically encoded ({} bytes, expected {})",
                data.len(),
                canonical.len()
            )));
        }

        Ok(self
            .fields
            .iter()
            .zip(decoded.iter())
            .map(|(field, value)| (field.name.clone(), display_value(value)))
            .collect())
    }
}

fn display_value(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(address) => address.to_checksum(None),
        DynSolValue::Uint(value, _) => value.to_string(),
        DynSolValue::Int(value, _) => value.to_string(),
        DynSolValue::Bool(value) => value.to_string(),
        DynSolValue::String(value) => value.clone(),
        DynSolValue::Bytes(value) => const_hex::encode_prefixed(value),
        DynSolValue::FixedBytes(word, size) => const_hex::encode_prefixed(&word[..*size]),
        other => format!("{other:?}"),
    }
}
