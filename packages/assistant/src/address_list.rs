//! Compact encoding of the assistants subscribed to a transaction type.
//!
//! Wire format: `uint16 count (big-endian) || count x address (20 bytes)`,
//! no padding. An empty byte string means "no assistants".

use alloy_primitives::{Address, Bytes};

use crate::error::CodecError;

const COUNT_LEN: usize = 2;
const ADDRESS_LEN: usize = 20;

/// The largest list a `uint16` count can describe
pub const MAX_ADDRESSES: usize = u16::MAX as usize;

pub fn encode(addresses: &[Address]) -> Result<Bytes, CodecError> {
    let count = u16::try_from(addresses.len())
        .map_err(|_| CodecError::CapacityExceeded(addresses.len()))?;

    let mut out = Vec::with_capacity(COUNT_LEN + addresses.len() * ADDRESS_LEN);
    out.extend_from_slice(&count.to_be_bytes());
    for address in addresses {
        out.extend_from_slice(address.as_slice());
    }

    Ok(out.into())
}

pub fn decode(data: &[u8]) -> Result<Vec<Address>, CodecError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let Some((count, body)) = data.split_first_chunk::<COUNT_LEN>() else {
        return Err(CodecError::MalformedData(format!(
            "address list of {} bytes is too short to hold its count",
            data.len()
        )));
    };
    let count = u16::from_be_bytes(*count) as usize;

    let expected = count * ADDRESS_LEN;
    if body.len() != expected {
        return Err(CodecError::MalformedData(format!(
            "address list declares {count} entries ({expected} bytes) but carries {} bytes",
            body.len()
        )));
    }

    Ok(body
        .chunks_exact(ADDRESS_LEN)
        .map(Address::from_slice)
        .collect())
}

/// Decodes a hex string, treating `""` and `"0x"` as the empty list
pub fn decode_hex(data: &str) -> Result<Vec<Address>, CodecError> {
    let stripped = data.strip_prefix("0x").unwrap_or(data);
    let bytes = const_hex::decode(stripped)
        .map_err(|e| CodecError::InvalidInput(format!("address list hex: {e}")))?;
    decode(&bytes)
}

/// Appends `address` unless it is already present.
/// Returns whether the list changed.
pub fn insert_unique(list: &mut Vec<Address>, address: Address) -> bool {
    if list.contains(&address) {
        false
    } else {
        list.push(address);
        true
    }
}

/// Removes every occurrence of `address`, keeping the order of the rest.
/// Returns whether the list changed.
pub fn remove_all(list: &mut Vec<Address>, address: Address) -> bool {
    let before = list.len();
    list.retain(|a| *a != address);
    list.len() != before
}

#[cfg(test)]
mod test {
    use alloy_primitives::address;

    use super::*;

    const A: Address = address!("0x0c3dc7ea7521c79b99a667f2024d76714d33def2");
    const B: Address = address!("0xf24c39a4d55994e70059443622fc166f05b5ff14");

    #[test]
    fn wire_layout() {
        let encoded = encode(&[A, B]).unwrap();

        assert_eq!(encoded.len(), 2 + 40);
        assert_eq!(&encoded[..2], &[0x00, 0x02]);
        assert_eq!(&encoded[2..22], A.as_slice());
        assert_eq!(&encoded[22..], B.as_slice());
    }

    #[test]
    fn round_trip_keeps_order() {
        for list in [vec![], vec![A], vec![B, A], vec![A, B, A]] {
            assert_eq!(decode(&encode(&list).unwrap()).unwrap(), list);
        }
    }

    #[test]
    fn round_trip_at_capacity() {
        let list: Vec<Address> = (0..MAX_ADDRESSES)
            .map(|i| {
                let mut bytes = [0u8; 20];
                bytes[16..].copy_from_slice(&(i as u32).to_be_bytes());
                Address::from(bytes)
            })
            .collect();

        let encoded = encode(&list).unwrap();
        assert_eq!(&encoded[..2], &[0xff, 0xff]);
        assert_eq!(decode(&encoded).unwrap(), list);
    }

    #[test]
    fn capacity_exceeded() {
        let list = vec![A; MAX_ADDRESSES + 1];
        assert!(matches!(
            encode(&list),
            Err(CodecError::CapacityExceeded(n)) if n == MAX_ADDRESSES + 1
        ));
    }

    #[test]
    fn empty_sentinels() {
        assert!(decode(&[]).unwrap().is_empty());
        assert!(decode_hex("").unwrap().is_empty());
        assert!(decode_hex("0x").unwrap().is_empty());
        // a zero count is also a valid empty list
        assert!(decode(&[0, 0]).unwrap().is_empty());
    }

    #[test]
    fn truncated_is_malformed() {
        // count says 2, only one address present
        let hex = format!("0x0002{}", const_hex::encode(A));
        assert!(matches!(
            decode_hex(&hex),
            Err(CodecError::MalformedData(_))
        ));

        assert!(matches!(decode(&[0x01]), Err(CodecError::MalformedData(_))));
        assert!(matches!(
            decode(&[0x00, 0x01, 0xaa]),
            Err(CodecError::MalformedData(_))
        ));
    }

    #[test]
    fn trailing_bytes_are_malformed() {
        let mut encoded = encode(&[A]).unwrap().to_vec();
        encoded.push(0);
        assert!(matches!(
            decode(&encoded),
            Err(CodecError::MalformedData(_))
        ));
    }

    #[test]
    fn decode_is_case_insensitive_and_checksums() {
        let upper = format!("0x0001{}", const_hex::encode(A).to_uppercase());
        let decoded = decode_hex(&upper).unwrap();

        assert_eq!(decoded, vec![A]);
        assert_eq!(
            decoded[0].to_checksum(None),
            "0x0c3DC7ea7521c79B99A667F2024d76714d33dEf2".to_string()
        );
    }

    #[test]
    fn unique_insert_and_remove() {
        let mut list = vec![B];
        assert!(insert_unique(&mut list, A));
        assert!(!insert_unique(&mut list, A));
        assert_eq!(list, vec![B, A]);

        let mut list = vec![A, B, A];
        assert!(remove_all(&mut list, A));
        assert_eq!(list, vec![B]);
        assert!(!remove_all(&mut list, A));
    }
}
