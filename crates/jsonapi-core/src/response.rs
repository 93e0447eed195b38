//! Decoding of a single ABI `bytes` return value

use alloy_primitives::U256;

use crate::calldata::{padding_len, WORD};
use crate::error::Stage;
use crate::{Error, Result};

fn truncated(field: &'static str, offset: usize, needed: usize, available: usize) -> Error {
    Error::TruncatedResponse {
        stage: Stage::Response,
        field,
        offset,
        needed,
        available,
    }
}

/// Read the 32-byte word at `offset` as a `usize`
fn read_word(raw: &[u8], offset: usize, field: &'static str) -> Result<usize> {
    let available = raw.len().saturating_sub(offset);
    let end = offset
        .checked_add(WORD)
        .filter(|&end| end <= raw.len())
        .ok_or_else(|| truncated(field, offset, WORD, available))?;

    let value = U256::from_be_slice(&raw[offset..end]);
    // A value that does not fit in memory can never be satisfied by the buffer
    usize::try_from(value).map_err(|_| truncated(field, offset, usize::MAX, available))
}

/// Decode `raw` as the return data of a function returning `bytes`
pub fn decode_bytes_return(raw: &[u8]) -> Result<Vec<u8>> {
    if raw.is_empty() {
        return Err(Error::EmptyResponse);
    }

    let offset = read_word(raw, 0, "offset")?;
    let len = read_word(raw, offset, "length")?;
    let start = offset + WORD;
    let available = raw.len() - start;

    if len > available {
        return Err(truncated("value", start, len, available));
    }

    Ok(raw[start..start + len].to_vec())
}

/// Encode `value` the way a contract returns `bytes`
pub fn encode_bytes_return(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 * WORD + value.len() + padding_len(value.len()));
    out.extend_from_slice(&U256::from(WORD).to_be_bytes::<WORD>());
    out.extend_from_slice(&U256::from(value.len()).to_be_bytes::<WORD>());
    out.extend_from_slice(value);
    out.resize(out.len() + padding_len(value.len()), 0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_boundary_lengths() {
        for len in [0usize, 1, 31, 32, 1000] {
            let value: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let encoded = encode_bytes_return(&value);
            assert_eq!(encoded.len() % WORD, 0);
            assert_eq!(decode_bytes_return(&encoded).unwrap(), value, "len = {len}");
        }
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(decode_bytes_return(&[]), Err(Error::EmptyResponse)));
    }

    #[test]
    fn test_short_offset_word() {
        let err = decode_bytes_return(&[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedResponse { field: "offset", offset: 0, needed: 32, available: 10, .. }
        ));
    }

    #[test]
    fn test_offset_past_end() {
        let mut raw = vec![0u8; 64];
        raw[31] = 0x80;
        let err = decode_bytes_return(&raw).unwrap_err();
        assert!(matches!(err, Error::TruncatedResponse { field: "length", offset: 128, .. }));
    }

    #[test]
    fn test_length_exceeds_data() {
        let mut raw = encode_bytes_return(b"hello");
        raw.truncate(64 + 3);
        let err = decode_bytes_return(&raw).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedResponse { field: "value", offset: 64, needed: 5, available: 3, .. }
        ));
    }

    #[test]
    fn test_huge_offset_is_truncation() {
        let raw = [0xffu8; 64];
        let err = decode_bytes_return(&raw).unwrap_err();
        assert!(matches!(err, Error::TruncatedResponse { field: "offset", .. }));
    }

    #[test]
    fn test_non_standard_offset() {
        // offset 0x40 with a junk word in between
        let mut raw = vec![0u8; 96];
        raw[31] = 0x40;
        raw[32..64].fill(0xaa);
        raw[95] = 2;
        raw.extend_from_slice(b"ok");
        assert_eq!(decode_bytes_return(&raw).unwrap(), b"ok");
    }
}
