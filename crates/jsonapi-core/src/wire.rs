//! DNS wire-format names
//!
//! `vitalik.jsonapi.eth` encodes as
//! `07 "vitalik" 07 "jsonapi" 03 "eth" 00`.

use crate::error::Stage;
use crate::name::CanonicalName;
use crate::{Error, Result};

/// Maximum byte length of a single label
pub const MAX_LABEL_LEN: usize = 255;

/// Length-prefixed label sequence terminated by a zero-length label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireName(Vec<u8>);

impl WireName {
    pub fn encode(name: &CanonicalName) -> Result<Self> {
        encode_labels(name.as_str())
    }

    /// Parse wire bytes back into a dotted name
    pub fn decode(bytes: &[u8]) -> Result<String> {
        let mut labels = Vec::new();
        let mut pos = 0;

        loop {
            let len = *bytes.get(pos).ok_or(Error::TruncatedResponse {
                stage: Stage::WireName,
                field: "label length",
                offset: pos,
                needed: 1,
                available: 0,
            })? as usize;
            pos += 1;

            if len == 0 {
                break;
            }

            let label = bytes.get(pos..pos + len).ok_or(Error::TruncatedResponse {
                stage: Stage::WireName,
                field: "label",
                offset: pos,
                needed: len,
                available: bytes.len() - pos,
            })?;
            labels.push(String::from_utf8_lossy(label).into_owned());
            pos += len;
        }

        Ok(labels.join("."))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

fn encode_labels(name: &str) -> Result<WireName> {
    let mut out = Vec::with_capacity(name.len() + 2);

    if !name.is_empty() {
        for label in name.split('.') {
            let len = label.len();
            if len > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong {
                    label: label.to_string(),
                    len,
                });
            }
            out.push(len as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }

    out.push(0);
    Ok(WireName(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::canonicalize;
    use proptest::prelude::*;

    #[test]
    fn test_encode_vitalik() {
        let name = canonicalize("vitalik.jsonapi.eth").unwrap();
        let wire = WireName::encode(&name).unwrap();
        assert_eq!(
            wire.to_hex(),
            "0x07766974616c696b076a736f6e6170690365746800"
        );
        assert_eq!(wire.len(), 1 + 7 + 1 + 7 + 1 + 3 + 1);
    }

    #[test]
    fn test_unicode_label_length_is_in_bytes() {
        let name = canonicalize("café.eth").unwrap();
        let wire = WireName::encode(&name).unwrap();
        assert_eq!(wire.to_hex(), "0x05636166c3a90365746800");
        assert_eq!(WireName::decode(wire.as_bytes()).unwrap(), "café.eth");
    }

    #[test]
    fn test_encode_empty_name_is_root() {
        assert_eq!(encode_labels("").unwrap().as_bytes(), &[0u8]);
    }

    #[test]
    fn test_label_too_long() {
        let long = "a".repeat(256);
        let err = encode_labels(&format!("{long}.eth")).unwrap_err();
        assert!(matches!(err, Error::LabelTooLong { len: 256, .. }));

        let max = "b".repeat(255);
        let wire = encode_labels(&max).unwrap();
        assert_eq!(wire.as_bytes()[0], 255);
        assert_eq!(wire.len(), 257);
    }

    #[test]
    fn test_decode_truncated() {
        let err = WireName::decode(&[0x05, b'a', b'b']).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedResponse { stage: Stage::WireName, needed: 5, available: 2, .. }
        ));

        let err = WireName::decode(&[0x01, b'a']).unwrap_err();
        assert!(matches!(err, Error::TruncatedResponse { field: "label length", .. }));
    }

    proptest! {
        #[test]
        fn proptest_wire_name_roundtrip(labels in prop::collection::vec("[a-z0-9]{1,63}", 1..=10)) {
            let dotted = labels.join(".");
            let name = canonicalize(&dotted).unwrap();
            let wire = WireName::encode(&name).unwrap();

            let expected_len: usize = labels.iter().map(|l| 1 + l.len()).sum::<usize>() + 1;
            prop_assert_eq!(wire.len(), expected_len);
            prop_assert_eq!(WireName::decode(wire.as_bytes()).unwrap(), dotted);
        }
    }
}
