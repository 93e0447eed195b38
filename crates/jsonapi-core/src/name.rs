//! Name canonicalization and EIP-137 namehash
//!
//! Names go through the UTS-46 mapping (case folding, NFC, compatibility
//! forms) that ENSIP-15 builds on, then the ENS label rules: ASCII is limited
//! to lowercase letters, digits, hyphen and leading underscores, and the
//! `xx--` extension is reserved. Mapped output maps to itself, so
//! canonicalization is idempotent.

use std::fmt;

use tiny_keccak::{Hasher, Keccak};

use crate::{Error, Result};

/// Suffix users commonly type on account and token fields
pub const ETH_SUFFIX: &str = ".eth";

/// A validated, lowercase, dot-separated name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// EIP-137 node of this name
    pub fn namehash(&self) -> [u8; 32] {
        namehash(&self.0)
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remove a trailing `.eth` (any case) from a single user-entered field
pub fn strip_suffix(input: &str) -> &str {
    let input = input.trim();
    let cut = input.len().saturating_sub(ETH_SUFFIX.len());
    match input.get(cut..) {
        Some(tail) if input.len() >= ETH_SUFFIX.len() && tail.eq_ignore_ascii_case(ETH_SUFFIX) => {
            &input[..cut]
        }
        _ => input,
    }
}

/// Normalize `raw` into a [`CanonicalName`]
pub fn canonicalize(raw: &str) -> Result<CanonicalName> {
    let trimmed = raw.trim();
    let invalid = |reason: String| Error::InvalidName {
        name: raw.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("empty name".into()));
    }
    // checked before mapping, which would decode `xn--` labels
    for label in trimmed.split('.') {
        check_label_extension(label).map_err(invalid)?;
    }

    let (mapped, status) = idna::domain_to_unicode(trimmed);
    if let Err(err) = status {
        return Err(invalid(format!("disallowed by UTS-46 mapping: {err:?}")));
    }

    for label in mapped.split('.') {
        validate_label(label).map_err(invalid)?;
    }

    Ok(CanonicalName(mapped))
}

fn check_label_extension(label: &str) -> std::result::Result<(), String> {
    let mut chars = label.chars().skip(2);
    if chars.next() == Some('-') && chars.next() == Some('-') {
        return Err(format!("invalid label extension in {label:?}"));
    }
    Ok(())
}

fn validate_label(label: &str) -> std::result::Result<(), String> {
    if label.is_empty() {
        return Err("empty label".into());
    }

    let leading_underscores = label.chars().take_while(|&c| c == '_').count();
    for (i, c) in label.chars().enumerate() {
        match c {
            'a'..='z' | '0'..='9' | '-' => {}
            '_' if i < leading_underscores => {}
            '_' => return Err(format!("underscore allowed only at start of label {label:?}")),
            c if c.is_ascii() => {
                return Err(format!("disallowed character {c:?} in label {label:?}"))
            }
            // already vetted by the UTS-46 mapping
            _ => {}
        }
    }

    check_label_extension(label)
}

pub(crate) fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// EIP-137 namehash. The empty name hashes to the zero node.
pub fn namehash(name: &str) -> [u8; 32] {
    let mut node = [0u8; 32];
    if name.is_empty() {
        return node;
    }

    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&node);
        buf[32..].copy_from_slice(&label_hash);
        node = keccak256(&buf);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix("vitalik.eth"), "vitalik");
        assert_eq!(strip_suffix("Vitalik.ETH"), "Vitalik");
        assert_eq!(strip_suffix("weth"), "weth");
        assert_eq!(strip_suffix("eth"), "eth");
        assert_eq!(strip_suffix(".eth"), "");
        assert_eq!(strip_suffix("  nick.eth "), "nick");
    }

    #[test]
    fn test_canonicalize_lowercases() {
        let name = canonicalize("Vitalik.JsonAPI.eth").unwrap();
        assert_eq!(name.as_str(), "vitalik.jsonapi.eth");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for raw in ["vitalik.weth.jsonapi.eth", "1234.BAYC.jsonapi.eth", "_dmarc.x.eth"] {
            let once = canonicalize(raw).unwrap();
            let twice = canonicalize(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_canonicalize_rejects_bad_names() {
        for raw in [
            "",
            "a..b",
            "vit alik.eth",
            "a_b.eth",
            "xn--abc.eth",
            "a.b.",
            "bad\u{FFFD}.eth",
            "ca--fé.eth",
        ] {
            let err = canonicalize(raw).unwrap_err();
            assert!(matches!(err, Error::InvalidName { .. }), "{raw:?} -> {err:?}");
        }
    }

    #[test]
    fn test_canonicalize_accepts_unicode_labels() {
        assert_eq!(canonicalize("café.jsonapi.eth").unwrap().as_str(), "café.jsonapi.eth");
        assert_eq!(canonicalize("CAFÉ.jsonapi.eth").unwrap().as_str(), "café.jsonapi.eth");
        // decomposed e + combining acute composes to U+00E9
        assert_eq!(canonicalize("cafe\u{301}.jsonapi.eth").unwrap().as_str(), "café.jsonapi.eth");
        assert_eq!(canonicalize("🚀.jsonapi.eth").unwrap().as_str(), "🚀.jsonapi.eth");
        // fullwidth forms fold to ASCII
        assert_eq!(canonicalize("ｖｉｔａｌｉｋ.eth").unwrap().as_str(), "vitalik.eth");
    }

    #[test]
    fn test_unicode_canonicalization_is_idempotent() {
        for raw in ["Café.jsonapi.eth", "cafe\u{301}.eth", "🚀.jsonapi.eth", "naïve.eth"] {
            let once = canonicalize(raw).unwrap();
            let twice = canonicalize(once.as_str()).unwrap();
            assert_eq!(once, twice, "{raw:?}");
            assert_eq!(once.namehash(), twice.namehash());
        }
    }

    #[test]
    fn test_hex_address_label_is_valid() {
        let name = canonicalize("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045.jsonapi.eth").unwrap();
        assert!(name.as_str().starts_with("0xd8da6bf2"));
    }

    #[test]
    fn test_namehash_vectors() {
        assert_eq!(namehash(""), [0u8; 32]);
        assert_eq!(
            hex::encode(namehash("eth")),
            "93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
        );
        assert_eq!(
            hex::encode(namehash("foo.eth")),
            "de9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"
        );
    }
}
