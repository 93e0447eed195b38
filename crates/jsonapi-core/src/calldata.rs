//! `resolve(bytes name, bytes data)` calldata with a nested `contenthash` request
//!
//! Layout (offsets relative to the byte after the selector):
//!
//! ```text
//! 0x00  offset(name)     = 0x40
//! 0x20  offset(request)  = 0x40 + 0x20 + ceil(N/32)*32
//! 0x40  len(name) = N    name bytes, zero padded to 32
//! ....  len(request)     request bytes, zero padded to 32
//! ```

use alloy_primitives::U256;

use crate::wire::WireName;
use crate::{Error, Result};

/// ABI word size
pub const WORD: usize = 32;

/// `resolve(bytes,bytes)` on an ENSIP-10 extended resolver
pub const RESOLVE_SELECTOR: [u8; 4] = [0x90, 0x61, 0xb9, 0x23];

/// `contenthash(bytes32)`
pub const CONTENTHASH_SELECTOR: [u8; 4] = [0xbc, 0x1c, 0x58, 0xd1];

/// Zero bytes needed to pad `len` up to the next word boundary
pub const fn padding_len(len: usize) -> usize {
    (WORD - len % WORD) % WORD
}

/// `len` rounded up to a whole number of words
pub fn padded_len(len: usize) -> Option<usize> {
    len.checked_add(padding_len(len))
}

/// Secondary lookup embedded as the second `bytes` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubRequest {
    pub selector: [u8; 4],
    pub node: [u8; 32],
}

impl SubRequest {
    pub const LEN: usize = 36;

    pub fn contenthash(node: [u8; 32]) -> Self {
        Self {
            selector: CONTENTHASH_SELECTOR,
            node,
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[..4].copy_from_slice(&self.selector);
        out[4..].copy_from_slice(&self.node);
        out
    }
}

/// Fully encoded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPayload(Vec<u8>);

impl CallPayload {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn selector(&self) -> [u8; 4] {
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.0[..4]);
        out
    }

    /// Parameter region, everything after the selector
    pub fn params(&self) -> &[u8] {
        &self.0[4..]
    }

    /// Word at `index` in the parameter region, `None` past the end
    pub fn offset_word(&self, index: usize) -> Option<U256> {
        let start = index.checked_mul(WORD)?;
        let end = start.checked_add(WORD)?;
        self.params().get(start..end).map(U256::from_be_slice)
    }

    /// Head word pointing at the nested request
    pub fn second_offset(&self) -> U256 {
        // encode_resolve_call always writes both head words
        self.offset_word(1).unwrap_or_default()
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

fn word(value: usize) -> [u8; WORD] {
    U256::from(value).to_be_bytes::<WORD>()
}

fn overflow(what: &str, len: usize) -> Error {
    Error::LabelTooLong {
        label: what.to_string(),
        len,
    }
}

/// Append a length word, `data`, and zero padding to `out`
fn push_dynamic(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(&word(data.len()));
    out.extend_from_slice(data);
    out.resize(out.len() + padding_len(data.len()), 0);
}

/// Offset of the second dynamic argument for a first argument of `name_len` bytes
pub fn second_offset_for(name_len: usize) -> Result<usize> {
    padded_len(name_len)
        .and_then(|padded| padded.checked_add(2 * WORD + WORD))
        .ok_or_else(|| overflow("name", name_len))
}

/// Encode `selector(name, request)` with both arguments as dynamic `bytes`
pub fn encode_resolve_call(
    selector: [u8; 4],
    name: &WireName,
    request: &SubRequest,
) -> Result<CallPayload> {
    let name_bytes = name.as_bytes();
    let request_bytes = request.to_bytes();

    let first_offset = 2 * WORD;
    let second_offset = second_offset_for(name_bytes.len())?;
    let total = padded_len(request_bytes.len())
        .and_then(|r| second_offset.checked_add(WORD + r))
        .and_then(|p| p.checked_add(4))
        .ok_or_else(|| overflow("request", request_bytes.len()))?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&selector);
    out.extend_from_slice(&word(first_offset));
    out.extend_from_slice(&word(second_offset));
    push_dynamic(&mut out, name_bytes);
    debug_assert_eq!(out.len(), 4 + second_offset);
    push_dynamic(&mut out, &request_bytes);
    debug_assert_eq!(out.len(), total);

    Ok(CallPayload(out))
}
