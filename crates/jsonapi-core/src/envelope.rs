//! IPLD DAG-JSON content envelope
//!
//! The resolver returns contenthash bytes shaped as
//! `e3 01 01 80 04 00 | varint(len) | json`. The JSON span is located with a
//! brace scan: first `{` after the size field through the last `}` in the
//! buffer, or through the end of the buffer when no `}` follows, so a
//! truncated object still reaches the formatter. This assumes one top-level object and no stray brace bytes in the
//! binary framing; payloads that violate that are decoded wrongly, not
//! rejected.

use crate::error::Stage;
use crate::{Error, Result};

/// Multicodec prefix for IPLD DAG-JSON content
pub const IPLD_DAG_JSON_PREFIX: [u8; 6] = [0xe3, 0x01, 0x01, 0x80, 0x04, 0x00];

pub const PREFIX_LEN: usize = IPLD_DAG_JSON_PREFIX.len();

const CONTINUATION: u8 = 0x80;

/// Decoded envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Whether the first six bytes were the DAG-JSON prefix
    pub prefix_matched: bool,
    /// Payload size claimed by the varint
    pub declared_size: u16,
    /// Width of the varint in bytes (1 or 2)
    pub size_field_len: usize,
    /// Extracted JSON text
    pub json: String,
}

/// Read the 1- or 2-byte varint at `offset`
fn read_size(payload: &[u8], offset: usize) -> Result<(u16, usize)> {
    let b0 = payload[offset];
    if b0 & CONTINUATION == 0 {
        return Ok((b0 as u16, 1));
    }

    let b1 = *payload.get(offset + 1).ok_or(Error::TruncatedResponse {
        stage: Stage::Envelope,
        field: "size",
        offset,
        needed: 2,
        available: 1,
    })?;
    if b1 & CONTINUATION != 0 {
        return Err(Error::UnsupportedEnvelopeSize {
            offset,
            bytes: hex::encode(&payload[offset..offset + 2]),
        });
    }

    Ok((((b0 & !CONTINUATION) as u16) | ((b1 as u16) << 7), 2))
}

/// Strip the envelope from `payload` and return the JSON text inside it
pub fn strip_envelope(payload: &[u8]) -> Result<Envelope> {
    if payload.len() <= PREFIX_LEN {
        return Err(Error::UnknownEnvelope {
            reason: format!("need at least {} bytes for prefix and size", PREFIX_LEN + 1),
            len: payload.len(),
        });
    }

    let prefix_matched = payload[..PREFIX_LEN] == IPLD_DAG_JSON_PREFIX;
    if !prefix_matched {
        tracing::warn!(
            prefix = %hex::encode(&payload[..PREFIX_LEN]),
            "Unexpected envelope prefix, decoding anyway"
        );
    }

    let (declared_size, size_field_len) = read_size(payload, PREFIX_LEN)?;
    let body_start = PREFIX_LEN + size_field_len;

    let Some(open) = payload[body_start..].iter().position(|&b| b == b'{') else {
        if prefix_matched {
            return Err(Error::NoJsonFound {
                marker: '{',
                offset: body_start,
            });
        }
        return Err(Error::UnknownEnvelope {
            reason: "unrecognized prefix and no JSON object after size field".into(),
            len: payload.len(),
        });
    };
    let open = body_start + open;

    let end = payload
        .iter()
        .rposition(|&b| b == b'}')
        .filter(|&close| close > open)
        .map_or(payload.len(), |close| close + 1);

    let body_len = payload.len() - body_start;
    if body_len != declared_size as usize {
        tracing::debug!(
            declared = declared_size,
            actual = body_len,
            "Envelope size field disagrees with payload length"
        );
    }

    Ok(Envelope {
        prefix_matched,
        declared_size,
        size_field_len,
        json: String::from_utf8_lossy(&payload[open..end]).into_owned(),
    })
}

/// Wrap `json` in a DAG-JSON envelope (sizes up to 14 bits)
pub fn wrap_envelope(json: &[u8]) -> Result<Vec<u8>> {
    let len = json.len();
    let mut out = Vec::with_capacity(PREFIX_LEN + 2 + len);
    out.extend_from_slice(&IPLD_DAG_JSON_PREFIX);

    match len {
        0..=0x7f => out.push(len as u8),
        0x80..=0x3fff => {
            out.push((len as u8 & 0x7f) | CONTINUATION);
            out.push((len >> 7) as u8);
        }
        _ => {
            return Err(Error::UnsupportedEnvelopeSize {
                offset: PREFIX_LEN,
                bytes: format!("{len:#x}"),
            })
        }
    }

    out.extend_from_slice(json);
    Ok(out)
}
