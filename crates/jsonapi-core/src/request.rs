//! Query to calldata, and raw response to JSON

use crate::calldata::{encode_resolve_call, CallPayload, SubRequest, RESOLVE_SELECTOR};
use crate::config::ResolverConfig;
use crate::envelope::strip_envelope;
use crate::format::format_json;
use crate::name::CanonicalName;
use crate::query::Query;
use crate::response::decode_bytes_return;
use crate::wire::WireName;
use crate::Result;

/// Everything derived from a query before it is sent
#[derive(Debug, Clone)]
pub struct ResolutionRequest {
    pub name: CanonicalName,
    pub node: [u8; 32],
    pub wire_name: WireName,
    pub sub_request: SubRequest,
    pub calldata: CallPayload,
}

impl ResolutionRequest {
    pub fn build(query: &Query, config: &ResolverConfig) -> Result<Self> {
        let name = query.name_in(&config.suffix_domain)?;
        Self::for_name(name)
    }

    pub fn for_name(name: CanonicalName) -> Result<Self> {
        let node = name.namehash();
        let wire_name = WireName::encode(&name)?;
        let sub_request = SubRequest::contenthash(node);
        let calldata = encode_resolve_call(RESOLVE_SELECTOR, &wire_name, &sub_request)?;

        tracing::debug!(
            name = %name,
            node = %hex::encode(node),
            wire_len = wire_name.len(),
            calldata_len = calldata.len(),
            "Built resolve call"
        );

        Ok(Self {
            name,
            node,
            wire_name,
            sub_request,
            calldata,
        })
    }

    /// Link to the name in the ENS manager app
    pub fn app_link(&self) -> String {
        format!("https://app.ens.domains/{}", self.name)
    }
}

/// Decode `eth_call` return data into pretty-printed JSON
pub fn decode_response(raw: &[u8]) -> Result<String> {
    let content = decode_bytes_return(raw)?;
    let envelope = strip_envelope(&content)?;
    tracing::debug!(
        response_len = raw.len(),
        content_len = content.len(),
        declared_size = envelope.declared_size,
        "Stripped contenthash envelope"
    );
    format_json(&envelope.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::wrap_envelope;
    use crate::response::encode_bytes_return;
    use crate::Error;

    #[test]
    fn test_build_account_request() {
        let query = Query::account("vitalik").unwrap();
        let config = ResolverConfig::default().with_suffix("jsonapi");
        let request = ResolutionRequest::build(&query, &config).unwrap();

        assert_eq!(request.name.as_str(), "vitalik.jsonapi");
        assert!(request.wire_name.to_hex().starts_with("0x07766974616c696b"));
        assert!(request.wire_name.as_bytes().ends_with(&[0]));
        assert_eq!(request.sub_request.node, crate::name::namehash("vitalik.jsonapi"));
        assert_eq!(request.app_link(), "https://app.ens.domains/vitalik.jsonapi");
    }

    #[test]
    fn test_invalid_name_stops_before_encoding() {
        let query = Query::account("vit alik").unwrap();
        let err = ResolutionRequest::build(&query, &ResolverConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }));
    }

    #[test]
    fn test_decode_response() {
        let raw = encode_bytes_return(&wrap_envelope(br#"{"ok":true,"erc":0}"#).unwrap());
        assert_eq!(
            decode_response(&raw).unwrap(),
            "{\n  \"ok\": true,\n  \"erc\": 0\n}"
        );
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode_response(&[]), Err(Error::EmptyResponse)));
    }
}
