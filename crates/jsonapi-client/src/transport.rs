use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use alloy_primitives::{Address, Bytes};
use alloy_rpc_client::{ClientBuilder, RpcClient};
use alloy_rpc_types::BlockNumberOrTag;
use alloy_transport_http::{reqwest, Http};
use serde::Serialize;

use crate::error::TransportError;

/// Sends a read-only contract call and returns the raw return data
pub trait CallTransport {
    fn call(
        &self,
        to: Address,
        data: Bytes,
    ) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

/// Call object for eth_call
#[derive(Debug, Clone, Serialize)]
struct CallRequest {
    to: Address,
    data: Bytes,
}

/// JSON-RPC client that answers calls with `eth_call` at the latest block
pub struct EthCallClient {
    client: RpcClient,
}

impl EthCallClient {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let url: url::Url = rpc_url.parse().map_err(|e: url::ParseError| TransportError::InvalidUrl {
            url: rpc_url.to_string(),
            reason: e.to_string(),
        })?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let transport = Http::with_client(http, url);
        let is_local = transport.guess_local();
        let client = ClientBuilder::default().transport(transport, is_local);

        Ok(Self { client })
    }
}

impl CallTransport for EthCallClient {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, TransportError> {
        tracing::debug!(%to, calldata_len = data.len(), "eth_call");
        let params = (CallRequest { to, data }, BlockNumberOrTag::Latest);
        Ok(self.client.request("eth_call", params).await?)
    }
}

/// Transport that replies with fixed bytes and records what it was sent
#[derive(Debug)]
pub struct StaticTransport {
    reply: Result<Bytes, String>,
    calls: Mutex<Vec<(Address, Bytes)>>,
}

impl StaticTransport {
    pub fn replying(reply: impl Into<Bytes>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl CallTransport for StaticTransport {
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((to, data));
        }
        self.reply.clone().map_err(TransportError::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_request_serializes_as_eth_call_object() {
        let request = CallRequest {
            to: Address::repeat_byte(0x11),
            data: Bytes::from(vec![0x90, 0x61, 0xb9, 0x23]),
        };
        let json = serde_json::to_value((request, BlockNumberOrTag::Latest)).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"to": "0x1111111111111111111111111111111111111111", "data": "0x9061b923"},
                "latest"
            ])
        );
    }

    #[test]
    fn test_invalid_url() {
        let err = EthCallClient::new("not a url", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_static_transport_records_calls() {
        let transport = StaticTransport::replying(vec![1u8, 2, 3]);
        let reply = transport
            .call(Address::ZERO, Bytes::from_static(b"\x01"))
            .await
            .unwrap();
        assert_eq!(reply.as_ref(), &[1, 2, 3]);
        assert_eq!(transport.calls().len(), 1);

        let failing = StaticTransport::failing("connection refused");
        let err = failing.call(Address::ZERO, Bytes::new()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }
}
