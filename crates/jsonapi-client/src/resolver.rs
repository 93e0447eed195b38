//! End-to-end resolution: query in, formatted JSON out

use std::time::Duration;

use alloy_primitives::Bytes;
use jsonapi_core::{decode_response, Query, ResolutionRequest, ResolverConfig, Result};

use crate::transport::{CallTransport, EthCallClient};

/// Resolves queries against the JSON API resolver through a [`CallTransport`]
pub struct Resolver<T> {
    transport: T,
    config: ResolverConfig,
}

impl Resolver<EthCallClient> {
    /// Resolver backed by the JSON-RPC endpoint in `config`
    pub fn from_config(config: ResolverConfig) -> Result<Self> {
        let transport = EthCallClient::new(&config.rpc_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(transport, config))
    }
}

impl<T: CallTransport> Resolver<T> {
    pub fn new(transport: T, config: ResolverConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the name and calldata for `query` without sending anything
    pub fn prepare(&self, query: &Query) -> Result<ResolutionRequest> {
        ResolutionRequest::build(query, &self.config)
    }

    /// Resolve `query` to pretty-printed JSON
    pub async fn resolve(&self, query: &Query) -> Result<String> {
        let request = self.prepare(query)?;
        self.resolve_request(&request).await
    }

    /// Send a prepared request and decode the reply
    pub async fn resolve_request(&self, request: &ResolutionRequest) -> Result<String> {
        let calldata = Bytes::copy_from_slice(request.calldata.as_bytes());
        tracing::info!(
            name = %request.name,
            resolver = %self.config.resolver_address,
            "Resolving"
        );

        let raw = self
            .transport
            .call(self.config.resolver_address, calldata)
            .await
            .map_err(|e| {
                tracing::warn!(name = %request.name, error = %e, "Resolver call failed");
                jsonapi_core::Error::from(e)
            })?;

        tracing::debug!(name = %request.name, response_len = raw.len(), "Resolver replied");
        decode_response(&raw)
    }
}
