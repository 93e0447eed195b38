//! Resolver configuration

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::registry::TokenRegistry;

/// JSON API resolver on mainnet
pub const DEFAULT_RESOLVER: Address = address!("0xF31352EDE0b4673e101D4E77dE119ab7Dd5A7251");

/// Domain every query name is placed under
pub const DEFAULT_SUFFIX: &str = "jsonapi.eth";

pub const DEFAULT_RPC_URL: &str = "https://eth.merkle.io";

/// Configuration for building and sending resolver calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Ethereum JSON-RPC endpoint (eth_call)
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Resolver contract the call is sent to
    #[serde(default = "default_resolver")]
    pub resolver_address: Address,
    /// Parent domain of query names
    #[serde(default = "default_suffix")]
    pub suffix_domain: String,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Symbol table for token and NFT inputs
    #[serde(default = "TokenRegistry::with_defaults")]
    pub tokens: TokenRegistry,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_resolver() -> Address {
    DEFAULT_RESOLVER
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ResolverConfig {
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_resolver(mut self, resolver: Address) -> Self {
        self.resolver_address = resolver;
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix_domain = suffix.into();
        self
    }

    pub fn with_tokens(mut self, tokens: TokenRegistry) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Load configuration from a JSON file; missing fields take defaults
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            resolver_address: DEFAULT_RESOLVER,
            suffix_domain: default_suffix(),
            timeout_secs: default_timeout_secs(),
            tokens: TokenRegistry::with_defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.suffix_domain, "jsonapi.eth");
        assert_eq!(
            config.resolver_address.to_checksum(None),
            "0xF31352EDE0b4673e101D4E77dE119ab7Dd5A7251"
        );
        assert!(config.tokens.lookup("weth").is_some());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = ResolverConfig::default()
            .with_rpc_url("http://localhost:8545")
            .with_suffix("jsonapi")
            .with_timeout_secs(5);
        config.save(&path).unwrap();

        assert_eq!(ResolverConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"rpc_url": "http://node:8545"}"#).unwrap();

        let config = ResolverConfig::load(&path).unwrap();
        assert_eq!(config.rpc_url, "http://node:8545");
        assert_eq!(config.resolver_address, DEFAULT_RESOLVER);
        assert_eq!(config.tokens, TokenRegistry::with_defaults());
    }
}
