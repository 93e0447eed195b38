//! Symbol to contract address table for token and NFT queries
//!
//! The table is data, not codec logic: it only annotates a query with the
//! contract a symbol refers to. Names are built from what the user typed.

use std::collections::BTreeMap;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// Well-known mainnet tokens
pub const DEFAULT_TOKENS: &[(&str, Address)] = &[
    ("dai", address!("0x6B175474E89094C44Da98b954EedeAC495271d0F")),
    ("weth", address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")),
    ("usdc", address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
    ("usdt", address!("0xdAC17F958D2ee523a2206206994597C13D831ec7")),
    ("bayc", address!("0xBC4CA0EdA7647A8aB7C2061c2E118A18a936f13D")),
    ("ens", address!("0xC18360217D8F7Ab5e7c516566761Ea12Ce7F9D72")),
    ("steth", address!("0xae7ab96520DE3A18E5e111B5EaAb095312D7fE84")),
    ("cbbtc", address!("0xcbB7C0000aB88B473b1f5aFd9ef808440eed33Bf")),
    ("wbtc", address!("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599")),
    ("link", address!("0x514910771AF9Ca656af840dff83E8264EcF986CA")),
    ("aave", address!("0x7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9")),
    ("uni", address!("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984")),
    ("shib", address!("0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE")),
    ("matic", address!("0x7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0")),
    ("comp", address!("0xc00e94Cb662C3520282E6f5717214004A7f26888")),
    ("1inch", address!("0x111111111117dC0aa78b770fA6A738034120C302")),
    ("grt", address!("0xc944E90C64B2c07662A292be6244BDf05Cda44a7")),
    ("bat", address!("0x0D8775F648430679A709E98d2b0Cb6250d2887EF")),
    ("ldo", address!("0x5A98FcBEA516Cf06857215779Fd812CA3beF1B32")),
];

/// NFT collections offered as suggestions
pub const DEFAULT_NFTS: &[&str] = &["bayc"];

/// Case-insensitive symbol to address map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenRegistry {
    tokens: BTreeMap<String, Address>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (symbol, address) in DEFAULT_TOKENS {
            registry.insert(symbol, *address);
        }
        registry
    }

    pub fn insert(&mut self, symbol: &str, address: Address) {
        self.tokens.insert(symbol.to_lowercase(), address);
    }

    pub fn lookup(&self, symbol: &str) -> Option<Address> {
        self.tokens.get(&symbol.trim().to_lowercase()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Address)> {
        self.tokens.iter().map(|(s, a)| (s.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Load a registry from a JSON object of `symbol: address`
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let raw: BTreeMap<String, Address> = serde_json::from_str(&content)?;
        let mut registry = Self::new();
        for (symbol, address) in raw {
            registry.insert(&symbol, address);
        }
        Ok(registry)
    }
}
