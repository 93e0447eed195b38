//! Query model: what the user asked for, and the name it maps to

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::name::{canonicalize, strip_suffix, CanonicalName};
use crate::registry::TokenRegistry;
use crate::{Error, Result};

/// Query variant without its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    Account,
    Token,
    AccountToken,
    Nft,
}

impl QueryKind {
    pub const ALL: [QueryKind; 4] = [
        QueryKind::Account,
        QueryKind::Token,
        QueryKind::AccountToken,
        QueryKind::Nft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Account => "account",
            QueryKind::Token => "token",
            QueryKind::AccountToken => "account-token",
            QueryKind::Nft => "nft",
        }
    }

    /// Sample name of this kind under the default suffix
    pub fn example_name(&self) -> &'static str {
        match self {
            QueryKind::Account => "vitalik.jsonapi.eth",
            QueryKind::Token => "weth.jsonapi.eth",
            QueryKind::AccountToken => "vitalik.weth.jsonapi.eth",
            QueryKind::Nft => "1234.bayc.jsonapi.eth",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "account" | "user" => Ok(QueryKind::Account),
            "token" => Ok(QueryKind::Token),
            "account-token" | "user-token" | "user_token" => Ok(QueryKind::AccountToken),
            "nft" => Ok(QueryKind::Nft),
            _ => Err(format!("unknown query kind: {s}")),
        }
    }
}

/// Token or NFT contract as entered, plus its registry address if known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef {
    pub label: String,
    pub address: Option<Address>,
}

impl TokenRef {
    fn new(input: &str, registry: &TokenRegistry, kind: QueryKind, field: &'static str) -> Result<Self> {
        let label = required(input, kind, field)?;
        Ok(Self {
            address: registry.lookup(&label),
            label,
        })
    }
}

/// Cleaned field value, or `MissingField` when blank
fn required(input: &str, kind: QueryKind, field: &'static str) -> Result<String> {
    let cleaned = strip_suffix(input);
    if cleaned.is_empty() {
        return Err(Error::MissingField {
            kind: kind.as_str(),
            field,
        });
    }
    Ok(cleaned.to_string())
}

/// A resolution request, built once from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Account { account: String },
    Token { token: TokenRef },
    AccountToken { account: String, token: TokenRef },
    /// `token_id` is decimal text as entered, leading zeros included
    Nft { contract: TokenRef, token_id: String },
}

impl Query {
    pub fn account(account: &str) -> Result<Self> {
        Ok(Query::Account {
            account: required(account, QueryKind::Account, "account")?,
        })
    }

    pub fn token(token: &str, registry: &TokenRegistry) -> Result<Self> {
        Ok(Query::Token {
            token: TokenRef::new(token, registry, QueryKind::Token, "token")?,
        })
    }

    pub fn account_token(account: &str, token: &str, registry: &TokenRegistry) -> Result<Self> {
        Ok(Query::AccountToken {
            account: required(account, QueryKind::AccountToken, "account")?,
            token: TokenRef::new(token, registry, QueryKind::AccountToken, "token")?,
        })
    }

    pub fn nft(contract: &str, token_id: &str, registry: &TokenRegistry) -> Result<Self> {
        let token_id = token_id.trim();
        if token_id.is_empty() {
            return Err(Error::MissingField {
                kind: QueryKind::Nft.as_str(),
                field: "token id",
            });
        }
        let contract = TokenRef::new(contract, registry, QueryKind::Nft, "contract")?;
        let in_range = token_id.bytes().all(|b| b.is_ascii_digit())
            && U256::from_str_radix(token_id, 10).is_ok();
        if !in_range {
            return Err(Error::InvalidTokenId {
                input: token_id.to_string(),
            });
        }
        Ok(Query::Nft {
            contract,
            token_id: token_id.to_string(),
        })
    }

    pub fn kind(&self) -> QueryKind {
        match self {
            Query::Account { .. } => QueryKind::Account,
            Query::Token { .. } => QueryKind::Token,
            Query::AccountToken { .. } => QueryKind::AccountToken,
            Query::Nft { .. } => QueryKind::Nft,
        }
    }

    /// Registry address of the token or NFT contract, if any
    pub fn contract_address(&self) -> Option<Address> {
        match self {
            Query::Account { .. } => None,
            Query::Token { token } | Query::AccountToken { token, .. } => token.address,
            Query::Nft { contract, .. } => contract.address,
        }
    }

    /// Dotted name before canonicalization
    pub fn raw_name(&self, suffix: &str) -> String {
        let suffix = suffix.trim_matches('.');
        match self {
            Query::Account { account } => format!("{account}.{suffix}"),
            Query::Token { token } => format!("{}.{suffix}", token.label),
            Query::AccountToken { account, token } => {
                format!("{account}.{}.{suffix}", token.label)
            }
            Query::Nft { contract, token_id } => {
                format!("{token_id}.{}.{suffix}", contract.label)
            }
        }
    }

    /// Canonical name of this query under `suffix`
    pub fn name_in(&self, suffix: &str) -> Result<CanonicalName> {
        canonicalize(&self.raw_name(suffix))
    }
}
