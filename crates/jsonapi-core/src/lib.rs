//! jsonapi-core: name and record codec for JSON API ENS lookups
//!
//! A query (account, token, account balance of a token, or NFT) is turned
//! into a name under `jsonapi.eth`, then into an ENSIP-10
//! `resolve(bytes name, bytes data)` call whose `data` is a
//! `contenthash(bytes32 node)` request. The resolver answers with a
//! DAG-JSON contenthash, which is unwrapped and pretty-printed.
//!
//! ```text
//! Query -> CanonicalName -> WireName -> CallPayload
//!                                           |
//!                                      (eth_call)
//!                                           |
//! String <- format_json <- strip_envelope <- decode_bytes_return
//! ```
//!
//! Every stage here is pure and synchronous. Sending the call is left to
//! the `jsonapi-client` crate.

mod calldata;
mod config;
mod envelope;
mod error;
mod format;
mod name;
mod query;
mod registry;
mod request;
mod response;
mod wire;

pub use calldata::{
    encode_resolve_call, padded_len, padding_len, second_offset_for, CallPayload, SubRequest,
    CONTENTHASH_SELECTOR, RESOLVE_SELECTOR, WORD,
};
pub use config::{ResolverConfig, DEFAULT_RESOLVER, DEFAULT_RPC_URL, DEFAULT_SUFFIX};
pub use envelope::{strip_envelope, wrap_envelope, Envelope, IPLD_DAG_JSON_PREFIX};
pub use error::{Error, Stage};
pub use format::format_json;
pub use name::{canonicalize, namehash, strip_suffix, CanonicalName};
pub use query::{Query, QueryKind, TokenRef};
pub use registry::{TokenRegistry, DEFAULT_NFTS, DEFAULT_TOKENS};
pub use request::{decode_response, ResolutionRequest};
pub use response::{decode_bytes_return, encode_bytes_return};
pub use wire::{WireName, MAX_LABEL_LEN};

pub type Result<T> = std::result::Result<T, Error>;
