//! ens-jsonapi: resolve account, token and NFT data published under `jsonapi.eth`
//!
//! The codec lives in [`codec`]; the JSON-RPC transport and resolver in
//! [`client`].

pub use jsonapi_client as client;
pub use jsonapi_core as codec;

pub use jsonapi_client::Resolver;
pub use jsonapi_core::{Error, Query, QueryKind, ResolverConfig, Result};
