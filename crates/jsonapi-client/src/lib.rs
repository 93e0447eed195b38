//! jsonapi-client: sends JSON API resolver calls over Ethereum JSON-RPC
//!
//! ## Usage
//!
//! ```no_run
//! use jsonapi_client::Resolver;
//! use jsonapi_core::{Query, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let resolver = Resolver::from_config(ResolverConfig::default())?;
//!     let json = resolver.resolve(&Query::account("vitalik.eth")?).await?;
//!     println!("{json}");
//!     Ok(())
//! }
//! ```

mod error;
mod resolver;
mod transport;

pub use error::TransportError;
pub use resolver::Resolver;
pub use transport::{CallTransport, EthCallClient, StaticTransport};
