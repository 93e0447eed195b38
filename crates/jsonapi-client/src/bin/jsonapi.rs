//! JSON API resolver CLI
//!
//! Run with:
//! ```bash
//! cargo run -p jsonapi-client --bin jsonapi -- account vitalik.eth
//! cargo run -p jsonapi-client --bin jsonapi -- nft bayc 1234 --dry-run
//! ```

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use jsonapi_client::Resolver;
use jsonapi_core::{
    Error, Query, QueryKind, ResolutionRequest, ResolverConfig, TokenRegistry, DEFAULT_NFTS,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jsonapi")]
#[command(about = "Resolve account, token and NFT data from jsonapi.eth")]
struct Args {
    /// JSON config file (see ResolverConfig)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ethereum JSON-RPC URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Resolver contract address
    #[arg(long, global = true)]
    resolver: Option<Address>,

    /// Parent domain for query names
    #[arg(long, global = true)]
    suffix: Option<String>,

    /// JSON file mapping token symbols to addresses
    #[arg(long, global = true)]
    tokens: Option<PathBuf>,

    /// Print name, namehash and calldata without calling the resolver
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Account overview (address or ENS name)
    Account { account: String },
    /// Token metadata (symbol or address)
    Token { token: String },
    /// Token balance of an account
    AccountToken { account: String, token: String },
    /// NFT metadata and owner
    Nft { contract: String, token_id: String },
    /// List known token symbols
    Tokens,
    /// Print the example name for a query kind
    Example { kind: QueryKind },
}

fn load_config(args: &Args) -> anyhow::Result<ResolverConfig> {
    let mut config = match &args.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };
    if let Some(url) = &args.rpc_url {
        config = config.with_rpc_url(url.clone());
    }
    if let Some(resolver) = args.resolver {
        config = config.with_resolver(resolver);
    }
    if let Some(suffix) = &args.suffix {
        config = config.with_suffix(suffix.clone());
    }
    if let Some(path) = &args.tokens {
        config = config.with_tokens(TokenRegistry::load(path)?);
    }
    Ok(config)
}

fn print_request(request: &ResolutionRequest, query: &Query) {
    println!("Name:     {}", request.name);
    println!("ENS app:  {}", request.app_link());
    if let Some(address) = query.contract_address() {
        println!("Contract: {address}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("jsonapi_client=info".parse()?))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let registry = &config.tokens;

    let query = match &args.command {
        Command::Account { account } => Query::account(account)?,
        Command::Token { token } => Query::token(token, registry)?,
        Command::AccountToken { account, token } => Query::account_token(account, token, registry)?,
        Command::Nft { contract, token_id } => Query::nft(contract, token_id, registry)?,
        Command::Tokens => {
            for (symbol, address) in registry.iter() {
                let nft = if DEFAULT_NFTS.contains(&symbol) { " (nft)" } else { "" };
                println!("{:<8} {}{}", symbol.to_uppercase(), address, nft);
            }
            return Ok(());
        }
        Command::Example { kind } => {
            println!("{}", kind.example_name());
            return Ok(());
        }
    };

    let request = ResolutionRequest::build(&query, &config)?;
    print_request(&request, &query);

    if args.dry_run {
        println!("Namehash: 0x{}", hex::encode(request.node));
        println!("DNS wire: {}", request.wire_name.to_hex());
        println!("Calldata: {}", request.calldata.to_hex());
        return Ok(());
    }

    let resolver = Resolver::from_config(config)?;
    match resolver.resolve_request(&request).await {
        Ok(json) => {
            println!();
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            if let Some(raw) = err.raw_text() {
                println!();
                println!("{raw}");
            }
            eprintln!("[ERROR] {}", err.diagnostic());
            std::process::exit(exit_code(&err));
        }
    }
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::MalformedJson { .. } => 3,
        Error::TransportFailure(_) => 2,
        _ => 1,
    }
}
