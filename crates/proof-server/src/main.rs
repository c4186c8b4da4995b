//! HTTP API server for event-log eligibility proofs.
//!
//! Loads (or generates) the claim circuit keys once at boot, then serves
//! proof requests that fetch a transaction receipt from an Ethereum node,
//! decode the claimed event fields and run the prover.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

mod handlers;
mod routes;
mod rpc;

use eventproof_prover::setup::{setup_all_claims, CircuitKeys};
use rpc::EthClient;

#[derive(Parser)]
#[command(name = "eventproof-proof-server")]
struct Args {
    /// Port to serve the proof API on
    #[arg(long, default_value_t = 33247)]
    port: u16,
    /// Directory holding the proving and verifying keys
    #[arg(long, default_value = "keys")]
    keys_dir: PathBuf,
    /// Ethereum JSON-RPC endpoint to fetch receipts from
    #[arg(long, default_value = "https://eth.llamarpc.com")]
    rpc_url: String,
    /// Chain id the endpoint is expected to serve
    #[arg(long, default_value_t = 1)]
    chain_id: u64,
}

/// Application state shared across handlers
pub struct AppState {
    pub keys: Arc<CircuitKeys>,
    pub rpc: EthClient,
    pub chain_id: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let keys = if args.keys_dir.exists() {
        info!(dir = %args.keys_dir.display(), "loading existing circuit keys");
        CircuitKeys::load_from_directory(&args.keys_dir).expect("Failed to load circuit keys")
    } else {
        info!("running trusted setup (this may take a while)");
        let keys = setup_all_claims().expect("Failed to setup circuits");
        keys.save_to_directory(&args.keys_dir)
            .expect("Failed to save circuit keys");
        info!(dir = %args.keys_dir.display(), "circuit keys saved");
        keys
    };

    let client = EthClient::new(&args.rpc_url);
    match client.chain_id().await {
        Ok(id) if id == args.chain_id => info!(chain_id = id, "connected to RPC endpoint"),
        Ok(id) => warn!(
            expected = args.chain_id,
            actual = id,
            "RPC endpoint serves a different chain"
        ),
        Err(e) => warn!(error = %e, "could not query chain id at startup"),
    }

    let state = Arc::new(RwLock::new(AppState {
        keys: Arc::new(keys),
        rpc: client,
        chain_id: args.chain_id,
    }));

    let app = Router::new()
        .merge(routes::api_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
