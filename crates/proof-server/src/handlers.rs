//! HTTP request handlers for claim proof generation.

use std::sync::Arc;

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use eventproof_circuits::ClaimSpec;
use eventproof_prover::prove::{prove_claim, ProveError};

use crate::rpc::{decode_receipt, RpcError};
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub chain_id: u64,
}

pub async fn health(State(state): State<Arc<RwLock<AppState>>>) -> Json<HealthResponse> {
    let state = state.read().await;
    Json(HealthResponse {
        status: "ok",
        chain_id: state.chain_id,
    })
}

/// A proof request names the transaction and which of its log entries
/// carries the event.
#[derive(Deserialize)]
pub struct ProveRequest {
    pub tx_hash: String,
    #[serde(default)]
    pub log_index: usize,
}

/// Proof response: the raw output vector plus its decoded reading.
#[derive(Serialize)]
pub struct ProofResponse {
    pub proof: String,
    pub block_num: u64,
    pub subject: String,
    pub payload: String,
    pub public_outputs: Vec<String>,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_json(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

/// Render a field element as 32 big-endian bytes, 0x-prefixed.
fn serialize_fr(f: &Fr) -> String {
    format!("0x{}", hex::encode(f.into_bigint().to_bytes_be()))
}

/// Render the subject output as a 20-byte address.
fn serialize_address(f: &Fr) -> String {
    let bytes = f.into_bigint().to_bytes_be();
    format!("0x{}", hex::encode(&bytes[bytes.len() - 20..]))
}

/// Read the block-number output back as a u64. The circuit range-checks it
/// to 64 bits, so the high bytes are always zero.
fn block_num_u64(f: &Fr) -> u64 {
    let bytes = f.into_bigint().to_bytes_be();
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[bytes.len() - 8..]);
    u64::from_be_bytes(word)
}

fn rpc_error_response(err: RpcError) -> Response {
    let status = match &err {
        RpcError::ReceiptNotFound(_) => StatusCode::NOT_FOUND,
        RpcError::Decode(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_json(status, err.to_string())
}

pub async fn prove_premium_status(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(req): Json<ProveRequest>,
) -> Response {
    prove_for_claim(state, ClaimSpec::premium_status(), req).await
}

pub async fn prove_zakat_asset(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(req): Json<ProveRequest>,
) -> Response {
    prove_for_claim(state, ClaimSpec::zakat_asset(), req).await
}

async fn prove_for_claim(
    state: Arc<RwLock<AppState>>,
    spec: ClaimSpec,
    req: ProveRequest,
) -> Response {
    let state = state.read().await;

    let raw = match state.rpc.transaction_receipt(&req.tx_hash).await {
        Ok(r) => r,
        Err(e) => return rpc_error_response(e),
    };

    let receipt = match decode_receipt(&raw, req.log_index) {
        Ok(r) => r,
        Err(e) => return rpc_error_response(e),
    };

    tracing::info!(claim = spec.name, tx = %req.tx_hash, "generating proof");

    let keys = state.keys.for_claim(&spec);
    match prove_claim(&keys.proving_key, &spec, &receipt) {
        Ok(result) => {
            let proof_bytes = match result.serialize_proof() {
                Ok(b) => b,
                Err(e) => {
                    return error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            };
            let outputs = &result.public_outputs;
            let response = ProofResponse {
                proof: format!("0x{}", hex::encode(proof_bytes)),
                block_num: block_num_u64(&outputs[0]),
                subject: serialize_address(&outputs[1]),
                payload: serialize_fr(&outputs[2]),
                public_outputs: outputs.iter().map(serialize_fr).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        // The receipt exists but does not match the claimed event shape;
        // the whole request fails, there are no partial outputs.
        Err(e @ ProveError::InvalidReceipt(_)) => {
            error_json(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => error_json(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}
