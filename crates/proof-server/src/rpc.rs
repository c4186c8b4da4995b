//! Ethereum JSON-RPC client and receipt field extraction.
//!
//! The decoder establishes the field order every claim is written against:
//! slot 0 is the log's second topic and slot 1 is the first 32-byte word of
//! its data blob, both tagged with the log's position within the receipt.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use eventproof_circuits::{LogField, Receipt};

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("RPC request failed: {0}")]
    Transport(String),
    #[error("RPC error {code}: {message}")]
    Node { code: i64, message: String },
    #[error("Malformed RPC response: {0}")]
    Malformed(String),
    #[error("No receipt found for transaction {0}")]
    ReceiptNotFound(String),
    #[error("Receipt cannot feed the claim: {0}")]
    Decode(String),
}

/// JSON-RPC client for an Ethereum execution node.
#[derive(Clone)]
pub struct EthClient {
    url: String,
    client: Client,
}

impl EthClient {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: Client::new(),
        }
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": "eventproof",
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(RpcError::Node {
                code: error.code,
                message: error.message,
            });
        }

        body.result
            .ok_or_else(|| RpcError::Malformed("no result in response".into()))
    }

    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let result = self.call("eth_chainId", vec![]).await?;
        let hex: String = serde_json::from_value(result)
            .map_err(|e| RpcError::Malformed(e.to_string()))?;
        parse_hex_u64(&hex)
    }

    pub async fn transaction_receipt(&self, tx_hash: &str) -> Result<TxReceipt, RpcError> {
        let result = self
            .call("eth_getTransactionReceipt", vec![json!(tx_hash)])
            .await?;
        if result.is_null() {
            return Err(RpcError::ReceiptNotFound(tx_hash.to_string()));
        }
        serde_json::from_value(result).map_err(|e| RpcError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// The slice of `eth_getTransactionReceipt` this service consumes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub block_number: String,
    #[serde(default)]
    pub logs: Vec<RpcLog>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    pub topics: Vec<String>,
    pub data: String,
}

/// Parse a 0x-prefixed hex quantity into a u64.
pub fn parse_hex_u64(s: &str) -> Result<u64, RpcError> {
    u64::from_str_radix(s.trim_start_matches("0x"), 16)
        .map_err(|e| RpcError::Malformed(format!("bad hex quantity {s:?}: {e}")))
}

/// Reduce a 32-byte hex word into the scalar field, big-endian.
fn parse_word(s: &str) -> Result<Fr, RpcError> {
    let bytes = hex::decode(s.trim_start_matches("0x"))
        .map_err(|e| RpcError::Malformed(format!("bad hex word {s:?}: {e}")))?;
    if bytes.len() != 32 {
        return Err(RpcError::Malformed(format!(
            "expected a 32-byte word, got {} bytes",
            bytes.len()
        )));
    }
    Ok(Fr::from_be_bytes_mod_order(&bytes))
}

/// Extract the claim's two field slots from one log entry of a receipt:
/// the subject topic at index 1 and the first data word at index 0.
pub fn decode_receipt(receipt: &TxReceipt, log_pos: usize) -> Result<Receipt, RpcError> {
    let block_num = parse_hex_u64(&receipt.block_number)?;

    let log = receipt.logs.get(log_pos).ok_or_else(|| {
        RpcError::Decode(format!(
            "receipt has {} log entries, index {log_pos} does not exist",
            receipt.logs.len()
        ))
    })?;

    let topic1 = log
        .topics
        .get(1)
        .ok_or_else(|| RpcError::Decode("log has no second topic".into()))?;
    let subject = parse_word(topic1)?;

    let data = hex::decode(log.data.trim_start_matches("0x"))
        .map_err(|e| RpcError::Decode(format!("bad log data: {e}")))?;
    if data.len() < 32 {
        return Err(RpcError::Decode("log data has no first word".into()));
    }
    let payload = Fr::from_be_bytes_mod_order(&data[..32]);

    let log_pos = log_pos as u64;
    Ok(Receipt {
        block_num: Fr::from(block_num),
        fields: vec![
            LogField {
                is_topic: true,
                index: 1,
                log_pos,
                value: subject,
            },
            LogField {
                is_topic: false,
                index: 0,
                log_pos,
                value: payload,
            },
        ],
    })
}
