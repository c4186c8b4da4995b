//! ZK circuits for proving eligibility facts about Ethereum event logs.
//!
//! A claim pins specific slots of a decoded transaction receipt to their
//! expected positions inside one log entry and exposes a fixed public
//! output vector `[uint64 block_num, address subject, bytes32 payload]`
//! that an on-chain verifier can consume without re-reading the receipt.
//!
//! Two claims ship today:
//! - `premium-status`: the event proves an account reached premium status
//! - `zakat-asset`: the event proves a zakat-eligible asset transfer
//!
//! Both share one constraint program ([`EventProofCircuit`]); the business
//! distinction lives entirely in the [`ClaimSpec`] descriptor.

pub mod claim;
pub mod output;
pub mod range_check;
pub mod receipt;

#[cfg(test)]
mod tests;

pub use claim::{ClaimSpec, EventProofCircuit, FieldRole, NUM_PUBLIC_OUTPUTS};
pub use output::PublicOutputs;
pub use receipt::{Capacity, LogField, Receipt, ReceiptData, ReceiptVar, MAX_FIELDS_PER_RECEIPT};

use ark_bn254::Fr;

/// Common field type for all circuits
pub type ConstraintF = Fr;
