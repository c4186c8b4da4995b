//! Proof generation library for event-log eligibility claims.
//!
//! This crate provides:
//! - Trusted setup (proving and verifying keys per claim)
//! - Proof generation with native pre-validation of the receipt shape
//! - Local proof verification (for testing)

pub mod prove;
pub mod setup;
pub mod verify;

pub use prove::{claim_outputs, prove_claim, ProofWithOutputs, ProveError};
pub use setup::{setup_all_claims, setup_claim, CircuitKeyPair, CircuitKeys, SetupError};
pub use verify::{verify_claim, VerifyError};

use ark_bn254::Fr;

/// Common field type for all operations
pub type ConstraintF = Fr;
