//! Local proof verification for testing the event claims.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, VerifyingKey};
use ark_snark::SNARK;
use thiserror::Error;

/// Errors during verification
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Verification failed: {0}")]
    Verification(String),
}

/// Verify a claim proof against its public output vector
/// `[uint64 block_num, address subject, bytes32 payload]`.
pub fn verify_claim(
    vk: &VerifyingKey<Bn254>,
    proof: &Proof<Bn254>,
    public_outputs: &[Fr],
) -> Result<bool, VerifyError> {
    Groth16::<Bn254>::verify(vk, public_outputs, proof)
        .map_err(|e| VerifyError::Verification(e.to_string()))
}
