//! Proof generation for event-log eligibility claims.
//!
//! The circuit reports any rejected receipt as plain unsatisfiability, so
//! [`claim_outputs`] re-runs every check natively first and turns each
//! failure mode into a readable error before proving time is spent.

use ark_bn254::{Bn254, Fr};
use ark_ff::PrimeField;
use ark_groth16::{Groth16, Proof, ProvingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use num_bigint::BigUint;
use thiserror::Error;

use eventproof_circuits::{
    range_check::{ADDRESS_BITS, BLOCK_NUM_BITS},
    ClaimSpec, EventProofCircuit, FieldRole, Receipt, ReceiptData,
};

/// Errors during proof generation
#[derive(Error, Debug)]
pub enum ProveError {
    #[error("Proof generation failed: {0}")]
    ProofGeneration(String),
    #[error("Receipt does not satisfy the claim: {0}")]
    InvalidReceipt(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// A proof together with its public output vector
#[derive(Clone)]
pub struct ProofWithOutputs {
    pub proof: Proof<Bn254>,
    /// `[uint64 block_num, address subject, bytes32 payload]`, the fixed
    /// positional contract shared by every claim.
    pub public_outputs: Vec<Fr>,
}

impl ProofWithOutputs {
    /// Serialize proof to compressed bytes
    pub fn serialize_proof(&self) -> Result<Vec<u8>, ProveError> {
        let mut bytes = Vec::new();
        self.proof
            .serialize_compressed(&mut bytes)
            .map_err(|e| ProveError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Deserialize proof from bytes
    pub fn deserialize_proof(bytes: &[u8]) -> Result<Proof<Bn254>, ProveError> {
        Proof::deserialize_compressed(bytes).map_err(|e| ProveError::Serialization(e.to_string()))
    }
}

fn fits_bits(value: &Fr, num_bits: usize) -> bool {
    BigUint::from(value.into_bigint()).bits() as usize <= num_bits
}

fn check_role<'a>(
    receipt: &'a Receipt,
    role: &FieldRole,
    what: &str,
) -> Result<&'a eventproof_circuits::LogField, ProveError> {
    let field = receipt.fields.get(role.slot).ok_or_else(|| {
        ProveError::InvalidReceipt(format!(
            "{what}: receipt has no field slot {}",
            role.slot
        ))
    })?;
    if field.is_topic != role.is_topic {
        return Err(ProveError::InvalidReceipt(format!(
            "{what}: expected {} slot, got {}",
            source_name(role.is_topic),
            source_name(field.is_topic),
        )));
    }
    if field.index != role.index {
        return Err(ProveError::InvalidReceipt(format!(
            "{what}: expected {} index {}, got {}",
            source_name(role.is_topic),
            role.index,
            field.index
        )));
    }
    Ok(field)
}

fn source_name(is_topic: bool) -> &'static str {
    if is_topic {
        "topic"
    } else {
        "data"
    }
}

/// Compute the public output vector the circuit will expose for a receipt,
/// rejecting any receipt the circuit would render unsatisfiable.
pub fn claim_outputs(spec: &ClaimSpec, receipt: &Receipt) -> Result<Vec<Fr>, ProveError> {
    let subject = check_role(receipt, &spec.subject, "subject")?;
    let payload = check_role(receipt, &spec.payload, "payload")?;

    if subject.log_pos != payload.log_pos {
        return Err(ProveError::InvalidReceipt(format!(
            "fields come from different log entries ({} vs {})",
            subject.log_pos, payload.log_pos
        )));
    }
    if !fits_bits(&receipt.block_num, BLOCK_NUM_BITS) {
        return Err(ProveError::InvalidReceipt(
            "block number does not fit 64 bits".into(),
        ));
    }
    if !fits_bits(&subject.value, ADDRESS_BITS) {
        return Err(ProveError::InvalidReceipt(
            "subject value does not fit a 160-bit address".into(),
        ));
    }

    Ok(vec![receipt.block_num, subject.value, payload.value])
}

/// Generate a proof that `receipt` satisfies `spec`.
pub fn prove_claim(
    pk: &ProvingKey<Bn254>,
    spec: &ClaimSpec,
    receipt: &Receipt,
) -> Result<ProofWithOutputs, ProveError> {
    let public_outputs = claim_outputs(spec, receipt)?;

    let data = ReceiptData::new(vec![receipt.clone()], &spec.capacity);
    let circuit = EventProofCircuit::new(spec.clone(), data);

    let mut rng = StdRng::from_entropy();
    let proof = Groth16::<Bn254>::prove(pk, circuit, &mut rng)
        .map_err(|e| ProveError::ProofGeneration(e.to_string()))?;

    Ok(ProofWithOutputs {
        proof,
        public_outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_claim;
    use eventproof_circuits::LogField;

    fn valid_receipt() -> Receipt {
        Receipt {
            block_num: Fr::from(18_000_000u64),
            fields: vec![
                LogField {
                    is_topic: true,
                    index: 1,
                    log_pos: 0,
                    value: Fr::from(0xabcdu64),
                },
                LogField {
                    is_topic: false,
                    index: 0,
                    log_pos: 0,
                    value: Fr::from(1u64),
                },
            ],
        }
    }

    #[test]
    fn test_outputs_follow_the_positional_contract() {
        let outputs = claim_outputs(&ClaimSpec::premium_status(), &valid_receipt()).unwrap();
        assert_eq!(
            outputs,
            vec![Fr::from(18_000_000u64), Fr::from(0xabcdu64), Fr::from(1u64)]
        );
    }

    #[test]
    fn test_shape_mismatch_is_rejected_before_proving() {
        let mut receipt = valid_receipt();
        receipt.fields[0].index = 0;
        let err = claim_outputs(&ClaimSpec::premium_status(), &receipt).unwrap_err();
        assert!(matches!(err, ProveError::InvalidReceipt(_)));
    }

    #[test]
    fn test_log_pos_mismatch_is_rejected() {
        let mut receipt = valid_receipt();
        receipt.fields[1].log_pos = 1;
        let err = claim_outputs(&ClaimSpec::premium_status(), &receipt).unwrap_err();
        assert!(matches!(err, ProveError::InvalidReceipt(_)));
    }

    #[test]
    fn test_missing_field_slot_is_rejected() {
        let mut receipt = valid_receipt();
        receipt.fields.truncate(1);
        let err = claim_outputs(&ClaimSpec::premium_status(), &receipt).unwrap_err();
        assert!(matches!(err, ProveError::InvalidReceipt(_)));
    }

    #[test]
    fn test_oversized_address_is_rejected() {
        let mut receipt = valid_receipt();
        receipt.fields[0].value = Fr::from(BigUint::from(1u8) << 160);
        let err = claim_outputs(&ClaimSpec::premium_status(), &receipt).unwrap_err();
        assert!(matches!(err, ProveError::InvalidReceipt(_)));
    }

    #[test]
    fn test_prove_claim_produces_outputs() {
        let mut rng = StdRng::seed_from_u64(42);
        let spec = ClaimSpec::premium_status();
        let keys = setup_claim(spec.clone(), &mut rng).unwrap();

        let result = prove_claim(&keys.proving_key, &spec, &valid_receipt()).unwrap();
        assert_eq!(result.public_outputs.len(), 3);

        let bytes = result.serialize_proof().unwrap();
        let _ = ProofWithOutputs::deserialize_proof(&bytes).unwrap();
    }
}
