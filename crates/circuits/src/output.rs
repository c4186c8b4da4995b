//! Projection of field values into the circuit's public output vector.
//!
//! Outputs are positional, not named: the append order is the contract an
//! on-chain verifier matches, and reordering breaks compatibility silently.
//! Every numeric encoding carries a hard width check; an out-of-range value
//! makes the system unsatisfiable rather than truncating (emitting a
//! truncated address or block number would be a soundness hazard).

use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use crate::range_check::{enforce_width, ADDRESS_BITS};

/// Builder for the circuit's public output vector.
///
/// Each `push_*` call range-checks the value as its encoding demands,
/// allocates the next public input, and constrains it equal to the value.
pub struct PublicOutputs<F: PrimeField> {
    cs: ConstraintSystemRef<F>,
    count: usize,
}

impl<F: PrimeField> PublicOutputs<F> {
    pub fn new(cs: ConstraintSystemRef<F>) -> Self {
        Self { cs, count: 0 }
    }

    /// Append an unsigned integer output of the given bit width.
    pub fn push_uint(&mut self, value: &FpVar<F>, num_bits: usize) -> Result<(), SynthesisError> {
        enforce_width(value, num_bits)?;
        self.expose(value)
    }

    /// Append a 160-bit account address output.
    pub fn push_address(&mut self, value: &FpVar<F>) -> Result<(), SynthesisError> {
        enforce_width(value, ADDRESS_BITS)?;
        self.expose(value)
    }

    /// Append the value as an opaque payload, with no reinterpretation.
    ///
    /// The value is a field element, so payloads are exposed modulo the
    /// ~254-bit field; the upstream decoder reduces 32-byte words the same
    /// way, keeping prover and verifier consistent.
    pub fn push_bytes32(&mut self, value: &FpVar<F>) -> Result<(), SynthesisError> {
        self.expose(value)
    }

    /// Number of outputs appended so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn expose(&mut self, value: &FpVar<F>) -> Result<(), SynthesisError> {
        let out = FpVar::new_input(self.cs.clone(), || value.value())?;
        out.enforce_equal(value)?;
        self.count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_check::BLOCK_NUM_BITS;
    use ark_bn254::Fr;
    use ark_relations::r1cs::ConstraintSystem;
    use num_bigint::BigUint;

    fn witness(cs: &ConstraintSystemRef<Fr>, v: Fr) -> FpVar<Fr> {
        FpVar::new_witness(cs.clone(), || Ok(v)).unwrap()
    }

    #[test]
    fn test_outputs_appear_in_push_order() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let block = witness(&cs, Fr::from(18_000_000u64));
        let addr = witness(&cs, Fr::from(0xabcdu64));
        let payload = witness(&cs, Fr::from(1u64));

        let mut outputs = PublicOutputs::new(cs.clone());
        outputs.push_uint(&block, BLOCK_NUM_BITS).unwrap();
        outputs.push_address(&addr).unwrap();
        outputs.push_bytes32(&payload).unwrap();

        assert_eq!(outputs.len(), 3);
        assert!(cs.is_satisfied().unwrap());

        // instance_assignment[0] is the constant one.
        let instance = cs.borrow().unwrap().instance_assignment.clone();
        assert_eq!(
            &instance[1..],
            &[Fr::from(18_000_000u64), Fr::from(0xabcdu64), Fr::from(1u64)]
        );
    }

    #[test]
    fn test_uint_width_violation_is_unsatisfiable() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let too_wide = witness(&cs, Fr::from(1u128 << 64));
        let mut outputs = PublicOutputs::new(cs.clone());
        outputs.push_uint(&too_wide, BLOCK_NUM_BITS).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_address_width_violation_is_unsatisfiable() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let too_wide = witness(&cs, Fr::from(BigUint::from(1u8) << 160));
        let mut outputs = PublicOutputs::new(cs.clone());
        outputs.push_address(&too_wide).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_bytes32_passes_any_field_element() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        // Wider than 160 bits; bytes32 must not range-check it.
        let wide = witness(&cs, Fr::from(BigUint::from(1u8) << 200));
        let mut outputs = PublicOutputs::new(cs.clone());
        outputs.push_bytes32(&wide).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }
}
