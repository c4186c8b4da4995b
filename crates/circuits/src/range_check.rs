//! Width and equality gadgets for receipt metadata and output values.
//!
//! All circuit arithmetic happens in a ~254-bit prime field, so "this is a
//! 64-bit block number" or "this is a 160-bit address" has to be enforced
//! explicitly: the value is decomposed into bits and every bit above the
//! declared width is pinned to zero. A value outside the width makes the
//! whole system unsatisfiable; there is no truncation path.

use ark_ff::PrimeField;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

/// Width of a log-entry position within a receipt.
pub const LOG_POS_BITS: usize = 32;

/// Width of a block number output.
pub const BLOCK_NUM_BITS: usize = 64;

/// Width of an account address output.
pub const ADDRESS_BITS: usize = 160;

/// Enforce that a field element fits in `num_bits` bits.
///
/// Unsatisfiable if any bit at position `num_bits` or above is set.
pub fn enforce_width<F: PrimeField>(
    value: &FpVar<F>,
    num_bits: usize,
) -> Result<(), SynthesisError> {
    let bits = value.to_bits_le()?;
    for bit in bits.iter().skip(num_bits) {
        bit.enforce_equal(&Boolean::FALSE)?;
    }
    Ok(())
}

/// Enforce that two values are equal and both fit in `num_bits` bits.
///
/// Used to pin two fields to the same log entry: the width bound rules out
/// satisfying the equality with wrapped-around field elements.
pub fn enforce_width_equal<F: PrimeField>(
    a: &FpVar<F>,
    b: &FpVar<F>,
    num_bits: usize,
) -> Result<(), SynthesisError> {
    enforce_width(a, num_bits)?;
    enforce_width(b, num_bits)?;
    a.enforce_equal(b)
}

/// Enforce that a metadata attribute equals a declared constant.
pub fn enforce_equals_const<F: PrimeField>(
    value: &FpVar<F>,
    constant: u64,
) -> Result<(), SynthesisError> {
    value.enforce_equal(&FpVar::constant(F::from(constant)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;
    use ark_relations::r1cs::ConstraintSystem;
    use std::ops::Neg;

    fn witness(cs: &ark_relations::r1cs::ConstraintSystemRef<Fr>, v: Fr) -> FpVar<Fr> {
        FpVar::new_witness(cs.clone(), || Ok(v)).unwrap()
    }

    #[test]
    fn test_width_accepts_max_value() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let value = witness(&cs, Fr::from(u32::MAX as u64));
        enforce_width(&value, LOG_POS_BITS).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_width_rejects_one_past_max() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let value = witness(&cs, Fr::from(1u64 << 32));
        enforce_width(&value, LOG_POS_BITS).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_width_rejects_wrapped_negative() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        // -5 in the field is p - 5, far outside any small width.
        let value = witness(&cs, Fr::from(5u64).neg());
        enforce_width(&value, BLOCK_NUM_BITS).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_width_equal_holds() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let a = witness(&cs, Fr::from(3u64));
        let b = witness(&cs, Fr::from(3u64));
        enforce_width_equal(&a, &b, LOG_POS_BITS).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_width_equal_rejects_mismatch() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let a = witness(&cs, Fr::from(0u64));
        let b = witness(&cs, Fr::from(1u64));
        enforce_width_equal(&a, &b, LOG_POS_BITS).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn test_const_equality() {
        let cs = ConstraintSystem::<Fr>::new_ref();
        let value = witness(&cs, Fr::from(1u64));
        enforce_equals_const(&value, 1).unwrap();
        assert!(cs.is_satisfied().unwrap());

        let wrong = witness(&cs, Fr::from(2u64));
        enforce_equals_const(&wrong, 1).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }
}
