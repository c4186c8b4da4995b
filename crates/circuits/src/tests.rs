//! Full Groth16 prove/verify round trips for the event claims.

use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_snark::SNARK;
use ark_std::rand::thread_rng;
use num_bigint::BigUint;

use crate::claim::{ClaimSpec, EventProofCircuit};
use crate::receipt::{LogField, Receipt, ReceiptData};

fn subject_address() -> Fr {
    Fr::from(BigUint::parse_bytes(b"abcd000000000000000000000000000000001234", 16).unwrap())
}

fn valid_receipt() -> Receipt {
    Receipt {
        block_num: Fr::from(18_000_000u64),
        fields: vec![
            LogField {
                is_topic: true,
                index: 1,
                log_pos: 0,
                value: subject_address(),
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

/// End-to-end premium-status proof with the expected output vector.
#[test]
fn test_premium_status_full_proof() {
    let mut rng = thread_rng();
    let spec = ClaimSpec::premium_status();

    let (pk, vk) =
        Groth16::<Bn254>::circuit_specific_setup(EventProofCircuit::empty(spec.clone()), &mut rng)
            .unwrap();

    let data = ReceiptData::new(vec![valid_receipt()], &spec.capacity);
    let circuit = EventProofCircuit::new(spec, data);
    let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).unwrap();

    let outputs = vec![Fr::from(18_000_000u64), subject_address(), Fr::from(1u64)];
    let valid = Groth16::<Bn254>::verify(&vk, &outputs, &proof).unwrap();
    assert!(valid, "premium-status proof verification failed");
}

/// A tampered output vector must not verify.
#[test]
fn test_tampered_outputs_fail_verification() {
    let mut rng = thread_rng();
    let spec = ClaimSpec::premium_status();

    let (pk, vk) =
        Groth16::<Bn254>::circuit_specific_setup(EventProofCircuit::empty(spec.clone()), &mut rng)
            .unwrap();

    let data = ReceiptData::new(vec![valid_receipt()], &spec.capacity);
    let proof = Groth16::<Bn254>::prove(&pk, EventProofCircuit::new(spec, data), &mut rng).unwrap();

    // Wrong block number.
    let outputs = vec![Fr::from(18_000_001u64), subject_address(), Fr::from(1u64)];
    let valid = Groth16::<Bn254>::verify(&vk, &outputs, &proof).unwrap();
    assert!(!valid);

    // Reordered vector: positional contract broken.
    let outputs = vec![subject_address(), Fr::from(18_000_000u64), Fr::from(1u64)];
    let valid = Groth16::<Bn254>::verify(&vk, &outputs, &proof).unwrap();
    assert!(!valid);
}

/// The zakat claim proves and verifies against the identical output vector.
#[test]
fn test_zakat_asset_full_proof_matches_premium_outputs() {
    let mut rng = thread_rng();
    let spec = ClaimSpec::zakat_asset();

    let (pk, vk) =
        Groth16::<Bn254>::circuit_specific_setup(EventProofCircuit::empty(spec.clone()), &mut rng)
            .unwrap();

    let data = ReceiptData::new(vec![valid_receipt()], &spec.capacity);
    let proof = Groth16::<Bn254>::prove(&pk, EventProofCircuit::new(spec, data), &mut rng).unwrap();

    let outputs = vec![Fr::from(18_000_000u64), subject_address(), Fr::from(1u64)];
    let valid = Groth16::<Bn254>::verify(&vk, &outputs, &proof).unwrap();
    assert!(valid, "zakat-asset proof verification failed");
}
