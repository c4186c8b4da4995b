//! Circuit statistics utility - reports constraint counts and proof timing
//!
//! Usage:
//!   cargo run --release --bin circuit-stats           # Just constraint counts
//!   cargo run --release --bin circuit-stats -- --time # Include proof timing

use std::time::Instant;

use ark_bn254::Fr;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};
use ark_std::rand::{rngs::StdRng, SeedableRng};

use eventproof_circuits::{ClaimSpec, EventProofCircuit, LogField, Receipt};
use eventproof_prover::{prove_claim, setup_claim};

fn count_constraints(spec: ClaimSpec) -> usize {
    let circuit = EventProofCircuit::empty(spec.clone());
    let cs = ConstraintSystem::<Fr>::new_ref();
    circuit.generate_constraints(cs.clone()).unwrap();
    let count = cs.num_constraints();
    println!(
        "{:20} {:>8} constraints, {:>8} witnesses, {:>3} public outputs",
        spec.name,
        count,
        cs.num_witness_variables(),
        cs.num_instance_variables() - 1
    );
    count
}

fn sample_receipt() -> Receipt {
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

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let include_timing = args.iter().any(|a| a == "--time");

    println!("EVENT CLAIM CIRCUIT STATS\n");
    for spec in ClaimSpec::all() {
        count_constraints(spec);
    }

    if include_timing {
        println!("\nPROOF TIMING:\n");
        let mut rng = StdRng::seed_from_u64(42);
        let receipt = sample_receipt();

        for spec in ClaimSpec::all() {
            let setup_start = Instant::now();
            let keys = setup_claim(spec.clone(), &mut rng).expect("setup failed");
            let setup_ms = setup_start.elapsed().as_millis();

            let prove_start = Instant::now();
            prove_claim(&keys.proving_key, &spec, &receipt).expect("prove failed");
            let prove_ms = prove_start.elapsed().as_millis();

            println!(
                "{:20} setup {:>6} ms, prove {:>6} ms",
                spec.name, setup_ms, prove_ms
            );
        }
    }
}
