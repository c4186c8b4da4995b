//! Export verifying keys for on-chain deployment.
//!
//! Generates or loads the claim keys and prints each verifying key as a hex
//! string, plus a JSON blob for scripting the verifier contract's vk hash.

use std::path::Path;

use eventproof_prover::setup::{setup_all_claims, CircuitKeys};

fn main() {
    let keys_dir = Path::new("keys");

    println!("Loading or generating circuit keys...");

    let keys = if keys_dir.exists() {
        println!("Loading existing keys from {:?}", keys_dir);
        CircuitKeys::load_from_directory(keys_dir).expect("Failed to load keys")
    } else {
        println!("Running trusted setup (this may take a while)...");
        let keys = setup_all_claims().expect("Failed to setup circuits");
        keys.save_to_directory(keys_dir).expect("Failed to save keys");
        println!("Keys saved to {:?}", keys_dir);
        keys
    };

    println!("\n=== Verifying Keys ===\n");

    let premium_vk = keys.premium.serialize_vk().unwrap();
    let zakat_vk = keys.zakat.serialize_vk().unwrap();

    println!("premium-status VK ({} bytes):", premium_vk.len());
    println!("0x{}\n", hex::encode(&premium_vk));

    println!("zakat-asset VK ({} bytes):", zakat_vk.len());
    println!("0x{}\n", hex::encode(&zakat_vk));

    let json = serde_json::json!({
        "premium_status_vk": format!("0x{}", hex::encode(&premium_vk)),
        "zakat_asset_vk": format!("0x{}", hex::encode(&zakat_vk)),
    });
    println!("JSON:\n{}", serde_json::to_string_pretty(&json).unwrap());
}
