//! Trusted setup utilities for generating proving and verifying keys.

use std::path::Path;

use ark_bn254::Bn254;
use ark_groth16::{Groth16, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use eventproof_circuits::{ClaimSpec, EventProofCircuit};

/// Errors that can occur during setup
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Circuit setup failed: {0}")]
    CircuitSetup(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
    #[error("Deserialization failed: {0}")]
    Deserialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keys for a single claim circuit
#[derive(Clone)]
pub struct CircuitKeyPair {
    pub proving_key: ProvingKey<Bn254>,
    pub verifying_key: VerifyingKey<Bn254>,
}

impl CircuitKeyPair {
    /// Serialize proving key to compressed bytes
    pub fn serialize_pk(&self) -> Result<Vec<u8>, SetupError> {
        let mut bytes = Vec::new();
        self.proving_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Serialize verifying key to compressed bytes
    pub fn serialize_vk(&self) -> Result<Vec<u8>, SetupError> {
        let mut bytes = Vec::new();
        self.verifying_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Deserialize a key pair from its two byte blobs
    pub fn deserialize(pk_bytes: &[u8], vk_bytes: &[u8]) -> Result<Self, SetupError> {
        let proving_key = ProvingKey::deserialize_compressed(pk_bytes)
            .map_err(|e| SetupError::Deserialization(e.to_string()))?;
        let verifying_key = VerifyingKey::deserialize_compressed(vk_bytes)
            .map_err(|e| SetupError::Deserialization(e.to_string()))?;
        Ok(Self {
            proving_key,
            verifying_key,
        })
    }

    fn save(&self, dir: &Path, name: &str) -> Result<(), SetupError> {
        std::fs::write(dir.join(format!("{name}.pk")), self.serialize_pk()?)?;
        std::fs::write(dir.join(format!("{name}.vk")), self.serialize_vk()?)?;
        Ok(())
    }

    fn load(dir: &Path, name: &str) -> Result<Self, SetupError> {
        let pk_bytes = std::fs::read(dir.join(format!("{name}.pk")))?;
        let vk_bytes = std::fs::read(dir.join(format!("{name}.vk")))?;
        Self::deserialize(&pk_bytes, &vk_bytes)
    }
}

/// Keys for every claim the service proves
pub struct CircuitKeys {
    pub premium: CircuitKeyPair,
    pub zakat: CircuitKeyPair,
}

impl CircuitKeys {
    /// Select the key pair for a claim by its name
    pub fn for_claim(&self, spec: &ClaimSpec) -> &CircuitKeyPair {
        match spec.name {
            "zakat-asset" => &self.zakat,
            _ => &self.premium,
        }
    }

    /// Save all keys to a directory, one `.pk`/`.vk` file pair per claim
    pub fn save_to_directory(&self, dir: &Path) -> Result<(), SetupError> {
        std::fs::create_dir_all(dir)?;
        self.premium.save(dir, ClaimSpec::premium_status().name)?;
        self.zakat.save(dir, ClaimSpec::zakat_asset().name)?;
        Ok(())
    }

    /// Load all keys from a directory
    pub fn load_from_directory(dir: &Path) -> Result<Self, SetupError> {
        Ok(Self {
            premium: CircuitKeyPair::load(dir, ClaimSpec::premium_status().name)?,
            zakat: CircuitKeyPair::load(dir, ClaimSpec::zakat_asset().name)?,
        })
    }
}

/// Run circuit-specific setup for one claim
pub fn setup_claim(spec: ClaimSpec, rng: &mut StdRng) -> Result<CircuitKeyPair, SetupError> {
    let circuit = EventProofCircuit::empty(spec);
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(circuit, rng)
        .map_err(|e| SetupError::CircuitSetup(e.to_string()))?;

    Ok(CircuitKeyPair {
        proving_key: pk,
        verifying_key: vk,
    })
}

/// Run trusted setup for all claims.
///
/// Uses a fixed seed so re-running setup reproduces the same keys; a real
/// deployment would run a ceremony with fresh randomness instead.
pub fn setup_all_claims() -> Result<CircuitKeys, SetupError> {
    let mut rng = StdRng::seed_from_u64(42);

    let premium = setup_claim(ClaimSpec::premium_status(), &mut rng)?;
    let zakat = setup_claim(ClaimSpec::zakat_asset(), &mut rng)?;

    Ok(CircuitKeys { premium, zakat })
}
