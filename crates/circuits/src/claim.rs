//! Event eligibility claims.
//!
//! A claim is data, not behavior: a [`ClaimSpec`] names the claim, declares
//! the capacity the compiled circuit is sized for, and assigns roles to two
//! field slots of the first receipt. One [`EventProofCircuit`] interprets
//! any spec, so adding a claim means adding a descriptor, not a circuit.
//!
//! The constraint program:
//! 1. pin the subject slot and the payload slot to their declared
//!    topic/data positions,
//! 2. require both slots to come from the same log entry,
//! 3. expose `[uint64 block_num, address subject, bytes32 payload]`.
//!
//! Any violated assertion renders the whole system unsatisfiable; there is
//! no partial success and no per-assertion error channel.

use ark_bn254::Fr;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use crate::output::PublicOutputs;
use crate::range_check::{enforce_equals_const, enforce_width_equal, BLOCK_NUM_BITS, LOG_POS_BITS};
use crate::receipt::{Capacity, ReceiptData, ReceiptVar};

/// Length of the public output vector every claim produces.
pub const NUM_PUBLIC_OUTPUTS: usize = 3;

/// Expected location of one field slot within its log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRole {
    /// Positional slot in the receipt's decoded field list.
    pub slot: usize,
    /// Whether the slot must come from the indexed-topics array.
    pub is_topic: bool,
    /// Required position within the source array.
    pub index: u64,
}

/// Descriptor of one eligibility claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimSpec {
    /// Stable claim identifier, used for key file names and routes.
    pub name: &'static str,
    pub capacity: Capacity,
    /// Slot emitted as the 160-bit subject address.
    pub subject: FieldRole,
    /// Slot emitted as the opaque 32-byte payload.
    pub payload: FieldRole,
}

impl ClaimSpec {
    /// Premium-status check: the subject address sits in the second topic
    /// slot (the canonical position of an indexed address parameter) and
    /// the status flag is the first data word of the same log entry.
    pub fn premium_status() -> Self {
        Self {
            name: "premium-status",
            capacity: Capacity::default(),
            subject: FieldRole {
                slot: 0,
                is_topic: true,
                index: 1,
            },
            payload: FieldRole {
                slot: 1,
                is_topic: false,
                index: 0,
            },
        }
    }

    /// Zakat-eligible-asset check. Same event shape as premium status;
    /// only the payload's meaning differs (asset value instead of a flag).
    pub fn zakat_asset() -> Self {
        Self {
            name: "zakat-asset",
            ..Self::premium_status()
        }
    }

    /// All claims the prover serves.
    pub fn all() -> Vec<Self> {
        vec![Self::premium_status(), Self::zakat_asset()]
    }
}

/// Circuit proving one [`ClaimSpec`] against one receipt.
#[derive(Clone)]
pub struct EventProofCircuit {
    pub spec: ClaimSpec,
    /// Witness data; `None` for setup-time constraint generation.
    pub data: Option<ReceiptData>,
}

impl EventProofCircuit {
    pub fn new(spec: ClaimSpec, data: ReceiptData) -> Self {
        Self {
            spec,
            data: Some(data),
        }
    }

    /// Create an empty circuit for setup (constraint generation only).
    pub fn empty(spec: ClaimSpec) -> Self {
        Self { spec, data: None }
    }
}

impl ConstraintSynthesizer<Fr> for EventProofCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let capacity = self.spec.capacity;
        let data = self
            .data
            .unwrap_or_else(|| ReceiptData::empty(&capacity));

        // Allocate the full declared capacity so the compiled system's
        // size is fixed regardless of how many receipts carry real data.
        let receipts = data
            .receipts
            .iter()
            .map(|r| ReceiptVar::new_witness(cs.clone(), r))
            .collect::<Result<Vec<_>, _>>()?;

        // Only the first receipt in the stream is constrained; the rest of
        // the capacity exists for batching and stays unconstrained.
        let receipt = &receipts[0];
        let subject = &receipt.fields[self.spec.subject.slot];
        let payload = &receipt.fields[self.spec.payload.slot];

        // Pin both slots to their expected positions within the log.
        enforce_equals_const(&subject.is_topic, self.spec.subject.is_topic as u64)?;
        enforce_equals_const(&subject.index, self.spec.subject.index)?;
        enforce_equals_const(&payload.is_topic, self.spec.payload.is_topic as u64)?;
        enforce_equals_const(&payload.index, self.spec.payload.index)?;

        // Both slots must describe the same log entry.
        enforce_width_equal(&subject.log_pos, &payload.log_pos, LOG_POS_BITS)?;

        // Public outputs, in the order the verifier matches positionally.
        let mut outputs = PublicOutputs::new(cs);
        outputs.push_uint(&receipt.block_num, BLOCK_NUM_BITS)?;
        outputs.push_address(&subject.value)?;
        outputs.push_bytes32(&payload.value)?;
        debug_assert_eq!(outputs.len(), NUM_PUBLIC_OUTPUTS);

        Ok(())
    }
}
