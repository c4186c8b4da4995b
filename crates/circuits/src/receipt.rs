//! Decoded receipt data as seen by a circuit.
//!
//! Field selection and ordering are fixed upstream by the log decoder:
//! a claim hard-codes which positional slot carries which semantic role
//! (e.g. "slot 0 is the subject-address topic"), so the decoder must
//! present slots in a stable order. The circuit never re-derives
//! `is_topic`/`index`/`log_pos` from raw log bytes; it only constrains
//! what the decoder handed it.

use ark_bn254::Fr;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

/// Number of field slots allocated per receipt.
///
/// Fixed so the compiled constraint system's shape does not depend on the
/// witness; receipts with fewer decoded slots are padded with zero fields.
pub const MAX_FIELDS_PER_RECEIPT: usize = 4;

/// Static size bounds a compiled circuit is set up for.
///
/// The bounds fix the constraint system's size at setup time and must match
/// the [`ReceiptData`] shape exactly. Storage-slot and transaction records
/// are not used by the event claims but keep their place in the declaration
/// so the setup layer sees the full capacity contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capacity {
    pub max_receipts: usize,
    pub max_storage_slots: usize,
    pub max_transactions: usize,
}

impl Default for Capacity {
    fn default() -> Self {
        Self {
            max_receipts: 32,
            max_storage_slots: 0,
            max_transactions: 0,
        }
    }
}

/// One decoded attribute slot of an event log entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogField {
    /// True if the slot came from the log's indexed topics array,
    /// false if it came from the opaque data blob.
    pub is_topic: bool,
    /// Position within the source array. Topics and data are indexed
    /// independently of each other.
    pub index: u64,
    /// Which log entry within the receipt this slot was extracted from.
    pub log_pos: u64,
    /// Raw value as a field element. Interpretation (address, integer,
    /// raw bytes) is decided by the consuming output rule, not here.
    pub value: Fr,
}

/// One decoded transaction receipt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Receipt {
    /// Block height containing the transaction.
    pub block_num: Fr,
    /// Extracted field slots, in decoder order. Claims reference these
    /// by fixed position.
    pub fields: Vec<LogField>,
}

/// The full witness bundle for one proof, padded to a circuit's capacity.
///
/// Construct through [`ReceiptData::new`] so that padding matches the
/// declared capacity; a mismatched shape is a boundary configuration error
/// the circuit does not defend against.
#[derive(Clone, Debug)]
pub struct ReceiptData {
    pub receipts: Vec<Receipt>,
}

impl ReceiptData {
    /// Wrap decoded receipts, padding every receipt's field list to
    /// [`MAX_FIELDS_PER_RECEIPT`] and the receipt list to
    /// `capacity.max_receipts` with zeroed entries.
    pub fn new(mut receipts: Vec<Receipt>, capacity: &Capacity) -> Self {
        receipts.truncate(capacity.max_receipts);
        for receipt in &mut receipts {
            receipt.fields.truncate(MAX_FIELDS_PER_RECEIPT);
            receipt
                .fields
                .resize(MAX_FIELDS_PER_RECEIPT, LogField::default());
        }
        receipts.resize_with(capacity.max_receipts, || Receipt {
            block_num: Fr::from(0u64),
            fields: vec![LogField::default(); MAX_FIELDS_PER_RECEIPT],
        });
        Self { receipts }
    }

    /// A structurally complete instance with all-zero assignments, for
    /// setup-time constraint generation.
    pub fn empty(capacity: &Capacity) -> Self {
        Self::new(Vec::new(), capacity)
    }
}

/// In-circuit allocation of one [`LogField`].
///
/// All four attributes are private witnesses; the claim's assertions are
/// what bind them to public meaning.
pub struct LogFieldVar {
    pub is_topic: FpVar<Fr>,
    pub index: FpVar<Fr>,
    pub log_pos: FpVar<Fr>,
    pub value: FpVar<Fr>,
}

impl LogFieldVar {
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        field: &LogField,
    ) -> Result<Self, SynthesisError> {
        Ok(Self {
            is_topic: FpVar::new_witness(cs.clone(), || Ok(Fr::from(field.is_topic as u64)))?,
            index: FpVar::new_witness(cs.clone(), || Ok(Fr::from(field.index)))?,
            log_pos: FpVar::new_witness(cs.clone(), || Ok(Fr::from(field.log_pos)))?,
            value: FpVar::new_witness(cs, || Ok(field.value))?,
        })
    }
}

/// In-circuit allocation of one [`Receipt`].
pub struct ReceiptVar {
    pub block_num: FpVar<Fr>,
    pub fields: Vec<LogFieldVar>,
}

impl ReceiptVar {
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        receipt: &Receipt,
    ) -> Result<Self, SynthesisError> {
        let block_num = FpVar::new_witness(cs.clone(), || Ok(receipt.block_num))?;
        let fields = receipt
            .fields
            .iter()
            .map(|f| LogFieldVar::new_witness(cs.clone(), f))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { block_num, fields })
    }
}
