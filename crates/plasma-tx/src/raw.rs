use alloy_rlp::{Encodable, RlpEncodable};
use plasma_crypto::{keccak256, Address, ZERO_ADDRESS};

use crate::error::TxError;
use crate::rlp::{decode_address, decode_amount, decode_list_header, decode_u32, decode_u64, decode_u8, RlpAddress, RlpAmount};

/// The fixed input/output arity a raw transaction always has: exactly two
/// input slots and two output slots, padded with nulls when fewer are in
/// semantic use.
pub const MAX_INPUTS: usize = 2;
pub const MAX_OUTPUTS: usize = 2;

/// The number of RLP fields a raw transaction's canonical encoding always
/// has.
pub const RAW_TX_FIELD_COUNT: usize = 12;

/// Block-number arithmetic constant consumed by the external operator; the
/// transaction core only needs its type to stay consistent with `blknum`.
/// Not used by anything in this crate.
pub const CHILD_BLOCK_INTERVAL: u64 = 1000;

/// An input reference: the output produced by transaction `txindex` in
/// block `blknum`, at output slot `oindex`.
///
/// The all-zero triple is the padding sentinel ("no input").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Input {
    pub blknum: u64,
    pub txindex: u32,
    pub oindex: u8,
}

/// The padding input: `(0, 0, 0)`.
pub const NULL_INPUT: Input = Input { blknum: 0, txindex: 0, oindex: 0 };

impl Input {
    pub fn new(blknum: u64, txindex: u32, oindex: u8) -> Self {
        Input { blknum, txindex, oindex }
    }

    /// True iff this is the padding sentinel.
    pub fn is_null(&self) -> bool {
        *self == NULL_INPUT
    }
}

/// An output: a new owner and the amount assigned to them.
///
/// The pair `(zero_address, 0)` is the padding sentinel ("no output").
/// `amount` is signed so that [`validate`] has something to reject — see
/// the module-level note on why `RawTransaction` does not use `u128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub owner: Address,
    pub amount: i128,
}

/// The padding output: `(zero_address, 0)`.
pub const NULL_OUTPUT: Output = Output { owner: ZERO_ADDRESS, amount: 0 };

impl Output {
    pub fn new(owner: Address, amount: i128) -> Self {
        Output { owner, amount }
    }

    /// True iff this is the padding sentinel.
    pub fn is_null(&self) -> bool {
        *self == NULL_OUTPUT
    }
}

/// A fixed-arity, 12-field raw transaction: two inputs, one currency, two
/// outputs, one flat fee.
///
/// `RawTransaction` values are immutable once built; `new` is the only
/// constructor and it always produces a record with exactly two input and
/// two output slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub inputs: [Input; 2],
    pub currency: Address,
    pub outputs: [Output; 2],
    pub fee: i128,
}

impl RawTransaction {
    /// Builds a raw transaction from up to two inputs and up to two
    /// outputs, padding absent slots with the null sentinels.
    ///
    /// Callers (the builder, the decoder) are responsible for `inputs.len()
    /// <= 2` and `outputs.len() <= 2`; this is a fixed precondition of the
    /// fixed-arity wire format, not a runtime-checked error in its own
    /// right.
    pub fn new(inputs: &[Input], currency: Address, outputs: &[Output], fee: i128) -> Self {
        debug_assert!(inputs.len() <= MAX_INPUTS, "more than 2 inputs given to RawTransaction::new");
        debug_assert!(outputs.len() <= MAX_OUTPUTS, "more than 2 outputs given to RawTransaction::new");

        let mut in_slots = [NULL_INPUT; 2];
        for (slot, input) in in_slots.iter_mut().zip(inputs.iter()) {
            *slot = *input;
        }

        let mut out_slots = [NULL_OUTPUT; 2];
        for (slot, output) in out_slots.iter_mut().zip(outputs.iter()) {
            *slot = *output;
        }

        RawTransaction { inputs: in_slots, currency, outputs: out_slots, fee }
    }

    /// Checks the non-negativity invariants required before a transaction
    /// may be encoded, hashed, or signed.
    pub fn validate(&self) -> Result<(), TxError> {
        for output in &self.outputs {
            if output.amount < 0 {
                return Err(TxError::AmountNegativeValue(format!(
                    "output to {:?} has negative amount {}",
                    output.owner, output.amount
                )));
            }
        }
        if self.fee < 0 {
            return Err(TxError::FeeNegativeValue(format!("fee is {}", self.fee)));
        }
        Ok(())
    }

    /// RLP-encodes the 12 canonical fields, in canonical order. Two raw
    /// transactions with equal fields always produce byte-identical
    /// encodings.
    ///
    /// Precondition: `self.validate()` has already succeeded. Encoding a
    /// transaction with a negative amount or fee is a programming error,
    /// not a reportable runtime fault (see the module-level note).
    pub fn encode(&self) -> Vec<u8> {
        let fields = self.to_fields();
        let mut out = Vec::with_capacity(fields.length());
        fields.encode(&mut out);
        out
    }

    /// Builds the flat 12-field RLP-encodable struct, also used by
    /// [`crate::signed::SignedTransaction::encode`] to nest this
    /// transaction's fields inside the outer 3-item signed-transaction
    /// list.
    pub(crate) fn to_fields(&self) -> TxFields {
        TxFields {
            blknum1: self.inputs[0].blknum,
            txindex1: self.inputs[0].txindex,
            oindex1: self.inputs[0].oindex,
            blknum2: self.inputs[1].blknum,
            txindex2: self.inputs[1].txindex,
            oindex2: self.inputs[1].oindex,
            cur12: RlpAddress(self.currency),
            newowner1: RlpAddress(self.outputs[0].owner),
            amount1: RlpAmount(self.outputs[0].amount),
            newowner2: RlpAddress(self.outputs[1].owner),
            amount2: RlpAmount(self.outputs[1].amount),
            fee: RlpAmount(self.fee),
        }
    }

    /// `keccak256(encode(self))` — the hash signatures are taken over.
    pub fn hash(&self) -> [u8; 32] {
        keccak256(&self.encode())
    }

    /// Decodes the 12-field canonical list from `buf`, consuming exactly
    /// the bytes the list header declares and erroring on any leftover
    /// bytes in `buf` beyond the list (trailing-byte faults are reported by
    /// the caller, which knows whether further sibling fields follow).
    pub(crate) fn decode_fields(buf: &mut &[u8]) -> Result<Self, TxError> {
        let blknum1 = decode_u64(buf)?;
        let txindex1 = decode_u32(buf)?;
        let oindex1 = decode_u8(buf)?;
        let blknum2 = decode_u64(buf)?;
        let txindex2 = decode_u32(buf)?;
        let oindex2 = decode_u8(buf)?;
        let cur12 = decode_address(buf)?;
        let newowner1 = decode_address(buf)?;
        let amount1 = decode_amount(buf)?;
        let newowner2 = decode_address(buf)?;
        let amount2 = decode_amount(buf)?;
        let fee = decode_amount(buf)?;

        for (oindex, label) in [(oindex1, "oindex1"), (oindex2, "oindex2")] {
            if oindex > 1 {
                return Err(TxError::MalformedTransaction(format!(
                    "{label} must be 0 or 1, got {oindex}"
                )));
            }
        }

        Ok(RawTransaction {
            inputs: [
                Input { blknum: blknum1, txindex: txindex1, oindex: oindex1 },
                Input { blknum: blknum2, txindex: txindex2, oindex: oindex2 },
            ],
            currency: cur12,
            outputs: [Output { owner: newowner1, amount: amount1 }, Output { owner: newowner2, amount: amount2 }],
            fee,
        })
    }

    /// Decodes a standalone raw transaction: `RLP([ 12 fields ])`, rejecting
    /// wrong arity and trailing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, TxError> {
        let mut buf = bytes;
        let header = decode_list_header(&mut buf)?;
        if header.payload_length > buf.len() {
            return Err(TxError::MalformedRlp("list header overruns input".into()));
        }

        let mut body = &buf[..header.payload_length];
        let tx = Self::decode_fields(&mut body)?;
        if !body.is_empty() {
            return Err(TxError::BadArity {
                expected: RAW_TX_FIELD_COUNT,
                got: RAW_TX_FIELD_COUNT + 1,
            });
        }

        let remainder = &buf[header.payload_length..];
        if !remainder.is_empty() {
            return Err(TxError::TrailingBytes(remainder.len()));
        }

        Ok(tx)
    }
}

/// The 12 canonical fields for RLP encoding, in their fixed wire order:
/// `blknum1, txindex1, oindex1, blknum2, txindex2, oindex2, cur12,
/// newowner1, amount1, newowner2, amount2, fee`.
#[derive(RlpEncodable)]
pub(crate) struct TxFields {
    pub blknum1: u64,
    pub txindex1: u32,
    pub oindex1: u8,
    pub blknum2: u64,
    pub txindex2: u32,
    pub oindex2: u8,
    pub cur12: RlpAddress,
    pub newowner1: RlpAddress,
    pub amount1: RlpAmount,
    pub newowner2: RlpAddress,
    pub amount2: RlpAmount,
    pub fee: RlpAmount,
}
