//! RLP wrapper newtypes and the low-level decode helpers shared by
//! [`crate::raw`] and [`crate::signed`].
//!
//! Encoding goes through `alloy_rlp`'s `Encodable` trait, with small wrapper
//! newtypes for fields whose wire representation needs a rule `alloy_rlp`
//! doesn't supply out of the box (fixed-width addresses/signatures that
//! never collapse to the empty string, minimal-length signed amounts).
//! Decoding is done by hand against `alloy_rlp::Header` rather than through
//! `alloy_rlp`'s `Decodable` derive, so that arity and length faults surface
//! as this crate's own error kinds (`BadArity`, `TrailingBytes`,
//! `MalformedTransaction`) instead of `alloy_rlp`'s generic error type.

use alloy_rlp::{Decodable, Encodable};
use plasma_crypto::Address;

use crate::error::TxError;

/// A 20-byte address, RLP-encoded as a 20-byte string (never the empty
/// string, even when all-zero — the null address is 20 zero bytes on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpAddress(pub Address);

impl Encodable for RlpAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// A non-negative 128-bit amount, RLP-encoded as a minimal-length
/// big-endian string (zero encodes as the empty string).
///
/// Encoding a negative value is a precondition violation: by the time a
/// `RawTransaction` reaches `encode`, `validate` must already have rejected
/// negative amounts/fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpAmount(pub i128);

impl Encodable for RlpAmount {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        debug_assert!(self.0 >= 0, "RlpAmount::encode called on a negative value");
        let bytes = (self.0 as u128).to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        bytes[start..].encode(out);
    }

    fn length(&self) -> usize {
        debug_assert!(self.0 >= 0, "RlpAmount::length called on a negative value");
        let bytes = (self.0 as u128).to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        bytes[start..].length()
    }
}

/// A 65-byte ECDSA signature (`r ‖ s ‖ v`), RLP-encoded as a 65-byte string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RlpSignature(pub [u8; 65]);

impl Encodable for RlpSignature {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// Decodes a single RLP string field as raw bytes, mapping `alloy_rlp`
/// faults onto [`TxError::MalformedRlp`].
fn decode_bytes(buf: &mut &[u8]) -> Result<Vec<u8>, TxError> {
    Vec::<u8>::decode(buf).map_err(|e| TxError::MalformedRlp(e.to_string()))
}

/// Decodes a fixed-arity unsigned integer field (`blknum`, `txindex`, `fee`,
/// ...), mapping faults onto [`TxError::MalformedRlp`].
pub fn decode_u64(buf: &mut &[u8]) -> Result<u64, TxError> {
    u64::decode(buf).map_err(|e| TxError::MalformedRlp(e.to_string()))
}

pub fn decode_u32(buf: &mut &[u8]) -> Result<u32, TxError> {
    u32::decode(buf).map_err(|e| TxError::MalformedRlp(e.to_string()))
}

pub fn decode_u8(buf: &mut &[u8]) -> Result<u8, TxError> {
    u8::decode(buf).map_err(|e| TxError::MalformedRlp(e.to_string()))
}

/// Decodes a non-negative amount/fee field as `i128` (always `>= 0`: the
/// wire format has no negative representation).
pub fn decode_amount(buf: &mut &[u8]) -> Result<i128, TxError> {
    let value = u128::decode(buf).map_err(|e| TxError::MalformedRlp(e.to_string()))?;
    i128::try_from(value)
        .map_err(|_| TxError::MalformedTransaction("amount exceeds i128 range".into()))
}

/// Decodes a 20-byte address field, rejecting anything not exactly 20 bytes.
pub fn decode_address(buf: &mut &[u8]) -> Result<Address, TxError> {
    let bytes = decode_bytes(buf)?;
    if bytes.len() != 20 {
        return Err(TxError::MalformedTransaction(format!(
            "address field must be exactly 20 bytes, got {}",
            bytes.len()
        )));
    }
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

/// Decodes a 65-byte signature field, rejecting anything not exactly 65
/// bytes.
pub fn decode_signature(buf: &mut &[u8]) -> Result<[u8; 65], TxError> {
    let bytes = decode_bytes(buf)?;
    if bytes.len() != 65 {
        return Err(TxError::MalformedTransaction(format!(
            "signature field must be exactly 65 bytes, got {}",
            bytes.len()
        )));
    }
    let mut sig = [0u8; 65];
    sig.copy_from_slice(&bytes);
    Ok(sig)
}

/// Decodes the outer list header, checking it really is a list and
/// returning the payload length so callers can detect trailing bytes once
/// every field inside has been consumed.
pub fn decode_list_header(buf: &mut &[u8]) -> Result<alloy_rlp::Header, TxError> {
    let header = alloy_rlp::Header::decode(buf).map_err(|e| TxError::MalformedRlp(e.to_string()))?;
    if !header.list {
        return Err(TxError::MalformedTransaction("expected an RLP list".into()));
    }
    Ok(header)
}
