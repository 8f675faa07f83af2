use std::sync::OnceLock;

use alloy_rlp::{Encodable, RlpEncodable};
use plasma_crypto::{recover, sign as crypto_sign, SignerKey, NULL_SIGNATURE};

use crate::error::TxError;
use crate::raw::{RawTransaction, TxFields, RAW_TX_FIELD_COUNT};
use crate::rlp::{decode_list_header, decode_signature, RlpSignature};

/// A raw transaction plus its two ECDSA signatures.
///
/// `raw_tx` is never mutated once a `SignedTransaction` exists; re-signing
/// produces a new value. The RLP encoding is memoized the first time
/// [`SignedTransaction::encode`] is called — concurrent callers race to
/// compute the same immutable bytes, so a `OnceLock` is enough; no mutex is
/// needed.
#[derive(Debug)]
pub struct SignedTransaction {
    pub raw_tx: RawTransaction,
    pub sig1: [u8; 65],
    pub sig2: [u8; 65],
    cached_bytes: OnceLock<Vec<u8>>,
}

/// The number of RLP items a signed transaction's outer list always has:
/// `[raw_tx_as_list, sig1, sig2]`.
pub const SIGNED_TX_FIELD_COUNT: usize = 3;

impl SignedTransaction {
    /// Signs `raw_tx` with `key1`/`key2`.
    ///
    /// `h = hash(raw_tx)`; `sig_i = crypto::sign(h, key_i)`. A
    /// [`SignerKey::None`] key yields the null signature for that slot —
    /// this is how a single-input transaction signs its second, unused
    /// slot.
    pub fn sign(raw_tx: RawTransaction, key1: &SignerKey, key2: &SignerKey) -> Result<Self, TxError> {
        let h = raw_tx.hash();
        let sig1 = crypto_sign(&h, key1)?;
        let sig2 = crypto_sign(&h, key2)?;

        Ok(SignedTransaction { raw_tx, sig1, sig2, cached_bytes: OnceLock::new() })
    }

    /// Builds a signed transaction from already-computed parts (used by
    /// [`SignedTransaction::decode`], which carries the caller's exact
    /// input bytes as the cache rather than recomputing them).
    fn from_parts(raw_tx: RawTransaction, sig1: [u8; 65], sig2: [u8; 65], bytes: Option<Vec<u8>>) -> Self {
        let cached_bytes = OnceLock::new();
        if let Some(bytes) = bytes {
            // Only ever called once per instance, right after construction.
            let _ = cached_bytes.set(bytes);
        }
        SignedTransaction { raw_tx, sig1, sig2, cached_bytes }
    }

    /// RLP-encodes `[raw_tx_as_list, sig1, sig2]`, caching and returning the
    /// bytes. Subsequent calls return the cached encoding without
    /// re-serializing.
    pub fn encode(&self) -> &[u8] {
        self.cached_bytes.get_or_init(|| {
            let fields = SignedTxFields { raw: self.raw_tx.to_fields(), sig1: RlpSignature(self.sig1), sig2: RlpSignature(self.sig2) };
            let mut out = Vec::with_capacity(fields.length());
            fields.encode(&mut out);
            out
        })
    }

    /// Decodes `[raw_tx_as_list, sig1, sig2]`, enforcing the outer 3-item
    /// and inner 12-item arities and rejecting trailing bytes. The decoded
    /// value's cached encoding is set to exactly `bytes`, the caller's
    /// original input — used for re-hashing and storage without
    /// re-serializing.
    pub fn decode(bytes: &[u8]) -> Result<Self, TxError> {
        let mut buf = bytes;
        let outer_header = decode_list_header(&mut buf)?;
        if outer_header.payload_length > buf.len() {
            return Err(TxError::MalformedRlp("list header overruns input".into()));
        }

        let mut outer_body = &buf[..outer_header.payload_length];

        let inner_header = decode_list_header(&mut outer_body)?;
        if inner_header.payload_length > outer_body.len() {
            return Err(TxError::MalformedRlp("list header overruns input".into()));
        }
        let mut raw_body = &outer_body[..inner_header.payload_length];
        let raw_tx = RawTransaction::decode_fields(&mut raw_body)?;
        if !raw_body.is_empty() {
            return Err(TxError::BadArity { expected: RAW_TX_FIELD_COUNT, got: RAW_TX_FIELD_COUNT + 1 });
        }
        outer_body = &outer_body[inner_header.payload_length..];

        let sig1 = decode_signature(&mut outer_body)?;
        let sig2 = decode_signature(&mut outer_body)?;
        if !outer_body.is_empty() {
            return Err(TxError::BadArity { expected: SIGNED_TX_FIELD_COUNT, got: SIGNED_TX_FIELD_COUNT + 1 });
        }

        let remainder = &buf[outer_header.payload_length..];
        if !remainder.is_empty() {
            return Err(TxError::TrailingBytes(remainder.len()));
        }

        Ok(Self::from_parts(raw_tx, sig1, sig2, Some(bytes.to_vec())))
    }

    /// Recovers the spender address for each input slot.
    ///
    /// A padding input (`blknum=0, txindex=0, oindex=0`) must carry the
    /// null signature and recovers to `None`; a non-padding input must
    /// carry a real signature and recovers to `Some(address)`. Either
    /// mismatch is `input_missing_for_signature`; a malformed or
    /// non-recoverable real signature is `signature_corrupt`.
    pub fn recover_spenders(&self) -> Result<(Option<[u8; 20]>, Option<[u8; 20]>), TxError> {
        let h = self.raw_tx.hash();
        let spender = |slot: u8, input_is_null: bool, sig: &[u8; 65]| -> Result<Option<[u8; 20]>, TxError> {
            match (input_is_null, *sig == NULL_SIGNATURE) {
                (true, true) => Ok(None),
                (true, false) => Err(TxError::InputMissingForSignature(slot)),
                (false, true) => Err(TxError::InputMissingForSignature(slot)),
                (false, false) => Ok(Some(recover(&h, sig)?)),
            }
        };

        let spender1 = spender(0, self.raw_tx.inputs[0].is_null(), &self.sig1)?;
        let spender2 = spender(1, self.raw_tx.inputs[1].is_null(), &self.sig2)?;
        Ok((spender1, spender2))
    }
}

/// The 3-item outer list: the raw transaction's 12 fields nested as a list,
/// then the two 65-byte signatures.
#[derive(RlpEncodable)]
struct SignedTxFields {
    raw: TxFields,
    sig1: RlpSignature,
    sig2: RlpSignature,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{Input, Output};
    use plasma_crypto::ZERO_ADDRESS;

    const PRIV1: [u8; 32] = {
        let mut k = [0u8; 32];
        k[31] = 1;
        k
    };
    const PRIV2: [u8; 32] = {
        let mut k = [0u8; 32];
        k[31] = 2;
        k
    };

    fn addr(byte: u8) -> [u8; 20] {
        let mut a = [0u8; 20];
        a[19] = byte;
        a
    }

    fn sample_raw() -> RawTransaction {
        RawTransaction::new(
            &[Input::new(1000, 0, 0), Input::new(1000, 0, 1)],
            ZERO_ADDRESS,
            &[Output::new(addr(1), 7), Output::new(addr(2), 3)],
            0,
        )
    }

    #[test]
    fn sign_with_none_key_yields_null_signature() {
        let signed = SignedTransaction::sign(sample_raw(), &SignerKey::Real(PRIV1), &SignerKey::None).unwrap();
        assert_ne!(signed.sig1, NULL_SIGNATURE);
        assert_eq!(signed.sig2, NULL_SIGNATURE);
    }

    #[test]
    fn recover_spenders_matches_signing_keys() {
        let raw = sample_raw();
        let signed = SignedTransaction::sign(raw, &SignerKey::Real(PRIV1), &SignerKey::Real(PRIV2)).unwrap();

        let (s1, s2) = signed.recover_spenders().unwrap();
        assert!(s1.is_some());
        assert!(s2.is_some());
        assert_ne!(s1, s2);
    }

    #[test]
    fn recover_spenders_null_for_padding_input() {
        let raw = RawTransaction::new(&[Input::new(1000, 0, 0)], ZERO_ADDRESS, &[Output::new(addr(1), 7)], 0);
        let signed = SignedTransaction::sign(raw, &SignerKey::Real(PRIV1), &SignerKey::None).unwrap();

        let (s1, s2) = signed.recover_spenders().unwrap();
        assert!(s1.is_some());
        assert_eq!(s2, None);
    }

    #[test]
    fn recover_spenders_rejects_signed_padding_input() {
        let raw = RawTransaction::new(&[Input::new(1000, 0, 0)], ZERO_ADDRESS, &[Output::new(addr(1), 7)], 0);
        // Sign both slots even though only one input is in use.
        let signed = SignedTransaction::sign(raw, &SignerKey::Real(PRIV1), &SignerKey::Real(PRIV2)).unwrap();

        assert!(matches!(signed.recover_spenders(), Err(TxError::InputMissingForSignature(1))));
    }

    #[test]
    fn recover_spenders_rejects_unsigned_real_input() {
        let raw = sample_raw();
        let signed = SignedTransaction::sign(raw, &SignerKey::Real(PRIV1), &SignerKey::None).unwrap();

        assert!(matches!(signed.recover_spenders(), Err(TxError::InputMissingForSignature(1))));
    }

    #[test]
    fn encode_decode_round_trip_preserves_raw_tx() {
        let signed = SignedTransaction::sign(sample_raw(), &SignerKey::Real(PRIV1), &SignerKey::Real(PRIV2)).unwrap();
        let bytes = signed.encode().to_vec();

        let decoded = SignedTransaction::decode(&bytes).unwrap();
        assert_eq!(decoded.raw_tx, signed.raw_tx);
        assert_eq!(decoded.sig1, signed.sig1);
        assert_eq!(decoded.sig2, signed.sig2);
    }

    #[test]
    fn encode_is_memoized() {
        let signed = SignedTransaction::sign(sample_raw(), &SignerKey::Real(PRIV1), &SignerKey::None).unwrap();
        let first = signed.encode().to_vec();
        let second = signed.encode().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn decode_caches_exact_input_bytes() {
        let signed = SignedTransaction::sign(sample_raw(), &SignerKey::Real(PRIV1), &SignerKey::Real(PRIV2)).unwrap();
        let bytes = signed.encode().to_vec();

        let decoded = SignedTransaction::decode(&bytes).unwrap();
        assert_eq!(decoded.encode(), bytes.as_slice());
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let signed = SignedTransaction::sign(sample_raw(), &SignerKey::Real(PRIV1), &SignerKey::Real(PRIV2)).unwrap();
        let mut bytes = signed.encode().to_vec();
        bytes.push(0xFF);
        assert!(matches!(SignedTransaction::decode(&bytes), Err(TxError::TrailingBytes(1))));
    }

    #[test]
    fn decode_rejects_non_list() {
        assert!(SignedTransaction::decode(&[0x80]).is_err());
    }
}
