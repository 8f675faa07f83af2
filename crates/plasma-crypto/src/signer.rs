use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::address::Address;
use crate::error::CryptoError;
use crate::hash::keccak256;

/// The all-zero 65-byte signature, used for input slots that do not require
/// a signature (padding inputs, or the unused slot of a single-input
/// transaction).
pub const NULL_SIGNATURE: [u8; 65] = [0u8; 65];

/// A per-call signing credential.
///
/// This replaces the "empty byte string means don't sign" overload with a
/// type-level tag: the [`SignerKey::None`] arm is the only path that can
/// ever produce [`NULL_SIGNATURE`], so the null-signature law holds by
/// construction rather than by convention.
#[derive(Clone)]
pub enum SignerKey {
    /// Sign with this secp256k1 private key scalar.
    Real([u8; 32]),
    /// Do not sign; the caller has no key for this input slot.
    None,
}

impl Drop for SignerKey {
    fn drop(&mut self) {
        if let SignerKey::Real(bytes) = self {
            bytes.zeroize();
        }
    }
}

/// Signs `msg_hash` under `key`.
///
/// `SignerKey::None` returns [`NULL_SIGNATURE`] without invoking ECDSA at
/// all, encoding "this input slot has no signer" (spec edge case in §4.1).
pub fn sign(msg_hash: &[u8; 32], key: &SignerKey) -> Result<[u8; 65], CryptoError> {
    let priv_bytes = match key {
        SignerKey::None => return Ok(NULL_SIGNATURE),
        SignerKey::Real(bytes) => *bytes,
    };

    let mut key_bytes = priv_bytes;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
    key_bytes.zeroize();

    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(msg_hash)
        .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;

    let mut sig = [0u8; 65];
    sig[0..32].copy_from_slice(&signature.r().to_bytes());
    sig[32..64].copy_from_slice(&signature.s().to_bytes());
    sig[64] = recovery_id.is_y_odd() as u8 + 27;
    Ok(sig)
}

/// Recovers the 20-byte address that produced `sig` over `msg_hash`.
///
/// `sig` must not be [`NULL_SIGNATURE`] — callers are expected to branch on
/// the null-signature/padding-input rule before calling this (see
/// `plasma-tx`'s `recover_spenders`).
pub fn recover(msg_hash: &[u8; 32], sig: &[u8; 65]) -> Result<Address, CryptoError> {
    let v = sig[64];
    if v != 27 && v != 28 {
        return Err(CryptoError::SignatureCorrupt(format!(
            "recovery byte must be 27 or 28, got {v}"
        )));
    }

    let mut signature = Signature::from_slice(&sig[0..64])
        .map_err(|e| CryptoError::SignatureCorrupt(e.to_string()))?;
    let mut recid_byte = v - 27;

    // Normalize to low-s and flip the recovery id if normalization changed
    // the signature, matching how every secp256k1 recovery implementation in
    // the wild treats malleable signatures.
    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
        recid_byte ^= 1;
    }

    let recid = RecoveryId::from_byte(recid_byte)
        .ok_or_else(|| CryptoError::SignatureCorrupt("invalid recovery id".into()))?;

    let verifying_key = VerifyingKey::recover_from_prehash(msg_hash, &signature, recid)
        .map_err(|e| CryptoError::SignatureCorrupt(e.to_string()))?;

    Ok(pubkey_to_address(&verifying_key))
}

/// Derives the 20-byte address for a recovered/derived public key.
///
/// The address is the last 20 bytes of `keccak256` of the 64-byte
/// uncompressed public key (the 0x04 prefix byte is stripped first).
pub fn pubkey_to_address(verifying_key: &VerifyingKey) -> Address {
    let uncompressed = verifying_key.to_encoded_point(false);
    let hash = keccak256(&uncompressed.as_bytes()[1..]);
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&hash[12..]);
    addr
}
