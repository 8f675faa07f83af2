//! Shared test fixtures for the Plasma transaction core: fixed signing keys,
//! derived addresses, and known-answer wire bytes, used by integration
//! tests across the workspace so they don't each hand-roll their own.

use plasma_crypto::{pubkey_to_address, Address, SignerKey};

/// A deterministic signing key, derived from `seed` padded into a 32-byte
/// scalar. Never zero, so it is always a valid [`SignerKey::Real`].
pub fn test_key(seed: u8) -> SignerKey {
    let mut bytes = [0u8; 32];
    bytes[31] = seed;
    SignerKey::Real(bytes)
}

/// The address [`test_key`] signs as, recomputed from the key's public
/// point rather than hardcoded, so it stays correct if the derivation
/// changes.
pub fn test_address(seed: u8) -> Address {
    let mut bytes = [0u8; 32];
    bytes[31] = seed;
    let signing_key = k256::ecdsa::SigningKey::from_bytes((&bytes).into()).expect("fixture seed is a valid scalar");
    pubkey_to_address(signing_key.verifying_key())
}

/// A fixed, non-zero address distinct from any [`test_address`], useful as
/// a recipient/change address that nothing signs for.
pub fn fixed_address(byte: u8) -> Address {
    let mut a = [0u8; 20];
    a[19] = byte;
    a
}

/// A fixed, non-zero "token" address distinct from the native currency
/// sentinel, for currency-mixing and non-native-currency test scenarios.
pub fn fixed_currency(byte: u8) -> Address {
    let mut a = [0u8; 20];
    a[0] = byte;
    a
}
