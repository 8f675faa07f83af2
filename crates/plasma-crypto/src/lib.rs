//! Crypto primitives for the Plasma MoreVP transaction core.
//!
//! This crate provides:
//! - Keccak-256 hashing
//! - secp256k1 ECDSA signing and signature recovery
//! - address derivation and the null-address/null-signature sentinels
//!
//! Every function here is a pure, synchronous total function (modulo the
//! enumerated [`error::CryptoError`] kinds): no I/O, no retained key
//! material past the call that was given it.

pub mod address;
pub mod error;
pub mod hash;
pub mod signer;

pub use address::{is_account_address, zero_address, Address, ZERO_ADDRESS};
pub use error::CryptoError;
pub use hash::keccak256;
pub use signer::{pubkey_to_address, recover, sign, SignerKey, NULL_SIGNATURE};
