use thiserror::Error;

/// Errors raised by the crypto primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("signature is corrupt or recovery failed: {0}")]
    SignatureCorrupt(String),
}
