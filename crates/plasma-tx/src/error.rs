use thiserror::Error;

/// Errors raised while constructing, encoding, decoding, or verifying a
/// transaction. This enum is exhaustive for the transaction core: every
/// variant below, and no others, is ever returned by `plasma-tx` or
/// `plasma-builder`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TxError {
    /// Builder was given more than two UTXOs.
    #[error("too many utxo: at most 2 are supported, got {0}")]
    TooManyUtxo(usize),

    /// Builder was given UTXOs spanning more than one currency.
    #[error("currency mixing not possible: cannot spend both {0:?} and {1:?} in one transaction")]
    CurrencyMixingNotPossible(
        plasma_crypto::Address,
        plasma_crypto::Address,
    ),

    /// An output amount would be negative (most commonly: insufficient
    /// funds once the fee is subtracted).
    #[error("amount would be negative: {0}")]
    AmountNegativeValue(String),

    /// The declared fee is negative.
    #[error("fee is negative: {0}")]
    FeeNegativeValue(String),

    /// The input bytes are not well-formed RLP.
    #[error("malformed rlp: {0}")]
    MalformedRlp(String),

    /// A decoded list does not have the arity the wire format fixes.
    #[error("bad arity: expected {expected} items, got {got}")]
    BadArity { expected: usize, got: usize },

    /// Decoding consumed fewer bytes than were supplied.
    #[error("trailing bytes after decoding: {0} byte(s) left over")]
    TrailingBytes(usize),

    /// The decoded shape is valid RLP but violates a field-type or
    /// fixed-length rule (e.g. an address that isn't exactly 20 bytes).
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),

    /// ECDSA recovery failed, or a signature field was not 65 bytes.
    #[error("signature corrupt: {0}")]
    SignatureCorrupt(String),

    /// A non-padding input carries a null signature, or a padding input
    /// carries a non-null one.
    #[error("input missing for signature at slot {0}")]
    InputMissingForSignature(u8),
}

impl From<plasma_crypto::CryptoError> for TxError {
    fn from(err: plasma_crypto::CryptoError) -> Self {
        match err {
            plasma_crypto::CryptoError::InvalidPrivateKey(msg) => {
                TxError::SignatureCorrupt(format!("invalid private key: {msg}"))
            }
            plasma_crypto::CryptoError::SignatureCorrupt(msg) => TxError::SignatureCorrupt(msg),
        }
    }
}
