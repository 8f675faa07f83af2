//! The Plasma MoreVP transaction core: the canonical data model, its
//! deterministic RLP encoding and hashing, and signed-transaction
//! construction/recovery.
//!
//! Block assembly, the operator's RPC surface, on-chain contracts, and the
//! watcher are external collaborators; this crate only fixes the wire
//! format and the pure functions over it.

pub mod error;
pub mod raw;
mod rlp;
pub mod signed;

pub use error::TxError;
pub use raw::{Input, Output, RawTransaction, CHILD_BLOCK_INTERVAL, MAX_INPUTS, MAX_OUTPUTS, NULL_INPUT, NULL_OUTPUT};
pub use signed::SignedTransaction;
