//! Assembles a [`plasma_tx::RawTransaction`] from a set of available UTXOs
//! and a receiver intent.
//!
//! The builder is the one place the transaction core reasons about UTXOs as
//! a set rather than as opaque input-reference triples; everything
//! downstream of it (signing, encoding, decoding) only ever sees the fixed
//! 2-in/2-out [`plasma_tx::RawTransaction`] shape.

use plasma_crypto::Address;
use plasma_tx::{Input, Output, RawTransaction, TxError};

/// An unspent output available to spend: its on-chain coordinate plus the
/// value and currency stored there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utxo {
    pub blknum: u64,
    pub txindex: u32,
    pub oindex: u8,
    pub amount: u128,
    pub currency: Address,
}

/// The receiver's intent: pay `amount` to `address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receiver {
    pub address: Address,
    pub amount: u128,
}

/// The maximum number of UTXOs the builder accepts in one call, fixed by
/// the wire format's 2-input arity.
pub const MAX_UTXO: usize = plasma_tx::MAX_INPUTS;

/// Builds a raw transaction that spends `utxos`, pays `receiver`, returns
/// change to `change_address`, and declares `fee`.
///
/// Steps:
/// 1. reject more than [`MAX_UTXO`] UTXOs (`too_many_utxo`);
/// 2. reject UTXOs spanning more than one currency (`currency_mixing_not_possible`);
/// 3. map UTXOs positionally onto the two input slots;
/// 4. sum the UTXO amounts;
/// 5. pay the receiver from slot 1, return `total - receiver.amount - fee`
///    as change in slot 2;
/// 6. validate the result, surfacing insufficient funds (including the fee)
///    as `amount_negative_value`.
///
/// An empty `utxos` slice is accepted here only in the sense that it is not
/// itself rejected by step 1 or 2; the resulting transaction has no funds to
/// spend and will fail `validate` unless `receiver.amount` and `fee` are
/// both zero. Building with zero UTXOs is the lower-level
/// [`RawTransaction::new`] constructor's job, not this builder's; callers
/// assembling a transaction from real UTXOs always supply at least one.
pub fn create_from_utxos(
    utxos: &[Utxo],
    receiver: Receiver,
    change_address: Address,
    fee: u128,
) -> Result<RawTransaction, TxError> {
    if utxos.len() > MAX_UTXO {
        return Err(TxError::TooManyUtxo(utxos.len()));
    }

    let currency = match utxos {
        [] => plasma_crypto::zero_address(),
        [first, rest @ ..] => {
            for utxo in rest {
                if utxo.currency != first.currency {
                    return Err(TxError::CurrencyMixingNotPossible(first.currency, utxo.currency));
                }
            }
            first.currency
        }
    };

    let inputs: Vec<Input> = utxos
        .iter()
        .map(|u| Input::new(u.blknum, u.txindex, u.oindex))
        .collect();

    let total: u128 = utxos.iter().map(|u| u.amount).sum();

    let amount1 = receiver.amount;
    // Signed intermediate arithmetic: this is the one place insufficient
    // funds (once the fee is subtracted) actually surfaces, so the
    // subtraction happens before the result is forced back into the
    // non-negative wire representation.
    let amount2 = total as i128 - receiver.amount as i128 - fee as i128;

    let outputs = [Output::new(receiver.address, amount1 as i128), Output::new(change_address, amount2)];

    let raw = RawTransaction::new(&inputs, currency, &outputs, fee as i128);
    raw.validate()?;
    Ok(raw)
}
