//! Error taxonomy for the client library.
use solana_client::client_error::ClientError;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type ClobResult<T = ()> = Result<T, ClobError>;

/// Everything that can go wrong between raw account bytes and a typed record,
/// or between a built instruction and its confirmation.
///
/// Decode-time variants are recoverable: batch queries skip the offending
/// account and continue, since the program's address space legitimately
/// contains unrelated accounts. [`ClobError::NoValidBumpFound`] and
/// [`ClobError::Ledger`] are surfaced to the caller immediately.
#[derive(Debug, Error)]
pub enum ClobError {
    /// The buffer's leading 8 bytes are not the expected record discriminator.
    #[error("account data does not start with the expected discriminator")]
    DiscriminatorMismatch,
    /// The buffer is shorter than the record's fixed encoded length.
    #[error("account data too short: expected {expected} bytes, found {actual}")]
    BufferTooShort {
        /// The record's fixed encoded length
        expected: usize,
        /// The length of the buffer that was handed in
        actual: usize,
    },
    /// An enum tag byte is outside the closed set of variants.
    #[error("unrecognized {0} tag: {1}")]
    InvalidEnumTag(&'static str, u8),
    /// An order record claims more filled than its total quantity.
    #[error("order filled quantity {filled} exceeds total quantity {quantity}")]
    InvalidFillQuantity {
        /// The order's total quantity
        quantity: u64,
        /// The filled quantity recorded in the account
        filled: u64,
    },
    /// The bump search space was exhausted without producing an off-curve
    /// address. This is a fatal configuration error and is never retried.
    #[error("no valid bump seed found for the provided derivation seeds")]
    NoValidBumpFound,
    /// A market account decoded cleanly but records a different market id
    /// than the one its address was derived from.
    #[error("market account holds market id {actual}, expected {expected}")]
    MarketIdMismatch {
        /// The id the address was derived from
        expected: u64,
        /// The id recorded in the account
        actual: u64,
    },
    /// The ledger client failed a fetch or rejected a submission. Reported
    /// verbatim; retry policy, if any, belongs to the ledger client.
    #[error("ledger client error: {0}")]
    Ledger(#[from] ClientError),
}
