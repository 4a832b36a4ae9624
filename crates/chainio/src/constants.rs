/// The fixed fee, in stroops, attached to every transaction envelope.
///
/// # Note
///
/// This only covers the classic base charge; `prepareTransaction` refreshes
/// the resource portion of the fee before submission.
pub const BASE_FEE: u64 = 100;

/// How long an envelope stays valid after construction, in seconds.
pub const TX_VALIDITY_WINDOW_SECS: u64 = 30;
