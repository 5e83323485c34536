/// PDA seeds
pub const MINT_SEED: &[u8] = b"mint";
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

/// Number of extra accounts every hooked transfer must carry:
/// the counter and this program.
pub const EXTRA_ACCOUNT_META_COUNT: usize = 2;

/// Accounts Token-2022 passes ahead of the extra accounts on `Execute`:
/// source, mint, destination, owner, extra-account-metas.
pub const EXECUTE_BASE_ACCOUNT_COUNT: usize = 5;

/// Fixed facade amounts, in base units
pub const MINT_TOKEN_AMOUNT: u64 = 10;
pub const TRANSFER_TOKEN_AMOUNT: u64 = 5;
