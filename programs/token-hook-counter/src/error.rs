use anchor_lang::prelude::*;

#[error_code]
pub enum TokenHookError {
    #[msg("Account is already initialized")]
    AlreadyInitialized,

    #[msg("Bump does not reproduce the derived address")]
    InvalidBump,

    #[msg("Mint does not name this program as its transfer hook")]
    MintNotHookEnabled,

    #[msg("Signer is not the mint authority")]
    MintAuthorityMismatch,

    #[msg("Extra accounts do not match the registered list")]
    ExtraAccountMismatch,

    #[msg("Mint is not handled by this transfer hook")]
    UnauthorizedMint,

    #[msg("Transfer hook invoked outside of a Token-2022 transfer")]
    UnauthorizedCaller,

    #[msg("Counter account is not initialized")]
    CounterUninitialized,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("No valid bump found for the seeds")]
    AddressExhausted,

    // Token facade
    #[msg("Insufficient token balance")]
    InsufficientBalance,

    #[msg("Amount exceeds the delegated approval")]
    InsufficientApproval,
}
