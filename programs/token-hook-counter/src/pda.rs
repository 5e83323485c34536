//! Program-derived addresses owned by this program.
//!
//! Every derivation goes through [`Pubkey::try_find_program_address`] so a
//! seed set without an off-curve bump surfaces as
//! [`TokenHookError::AddressExhausted`] instead of a panic.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::TokenHookError;

fn find_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| error!(TokenHookError::AddressExhausted))
}

/// Counter PDA.
/// Seeds: [authority.key().as_ref()]
pub fn find_counter_address(authority: &Pubkey, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    find_address(&[authority.as_ref()], program_id)
}

/// Program mint PDA created by `init_token`.
/// Seeds: [b"mint"]
pub fn find_mint_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    find_address(&[MINT_SEED], program_id)
}

/// Extra-account-metas registry PDA. Same derivation Token-2022 uses to
/// locate the registry of a hooked mint.
/// Seeds: [b"extra-account-metas", mint.key().as_ref()]
pub fn find_extra_account_metas_address(
    mint: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    find_address(&[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()], program_id)
}

/// Checks a caller-supplied bump against the canonical derivation of `seeds`.
/// Non-canonical bumps are rejected even when they reproduce a valid address.
pub fn verify_bump(
    seeds: &[&[u8]],
    bump: u8,
    expected_address: &Pubkey,
    program_id: &Pubkey,
) -> Result<()> {
    let (address, canonical_bump) = find_address(seeds, program_id)?;
    require!(
        bump == canonical_bump && address == *expected_address,
        TokenHookError::InvalidBump
    );
    Ok(())
}
