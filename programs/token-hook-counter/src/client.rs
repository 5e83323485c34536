//! Off-chain instruction builders.
//!
//! A checked transfer of a mint hooked to this program has to go straight to
//! Token-2022: routing it through `transfer_token` would re-enter this
//! program from Token-2022, which the runtime forbids. The client resolves the
//! registry into the transfer's account list instead.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use spl_transfer_hook_interface::offchain::{
    add_extra_account_metas_for_execute, AccountDataResult, AccountFetchError,
};
use std::future::Future;

/// Builds a Token-2022 `transfer_checked` carrying every account the mint's
/// registry declares, followed by the hook program and the registry itself.
///
/// `fetch_account_data_fn` returns the data of an account by address. It is
/// queried for the registry and for any account a seed-derived entry reads.
#[allow(clippy::too_many_arguments)]
pub async fn transfer_checked_with_hook<F, Fut>(
    token_program_id: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    decimals: u8,
    hook_program_id: &Pubkey,
    fetch_account_data_fn: F,
) -> std::result::Result<Instruction, AccountFetchError>
where
    F: Fn(Pubkey) -> Fut,
    Fut: Future<Output = AccountDataResult>,
{
    let mut instruction = spl_token_2022::instruction::transfer_checked(
        token_program_id,
        source,
        mint,
        destination,
        owner,
        &[],
        amount,
        decimals,
    )?;

    add_extra_account_metas_for_execute(
        &mut instruction,
        hook_program_id,
        source,
        mint,
        destination,
        owner,
        amount,
        fetch_account_data_fn,
    )
    .await?;

    Ok(instruction)
}
