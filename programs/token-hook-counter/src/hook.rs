//! Transfer-hook `Execute` handler.
//!
//! Token-2022 CPIs here during every `transfer_checked` on a mint whose
//! transfer-hook extension names this program. There is no signer on this
//! path, so every account is validated before the counter is touched, and the
//! counter is written last: any error aborts the whole transfer.
//!
//! Accounts:
//!   0. `[]`         source token account
//!   1. `[]`         mint
//!   2. `[]`         destination token account
//!   3. `[]`         source owner or delegate
//!   4. `[]`         extra-account-metas registry
//!   5. `[writable]` counter
//!   6. `[]`         this program

use anchor_lang::prelude::*;
use anchor_lang::solana_program::account_info::next_account_info;
use spl_tlv_account_resolution::state::ExtraAccountMetaList;
use spl_token_2022::{
    extension::{transfer_hook::TransferHookAccount, BaseStateWithExtensions, StateWithExtensions},
    state::Account as TokenAccountState,
};
use spl_transfer_hook_interface::instruction::{ExecuteInstruction, TransferHookInstruction};

use crate::constants::*;
use crate::error::TokenHookError;
use crate::events::CounterIncremented;
use crate::pda::{find_counter_address, find_extra_account_metas_address};
use crate::registry::{mint_transfer_hook_program_id, read_extra_account_metas};
use crate::state::Counter;

/// Only Token-2022 raises `transferring` on both token accounts, and only
/// for the duration of the transfer that invokes the hook. Returns the mint
/// the token account belongs to.
fn transferring_account_mint(account_info: &AccountInfo) -> Result<Pubkey> {
    require_keys_eq!(
        *account_info.owner,
        spl_token_2022::id(),
        TokenHookError::UnauthorizedCaller
    );
    let account_data = account_info.try_borrow_data()?;
    let token_account = StateWithExtensions::<TokenAccountState>::unpack(&account_data)
        .map_err(|_| error!(TokenHookError::UnauthorizedCaller))?;
    let extension = token_account
        .get_extension::<TransferHookAccount>()
        .map_err(|_| error!(TokenHookError::UnauthorizedCaller))?;
    require!(
        bool::from(extension.transferring),
        TokenHookError::UnauthorizedCaller
    );
    Ok(token_account.base.mint)
}

fn check_mint_scope(
    program_id: &Pubkey,
    mint_info: &AccountInfo,
    source_mint: &Pubkey,
    destination_mint: &Pubkey,
) -> Result<()> {
    let hook_program_id = mint_transfer_hook_program_id(mint_info)
        .map_err(|_| error!(TokenHookError::UnauthorizedMint))?;
    require!(
        hook_program_id == Some(*program_id),
        TokenHookError::UnauthorizedMint
    );
    require_keys_eq!(*source_mint, *mint_info.key, TokenHookError::UnauthorizedMint);
    require_keys_eq!(*destination_mint, *mint_info.key, TokenHookError::UnauthorizedMint);
    Ok(())
}

fn check_extra_accounts(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    mint_info: &AccountInfo,
    extra_account_metas_info: &AccountInfo,
    amount: u64,
) -> Result<()> {
    let (expected_address, _) = find_extra_account_metas_address(mint_info.key, program_id)?;
    require_keys_eq!(
        *extra_account_metas_info.key,
        expected_address,
        TokenHookError::ExtraAccountMismatch
    );
    require_keys_eq!(
        *extra_account_metas_info.owner,
        *program_id,
        TokenHookError::ExtraAccountMismatch
    );

    let data = extra_account_metas_info.try_borrow_data()?;
    let declared = read_extra_account_metas(&data)
        .map_err(|_| error!(TokenHookError::ExtraAccountMismatch))?;
    require_eq!(
        accounts.len(),
        EXECUTE_BASE_ACCOUNT_COUNT + declared.len(),
        TokenHookError::ExtraAccountMismatch
    );

    ExtraAccountMetaList::check_account_infos::<ExecuteInstruction>(
        accounts,
        &TransferHookInstruction::Execute { amount }.pack(),
        program_id,
        &data,
    )
    .map_err(|_| error!(TokenHookError::ExtraAccountMismatch))?;

    Ok(())
}

fn load_counter(program_id: &Pubkey, counter_info: &AccountInfo) -> Result<Counter> {
    require_keys_eq!(
        *counter_info.owner,
        *program_id,
        TokenHookError::CounterUninitialized
    );
    let counter = {
        let data = counter_info.try_borrow_data()?;
        Counter::try_deserialize(&mut &data[..])
            .map_err(|_| error!(TokenHookError::CounterUninitialized))?
    };
    require!(counter.is_initialized(), TokenHookError::CounterUninitialized);

    let (expected_address, _) = find_counter_address(&counter.authority, program_id)?;
    require_keys_eq!(
        *counter_info.key,
        expected_address,
        TokenHookError::ExtraAccountMismatch
    );
    Ok(counter)
}

pub fn process_execute(program_id: &Pubkey, accounts: &[AccountInfo], amount: u64) -> Result<()> {
    let account_info_iter = &mut accounts.iter();

    let source_account_info = next_account_info(account_info_iter)?;
    let mint_info = next_account_info(account_info_iter)?;
    let destination_account_info = next_account_info(account_info_iter)?;
    let _owner_info = next_account_info(account_info_iter)?;
    let extra_account_metas_info = next_account_info(account_info_iter)?;
    let counter_info = next_account_info(account_info_iter)?;

    let source_mint = transferring_account_mint(source_account_info)?;
    let destination_mint = transferring_account_mint(destination_account_info)?;

    check_mint_scope(program_id, mint_info, &source_mint, &destination_mint)?;
    check_extra_accounts(program_id, accounts, mint_info, extra_account_metas_info, amount)?;

    let mut counter = load_counter(program_id, counter_info)?;
    let count = counter.increment()?;
    {
        let mut data = counter_info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        counter.try_serialize(&mut writer)?;
    }

    msg!(
        "Transfer hook: {} tokens of mint {}, count {}",
        amount,
        mint_info.key,
        count
    );

    emit!(CounterIncremented {
        counter: *counter_info.key,
        mint: *mint_info.key,
        amount,
        count,
    });

    Ok(())
}
