use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};
use anchor_lang::system_program::{self, Transfer};
use spl_transfer_hook_interface::collect_extra_account_metas_signer_seeds;

use crate::constants::*;
use crate::error::TokenHookError;
use crate::events::ExtraAccountMetaListInitialized;
use crate::pda::verify_bump;
use crate::registry::{
    mint_authority, mint_transfer_hook_program_id, registry_size, write_extra_account_metas,
};
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeExtraAccountMetaList<'info> {
    /// CHECK: Registry PDA, allocated by this instruction. Address and bump are
    /// verified in the handler so a bad bump reports `InvalidBump`.
    /// Seeds: [b"extra-account-metas", mint.key().as_ref()]
    #[account(mut)]
    pub extra_account: AccountInfo<'info>,

    /// The counter every hooked transfer of this mint will increment
    #[account(
        seeds = [authority.key().as_ref()],
        bump = counter.bump,
        has_one = authority,
    )]
    pub counter: Account<'info, Counter>,

    /// CHECK: Token-2022 mint; transfer-hook extension and authority checked in the handler
    pub mint: AccountInfo<'info>,

    /// Mint authority; funds the registry's rent
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeExtraAccountMetaList>, bump: u8) -> Result<()> {
    let mint_key = ctx.accounts.mint.key();
    let registry = &ctx.accounts.extra_account;

    // ── 1. Validate ────────────────────────────────────────────────────
    verify_bump(
        &[EXTRA_ACCOUNT_METAS_SEED, mint_key.as_ref()],
        bump,
        registry.key,
        ctx.program_id,
    )?;

    let hook_program_id = mint_transfer_hook_program_id(&ctx.accounts.mint)
        .map_err(|_| error!(TokenHookError::MintNotHookEnabled))?;
    require!(
        hook_program_id == Some(*ctx.program_id),
        TokenHookError::MintNotHookEnabled
    );
    require!(
        mint_authority(&ctx.accounts.mint)? == Some(ctx.accounts.authority.key()),
        TokenHookError::MintAuthorityMismatch
    );

    require!(
        registry.data_is_empty() && *registry.owner == system_program::ID,
        TokenHookError::AlreadyInitialized
    );

    // ── 2. Fund rent shortfall (the account may be pre-funded) ─────────
    let account_size = registry_size()?;
    let required_lamports = Rent::get()?.minimum_balance(account_size);
    let shortfall = required_lamports.saturating_sub(registry.lamports());
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.authority.to_account_info(),
                    to: registry.to_account_info(),
                },
            ),
            shortfall,
        )?;
    }

    // ── 3. Allocate + assign under the PDA seeds ───────────────────────
    let bump_seed = [bump];
    let signer_seeds = collect_extra_account_metas_signer_seeds(&mint_key, &bump_seed);
    invoke_signed(
        &system_instruction::allocate(registry.key, account_size as u64),
        &[registry.clone()],
        &[&signer_seeds],
    )?;
    invoke_signed(
        &system_instruction::assign(registry.key, ctx.program_id),
        &[registry.clone()],
        &[&signer_seeds],
    )?;

    // ── 4. Write the fixed list ────────────────────────────────────────
    {
        let mut data = registry.try_borrow_mut_data()?;
        write_extra_account_metas(&mut data, &ctx.accounts.counter.key(), ctx.program_id)?;
    }

    msg!(
        "Extra account meta list {} initialized for mint {}",
        registry.key,
        mint_key
    );

    emit!(ExtraAccountMetaListInitialized {
        extra_account_meta_list: registry.key(),
        mint: mint_key,
        counter: ctx.accounts.counter.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
