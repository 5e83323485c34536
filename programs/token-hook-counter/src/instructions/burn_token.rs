use anchor_lang::prelude::*;
use anchor_spl::token_interface::{burn, Burn, Mint, TokenAccount, TokenInterface};

use crate::events::TokensBurned;
use crate::instructions::transfer_token::SpendableBalance;

#[derive(Accounts)]
pub struct BurnToken<'info> {
    #[account(mut)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, token::mint = mint)]
    pub token_account: InterfaceAccount<'info, TokenAccount>,

    /// Token account owner or approved delegate
    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<BurnToken>, amount: u64) -> Result<()> {
    SpendableBalance::from(&*ctx.accounts.token_account)
        .check_spend(&ctx.accounts.authority.key(), amount)?;

    msg!(
        "Burning {} tokens from account: {}",
        amount,
        ctx.accounts.token_account.key()
    );

    burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Burn {
                mint: ctx.accounts.mint.to_account_info(),
                from: ctx.accounts.token_account.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(TokensBurned {
        mint: ctx.accounts.mint.key(),
        from: ctx.accounts.token_account.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
