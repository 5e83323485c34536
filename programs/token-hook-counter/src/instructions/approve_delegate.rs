use anchor_lang::prelude::*;
use anchor_spl::token_interface::{approve, Approve, TokenAccount, TokenInterface};

use crate::events::DelegateApproved;

#[derive(Accounts)]
pub struct ApproveDelegate<'info> {
    #[account(mut, token::authority = authority)]
    pub token_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Any address may be approved as delegate
    pub delegate: UncheckedAccount<'info>,

    /// Token account owner
    pub authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Replaces any previous approval; the token program consumes it as the
/// delegate spends.
pub fn handler(ctx: Context<ApproveDelegate>, amount: u64) -> Result<()> {
    msg!(
        "Approving {} tokens for delegate: {}",
        amount,
        ctx.accounts.delegate.key()
    );

    approve(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Approve {
                to: ctx.accounts.token_account.to_account_info(),
                delegate: ctx.accounts.delegate.to_account_info(),
                authority: ctx.accounts.authority.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(DelegateApproved {
        token_account: ctx.accounts.token_account.key(),
        delegate: ctx.accounts.delegate.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
