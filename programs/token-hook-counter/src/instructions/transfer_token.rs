use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use spl_token_2022::onchain::invoke_transfer_checked;

use crate::constants::*;
use crate::error::TokenHookError;
use crate::events::TokensTransferred;

/// What an authority may move out of a token account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpendableBalance {
    pub owner: Pubkey,
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
}

impl From<&TokenAccount> for SpendableBalance {
    fn from(account: &TokenAccount) -> Self {
        Self {
            owner: account.owner,
            amount: account.amount,
            delegate: account.delegate.into(),
            delegated_amount: account.delegated_amount,
        }
    }
}

impl SpendableBalance {
    /// The owner may spend up to the balance; a delegate up to the smaller of
    /// the balance and its remaining approval. Anyone else has no approval.
    pub fn check_spend(&self, authority: &Pubkey, amount: u64) -> Result<()> {
        if *authority != self.owner {
            require!(
                self.delegate == Some(*authority) && amount <= self.delegated_amount,
                TokenHookError::InsufficientApproval
            );
        }
        require!(amount <= self.amount, TokenHookError::InsufficientBalance);
        Ok(())
    }
}

#[derive(Accounts)]
pub struct TransferToken<'info> {
    #[account(mut, token::mint = mint)]
    pub from: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, token::mint = mint)]
    pub to: InterfaceAccount<'info, TokenAccount>,

    /// Owner of `from`, or its approved delegate
    pub from_authority: Signer<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    // remaining_accounts: extra accounts required by a third-party transfer
    // hook on `mint`, resolved by the token program from its registry
}

pub fn handler<'info>(ctx: Context<'_, '_, '_, 'info, TransferToken<'info>>) -> Result<()> {
    let amount = TRANSFER_TOKEN_AMOUNT;
    let authority = ctx.accounts.from_authority.key();

    SpendableBalance::from(&*ctx.accounts.from).check_spend(&authority, amount)?;

    msg!(
        "Transferring {} tokens from account: {} to account: {}",
        amount,
        ctx.accounts.from.key(),
        ctx.accounts.to.key()
    );
    msg!("Transfer authority: {}", authority);

    invoke_transfer_checked(
        &ctx.accounts.token_program.key(),
        ctx.accounts.from.to_account_info(),
        ctx.accounts.mint.to_account_info(),
        ctx.accounts.to.to_account_info(),
        ctx.accounts.from_authority.to_account_info(),
        ctx.remaining_accounts,
        amount,
        ctx.accounts.mint.decimals,
        &[],
    )?;

    emit!(TokensTransferred {
        mint: ctx.accounts.mint.key(),
        from: ctx.accounts.from.key(),
        to: ctx.accounts.to.key(),
        authority,
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
