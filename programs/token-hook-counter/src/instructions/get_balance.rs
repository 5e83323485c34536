use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

#[derive(Accounts)]
pub struct GetBalance<'info> {
    pub token_account: InterfaceAccount<'info, TokenAccount>,
}

pub fn handler(ctx: Context<GetBalance>) -> Result<u64> {
    let balance = ctx.accounts.token_account.amount;
    msg!("Account balance: {} tokens", balance);
    Ok(balance)
}
