use anchor_lang::prelude::*;

use crate::error::TokenHookError;
use crate::events::{CounterInitialized, CounterReset};
use crate::state::*;

// ── Initialize ──────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct InitializeCounter<'info> {
    /// `init_if_needed` so a repeat call reaches the handler and fails with
    /// `AlreadyInitialized` instead of a system-program error.
    #[account(
        init_if_needed,
        payer = authority,
        space = Counter::LEN,
        seeds = [authority.key().as_ref()],
        bump,
    )]
    pub counter: Account<'info, Counter>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(ctx: Context<InitializeCounter>) -> Result<()> {
    let counter = &mut ctx.accounts.counter;
    require!(!counter.is_initialized(), TokenHookError::AlreadyInitialized);

    counter.authority = ctx.accounts.authority.key();
    counter.count = 0;
    counter.bump = ctx.bumps.counter;

    msg!("Counter {} initialized for {}", counter.key(), counter.authority);

    emit!(CounterInitialized {
        counter: counter.key(),
        authority: counter.authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

// ── Reset ───────────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct ResetCounter<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [authority.key().as_ref()],
        bump = counter.bump,
        has_one = authority,
    )]
    pub counter: Account<'info, Counter>,
}

pub fn reset_handler(ctx: Context<ResetCounter>) -> Result<()> {
    let counter = &mut ctx.accounts.counter;
    let previous_count = counter.count;
    counter.count = 0;

    msg!("Counter {} reset from {}", counter.key(), previous_count);

    emit!(CounterReset {
        counter: counter.key(),
        authority: ctx.accounts.authority.key(),
        previous_count,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

// ── Read ────────────────────────────────────────────────────────────

#[derive(Accounts)]
pub struct GetCount<'info> {
    #[account(
        seeds = [counter.authority.as_ref()],
        bump = counter.bump,
    )]
    pub counter: Account<'info, Counter>,
}

pub fn get_count_handler(ctx: Context<GetCount>) -> Result<u64> {
    let count = ctx.accounts.counter.count;
    msg!("Counter {}: {}", ctx.accounts.counter.key(), count);
    Ok(count)
}
