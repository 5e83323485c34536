use anchor_lang::prelude::*;
use spl_transfer_hook_interface::instruction::TransferHookInstruction;

pub mod constants;
pub mod error;
pub mod events;
pub mod hook;
pub mod instructions;
pub mod pda;
pub mod registry;
pub mod state;

#[cfg(not(target_os = "solana"))]
pub mod client;

use instructions::*;
use state::InitTokenParams;

declare_id!("AmiFfJYhEshbK6KFHVedDyBdBQeeoVaT4ea3HB7jAoca");

#[program]
pub mod token_hook_counter {
    use super::*;

    // === Counter ===

    pub fn initialize(ctx: Context<InitializeCounter>) -> Result<()> {
        instructions::counter::initialize_handler(ctx)
    }

    pub fn reset_counter(ctx: Context<ResetCounter>) -> Result<()> {
        instructions::counter::reset_handler(ctx)
    }

    pub fn get_count(ctx: Context<GetCount>) -> Result<u64> {
        instructions::counter::get_count_handler(ctx)
    }

    // === Transfer Hook ===

    /// Create the registry Token-2022 reads on every checked transfer of
    /// `mint` to learn which accounts to forward to `Execute`.
    pub fn initialize_extra_account_meta_list(
        ctx: Context<InitializeExtraAccountMetaList>,
        bump: u8,
    ) -> Result<()> {
        instructions::extra_account_metas::handler(ctx, bump)
    }

    // === Token Facade ===

    pub fn init_token(ctx: Context<InitToken>, metadata: InitTokenParams) -> Result<()> {
        instructions::init_token::handler(ctx, metadata)
    }

    pub fn mint_token(ctx: Context<MintToken>) -> Result<()> {
        instructions::mint_token::handler(ctx)
    }

    pub fn transfer_token<'info>(
        ctx: Context<'_, '_, '_, 'info, TransferToken<'info>>,
    ) -> Result<()> {
        instructions::transfer_token::handler(ctx)
    }

    pub fn burn_token(ctx: Context<BurnToken>, amount: u64) -> Result<()> {
        instructions::burn_token::handler(ctx, amount)
    }

    pub fn approve_delegate(ctx: Context<ApproveDelegate>, amount: u64) -> Result<()> {
        instructions::approve_delegate::handler(ctx, amount)
    }

    pub fn get_balance(ctx: Context<GetBalance>) -> Result<u64> {
        instructions::get_balance::handler(ctx)
    }

    /// Fallback instruction handler: catches the SPL Transfer Hook `Execute`
    /// instruction that Token-2022 CPIs on every checked transfer.
    ///
    /// Discriminator: [105, 37, 101, 197, 75, 251, 102, 26]
    pub fn fallback<'info>(
        program_id: &Pubkey,
        accounts: &'info [AccountInfo<'info>],
        data: &[u8],
    ) -> Result<()> {
        match TransferHookInstruction::unpack(data)? {
            TransferHookInstruction::Execute { amount } => {
                hook::process_execute(program_id, accounts, amount)
            }
            _ => Err(ProgramError::InvalidInstructionData.into()),
        }
    }
}
