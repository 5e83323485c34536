use anchor_lang::prelude::*;
use anchor_spl::{
    metadata::{
        create_metadata_accounts_v3, mpl_token_metadata::types::DataV2, CreateMetadataAccountsV3,
        Metadata,
    },
    token::{Mint, Token},
};

use crate::constants::*;
use crate::events::TokenInitialized;
use crate::state::InitTokenParams;

#[derive(Accounts)]
#[instruction(params: InitTokenParams)]
pub struct InitToken<'info> {
    /// CHECK: Metaplex metadata PDA, created and validated by the metadata program
    #[account(mut)]
    pub metadata: UncheckedAccount<'info>,

    /// Program mint, its own mint authority.
    /// Seeds: [b"mint"]
    #[account(
        init,
        seeds = [MINT_SEED],
        bump,
        payer = payer,
        mint::decimals = params.decimals,
        mint::authority = mint,
    )]
    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub rent: Sysvar<'info, Rent>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub token_metadata_program: Program<'info, Metadata>,
}

pub fn handler(ctx: Context<InitToken>, params: InitTokenParams) -> Result<()> {
    let signer_seeds: &[&[u8]] = &[MINT_SEED, &[ctx.bumps.mint]];

    let token_data = DataV2 {
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        uri: params.uri,
        seller_fee_basis_points: 0,
        creators: None,
        collection: None,
        uses: None,
    };

    create_metadata_accounts_v3(
        CpiContext::new_with_signer(
            ctx.accounts.token_metadata_program.to_account_info(),
            CreateMetadataAccountsV3 {
                metadata: ctx.accounts.metadata.to_account_info(),
                mint: ctx.accounts.mint.to_account_info(),
                mint_authority: ctx.accounts.mint.to_account_info(),
                payer: ctx.accounts.payer.to_account_info(),
                update_authority: ctx.accounts.mint.to_account_info(),
                system_program: ctx.accounts.system_program.to_account_info(),
                rent: ctx.accounts.rent.to_account_info(),
            },
            &[signer_seeds],
        ),
        token_data,
        false,
        true,
        None,
    )?;

    msg!("Token mint {} created", ctx.accounts.mint.key());

    emit!(TokenInitialized {
        mint: ctx.accounts.mint.key(),
        metadata: ctx.accounts.metadata.key(),
        name: params.name,
        symbol: params.symbol,
        decimals: params.decimals,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
