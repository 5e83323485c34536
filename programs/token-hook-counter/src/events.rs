use anchor_lang::prelude::*;

#[event]
pub struct CounterInitialized {
    pub counter: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted from the transfer hook, which runs without sysvar access.
#[event]
pub struct CounterIncremented {
    pub counter: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub count: u64,
}

#[event]
pub struct CounterReset {
    pub counter: Pubkey,
    pub authority: Pubkey,
    pub previous_count: u64,
    pub timestamp: i64,
}

#[event]
pub struct ExtraAccountMetaListInitialized {
    pub extra_account_meta_list: Pubkey,
    pub mint: Pubkey,
    pub counter: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct TokenInitialized {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub timestamp: i64,
}

#[event]
pub struct TokensMinted {
    pub mint: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokensTransferred {
    pub mint: Pubkey,
    pub from: Pubkey,
    pub to: Pubkey,
    pub authority: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct TokensBurned {
    pub mint: Pubkey,
    pub from: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct DelegateApproved {
    pub token_account: Pubkey,
    pub delegate: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
