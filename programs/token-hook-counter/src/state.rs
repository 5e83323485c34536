use anchor_lang::prelude::*;

use crate::error::TokenHookError;

/// Per-authority transfer counter.
/// Seeds: [authority.key().as_ref()]
#[account]
#[derive(Default, Debug)]
pub struct Counter {
    /// Authority whose key seeds this counter
    pub authority: Pubkey,
    /// Number of hooked transfers observed
    pub count: u64,
    /// PDA bump
    pub bump: u8,
}

impl Counter {
    pub const LEN: usize = 8   // discriminator
        + 32                    // authority
        + 8                     // count
        + 1;                    // bump

    /// A freshly allocated counter is all zeroes; initialization always
    /// records a signer as authority.
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    pub fn increment(&mut self) -> Result<u64> {
        self.count = self
            .count
            .checked_add(1)
            .ok_or(TokenHookError::ArithmeticOverflow)?;
        Ok(self.count)
    }
}

/// Token metadata passed to `init_token`.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone)]
pub struct InitTokenParams {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub decimals: u8,
}
