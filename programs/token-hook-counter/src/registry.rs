//! Extra-account-metas registry.
//!
//! Token-2022 reads this account on every checked transfer of a hooked mint to
//! learn which accounts it must forward to `Execute`. The list is fixed at
//! [`EXTRA_ACCOUNT_META_COUNT`] entries and the account is sized exactly to it.

use anchor_lang::prelude::*;
use spl_tlv_account_resolution::{account::ExtraAccountMeta, state::ExtraAccountMetaList};
use spl_token_2022::{
    extension::{transfer_hook, StateWithExtensions},
    state::Mint as MintState,
};
use spl_transfer_hook_interface::instruction::ExecuteInstruction;
use spl_type_length_value::state::TlvStateBorrowed;

use crate::constants::*;

/// Where a registered account's address comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptorAddress {
    Fixed(Pubkey),
    /// Resolved by the token runtime at transfer time from seeds or account
    /// data; `discriminator` is the raw `ExtraAccountMeta` tag.
    Derived { discriminator: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtraAccountDescriptor {
    pub address: DescriptorAddress,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl From<&ExtraAccountMeta> for ExtraAccountDescriptor {
    fn from(meta: &ExtraAccountMeta) -> Self {
        let address = match meta.discriminator {
            0 => DescriptorAddress::Fixed(Pubkey::new_from_array(meta.address_config)),
            discriminator => DescriptorAddress::Derived { discriminator },
        };
        Self {
            address,
            is_signer: bool::from(meta.is_signer),
            is_writable: bool::from(meta.is_writable),
        }
    }
}

/// The registered list, in the order Token-2022 appends it:
///   0. `[writable]` counter
///   1. `[]`         this program
pub fn extra_account_metas(
    counter: &Pubkey,
    program_id: &Pubkey,
) -> Result<[ExtraAccountMeta; EXTRA_ACCOUNT_META_COUNT]> {
    Ok([
        ExtraAccountMeta::new_with_pubkey(counter, false, true)?,
        ExtraAccountMeta::new_with_pubkey(program_id, false, false)?,
    ])
}

pub fn registry_size() -> Result<usize> {
    Ok(ExtraAccountMetaList::size_of(EXTRA_ACCOUNT_META_COUNT)?)
}

pub fn write_extra_account_metas(
    data: &mut [u8],
    counter: &Pubkey,
    program_id: &Pubkey,
) -> Result<()> {
    let metas = extra_account_metas(counter, program_id)?;
    ExtraAccountMetaList::init::<ExecuteInstruction>(data, &metas)?;
    Ok(())
}

pub fn read_extra_account_metas(data: &[u8]) -> Result<Vec<ExtraAccountDescriptor>> {
    let tlv_state = TlvStateBorrowed::unpack(data)?;
    let metas = ExtraAccountMetaList::unpack_with_tlv_state::<ExecuteInstruction>(&tlv_state)?;
    Ok(metas.data().iter().map(ExtraAccountDescriptor::from).collect())
}

/// Transfer-hook program named by a Token-2022 mint, if any.
/// Mints owned by any other program never carry the extension.
pub fn mint_transfer_hook_program_id(mint_info: &AccountInfo) -> Result<Option<Pubkey>> {
    if *mint_info.owner != spl_token_2022::id() {
        return Ok(None);
    }
    let mint_data = mint_info.try_borrow_data()?;
    let mint = StateWithExtensions::<MintState>::unpack(&mint_data)?;
    Ok(transfer_hook::get_program_id(&mint))
}

pub fn mint_authority(mint_info: &AccountInfo) -> Result<Option<Pubkey>> {
    let mint_data = mint_info.try_borrow_data()?;
    let mint = StateWithExtensions::<MintState>::unpack(&mint_data)?;
    Ok(mint.base.mint_authority.into())
}
