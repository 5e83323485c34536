//! `solana-program-test` harness shared by the instruction-level tests.
//!
//! This program and Token-2022 both run as native processors, so hooked
//! transfers go Token-2022 -> `Execute` in-process without a built `.so`.

#![allow(dead_code)]

use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use solana_program_test::{processor, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account_info::AccountInfo,
    entrypoint::ProgramResult,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program,
    transaction::{Transaction, TransactionError},
};
use spl_token_2022::{
    extension::{transfer_hook, ExtensionType, StateWithExtensions},
    state::{Account as TokenAccountState, Mint as MintState},
};
use spl_transfer_hook_interface::offchain::AccountFetchError;

use token_hook_counter::{
    accounts, client, error::TokenHookError, instruction,
    pda::{find_counter_address, find_extra_account_metas_address},
    state::Counter,
    ID,
};

pub const DECIMALS: u8 = 0;

/// Anchor's entry ties the account slice to the account lifetime, which the
/// native processor signature does not; the leak bridges the two for the
/// lifetime of the test process.
fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    token_hook_counter::entry(program_id, accounts, data)
}

pub fn program_test() -> ProgramTest {
    let mut program_test =
        ProgramTest::new("token_hook_counter", ID, processor!(process_instruction));
    program_test.prefer_bpf(false);
    program_test.add_program(
        "spl_token_2022",
        spl_token_2022::id(),
        processor!(spl_token_2022::processor::Processor::process),
    );
    program_test
}

pub async fn start() -> ProgramTestContext {
    program_test().start_with_context().await
}

// ============================================================================
// Transactions
// ============================================================================

/// Signs with the payer plus `signers` on a fresh blockhash, so repeating an
/// identical instruction is a new transaction.
pub async fn send(
    context: &mut ProgramTestContext,
    instructions: &[Instruction],
    signers: &[&Keypair],
) -> Result<(), TransactionError> {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let mut all_signers = vec![&context.payer];
    all_signers.extend_from_slice(signers);
    let transaction = Transaction::new_signed_with_payer(
        instructions,
        Some(&context.payer.pubkey()),
        &all_signers[..],
        blockhash,
    );
    context
        .banks_client
        .process_transaction(transaction)
        .await
        .map_err(|err| err.unwrap())
}

/// Runs a single read instruction and decodes its `u64` return data. The
/// runtime trims trailing zero bytes, so the value is re-padded.
pub async fn send_for_u64(context: &mut ProgramTestContext, instruction: Instruction) -> u64 {
    let blockhash = context.get_new_latest_blockhash().await.unwrap();
    let transaction = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&context.payer.pubkey()),
        &[&context.payer],
        blockhash,
    );
    let outcome = context
        .banks_client
        .process_transaction_with_metadata(transaction)
        .await
        .unwrap();
    outcome.result.unwrap();

    let data = outcome
        .metadata
        .and_then(|metadata| metadata.return_data)
        .map(|return_data| return_data.data)
        .unwrap_or_default();
    let mut bytes = [0u8; 8];
    bytes[..data.len()].copy_from_slice(&data);
    u64::from_le_bytes(bytes)
}

pub fn program_error(error: TokenHookError) -> TransactionError {
    TransactionError::InstructionError(0, InstructionError::Custom(error.into()))
}

pub async fn fund(context: &mut ProgramTestContext, recipient: &Pubkey, lamports: u64) {
    let payer = context.payer.pubkey();
    send(
        context,
        &[system_instruction::transfer(&payer, recipient, lamports)],
        &[],
    )
    .await
    .unwrap();
}

// ============================================================================
// Token-2022 accounts
// ============================================================================

/// Creates a Token-2022 mint. `hook_program_id` adds the transfer-hook
/// extension naming that program.
pub async fn create_mint(
    context: &mut ProgramTestContext,
    mint: &Keypair,
    mint_authority: &Pubkey,
    hook_program_id: Option<Pubkey>,
) {
    let extensions: &[ExtensionType] = if hook_program_id.is_some() {
        &[ExtensionType::TransferHook]
    } else {
        &[]
    };
    let space = ExtensionType::try_calculate_account_len::<MintState>(extensions).unwrap();
    let rent = context.banks_client.get_rent().await.unwrap();
    let payer = context.payer.pubkey();
    let token_program_id = spl_token_2022::id();

    let mut instructions = vec![system_instruction::create_account(
        &payer,
        &mint.pubkey(),
        rent.minimum_balance(space),
        space as u64,
        &token_program_id,
    )];
    if let Some(program_id) = hook_program_id {
        instructions.push(
            transfer_hook::instruction::initialize(
                &token_program_id,
                &mint.pubkey(),
                Some(*mint_authority),
                Some(program_id),
            )
            .unwrap(),
        );
    }
    instructions.push(
        spl_token_2022::instruction::initialize_mint2(
            &token_program_id,
            &mint.pubkey(),
            mint_authority,
            None,
            DECIMALS,
        )
        .unwrap(),
    );

    send(context, &instructions, &[mint]).await.unwrap();
}

pub async fn create_token_account(
    context: &mut ProgramTestContext,
    account: &Keypair,
    mint: &Pubkey,
    owner: &Pubkey,
    hooked: bool,
) {
    let extensions: &[ExtensionType] = if hooked {
        &[ExtensionType::TransferHookAccount]
    } else {
        &[]
    };
    let space = ExtensionType::try_calculate_account_len::<TokenAccountState>(extensions).unwrap();
    let rent = context.banks_client.get_rent().await.unwrap();
    let payer = context.payer.pubkey();
    let token_program_id = spl_token_2022::id();

    send(
        context,
        &[
            system_instruction::create_account(
                &payer,
                &account.pubkey(),
                rent.minimum_balance(space),
                space as u64,
                &token_program_id,
            ),
            spl_token_2022::instruction::initialize_account3(
                &token_program_id,
                &account.pubkey(),
                mint,
                owner,
            )
            .unwrap(),
        ],
        &[account],
    )
    .await
    .unwrap();
}

pub async fn token_balance(context: &mut ProgramTestContext, address: &Pubkey) -> u64 {
    let account = context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .unwrap();
    StateWithExtensions::<TokenAccountState>::unpack(&account.data)
        .unwrap()
        .base
        .amount
}

pub async fn mint_supply(context: &mut ProgramTestContext, mint: &Pubkey) -> u64 {
    let account = context
        .banks_client
        .get_account(*mint)
        .await
        .unwrap()
        .unwrap();
    StateWithExtensions::<MintState>::unpack(&account.data)
        .unwrap()
        .base
        .supply
}

pub async fn read_counter(context: &mut ProgramTestContext, address: &Pubkey) -> Counter {
    let account = context
        .banks_client
        .get_account(*address)
        .await
        .unwrap()
        .unwrap();
    Counter::try_deserialize(&mut account.data.as_slice()).unwrap()
}

/// Client-side `transfer_checked` with the registry resolved from the bank.
pub async fn hooked_transfer(
    context: &mut ProgramTestContext,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Instruction {
    let banks_client = context.banks_client.clone();
    client::transfer_checked_with_hook(
        &spl_token_2022::id(),
        source,
        mint,
        destination,
        owner,
        amount,
        DECIMALS,
        &ID,
        |address| {
            let mut banks_client = banks_client.clone();
            async move {
                banks_client
                    .get_account(address)
                    .await
                    .map(|account| account.map(|account| account.data))
                    .map_err(|err| -> AccountFetchError { err.to_string().into() })
            }
        },
    )
    .await
    .unwrap()
}

// ============================================================================
// Program instructions
// ============================================================================

pub fn initialize_counter(authority: &Pubkey) -> Instruction {
    let (counter, _) = find_counter_address(authority, &ID).unwrap();
    Instruction {
        program_id: ID,
        accounts: accounts::InitializeCounter {
            counter,
            authority: *authority,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::Initialize {}.data(),
    }
}

pub fn reset_counter(authority: &Pubkey) -> Instruction {
    let (counter, _) = find_counter_address(authority, &ID).unwrap();
    Instruction {
        program_id: ID,
        accounts: accounts::ResetCounter {
            authority: *authority,
            counter,
        }
        .to_account_metas(None),
        data: instruction::ResetCounter {}.data(),
    }
}

pub fn get_count(counter: &Pubkey) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::GetCount { counter: *counter }.to_account_metas(None),
        data: instruction::GetCount {}.data(),
    }
}

/// Registry creation for `mint`, bound to `authority`'s counter.
pub fn initialize_registry(authority: &Pubkey, mint: &Pubkey, bump: u8) -> Instruction {
    let (counter, _) = find_counter_address(authority, &ID).unwrap();
    let (extra_account, _) = find_extra_account_metas_address(mint, &ID).unwrap();
    Instruction {
        program_id: ID,
        accounts: accounts::InitializeExtraAccountMetaList {
            extra_account,
            counter,
            mint: *mint,
            authority: *authority,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: instruction::InitializeExtraAccountMetaList { bump }.data(),
    }
}

pub fn initialize_registry_canonical(authority: &Pubkey, mint: &Pubkey) -> Instruction {
    let (_, bump) = find_extra_account_metas_address(mint, &ID).unwrap();
    initialize_registry(authority, mint, bump)
}

pub fn mint_token(mint: &Pubkey, token_account: &Pubkey, authority: &Pubkey) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::MintToken {
            mint: *mint,
            token_account: *token_account,
            authority: *authority,
            token_program: spl_token_2022::id(),
        }
        .to_account_metas(None),
        data: instruction::MintToken {}.data(),
    }
}

pub fn transfer_token(
    from: &Pubkey,
    mint: &Pubkey,
    to: &Pubkey,
    from_authority: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::TransferToken {
            from: *from,
            mint: *mint,
            to: *to,
            from_authority: *from_authority,
            token_program: spl_token_2022::id(),
        }
        .to_account_metas(None),
        data: instruction::TransferToken {}.data(),
    }
}

pub fn burn_token(
    mint: &Pubkey,
    token_account: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::BurnToken {
            mint: *mint,
            token_account: *token_account,
            authority: *authority,
            token_program: spl_token_2022::id(),
        }
        .to_account_metas(None),
        data: instruction::BurnToken { amount }.data(),
    }
}

pub fn approve_delegate(
    token_account: &Pubkey,
    delegate: &Pubkey,
    authority: &Pubkey,
    amount: u64,
) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::ApproveDelegate {
            token_account: *token_account,
            delegate: *delegate,
            authority: *authority,
            token_program: spl_token_2022::id(),
        }
        .to_account_metas(None),
        data: instruction::ApproveDelegate { amount }.data(),
    }
}

pub fn get_balance(token_account: &Pubkey) -> Instruction {
    Instruction {
        program_id: ID,
        accounts: accounts::GetBalance {
            token_account: *token_account,
        }
        .to_account_metas(None),
        data: instruction::GetBalance {}.data(),
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A mint hooked to this program with its registry bound to the payer's
/// counter, plus a funded source account and an empty destination.
pub struct HookedMint {
    pub mint: Pubkey,
    pub counter: Pubkey,
    pub registry: Pubkey,
    pub source: Pubkey,
    pub destination: Pubkey,
    pub owner: Keypair,
}

pub const HOOKED_SUPPLY: u64 = 1_000;

pub async fn setup_hooked_mint(context: &mut ProgramTestContext) -> HookedMint {
    let payer = context.payer.pubkey();
    let mint = Keypair::new();
    let source = Keypair::new();
    let destination = Keypair::new();
    let owner = Keypair::new();
    let recipient = Pubkey::new_unique();

    create_mint(context, &mint, &payer, Some(ID)).await;
    send(context, &[initialize_counter(&payer)], &[]).await.unwrap();
    send(
        context,
        &[initialize_registry_canonical(&payer, &mint.pubkey())],
        &[],
    )
    .await
    .unwrap();

    create_token_account(context, &source, &mint.pubkey(), &owner.pubkey(), true).await;
    create_token_account(context, &destination, &mint.pubkey(), &recipient, true).await;
    send(
        context,
        &[spl_token_2022::instruction::mint_to(
            &spl_token_2022::id(),
            &mint.pubkey(),
            &source.pubkey(),
            &payer,
            &[],
            HOOKED_SUPPLY,
        )
        .unwrap()],
        &[],
    )
    .await
    .unwrap();

    let (counter, _) = find_counter_address(&payer, &ID).unwrap();
    let (registry, _) = find_extra_account_metas_address(&mint.pubkey(), &ID).unwrap();
    HookedMint {
        mint: mint.pubkey(),
        counter,
        registry,
        source: source.pubkey(),
        destination: destination.pubkey(),
        owner,
    }
}

