pub mod approve_delegate;
pub mod burn_token;
pub mod counter;
pub mod extra_account_metas;
pub mod get_balance;
pub mod init_token;
pub mod mint_token;
pub mod transfer_token;

pub use approve_delegate::*;
pub use burn_token::*;
pub use counter::*;
pub use extra_account_metas::*;
pub use get_balance::*;
pub use init_token::*;
pub use mint_token::*;
pub use transfer_token::*;
