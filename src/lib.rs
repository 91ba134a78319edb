//! Client binding for the lucifer on-chain AMM/lending program.
//!
//! The crate derives the program's deterministic addresses, resolves
//! associated token accounts, assembles the exact account list each
//! instruction declares, and signs and submits transactions over RPC.
//! Pool pricing, interest accrual and collateral rules live entirely in
//! the on-chain program; this layer reaches them only through the
//! instruction interface and surfaces rejections to the caller unmodified.

pub mod accounts;
pub mod client;
pub mod config;
pub mod error;
pub mod instruction;
pub mod pda;
pub mod state;

pub use client::LuciferClient;
pub use config::Config;
pub use error::{ClientError, Result};
pub use state::{Jupiter, Pool};
