//! Error taxonomy for the client binding.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Everything this crate can fail with. RPC transport failures and on-chain
/// program rejections are passed through unmodified; no retries, no
/// decoding of program-specific error codes.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A supplied address string is not a well-formed base58 public key.
    /// Raised before any derivation or network call is attempted.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// An account exists on chain but its data does not decode as the
    /// expected record type.
    #[error("account {0} holds unexpected data")]
    AccountData(Pubkey),

    #[error(transparent)]
    Rpc(#[from] solana_client::client_error::ClientError),

    #[error("failed to load keypair from {path}: {reason}")]
    Keypair { path: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),
}
