//! Program-derived address and associated-token-account derivation.
//!
//! Pure address-space computation, no network access. For a fixed program
//! id and fixed inputs every function here is deterministic: recomputing
//! always yields the same address.

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use std::str::FromStr;

use crate::error::{ClientError, Result};

/// Seed prefixes declared by the on-chain program.
pub const TREASURER_SEED: &[u8] = b"treasurer";
pub const STABLE_MINT_SEED: &[u8] = b"stable_mint";
pub const LPT_MINT_SEED: &[u8] = b"lpt_mint";
pub const BASE_MINT_SEED: &[u8] = b"base_mint";
pub const CHEQUE_SEED: &[u8] = b"cheque";

/// Parse a base58 address string, rejecting malformed input before any
/// derivation is attempted.
pub fn parse_address(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address).map_err(|_| ClientError::InvalidAddress(address.to_string()))
}

/// Treasurer authority custodying the reserve accounts of a pool or
/// jupiter entity.
pub fn derive_treasurer(program_id: &Pubkey, entity: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TREASURER_SEED, entity.as_ref()], program_id)
}

/// Stable-asset mint owned by a pool.
pub fn derive_stable_mint(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STABLE_MINT_SEED, pool.as_ref()], program_id)
}

/// Liquidity-pool-token mint owned by a pool.
pub fn derive_lpt_mint(program_id: &Pubkey, pool: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LPT_MINT_SEED, pool.as_ref()], program_id)
}

/// Base-asset mint owned by a jupiter routing pool.
pub fn derive_base_mint(program_id: &Pubkey, jupiter: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[BASE_MINT_SEED, jupiter.as_ref()], program_id)
}

/// Per-wallet borrow receipt for a pool.
pub fn derive_cheque(program_id: &Pubkey, pool: &Pubkey, authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CHEQUE_SEED, pool.as_ref(), authority.as_ref()], program_id)
}

/// Per-wallet liquidity certificate. Seeded by the lpt mint and the wallet
/// with no string prefix.
pub fn derive_cert(program_id: &Pubkey, lpt_mint: &Pubkey, authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[lpt_mint.as_ref(), authority.as_ref()], program_id)
}

/// Canonical token-holding account for `(mint, owner)` under the
/// associated-token program. Whether the account is initialized on chain is
/// not checked here.
pub fn associated_token_account(mint: &Pubkey, owner: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasurer_derivation_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let pool = Pubkey::new_unique();

        let first = derive_treasurer(&program_id, &pool);
        let second = derive_treasurer(&program_id, &pool);

        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_seeds_yield_distinct_addresses() {
        let program_id = Pubkey::new_unique();
        let pool = Pubkey::new_unique();

        let (treasurer, _) = derive_treasurer(&program_id, &pool);
        let (stable_mint, _) = derive_stable_mint(&program_id, &pool);
        let (lpt_mint, _) = derive_lpt_mint(&program_id, &pool);

        assert_ne!(treasurer, stable_mint);
        assert_ne!(treasurer, lpt_mint);
        assert_ne!(stable_mint, lpt_mint);
    }

    #[test]
    fn test_cheque_depends_on_authority() {
        let program_id = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        let (cheque_alice, _) = derive_cheque(&program_id, &pool, &alice);
        let (cheque_bob, _) = derive_cheque(&program_id, &pool, &bob);

        assert_ne!(cheque_alice, cheque_bob);
    }

    #[test]
    fn test_cert_depends_on_lpt_mint_and_authority() {
        let program_id = Pubkey::new_unique();
        let lpt_mint = Pubkey::new_unique();
        let authority = Pubkey::new_unique();

        let (cert, _) = derive_cert(&program_id, &lpt_mint, &authority);
        let (other, _) = derive_cert(&program_id, &lpt_mint, &Pubkey::new_unique());

        assert_eq!(cert, derive_cert(&program_id, &lpt_mint, &authority).0);
        assert_ne!(cert, other);
    }

    #[test]
    fn test_parse_address_rejects_malformed_input() {
        assert!(matches!(
            parse_address("not-an-address"),
            Err(ClientError::InvalidAddress(_))
        ));
        assert!(parse_address(&Pubkey::new_unique().to_string()).is_ok());
    }

    #[test]
    fn test_associated_token_account_is_deterministic() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        assert_eq!(
            associated_token_account(&mint, &owner),
            associated_token_account(&mint, &owner)
        );
        assert_ne!(
            associated_token_account(&mint, &owner),
            associated_token_account(&mint, &Pubkey::new_unique())
        );
    }
}
