//! Per-instruction account assembly.
//!
//! The on-chain program rejects any transaction whose account list deviates
//! from the roles its instruction declares, so each builder here returns a
//! fixed ordered list rather than merging maps dynamically. Writability and
//! signer flags mirror the program's account constraints.

use solana_sdk::instruction::AccountMeta;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::{system_program, sysvar};

use crate::pda;

/// Derived address set for a pool. A pure function of
/// `(program id, pool, mint, base mint)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolPdas {
    pub pool: Pubkey,
    pub treasurer: Pubkey,
    pub mint: Pubkey,
    pub stable_mint: Pubkey,
    pub base_mint: Pubkey,
    pub lpt_mint: Pubkey,
    pub treasury: Pubkey,
    pub stable_treasury: Pubkey,
    pub base_treasury: Pubkey,
    pub lpt_treasury: Pubkey,
}

impl PoolPdas {
    pub fn derive(program_id: &Pubkey, pool: &Pubkey, mint: &Pubkey, base_mint: &Pubkey) -> Self {
        let (treasurer, _) = pda::derive_treasurer(program_id, pool);
        let (stable_mint, _) = pda::derive_stable_mint(program_id, pool);
        let (lpt_mint, _) = pda::derive_lpt_mint(program_id, pool);
        log::debug!(
            "pool {pool}: treasurer {treasurer} stable_mint {stable_mint} lpt_mint {lpt_mint}"
        );
        Self {
            pool: *pool,
            treasurer,
            mint: *mint,
            stable_mint,
            base_mint: *base_mint,
            lpt_mint,
            treasury: pda::associated_token_account(mint, &treasurer),
            stable_treasury: pda::associated_token_account(&stable_mint, &treasurer),
            base_treasury: pda::associated_token_account(base_mint, &treasurer),
            lpt_treasury: pda::associated_token_account(&lpt_mint, &treasurer),
        }
    }
}

/// Wallet-side token accounts and receipt PDAs for `(authority, pool)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletAccounts {
    pub token_account: Pubkey,
    pub stable_token_account: Pubkey,
    pub base_token_account: Pubkey,
    pub lpt_token_account: Pubkey,
    pub cheque: Pubkey,
    pub cert: Pubkey,
}

impl WalletAccounts {
    pub fn derive(program_id: &Pubkey, authority: &Pubkey, pdas: &PoolPdas) -> Self {
        let (cheque, _) = pda::derive_cheque(program_id, &pdas.pool, authority);
        let (cert, _) = pda::derive_cert(program_id, &pdas.lpt_mint, authority);
        Self {
            token_account: pda::associated_token_account(&pdas.mint, authority),
            stable_token_account: pda::associated_token_account(&pdas.stable_mint, authority),
            base_token_account: pda::associated_token_account(&pdas.base_mint, authority),
            lpt_token_account: pda::associated_token_account(&pdas.lpt_mint, authority),
            cheque,
            cert,
        }
    }
}

/// Rent sysvar, system program, token program and associated-token program,
/// in the order every instruction lists them.
fn program_metas() -> [AccountMeta; 4] {
    [
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
    ]
}

/// Full account context for pool-scoped instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAccounts {
    pub authority: Pubkey,
    pub pdas: PoolPdas,
    pub wallet: WalletAccounts,
}

impl PoolAccounts {
    pub fn derive(
        program_id: &Pubkey,
        authority: &Pubkey,
        pool: &Pubkey,
        mint: &Pubkey,
        base_mint: &Pubkey,
    ) -> Self {
        let pdas = PoolPdas::derive(program_id, pool, mint, base_mint);
        let wallet = WalletAccounts::derive(program_id, authority, &pdas);
        Self {
            authority: *authority,
            pdas,
            wallet,
        }
    }

    /// `initialize_pool`: the pool keypair co-signs, every derived account
    /// is created in this transaction.
    pub fn initialize_pool_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.authority, true),
            AccountMeta::new(self.pdas.pool, true),
            AccountMeta::new_readonly(self.pdas.treasurer, false),
            AccountMeta::new_readonly(self.pdas.mint, false),
            AccountMeta::new_readonly(self.pdas.base_mint, false),
            AccountMeta::new(self.pdas.stable_mint, false),
            AccountMeta::new(self.pdas.lpt_mint, false),
            AccountMeta::new(self.pdas.treasury, false),
            AccountMeta::new(self.pdas.stable_treasury, false),
            AccountMeta::new(self.pdas.base_treasury, false),
            AccountMeta::new(self.pdas.lpt_treasury, false),
            AccountMeta::new(self.wallet.token_account, false),
            AccountMeta::new(self.wallet.stable_token_account, false),
            AccountMeta::new(self.wallet.base_token_account, false),
            AccountMeta::new(self.wallet.lpt_token_account, false),
            AccountMeta::new(self.wallet.cert, false),
        ];
        metas.extend(program_metas());
        metas
    }

    /// Shared account list of `add_liquidity`, `remove_liquidity`, `buy`
    /// and `sell`.
    pub fn liquidity_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.authority, true),
            AccountMeta::new(self.pdas.pool, false),
            AccountMeta::new_readonly(self.pdas.treasurer, false),
            AccountMeta::new_readonly(self.pdas.mint, false),
            AccountMeta::new(self.pdas.stable_mint, false),
            AccountMeta::new_readonly(self.pdas.base_mint, false),
            AccountMeta::new(self.pdas.lpt_mint, false),
            AccountMeta::new(self.pdas.treasury, false),
            AccountMeta::new(self.pdas.stable_treasury, false),
            AccountMeta::new(self.pdas.base_treasury, false),
            AccountMeta::new(self.pdas.lpt_treasury, false),
            AccountMeta::new(self.wallet.token_account, false),
            AccountMeta::new(self.wallet.stable_token_account, false),
            AccountMeta::new(self.wallet.base_token_account, false),
            AccountMeta::new(self.wallet.lpt_token_account, false),
        ];
        metas.extend(program_metas());
        metas
    }

    /// `mint_stable`: stable minted against deposited base asset; the lpt
    /// mint is not involved.
    pub fn mint_stable_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.authority, true),
            AccountMeta::new(self.pdas.pool, false),
            AccountMeta::new_readonly(self.pdas.treasurer, false),
            AccountMeta::new_readonly(self.pdas.base_mint, false),
            AccountMeta::new(self.pdas.stable_mint, false),
            AccountMeta::new(self.pdas.base_treasury, false),
            AccountMeta::new(self.pdas.stable_treasury, false),
            AccountMeta::new(self.wallet.base_token_account, false),
            AccountMeta::new(self.wallet.stable_token_account, false),
        ];
        metas.extend(program_metas());
        metas
    }

    pub fn burn_stable_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.authority, true),
            AccountMeta::new(self.pdas.pool, false),
            AccountMeta::new_readonly(self.pdas.treasurer, false),
            AccountMeta::new_readonly(self.pdas.base_mint, false),
            AccountMeta::new(self.pdas.stable_mint, false),
            AccountMeta::new(self.pdas.lpt_mint, false),
            AccountMeta::new(self.pdas.base_treasury, false),
            AccountMeta::new(self.pdas.stable_treasury, false),
            AccountMeta::new(self.wallet.base_token_account, false),
            AccountMeta::new(self.wallet.stable_token_account, false),
        ];
        metas.extend(program_metas());
        metas
    }

    /// Shared account list of `borrow` and `repay`, including the wallet's
    /// cheque receipt.
    pub fn loan_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.authority, true),
            AccountMeta::new(self.pdas.pool, false),
            AccountMeta::new_readonly(self.pdas.treasurer, false),
            AccountMeta::new(self.pdas.base_mint, false),
            AccountMeta::new(self.pdas.lpt_mint, false),
            AccountMeta::new(self.pdas.base_treasury, false),
            AccountMeta::new(self.pdas.lpt_treasury, false),
            AccountMeta::new(self.wallet.base_token_account, false),
            AccountMeta::new(self.wallet.lpt_token_account, false),
            AccountMeta::new(self.wallet.cheque, false),
        ];
        metas.extend(program_metas());
        metas
    }
}

/// Derived address set for a jupiter routing pool. The quote mint is
/// optional; without one only the treasurer and the derived base mint are
/// resolved, and the mint-dependent accounts are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JupiterPdas {
    pub jupiter: Pubkey,
    pub treasurer: Pubkey,
    pub base_mint: Pubkey,
    pub mint: Option<Pubkey>,
    pub mint_treasury: Option<Pubkey>,
}

impl JupiterPdas {
    pub fn derive(program_id: &Pubkey, jupiter: &Pubkey, mint: Option<&Pubkey>) -> Self {
        let (treasurer, _) = pda::derive_treasurer(program_id, jupiter);
        let (base_mint, _) = pda::derive_base_mint(program_id, jupiter);
        log::debug!("jupiter {jupiter}: treasurer {treasurer} base_mint {base_mint}");
        Self {
            jupiter: *jupiter,
            treasurer,
            base_mint,
            mint: mint.copied(),
            mint_treasury: mint.map(|m| pda::associated_token_account(m, &treasurer)),
        }
    }

    /// `initialize_jupiter`: the jupiter keypair co-signs, the base mint is
    /// created in this transaction.
    pub fn initialize_metas(&self, authority: &Pubkey) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new(self.jupiter, true),
            AccountMeta::new_readonly(self.treasurer, false),
            AccountMeta::new(self.base_mint, false),
        ];
        metas.extend(program_metas());
        metas
    }
}

/// Full account context for `swap_jupiter`, where a concrete quote mint is
/// always known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JupiterAccounts {
    pub authority: Pubkey,
    pub jupiter: Pubkey,
    pub treasurer: Pubkey,
    pub base_mint: Pubkey,
    pub mint: Pubkey,
    pub mint_treasury: Pubkey,
    pub token_account: Pubkey,
    pub base_token_account: Pubkey,
}

impl JupiterAccounts {
    pub fn derive(program_id: &Pubkey, authority: &Pubkey, jupiter: &Pubkey, mint: &Pubkey) -> Self {
        let (treasurer, _) = pda::derive_treasurer(program_id, jupiter);
        let (base_mint, _) = pda::derive_base_mint(program_id, jupiter);
        let token_account = pda::associated_token_account(mint, authority);
        let base_token_account = pda::associated_token_account(&base_mint, authority);
        log::debug!(
            "jupiter {jupiter}: token_account {token_account} base_token_account {base_token_account}"
        );
        Self {
            authority: *authority,
            jupiter: *jupiter,
            treasurer,
            base_mint,
            mint: *mint,
            mint_treasury: pda::associated_token_account(mint, &treasurer),
            token_account,
            base_token_account,
        }
    }

    pub fn swap_metas(&self) -> Vec<AccountMeta> {
        let mut metas = vec![
            AccountMeta::new(self.authority, true),
            AccountMeta::new(self.jupiter, false),
            AccountMeta::new_readonly(self.treasurer, false),
            AccountMeta::new(self.base_mint, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new(self.mint_treasury, false),
            AccountMeta::new(self.token_account, false),
            AccountMeta::new(self.base_token_account, false),
        ];
        metas.extend(program_metas());
        metas
    }
}
