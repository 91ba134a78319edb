//! The bound client: resolves every account an instruction needs, signs
//! with the wallet, submits over RPC and returns the confirmed signature.
//!
//! Each operation re-resolves pool state from the network; nothing is
//! cached between calls. Failures surface to the caller unmodified and
//! submissions are never retried, so resubmitting a confirmed operation
//! produces a second on-chain effect.

use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use crate::accounts::{JupiterAccounts, JupiterPdas, PoolAccounts, PoolPdas, WalletAccounts};
use crate::config::Config;
use crate::error::Result;
use crate::instruction as ix;
use crate::pda;
use crate::state::{account_discriminator, Jupiter, Pool};

pub struct LuciferClient {
    rpc: RpcClient,
    payer: Keypair,
    program_id: Pubkey,
}

impl LuciferClient {
    /// Bind to the program at `program_id`, signing every transaction with
    /// `payer`. Fails with [`crate::ClientError::InvalidAddress`] on a
    /// malformed program address, before any network call.
    pub fn new(rpc: RpcClient, program_id: &str, payer: Keypair) -> Result<Self> {
        let program_id = pda::parse_address(program_id)?;
        Ok(Self {
            rpc,
            payer,
            program_id,
        })
    }

    /// Build a client from a [`Config`], loading the wallet keypair from
    /// the configured path.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rpc =
            RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());
        let payer = config.load_keypair()?;
        Ok(Self {
            rpc,
            payer,
            program_id: config.program_id,
        })
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Derived address set for a pool.
    pub fn pool_pdas(&self, pool: &Pubkey, mint: &Pubkey, base_mint: &Pubkey) -> PoolPdas {
        PoolPdas::derive(&self.program_id, pool, mint, base_mint)
    }

    /// Wallet-side token accounts and receipt PDAs for a pool.
    pub fn token_accounts(
        &self,
        authority: &Pubkey,
        pool: &Pubkey,
        mint: &Pubkey,
        base_mint: &Pubkey,
    ) -> WalletAccounts {
        let pdas = self.pool_pdas(pool, mint, base_mint);
        WalletAccounts::derive(&self.program_id, authority, &pdas)
    }

    /// Derived address set for a jupiter routing pool. Without a quote mint
    /// the mint-dependent accounts are omitted.
    pub fn jupiter_pdas(&self, jupiter: &Pubkey, mint: Option<&Pubkey>) -> JupiterPdas {
        JupiterPdas::derive(&self.program_id, jupiter, mint)
    }

    /// Fetch and decode a pool record.
    pub async fn fetch_pool(&self, pool: &Pubkey) -> Result<Pool> {
        let account = self.rpc.get_account(pool).await?;
        Pool::decode(pool, &account.data)
    }

    /// Fetch every jupiter routing pool owned by the program, in
    /// store-returned order. Full scan, no pagination.
    pub async fn all_jupiters(&self) -> Result<Vec<(Pubkey, Jupiter)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::DataSize(Jupiter::LEN as u64),
                RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
                    0,
                    account_discriminator("Jupiter").to_vec(),
                )),
            ]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.program_id, config)
            .await?;
        accounts
            .iter()
            .map(|(address, account)| Jupiter::decode(address, &account.data).map(|j| (*address, j)))
            .collect()
    }

    /// Create a pool for `(mint, base_mint)` seeded with the given amounts.
    /// A fresh keypair becomes the pool address and co-signs; the
    /// transaction carries a raised compute budget since initialization
    /// creates the derived mints and treasuries in one shot. Returns the
    /// confirmed signature and the new pool address.
    pub async fn initialize_pool(
        &self,
        mint: &Pubkey,
        base_mint: &Pubkey,
        fee: u64,
        amount: u64,
        stable_amount: u64,
        base_amount: u64,
    ) -> Result<(Signature, Pubkey)> {
        let pool = Keypair::new();
        let accounts = PoolAccounts::derive(
            &self.program_id,
            &self.payer.pubkey(),
            &pool.pubkey(),
            mint,
            base_mint,
        );

        let mut instructions = ix::compute_budget_instructions(
            ix::INITIALIZE_POOL_COMPUTE_UNITS,
            ix::INITIALIZE_POOL_COMPUTE_PRICE,
        );
        instructions.push(Instruction {
            program_id: self.program_id,
            accounts: accounts.initialize_pool_metas(),
            data: ix::initialize_pool(fee, amount, stable_amount, base_amount),
        });

        let signature = self.send(&instructions, &[&pool]).await?;
        Ok((signature, pool.pubkey()))
    }

    pub async fn mint_stable(&self, pool: &Pubkey, amount: u64) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(accounts.mint_stable_metas(), ix::mint_stable(amount))
            .await
    }

    pub async fn burn_stable(&self, pool: &Pubkey, amount: u64) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(accounts.burn_stable_metas(), ix::burn_stable(amount))
            .await
    }

    pub async fn add_liquidity(
        &self,
        pool: &Pubkey,
        amount: u64,
        stable_amount: u64,
        base_amount: u64,
    ) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(
            accounts.liquidity_metas(),
            ix::add_liquidity(amount, stable_amount, base_amount),
        )
        .await
    }

    pub async fn remove_liquidity(&self, pool: &Pubkey, lpt_amount: u64) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(accounts.liquidity_metas(), ix::remove_liquidity(lpt_amount))
            .await
    }

    /// Borrow base asset against locked liquidity-pool tokens.
    pub async fn borrow(&self, pool: &Pubkey, lpt_amount: u64) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(accounts.loan_metas(), ix::borrow(lpt_amount))
            .await
    }

    /// Repay the wallet's outstanding cheque in full.
    pub async fn repay(&self, pool: &Pubkey) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(accounts.loan_metas(), ix::repay()).await
    }

    pub async fn buy(
        &self,
        pool: &Pubkey,
        stable_amount: u64,
        base_amount: u64,
    ) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(
            accounts.liquidity_metas(),
            ix::buy(stable_amount, base_amount),
        )
        .await
    }

    pub async fn sell(&self, pool: &Pubkey, amount: u64) -> Result<Signature> {
        let accounts = self.pool_accounts(pool).await?;
        self.invoke(accounts.liquidity_metas(), ix::sell(amount))
            .await
    }

    /// Create a jupiter routing pool. A fresh keypair becomes its address
    /// and co-signs. Returns the confirmed signature and the new address.
    pub async fn initialize_jupiter(&self) -> Result<(Signature, Pubkey)> {
        let jupiter = Keypair::new();
        let pdas = JupiterPdas::derive(&self.program_id, &jupiter.pubkey(), None);
        let instruction = Instruction {
            program_id: self.program_id,
            accounts: pdas.initialize_metas(&self.payer.pubkey()),
            data: ix::initialize_jupiter(),
        };

        let signature = self.send(&[instruction], &[&jupiter]).await?;
        Ok((signature, jupiter.pubkey()))
    }

    /// Swap `amount_in` of `mint` through the first routing pool whose base
    /// mint matches `base_mint`. Returns `Ok(None)` when no routing pool
    /// matches; "no route" is an expected outcome, not a failure.
    pub async fn swap_jupiter(
        &self,
        base_mint: &Pubkey,
        mint: &Pubkey,
        amount_in: u64,
        amount_out: u64,
    ) -> Result<Option<Signature>> {
        let jupiters = self.all_jupiters().await?;
        let Some((jupiter, _)) = select_route(&jupiters, base_mint) else {
            log::debug!("no routing pool for base mint {base_mint}");
            return Ok(None);
        };

        let accounts =
            JupiterAccounts::derive(&self.program_id, &self.payer.pubkey(), &jupiter, mint);
        let signature = self
            .invoke(accounts.swap_metas(), ix::swap_jupiter(amount_in, amount_out))
            .await?;
        Ok(Some(signature))
    }

    /// Resolve the full pool-scoped account context for the wallet,
    /// re-reading the pool's mints from the network.
    async fn pool_accounts(&self, pool: &Pubkey) -> Result<PoolAccounts> {
        let record = self.fetch_pool(pool).await?;
        Ok(PoolAccounts::derive(
            &self.program_id,
            &self.payer.pubkey(),
            pool,
            &record.mint,
            &record.base_mint,
        ))
    }

    async fn invoke(&self, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Result<Signature> {
        let instruction = Instruction {
            program_id: self.program_id,
            accounts,
            data,
        };
        self.send(&[instruction], &[]).await
    }

    async fn send(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature> {
        let recent_blockhash = self.rpc.get_latest_blockhash().await?;
        let mut signers: Vec<&dyn Signer> = vec![&self.payer];
        for signer in extra_signers {
            signers.push(*signer as &dyn Signer);
        }
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            &signers,
            recent_blockhash,
        );
        let signature = self.rpc.send_and_confirm_transaction(&transaction).await?;
        log::info!("confirmed transaction {}", signature);
        Ok(signature)
    }
}

/// First routing pool whose recorded base mint matches, in store-returned
/// order.
pub fn select_route(jupiters: &[(Pubkey, Jupiter)], base_mint: &Pubkey) -> Option<(Pubkey, Jupiter)> {
    jupiters
        .iter()
        .find(|(_, jupiter)| jupiter.base_mint == *base_mint)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn test_client() -> LuciferClient {
        let rpc = RpcClient::new("http://127.0.0.1:1".to_string());
        LuciferClient::new(rpc, crate::config::DEFAULT_PROGRAM_ID, Keypair::new()).unwrap()
    }

    #[test]
    fn test_new_rejects_malformed_program_id() {
        let rpc = RpcClient::new("http://127.0.0.1:1".to_string());
        let result = LuciferClient::new(rpc, "definitely-not-base58", Keypair::new());
        assert!(matches!(result, Err(ClientError::InvalidAddress(_))));
    }

    #[test]
    fn test_select_route_returns_none_without_match() {
        let jupiters = vec![
            (
                Pubkey::new_unique(),
                Jupiter {
                    base_mint: Pubkey::new_unique(),
                },
            ),
            (
                Pubkey::new_unique(),
                Jupiter {
                    base_mint: Pubkey::new_unique(),
                },
            ),
        ];
        assert!(select_route(&jupiters, &Pubkey::new_unique()).is_none());
        assert!(select_route(&[], &Pubkey::new_unique()).is_none());
    }

    #[test]
    fn test_select_route_first_match_wins() {
        let base_mint = Pubkey::new_unique();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let jupiters = vec![
            (
                Pubkey::new_unique(),
                Jupiter {
                    base_mint: Pubkey::new_unique(),
                },
            ),
            (first, Jupiter { base_mint }),
            (second, Jupiter { base_mint }),
        ];

        let (address, record) = select_route(&jupiters, &base_mint).unwrap();
        assert_eq!(address, first);
        assert_eq!(record.base_mint, base_mint);
    }

    #[tokio::test]
    async fn test_pool_fetch_failure_propagates() {
        // The RPC endpoint is unreachable, so the pool fetch fails before
        // any submission is attempted.
        let client = test_client();
        let result = client.mint_stable(&Pubkey::new_unique(), 1).await;
        assert!(matches!(result, Err(ClientError::Rpc(_))));
    }
}
