//! Decoding of the program's on-chain records.
//!
//! The records are Anchor accounts: an 8-byte discriminator
//! (`sha256("account:<Name>")[..8]`) followed by the fields in declaration
//! order, little endian. This layer reads them on demand and never caches.

use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use crate::error::{ClientError, Result};

pub const DISCRIMINATOR_LEN: usize = 8;

/// Denominator of the pool fee rate (fee is stored scaled by 10^9).
pub const FEE_PRECISION: u64 = 1_000_000_000;

/// Anchor account discriminator for the record type `name`.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("account:{}", name));
    let hash = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&hash[..8]);
    disc
}

fn read_pubkey(data: &[u8], pos: &mut usize) -> Pubkey {
    let mut buf = [0u8; 32];
    buf.copy_from_slice(&data[*pos..*pos + 32]);
    *pos += 32;
    Pubkey::new_from_array(buf)
}

fn read_u64(data: &[u8], pos: &mut usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[*pos..*pos + 8]);
    *pos += 8;
    u64::from_le_bytes(buf)
}

fn read_i64(data: &[u8], pos: &mut usize) -> i64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[*pos..*pos + 8]);
    *pos += 8;
    i64::from_le_bytes(buf)
}

/// A primary pool record. This layer only acts on `mint` and `base_mint`;
/// the remaining fields are decoded for callers that want to inspect pool
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    pub authority: Pubkey,
    pub mint: Pubkey,
    pub base_mint: Pubkey,
    pub stable_mint: Pubkey,
    pub lpt_mint: Pubkey,
    pub treasurer: Pubkey,
    pub balance: u64,
    pub stable_balance: u64,
    pub base_balance: u64,
    pub fee: u64,
    pub total_lpt_fee: u64,
    pub lpt_supply: u64,
    pub start_time: i64,
}

impl Pool {
    pub const LEN: usize = DISCRIMINATOR_LEN + 32 * 6 + 8 * 7;

    pub fn decode(address: &Pubkey, data: &[u8]) -> Result<Self> {
        if data.len() < Self::LEN || data[..DISCRIMINATOR_LEN] != account_discriminator("Pool") {
            return Err(ClientError::AccountData(*address));
        }
        let mut pos = DISCRIMINATOR_LEN;
        Ok(Self {
            authority: read_pubkey(data, &mut pos),
            mint: read_pubkey(data, &mut pos),
            base_mint: read_pubkey(data, &mut pos),
            stable_mint: read_pubkey(data, &mut pos),
            lpt_mint: read_pubkey(data, &mut pos),
            treasurer: read_pubkey(data, &mut pos),
            balance: read_u64(data, &mut pos),
            stable_balance: read_u64(data, &mut pos),
            base_balance: read_u64(data, &mut pos),
            fee: read_u64(data, &mut pos),
            total_lpt_fee: read_u64(data, &mut pos),
            lpt_supply: read_u64(data, &mut pos),
            start_time: read_i64(data, &mut pos),
        })
    }

    /// Fee taken on `amount` at the pool's configured rate.
    pub fn calc_fee(&self, amount: u64) -> u64 {
        (amount as u128 * self.fee as u128 / FEE_PRECISION as u128) as u64
    }
}

/// A jupiter routing-pool record. Only the base mint is stored; the account
/// is allocated with room for two keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jupiter {
    pub base_mint: Pubkey,
}

impl Jupiter {
    pub const LEN: usize = DISCRIMINATOR_LEN + 32 * 2;

    pub fn decode(address: &Pubkey, data: &[u8]) -> Result<Self> {
        if data.len() < DISCRIMINATOR_LEN + 32
            || data[..DISCRIMINATOR_LEN] != account_discriminator("Jupiter")
        {
            return Err(ClientError::AccountData(*address));
        }
        let mut pos = DISCRIMINATOR_LEN;
        Ok(Self {
            base_mint: read_pubkey(data, &mut pos),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_blob(pool: &Pool) -> Vec<u8> {
        let mut data = account_discriminator("Pool").to_vec();
        for key in [
            &pool.authority,
            &pool.mint,
            &pool.base_mint,
            &pool.stable_mint,
            &pool.lpt_mint,
            &pool.treasurer,
        ] {
            data.extend_from_slice(key.as_ref());
        }
        for value in [
            pool.balance,
            pool.stable_balance,
            pool.base_balance,
            pool.fee,
            pool.total_lpt_fee,
            pool.lpt_supply,
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data.extend_from_slice(&pool.start_time.to_le_bytes());
        data
    }

    fn sample_pool() -> Pool {
        Pool {
            authority: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            base_mint: Pubkey::new_unique(),
            stable_mint: Pubkey::new_unique(),
            lpt_mint: Pubkey::new_unique(),
            treasurer: Pubkey::new_unique(),
            balance: 1_000_000,
            stable_balance: 2_000_000,
            base_balance: 0,
            fee: 5_000_000, // 0.5%
            total_lpt_fee: 5_000_000,
            lpt_supply: 1_414_213,
            start_time: 1_700_000_000,
        }
    }

    #[test]
    fn test_pool_decode() {
        let pool = sample_pool();
        let data = pool_blob(&pool);
        assert_eq!(data.len(), Pool::LEN);

        let decoded = Pool::decode(&Pubkey::new_unique(), &data).unwrap();
        assert_eq!(decoded, pool);
    }

    #[test]
    fn test_pool_decode_rejects_wrong_discriminator() {
        let mut data = pool_blob(&sample_pool());
        data[..DISCRIMINATOR_LEN].copy_from_slice(&account_discriminator("Jupiter"));

        let address = Pubkey::new_unique();
        assert!(matches!(
            Pool::decode(&address, &data),
            Err(ClientError::AccountData(a)) if a == address
        ));
    }

    #[test]
    fn test_pool_decode_rejects_short_data() {
        let data = pool_blob(&sample_pool());
        assert!(Pool::decode(&Pubkey::new_unique(), &data[..Pool::LEN - 1]).is_err());
    }

    #[test]
    fn test_jupiter_decode() {
        let base_mint = Pubkey::new_unique();
        let mut data = account_discriminator("Jupiter").to_vec();
        data.extend_from_slice(base_mint.as_ref());
        data.resize(Jupiter::LEN, 0); // allocated padding

        let decoded = Jupiter::decode(&Pubkey::new_unique(), &data).unwrap();
        assert_eq!(decoded.base_mint, base_mint);
    }

    #[test]
    fn test_calc_fee() {
        let mut pool = sample_pool();
        pool.fee = 5_000_000; // 0.5% at 1e9 precision
        assert_eq!(pool.calc_fee(1_000_000_000), 5_000_000);
        assert_eq!(pool.calc_fee(0), 0);

        pool.fee = 0;
        assert_eq!(pool.calc_fee(u64::MAX), 0);
    }
}
