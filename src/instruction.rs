//! Instruction-data encoding for the on-chain program.
//!
//! Anchor wire format: an 8-byte method discriminator
//! (`sha256("global:<name>")[..8]`) followed by the arguments in declaration
//! order as little-endian u64s.

use sha2::{Digest, Sha256};
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::instruction::Instruction;

/// Compute units requested for pool initialization. Creating the derived
/// mints and treasuries exceeds the default budget.
pub const INITIALIZE_POOL_COMPUTE_UNITS: u32 = 400_000;

/// Priority fee attached to the raised budget, in micro-lamports per unit.
pub const INITIALIZE_POOL_COMPUTE_PRICE: u64 = 0;

/// Anchor method discriminator for the instruction `name`.
pub fn method_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("global:{}", name));
    let hash = hasher.finalize();
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&hash[..8]);
    disc
}

fn encode(name: &str, args: &[u64]) -> Vec<u8> {
    let mut data = method_discriminator(name).to_vec();
    for arg in args {
        data.extend_from_slice(&arg.to_le_bytes());
    }
    data
}

pub fn initialize_pool(fee: u64, amount: u64, stable_amount: u64, base_amount: u64) -> Vec<u8> {
    encode("initialize_pool", &[fee, amount, stable_amount, base_amount])
}

pub fn mint_stable(base_amount: u64) -> Vec<u8> {
    encode("mint_stable", &[base_amount])
}

pub fn burn_stable(stable_amount: u64) -> Vec<u8> {
    encode("burn_stable", &[stable_amount])
}

pub fn add_liquidity(amount: u64, stable_amount: u64, base_amount: u64) -> Vec<u8> {
    encode("add_liquidity", &[amount, stable_amount, base_amount])
}

pub fn remove_liquidity(lpt_amount: u64) -> Vec<u8> {
    encode("remove_liquidity", &[lpt_amount])
}

pub fn borrow(lpt_amount: u64) -> Vec<u8> {
    encode("borrow", &[lpt_amount])
}

pub fn repay() -> Vec<u8> {
    encode("repay", &[])
}

pub fn buy(stable_amount: u64, base_amount: u64) -> Vec<u8> {
    encode("buy", &[stable_amount, base_amount])
}

pub fn sell(amount: u64) -> Vec<u8> {
    encode("sell", &[amount])
}

pub fn initialize_jupiter() -> Vec<u8> {
    encode("initialize_jupiter", &[])
}

pub fn swap_jupiter(amount_in: u64, amount_out: u64) -> Vec<u8> {
    encode("swap_jupiter", &[amount_in, amount_out])
}

/// Compute-budget directives prepended to pool initialization.
pub fn compute_budget_instructions(units: u32, micro_lamports: u64) -> Vec<Instruction> {
    vec![
        ComputeBudgetInstruction::set_compute_unit_limit(units),
        ComputeBudgetInstruction::set_compute_unit_price(micro_lamports),
    ]
}
