use soroban_sdk::{contracttype, symbol_short, Env, Map, Symbol, Vec};

use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

/// Lock durations in the order they were first added.
const LOCK_PERIODS: Symbol = symbol_short!("LOCK_PER");
/// Lock duration (days) → return percentage for the full duration.
const TIER_RATES: Symbol = symbol_short!("TIERS");

// ── Types ───────────────────────────────────────────────────────────────────

/// A lock duration together with the fixed return paid over it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    /// Lock duration in whole days.
    pub days: u32,
    /// Whole-percent return for the full duration (not annualised).
    pub rate_percent: u32,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn rates(env: &Env) -> Map<u32, u32> {
    env.storage()
        .instance()
        .get(&TIER_RATES)
        .unwrap_or_else(|| Map::new(env))
}

/// Supported lock durations, in insertion order.
pub fn durations(env: &Env) -> Vec<u32> {
    env.storage()
        .instance()
        .get(&LOCK_PERIODS)
        .unwrap_or_else(|| Vec::new(env))
}

/// Return rate for `days`, or `None` when no tier covers that duration.
pub fn rate_for(env: &Env, days: u32) -> Option<u32> {
    rates(env).get(days)
}

/// Insert a new tier (appended to the duration list) or overwrite the rate
/// of an existing one. Returns `true` when `days` was not present before.
pub fn upsert(env: &Env, days: u32, rate_percent: u32) -> Result<bool, ContractError> {
    if days == 0 {
        return Err(ContractError::UnsupportedDuration);
    }

    let mut rates = rates(env);
    let is_new = !rates.contains_key(days);
    if is_new {
        let mut periods = durations(env);
        periods.push_back(days);
        env.storage().instance().set(&LOCK_PERIODS, &periods);
    }
    rates.set(days, rate_percent);
    env.storage().instance().set(&TIER_RATES, &rates);

    Ok(is_new)
}

/// Write the initial tier table.
///
/// The list must be non-empty, with unique non-zero durations; its order
/// becomes the initial order of [`durations`].
pub fn seed(env: &Env, tiers: &Vec<Tier>) -> Result<(), ContractError> {
    if tiers.is_empty() {
        return Err(ContractError::InvalidTier);
    }

    let mut periods: Vec<u32> = Vec::new(env);
    let mut rates: Map<u32, u32> = Map::new(env);
    for tier in tiers.iter() {
        if tier.days == 0 || rates.contains_key(tier.days) {
            return Err(ContractError::InvalidTier);
        }
        periods.push_back(tier.days);
        rates.set(tier.days, tier.rate_percent);
    }

    env.storage().instance().set(&LOCK_PERIODS, &periods);
    env.storage().instance().set(&TIER_RATES, &rates);
    Ok(())
}
