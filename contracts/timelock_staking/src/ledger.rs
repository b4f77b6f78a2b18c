use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::rewards::SECONDS_PER_DAY;

// ── Storage key constants ───────────────────────────────────────────────────

/// Last allocated stake id; doubles as the total number of stakes ever opened.
const STAKE_CTR: Symbol = symbol_short!("STK_CTR");
/// Sum of principal across open stakes.
const CURRENTLY_STAKED: Symbol = symbol_short!("CUR_STK");

// Persistent entries use tuple keys: (prefix, id) and (prefix, owner).
const STAKE: Symbol = symbol_short!("STAKE");
const OWNER_STAKES: Symbol = symbol_short!("OWN_STK");

const TTL_THRESHOLD: u32 = 1_036_800; // ~60 days
const TTL_EXTEND_TO: u32 = 6_220_800; // ~360 days

// ── Types ───────────────────────────────────────────────────────────────────

/// A single time-locked deposit.
///
/// Records are never removed. Closing a stake flips `open` and zeroes
/// `days_to_reward`; the rest stays as an audit trail.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stake {
    /// 1-based, monotonically increasing, never reused.
    pub id: u64,
    pub owner: Address,
    /// Principal in the token's smallest unit.
    pub amount: i128,
    /// Tier duration the stake was opened against.
    pub lock_days: u32,
    /// Tier rate at the time of opening.
    pub rate_percent: u32,
    pub created_at: u64,
    /// `created_at + lock_days * 86_400`; principal is free after this.
    pub unlock_at: u64,
    /// Reward paid per whole day elapsed.
    pub daily_reward: i128,
    /// Schedule days not yet paid out.
    pub days_to_reward: u32,
    pub last_reward_at: u64,
    pub open: bool,
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn stake_key(id: u64) -> (Symbol, u64) {
    (STAKE, id)
}

fn owner_key(owner: &Address) -> (Symbol, Address) {
    (OWNER_STAKES, owner.clone())
}

/// Persist a stake record.
pub fn store(env: &Env, stake: &Stake) {
    let key = stake_key(stake.id);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Retrieve a stake by id, returning `None` when not found.
pub fn get(env: &Env, id: u64) -> Option<Stake> {
    env.storage().persistent().get(&stake_key(id))
}

/// Ids of every stake `owner` has opened, oldest first.
pub fn ids_for(env: &Env, owner: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&owner_key(owner))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn currently_staked(env: &Env) -> i128 {
    env.storage().instance().get(&CURRENTLY_STAKED).unwrap_or(0)
}

pub fn total_stakes(env: &Env) -> u64 {
    env.storage().instance().get(&STAKE_CTR).unwrap_or(0)
}

fn set_currently_staked(env: &Env, value: i128) {
    env.storage().instance().set(&CURRENTLY_STAKED, &value);
}

// ── Mutations ───────────────────────────────────────────────────────────────

/// Validated parameters of a stake about to be opened.
#[derive(Clone, Copy, Debug)]
pub struct Terms {
    pub amount: i128,
    pub lock_days: u32,
    pub rate_percent: u32,
    pub daily_reward: i128,
}

/// Build, store and index a new open stake and bump both aggregate counters.
///
/// `new_total` is the already-checked `currently_staked + amount`; callers
/// compute it before moving any funds.
pub fn allocate(env: &Env, owner: &Address, terms: Terms, new_total: i128, now: u64) -> Stake {
    let Terms {
        amount,
        lock_days,
        rate_percent,
        daily_reward,
    } = terms;

    let id = total_stakes(env).saturating_add(1);
    let stake = Stake {
        id,
        owner: owner.clone(),
        amount,
        lock_days,
        rate_percent,
        created_at: now,
        unlock_at: now.saturating_add(u64::from(lock_days) * SECONDS_PER_DAY),
        daily_reward,
        days_to_reward: lock_days,
        last_reward_at: now,
        open: true,
    };
    store(env, &stake);

    let key = owner_key(owner);
    let mut ids = ids_for(env, owner);
    ids.push_back(id);
    env.storage().persistent().set(&key, &ids);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    env.storage().instance().set(&STAKE_CTR, &id);
    set_currently_staked(env, new_total);

    stake
}

/// Mark `stake` closed and release its principal from the running total.
pub fn close(env: &Env, stake: &mut Stake) {
    stake.open = false;
    stake.days_to_reward = 0;
    store(env, stake);

    let remaining = currently_staked(env).saturating_sub(stake.amount);
    set_currently_staked(env, remaining);
}
