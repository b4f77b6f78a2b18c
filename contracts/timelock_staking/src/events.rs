#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub stake_token: Address,
    pub rewards_wallet: Address,
    pub exit_penalty: u32,
    pub tier_count: u32,
    pub timestamp: u64,
}

/// Fired when a deposit opens a new stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub unlock_at: u64,
    pub timestamp: u64,
}

/// Fired when a claim pays out reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub days: u32,
    pub timestamp: u64,
}

/// Fired when a matured stake is closed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub amount: i128,
    /// Reward settled on close; zero unless claim-on-unstake is enabled.
    pub reward: i128,
    pub timestamp: u64,
}

/// Fired when a stake is closed early and pays the exit penalty.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyUnstakedEvent {
    pub owner: Address,
    pub stake_id: u64,
    pub amount: i128,
    pub fee: i128,
    pub timestamp: u64,
}

/// Fired when the reward funding account changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsWalletSetEvent {
    pub wallet: Address,
    pub timestamp: u64,
}

/// Fired when a tier is added or its rate overwritten.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierSetEvent {
    pub days: u32,
    pub rate_percent: u32,
    pub added: bool,
    pub timestamp: u64,
}

/// Fired when the exit penalty changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExitPenaltySetEvent {
    pub percent: u32,
    pub timestamp: u64,
}

/// Fired when the admin withdraws from the penalty pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyWithdrawnEvent {
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when settling reward on mature unstake is switched on or off.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimOnUnstakeSetEvent {
    pub enabled: bool,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    stake_token: Address,
    rewards_wallet: Address,
    exit_penalty: u32,
    tier_count: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            stake_token,
            rewards_wallet,
            exit_penalty,
            tier_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, owner: Address, stake_id: u64, amount: i128, unlock_at: u64) {
    env.events().publish(
        (symbol_short!("STAKED"), owner.clone()),
        StakedEvent {
            owner,
            stake_id,
            amount,
            unlock_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, owner: Address, stake_id: u64, amount: i128, days: u32) {
    env.events().publish(
        (symbol_short!("CLAIMED"), owner.clone()),
        RewardClaimedEvent {
            owner,
            stake_id,
            amount,
            days,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, owner: Address, stake_id: u64, amount: i128, reward: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), owner.clone()),
        UnstakedEvent {
            owner,
            stake_id,
            amount,
            reward,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_unstaked(
    env: &Env,
    owner: Address,
    stake_id: u64,
    amount: i128,
    fee: i128,
) {
    env.events().publish(
        (symbol_short!("EMRG_UNST"), owner.clone()),
        EmergencyUnstakedEvent {
            owner,
            stake_id,
            amount,
            fee,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_wallet_set(env: &Env, wallet: Address) {
    env.events().publish(
        (symbol_short!("RWD_WALL"),),
        RewardsWalletSetEvent {
            wallet,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tier_set(env: &Env, days: u32, rate_percent: u32, added: bool) {
    env.events().publish(
        (symbol_short!("TIER_SET"),),
        TierSetEvent {
            days,
            rate_percent,
            added,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_exit_penalty_set(env: &Env, percent: u32) {
    env.events().publish(
        (symbol_short!("PNLTY_SET"),),
        ExitPenaltySetEvent {
            percent,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_penalty_withdrawn(env: &Env, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("PNLTY_WD"), to.clone()),
        PenaltyWithdrawnEvent {
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claim_on_unstake_set(env: &Env, enabled: bool) {
    env.events().publish(
        (symbol_short!("CLM_CLOSE"),),
        ClaimOnUnstakeSetEvent {
            enabled,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
