#![no_std]

pub mod events;
pub mod funds;
pub mod ledger;
pub mod rewards;
pub mod tiers;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol, Vec};

pub use ledger::Stake;
pub use tiers::Tier;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARDS_WALLET: Symbol = symbol_short!("RWD_WALL");
const EXIT_PENALTY: Symbol = symbol_short!("EXIT_PEN");
const CLAIM_ON_UNSTAKE: Symbol = symbol_short!("CLM_CLOSE");

const TTL_THRESHOLD: u32 = 1_036_800; // ~60 days
const TTL_EXTEND_TO: u32 = 6_220_800; // ~360 days

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    NotOwner = 4,
    InvalidAmount = 5,
    UnsupportedDuration = 6,
    InvalidPenalty = 7,
    InvalidTier = 8,
    NotFound = 9,
    AlreadyClosed = 10,
    NotMatured = 11,
    TransferFailed = 12,
    InsufficientRewardFunds = 13,
    InsufficientFunds = 14,
    NoPendingAdmin = 15,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TimelockStakingContract;

#[contractimpl]
impl TimelockStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `stake_token`    – token deposited as principal and paid as reward.
    /// * `tiers`          – initial lock durations and their fixed returns;
    ///                      list order becomes `get_lock_periods` order.
    /// * `rewards_wallet` – account that funds reward claims via allowance.
    /// * `exit_penalty`   – percent of principal kept on early exit (1..=100).
    pub fn initialize(
        env: Env,
        admin: Address,
        stake_token: Address,
        tiers: Vec<Tier>,
        rewards_wallet: Address,
        exit_penalty: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        Self::validate_penalty(exit_penalty)?;
        tiers::seed(&env, &tiers)?;

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARDS_WALLET, &rewards_wallet);
        env.storage().instance().set(&EXIT_PENALTY, &exit_penalty);
        // Stake counters start at zero; unwrap_or(0) covers the absent keys.
        Self::extend_instance_ttl(&env);

        events::publish_initialized(
            &env,
            admin,
            stake_token,
            rewards_wallet,
            exit_penalty,
            tiers.len(),
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` tokens for `lock_days` and return the new stake id.
    ///
    /// The caller must have approved this contract for at least `amount`.
    pub fn stake(
        env: Env,
        staker: Address,
        amount: i128,
        lock_days: u32,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let rate_percent =
            tiers::rate_for(&env, lock_days).ok_or(ContractError::UnsupportedDuration)?;
        let daily_reward = rewards::daily_reward(amount, rate_percent, lock_days)
            .ok_or(ContractError::InvalidAmount)?;
        let new_total = ledger::currently_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::InvalidAmount)?;

        let token = Self::stake_token(&env)?;
        funds::pull_deposit(&env, &token, &staker, amount)?;

        let now = env.ledger().timestamp();
        let stake = ledger::allocate(
            &env,
            &staker,
            ledger::Terms {
                amount,
                lock_days,
                rate_percent,
                daily_reward,
            },
            new_total,
            now,
        );
        Self::extend_instance_ttl(&env);

        events::publish_staked(&env, staker, stake.id, amount, stake.unlock_at);

        Ok(stake.id)
    }

    /// Pay out the reward accrued on `stake_id` since the last claim.
    ///
    /// Claiming before a full day has passed pays nothing but still succeeds
    /// and restarts the accrual clock. Returns the amount paid.
    pub fn claim_rewards(env: Env, staker: Address, stake_id: u64) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut stake = Self::load_open_stake(&env, &staker, stake_id)?;
        let now = env.ledger().timestamp();
        let accrual = rewards::accrue(&stake, now);

        if accrual.reward > 0 {
            let token = Self::stake_token(&env)?;
            let wallet = Self::rewards_wallet_address(&env)?;
            funds::pay_reward(&env, &token, &wallet, &staker, accrual.reward)?;
        }

        stake.last_reward_at = now;
        stake.days_to_reward = stake.days_to_reward.saturating_sub(accrual.days);
        ledger::store(&env, &stake);
        Self::extend_instance_ttl(&env);

        if accrual.reward > 0 {
            events::publish_reward_claimed(&env, staker, stake_id, accrual.reward, accrual.days);
        }

        Ok(accrual.reward)
    }

    /// Close a matured stake and return its principal.
    ///
    /// Unclaimed reward is forfeited unless claim-on-unstake is enabled, in
    /// which case it is paid from the rewards wallet first.
    pub fn unstake(env: Env, staker: Address, stake_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut stake = Self::load_open_stake(&env, &staker, stake_id)?;
        let now = env.ledger().timestamp();
        if now < stake.unlock_at {
            return Err(ContractError::NotMatured);
        }

        let token = Self::stake_token(&env)?;

        let mut reward = 0i128;
        if Self::get_claim_on_unstake(env.clone()) {
            reward = rewards::accrue(&stake, now).reward;
            if reward > 0 {
                let wallet = Self::rewards_wallet_address(&env)?;
                funds::pay_reward(&env, &token, &wallet, &staker, reward)?;
            }
        }

        funds::release(&env, &token, &staker, stake.amount)?;
        ledger::close(&env, &mut stake);
        Self::extend_instance_ttl(&env);

        events::publish_unstaked(&env, staker, stake_id, stake.amount, reward);

        Ok(())
    }

    /// Close a stake before maturity.
    ///
    /// `amount * exit_penalty / 100` stays in custody as penalty; the rest
    /// goes back to the owner. No reward is paid. Returns the fee kept.
    pub fn emergency_unstake(
        env: Env,
        staker: Address,
        stake_id: u64,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut stake = Self::load_open_stake(&env, &staker, stake_id)?;
        let fee = stake
            .amount
            .checked_mul(i128::from(Self::get_exit_penalty(env.clone())))
            .ok_or(ContractError::InvalidAmount)?
            / 100;
        let payout = stake.amount.saturating_sub(fee);

        if payout > 0 {
            let token = Self::stake_token(&env)?;
            funds::release(&env, &token, &staker, payout)?;
        }
        ledger::close(&env, &mut stake);
        Self::extend_instance_ttl(&env);

        events::publish_emergency_unstaked(&env, staker, stake_id, stake.amount, fee);

        Ok(fee)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Ids of every stake opened by `owner`, oldest first.
    pub fn get_stake_ids(env: Env, owner: Address) -> Vec<u64> {
        ledger::ids_for(&env, &owner)
    }

    pub fn get_stake(env: Env, stake_id: u64) -> Result<Stake, ContractError> {
        ledger::get(&env, stake_id).ok_or(ContractError::NotFound)
    }

    /// Reward a claim would pay at the current ledger time.
    pub fn get_pending_reward(env: Env, stake_id: u64) -> Result<i128, ContractError> {
        let stake = ledger::get(&env, stake_id).ok_or(ContractError::NotFound)?;
        if !stake.open {
            return Ok(0);
        }
        Ok(rewards::accrue(&stake, env.ledger().timestamp()).reward)
    }

    /// Sum of principal across open stakes.
    pub fn currently_staked(env: Env) -> i128 {
        ledger::currently_staked(&env)
    }

    /// Number of stakes ever opened.
    pub fn total_stakes(env: Env) -> u64 {
        ledger::total_stakes(&env)
    }

    /// Supported lock durations in the order they were added.
    pub fn get_lock_periods(env: Env) -> Vec<u32> {
        tiers::durations(&env)
    }

    pub fn get_rate(env: Env, lock_days: u32) -> Result<u32, ContractError> {
        tiers::rate_for(&env, lock_days).ok_or(ContractError::UnsupportedDuration)
    }

    pub fn get_rewards_wallet(env: Env) -> Result<Address, ContractError> {
        Self::rewards_wallet_address(&env)
    }

    pub fn get_exit_penalty(env: Env) -> u32 {
        env.storage().instance().get(&EXIT_PENALTY).unwrap_or(0)
    }

    pub fn get_claim_on_unstake(env: Env) -> bool {
        env.storage()
            .instance()
            .get(&CLAIM_ON_UNSTAKE)
            .unwrap_or(false)
    }

    /// Custody balance not backing open principal, i.e. collected penalties.
    pub fn get_penalty_pool(env: Env) -> Result<i128, ContractError> {
        let token = Self::stake_token(&env)?;
        Ok(Self::penalty_pool(&env, &token))
    }

    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        Self::stake_token(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        if new_admin != pending {
            return Err(ContractError::NotAuthorized);
        }

        let old_admin = Self::get_admin(env.clone())?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Change the account reward claims are funded from.
    pub fn set_rewards_wallet(
        env: Env,
        caller: Address,
        wallet: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&REWARDS_WALLET, &wallet);
        Self::extend_instance_ttl(&env);

        events::publish_rewards_wallet_set(&env, wallet);

        Ok(())
    }

    /// Add a lock duration (appended to `get_lock_periods`) or overwrite the
    /// rate of an existing one. Open stakes keep the rate they were opened at.
    pub fn modify_lock_periods(
        env: Env,
        caller: Address,
        lock_days: u32,
        rate_percent: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let added = tiers::upsert(&env, lock_days, rate_percent)?;
        Self::extend_instance_ttl(&env);

        events::publish_tier_set(&env, lock_days, rate_percent, added);

        Ok(())
    }

    /// Set the early-exit penalty. Zero is rejected rather than read as
    /// "no penalty".
    pub fn update_exit_penalty(env: Env, caller: Address, percent: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        Self::validate_penalty(percent)?;

        env.storage().instance().set(&EXIT_PENALTY, &percent);
        Self::extend_instance_ttl(&env);

        events::publish_exit_penalty_set(&env, percent);

        Ok(())
    }

    /// Toggle paying out accrued reward when a matured stake is closed.
    pub fn set_claim_on_unstake(
        env: Env,
        caller: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&CLAIM_ON_UNSTAKE, &enabled);
        Self::extend_instance_ttl(&env);

        events::publish_claim_on_unstake_set(&env, enabled);

        Ok(())
    }

    /// Withdraw collected exit penalties to `to`.
    ///
    /// The limit is the penalty pool (custody balance minus open principal),
    /// not the whole custody balance, so stakers' principal never leaves this
    /// way. An `amount` above the pool fails with `InsufficientFunds` even
    /// when custody alone could cover it.
    pub fn emergency_reward_withdraw(
        env: Env,
        caller: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let token = Self::stake_token(&env)?;
        if Self::penalty_pool(&env, &token) < amount {
            return Err(ContractError::InsufficientFunds);
        }

        funds::release(&env, &token, &to, amount)?;
        Self::extend_instance_ttl(&env);

        events::publish_penalty_withdrawn(&env, to, amount);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    fn validate_penalty(percent: u32) -> Result<(), ContractError> {
        if percent == 0 || percent > 100 {
            return Err(ContractError::InvalidPenalty);
        }
        Ok(())
    }

    /// Load `stake_id` and check it belongs to `caller` and is still open.
    fn load_open_stake(env: &Env, caller: &Address, stake_id: u64) -> Result<Stake, ContractError> {
        let stake = ledger::get(env, stake_id).ok_or(ContractError::NotFound)?;
        if stake.owner != *caller {
            return Err(ContractError::NotOwner);
        }
        if !stake.open {
            return Err(ContractError::AlreadyClosed);
        }
        Ok(stake)
    }

    fn stake_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn rewards_wallet_address(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARDS_WALLET)
            .ok_or(ContractError::NotInitialized)
    }

    fn penalty_pool(env: &Env, token: &Address) -> i128 {
        let held = funds::custody_balance(env, token);
        held.saturating_sub(ledger::currently_staked(env)).max(0)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
