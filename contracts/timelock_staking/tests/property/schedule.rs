//! Property-based tests for the per-stake reward and exit arithmetic.
//!
//! Invariants tested:
//! - `daily_reward * lock_days` never exceeds `amount * rate / 100`
//! - Claims over any split of time never pay more than the fixed return
//! - Early exit always keeps `floor(amount * penalty / 100)` in custody
//! - Unstake fails before `unlock_at` and succeeds exactly once from then on
//! - Non-positive deposits are always rejected without touching counters

use proptest::prelude::*;
use soroban_sdk::testutils::Ledger as _;
use timelock_staking::ContractError;

use crate::harness::{Harness, DAY, TIER_DAYS, TIER_RATES, UNIT};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_daily_reward_never_overpays(
        amount in 1i128..=1_000_000 * UNIT,
        tier in 0usize..TIER_DAYS.len(),
    ) {
        let h = Harness::new(5);
        let staker = h.new_staker(amount);

        let id = h.client.stake(&staker, &amount, &TIER_DAYS[tier]);
        let stake = h.client.get_stake(&id);

        let fixed_return = amount * i128::from(TIER_RATES[tier]) / 100;
        prop_assert!(stake.daily_reward * i128::from(stake.lock_days) <= fixed_return);
        prop_assert!(stake.daily_reward >= 0);
    }

    #[test]
    fn prop_claims_bounded_by_fixed_return(
        amount in UNIT..=10_000 * UNIT,
        tier in 0usize..TIER_DAYS.len(),
        gaps in proptest::collection::vec(0u64..=120 * DAY, 1..8),
    ) {
        let h = Harness::new(5);
        let staker = h.new_staker(amount);
        let id = h.client.stake(&staker, &amount, &TIER_DAYS[tier]);

        let mut paid = 0i128;
        let mut days_left = TIER_DAYS[tier];
        for gap in gaps {
            h.advance(gap);
            paid += h.client.claim_rewards(&staker, &id);

            let stake = h.client.get_stake(&id);
            prop_assert!(stake.days_to_reward <= days_left);
            days_left = stake.days_to_reward;
        }

        let stake = h.client.get_stake(&id);
        let consumed = i128::from(TIER_DAYS[tier] - stake.days_to_reward);
        prop_assert_eq!(paid, stake.daily_reward * consumed);
        prop_assert!(paid <= amount * i128::from(TIER_RATES[tier]) / 100);
    }

    #[test]
    fn prop_emergency_fee_is_floor_of_penalty(
        amount in 1i128..=100_000 * UNIT,
        penalty in 1u32..=100,
        elapsed in 0u64..=400 * DAY,
        tier in 0usize..TIER_DAYS.len(),
    ) {
        let h = Harness::new(penalty);
        let staker = h.new_staker(amount);
        let id = h.client.stake(&staker, &amount, &TIER_DAYS[tier]);

        h.advance(elapsed);
        let fee = h.client.emergency_unstake(&staker, &id);

        prop_assert_eq!(fee, amount * i128::from(penalty) / 100);
        prop_assert_eq!(h.balance(&staker), amount - fee);
        prop_assert_eq!(h.balance(&h.client.address), fee);
        prop_assert_eq!(h.client.get_penalty_pool(), fee);
        prop_assert_eq!(h.client.currently_staked(), 0);
    }

    #[test]
    fn prop_unstake_respects_maturity(
        tier in 0usize..TIER_DAYS.len(),
        early_by in 1u64..=30 * DAY,
        late_by in 0u64..=30 * DAY,
    ) {
        let h = Harness::new(5);
        let staker = h.new_staker(UNIT);
        let id = h.client.stake(&staker, &UNIT, &TIER_DAYS[tier]);
        let unlock_at = h.client.get_stake(&id).unlock_at;

        h.env.ledger().set_timestamp(unlock_at.saturating_sub(early_by));
        match h.client.try_unstake(&staker, &id) {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::NotMatured),
            _ => prop_assert!(false, "Expected NotMatured error"),
        }

        h.env.ledger().set_timestamp(unlock_at + late_by);
        prop_assert!(h.client.try_unstake(&staker, &id).is_ok());
        match h.client.try_unstake(&staker, &id) {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::AlreadyClosed),
            _ => prop_assert!(false, "Expected AlreadyClosed error"),
        }
        prop_assert_eq!(h.balance(&staker), UNIT);
    }

    #[test]
    fn prop_non_positive_stake_rejected(amount in -1_000_000 * UNIT..=0i128) {
        let h = Harness::new(5);
        let staker = h.new_staker(UNIT);

        match h.client.try_stake(&staker, &amount, &30) {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::InvalidAmount),
            _ => prop_assert!(false, "Expected InvalidAmount error"),
        }
        prop_assert_eq!(h.client.total_stakes(), 0);
        prop_assert_eq!(h.balance(&staker), UNIT);
    }
}
