//! Property-based state machine tests for the staking ledger.
//!
//! Arbitrary interleavings of deposits, claims, mature exits, early exits
//! and clock jumps are applied across several stakers. After every step:
//! - `currently_staked` equals the principal of all open stakes
//! - custody holds exactly that principal plus the collected fees
//! - closed stakes have `days_to_reward == 0` and never reopen
//! - `days_to_reward` never increases
//! - `total_stakes` equals the number of successful deposits

use proptest::prelude::*;
use soroban_sdk::Address;
use timelock_staking::ContractError;

use crate::harness::{Harness, DAY, TIER_DAYS, UNIT};

const STAKERS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Stake { who: usize, amount: i128, tier: usize },
    Claim { who: usize, pick: u64 },
    Unstake { who: usize, pick: u64 },
    Emergency { who: usize, pick: u64 },
    Advance { seconds: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..STAKERS, 0i128..=500 * UNIT, 0..TIER_DAYS.len() + 1)
            .prop_map(|(who, amount, tier)| Op::Stake { who, amount, tier }),
        2 => (0..STAKERS, 0u64..8).prop_map(|(who, pick)| Op::Claim { who, pick }),
        2 => (0..STAKERS, 0u64..8).prop_map(|(who, pick)| Op::Unstake { who, pick }),
        1 => (0..STAKERS, 0u64..8).prop_map(|(who, pick)| Op::Emergency { who, pick }),
        2 => (0u64..=120 * DAY).prop_map(|seconds| Op::Advance { seconds }),
    ]
}

/// Shadow of the facts the contract must preserve.
struct Model {
    deposits: u64,
    fees: i128,
    was_closed: std::vec::Vec<bool>,
    days_left: std::vec::Vec<u32>,
}

fn check(h: &Harness, model: &Model) -> Result<(), TestCaseError> {
    prop_assert_eq!(h.client.total_stakes(), model.deposits);
    prop_assert_eq!(h.client.currently_staked(), h.open_principal());
    prop_assert_eq!(
        h.balance(&h.client.address),
        h.client.currently_staked() + model.fees
    );
    prop_assert_eq!(h.client.get_penalty_pool(), model.fees);

    for id in 1..=model.deposits {
        let stake = h.client.get_stake(&id);
        let slot = (id - 1) as usize;
        if model.was_closed[slot] {
            prop_assert!(!stake.open, "closed stake {} reopened", id);
        }
        if !stake.open {
            prop_assert_eq!(stake.days_to_reward, 0);
        }
        prop_assert!(stake.days_to_reward <= model.days_left[slot]);
    }
    Ok(())
}

fn record(h: &Harness, model: &mut Model) {
    for id in 1..=model.deposits {
        let stake = h.client.get_stake(&id);
        let slot = (id - 1) as usize;
        model.was_closed[slot] = !stake.open;
        model.days_left[slot] = stake.days_to_reward;
    }
}

/// Resolve `pick` to a stake id, preferring one owned by `who`.
fn target(h: &Harness, owner: &Address, pick: u64, deposits: u64) -> u64 {
    let owned = h.client.get_stake_ids(owner);
    if !owned.is_empty() && pick % 4 != 0 {
        return owned.get((pick as u32) % owned.len()).unwrap();
    }
    // Occasionally aim at someone else's stake or a missing id.
    pick % (deposits + 2)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_ledger_stays_consistent(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let h = Harness::new(5);
        let stakers: std::vec::Vec<Address> =
            (0..STAKERS).map(|_| h.new_staker(10_000 * UNIT)).collect();
        let mut model = Model {
            deposits: 0,
            fees: 0,
            was_closed: std::vec::Vec::new(),
            days_left: std::vec::Vec::new(),
        };

        for op in ops {
            match op {
                Op::Stake { who, amount, tier } => {
                    // `tier == TIER_DAYS.len()` exercises an unsupported duration.
                    let days = TIER_DAYS.get(tier).copied().unwrap_or(31);
                    match h.client.try_stake(&stakers[who], &amount, &days) {
                        Ok(Ok(id)) => {
                            model.deposits += 1;
                            prop_assert_eq!(id, model.deposits);
                            model.was_closed.push(false);
                            model.days_left.push(days);
                        }
                        Err(Ok(e)) => prop_assert!(
                            e == ContractError::InvalidAmount
                                || e == ContractError::UnsupportedDuration
                                || e == ContractError::TransferFailed,
                            "unexpected stake error {:?}", e
                        ),
                        other => prop_assert!(false, "unexpected stake result {:?}", other),
                    }
                }
                Op::Claim { who, pick } => {
                    let id = target(&h, &stakers[who], pick, model.deposits);
                    let _ = h.client.try_claim_rewards(&stakers[who], &id);
                }
                Op::Unstake { who, pick } => {
                    let id = target(&h, &stakers[who], pick, model.deposits);
                    let _ = h.client.try_unstake(&stakers[who], &id);
                }
                Op::Emergency { who, pick } => {
                    let id = target(&h, &stakers[who], pick, model.deposits);
                    if let Ok(Ok(fee)) = h.client.try_emergency_unstake(&stakers[who], &id) {
                        model.fees += fee;
                    }
                }
                Op::Advance { seconds } => h.advance(seconds),
            }

            check(&h, &model)?;
            record(&h, &mut model);
        }
    }
}
