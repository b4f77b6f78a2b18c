#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{vec, Address, Env};
use timelock_staking::{Tier, TimelockStakingContract, TimelockStakingContractClient};

const UNIT: i128 = 10_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: i64, lock_days: u16 },
    ClaimRewards { stake_id: u8 },
    Unstake { stake_id: u8 },
    EmergencyUnstake { stake_id: u8 },
    Advance { hours: u16 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let contract_id = env.register(TimelockStakingContract, ());
    let client = TimelockStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let tiers = vec![
        &env,
        Tier { days: 14, rate_percent: 5 },
        Tier { days: 30, rate_percent: 10 },
        Tier { days: 90, rate_percent: 20 },
    ];
    client.initialize(&admin, &token, &tiers, &admin, &5);

    let mint = StellarAssetClient::new(&env, &token);
    let token_client = TokenClient::new(&env, &token);
    let mut users = vec![&env];
    for i in 0..4 {
        let user = if i == 0 { admin.clone() } else { Address::generate(&env) };
        mint.mint(&user, &(1_000_000 * UNIT));
        token_client.approve(&user, &contract_id, &(1_000_000 * UNIT), &1_000);
        users.push_back(user);
    }

    // Only the failure paths are interesting; the ledger must stay balanced either way.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = users.get(i as u32 % users.len()).unwrap();
        match action {
            FuzzAction::Stake { amount, lock_days } => {
                let _ = client.try_stake(&caller, &(amount as i128), &(lock_days as u32));
            }
            FuzzAction::ClaimRewards { stake_id } => {
                let _ = client.try_claim_rewards(&caller, &(stake_id as u64));
            }
            FuzzAction::Unstake { stake_id } => {
                let _ = client.try_unstake(&caller, &(stake_id as u64));
            }
            FuzzAction::EmergencyUnstake { stake_id } => {
                let _ = client.try_emergency_unstake(&caller, &(stake_id as u64));
            }
            FuzzAction::Advance { hours } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + hours as u64 * 3_600);
            }
        }

        let mut open = 0i128;
        for id in 1..=client.total_stakes() {
            let stake = client.get_stake(&id);
            if stake.open {
                open += stake.amount;
            } else {
                assert_eq!(stake.days_to_reward, 0);
            }
        }
        assert_eq!(client.currently_staked(), open);
        assert!(token_client.balance(&contract_id) >= open);
    }
});
