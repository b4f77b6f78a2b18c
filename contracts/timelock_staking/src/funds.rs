//! Token movements in and out of custody.
//!
//! Every helper checks balance (and allowance, where one applies) before
//! calling the token, so a shortfall comes back as a typed error instead
//! of a host trap.

use soroban_sdk::{log, token, Address, Env};

use crate::ContractError;

/// Tokens currently held by this contract.
pub fn custody_balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

/// Pull `amount` from `from` into custody using the allowance `from` granted
/// to this contract.
pub fn pull_deposit(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    let custody = env.current_contract_address();

    let allowance = client.allowance(from, &custody);
    let balance = client.balance(from);
    if allowance < amount || balance < amount {
        log!(
            env,
            "deposit rejected: amount, allowance, balance",
            amount,
            allowance,
            balance
        );
        return Err(ContractError::TransferFailed);
    }

    client.transfer_from(&custody, from, &custody, &amount);
    Ok(())
}

/// Pay `amount` of reward from `wallet` to `to`, spending the allowance the
/// rewards wallet granted to this contract.
pub fn pay_reward(
    env: &Env,
    token: &Address,
    wallet: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    let custody = env.current_contract_address();

    let allowance = client.allowance(wallet, &custody);
    let balance = client.balance(wallet);
    if allowance < amount || balance < amount {
        log!(
            env,
            "reward payout rejected: amount, allowance, balance",
            amount,
            allowance,
            balance
        );
        return Err(ContractError::InsufficientRewardFunds);
    }

    client.transfer_from(&custody, wallet, to, &amount);
    Ok(())
}

/// Send `amount` out of custody to `to`.
pub fn release(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let held = custody_balance(env, token);
    if held < amount {
        log!(env, "release rejected: amount, held", amount, held);
        return Err(ContractError::InsufficientFunds);
    }

    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}
