//! Fixed-schedule reward arithmetic.
//!
//! Everything here is a pure function of its arguments: no storage reads,
//! no ledger clock. The contract supplies `now` and applies the result.

use crate::ledger::Stake;

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Reward unit earned per whole elapsed day:
/// `amount * rate_percent / 100 / lock_days`, truncating at each step.
///
/// Returns `None` on overflow or when `lock_days` is zero.
pub fn daily_reward(amount: i128, rate_percent: u32, lock_days: u32) -> Option<i128> {
    if lock_days == 0 {
        return None;
    }
    amount
        .checked_mul(i128::from(rate_percent))?
        .checked_div(100)?
        .checked_div(i128::from(lock_days))
}

/// Outcome of an accrual: what is payable now and how many schedule days
/// that payment consumes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Accrual {
    pub reward: i128,
    pub days: u32,
}

/// Reward owed on `stake` at `now`.
///
/// Whole days since the last claim, capped at the days left on the
/// schedule. A clock that reads earlier than the last claim yields nothing.
pub fn accrue(stake: &Stake, now: u64) -> Accrual {
    let elapsed = now.saturating_sub(stake.last_reward_at) / SECONDS_PER_DAY;
    let days = elapsed.min(u64::from(stake.days_to_reward)) as u32;
    if days == 0 {
        return Accrual::default();
    }

    Accrual {
        reward: stake.daily_reward.saturating_mul(i128::from(days)),
        days,
    }
}
