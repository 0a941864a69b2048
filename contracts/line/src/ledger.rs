//! Credit position ledger: storage access, interest accrual and the
//! repayment primitive shared by direct deposits and the revenue bridge.
//! Every mutating path accrues before it reads or changes principal or
//! interest — stale accrual breaks the accounting.

use soroban_sdk::{Address, Env};

use crate::events;
use crate::external;
use crate::queue;
use crate::types::{ContractError, CreditKey, CreditPosition, DataKey};

pub fn read_credit(env: &Env, key: &CreditKey) -> Option<CreditPosition> {
    env.storage().persistent().get(&DataKey::Credit(key.clone()))
}

pub fn get_credit(env: &Env, key: &CreditKey) -> Result<CreditPosition, ContractError> {
    read_credit(env, key).ok_or(ContractError::PositionNotFound)
}

pub fn write_credit(env: &Env, key: &CreditKey, credit: &CreditPosition) {
    env.storage()
        .persistent()
        .set(&DataKey::Credit(key.clone()), credit);
}

pub fn remove_credit(env: &Env, key: &CreditKey) {
    env.storage().persistent().remove(&DataKey::Credit(key.clone()));
}

pub fn has_credit(env: &Env, key: &CreditKey) -> bool {
    env.storage().persistent().has(&DataKey::Credit(key.clone()))
}

fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Pulls newly-owed interest from the engine and adds it to the position.
/// Mutates in memory only; the caller persists once its own changes are done.
pub fn accrue(
    env: &Env,
    engine: &Address,
    key: &CreditKey,
    credit: &mut CreditPosition,
) -> Result<(), ContractError> {
    let accrued = external::accrue_interest(env, engine, key, credit.principal, credit.deposit);
    if accrued > 0 {
        credit.interest_accrued = checked_add(credit.interest_accrued, accrued)?;
        events::interest_accrued(env, key, accrued);
    }
    Ok(())
}

/// Applies a payment already in line custody, interest first. If the payment
/// clears the whole principal, the queue front is stepped so the next drawn
/// position takes priority — all repayment paths service the front position.
/// Performs no token transfer and persists the position.
pub fn repay(
    env: &Env,
    key: &CreditKey,
    credit: &mut CreditPosition,
    amount: i128,
) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    if amount <= credit.interest_accrued {
        credit.interest_accrued -= amount;
        credit.interest_repaid = checked_add(credit.interest_repaid, amount)?;
        events::interest_repaid(env, key, amount);
    } else {
        let interest = credit.interest_accrued;
        let principal_payment = amount - interest;
        if principal_payment > credit.principal {
            return Err(ContractError::RepayAmountExceedsDebt);
        }
        credit.interest_accrued = 0;
        credit.interest_repaid = checked_add(credit.interest_repaid, interest)?;
        credit.principal -= principal_payment;
        if interest > 0 {
            events::interest_repaid(env, key, interest);
        }
        events::principal_repaid(env, key, principal_payment);
        if credit.principal == 0 {
            queue::step(env);
        }
    }
    write_credit(env, key, credit);
    Ok(())
}

/// What the lender may take out right now: undrawn deposit plus repaid
/// interest.
pub fn withdrawable(credit: &CreditPosition) -> Result<i128, ContractError> {
    checked_add(credit.deposit, credit.interest_repaid)?
        .checked_sub(credit.principal)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Oracle valuation of a token amount, normalized by the position's decimals.
/// A non-positive oracle answer values as zero rather than aborting a
/// line-wide debt figure.
pub fn token_value(
    env: &Env,
    oracle: &Address,
    credit: &CreditPosition,
    amount: i128,
) -> Result<i128, ContractError> {
    let price = external::oracle_price(env, oracle, &credit.token);
    if price <= 0 {
        return Ok(0);
    }
    let scale = 10_i128
        .checked_pow(credit.decimals)
        .ok_or(ContractError::ArithmeticOverflow)?;
    amount
        .checked_mul(price)
        .ok_or(ContractError::ArithmeticOverflow)?
        .checked_div(scale)
        .ok_or(ContractError::ArithmeticOverflow)
}
