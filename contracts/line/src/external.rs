//! Calls into the external contracts the line depends on: the price oracle,
//! the per-position interest accrual engine, the revenue spigot escrow, the
//! collateral health oracle and the swap venue. The venue is fully opaque —
//! callers hand over a function name and raw arguments, and the line reasons
//! only about token balance deltas around the call.

use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

use crate::types::{ContractError, CreditKey};

/// Latest signed price for `token`. A non-positive answer means the oracle
/// has no price.
pub fn oracle_price(env: &Env, oracle: &Address, token: &Address) -> i128 {
    env.invoke_contract(
        oracle,
        &Symbol::new(env, "get_latest_answer"),
        (token.clone(),).into_val(env),
    )
}

/// Interest newly owed on a position since the engine's last accrual point.
/// The engine is stateful per position; its rate math is not our concern.
pub fn accrue_interest(
    env: &Env,
    engine: &Address,
    key: &CreditKey,
    principal: i128,
    deposit: i128,
) -> i128 {
    env.invoke_contract(
        engine,
        &Symbol::new(env, "accrue_interest"),
        (key.clone(), principal, deposit).into_val(env),
    )
}

pub fn set_rate(env: &Env, engine: &Address, key: &CreditKey, drawn_rate: u32, facility_rate: u32) {
    let _: Val = env.invoke_contract(
        engine,
        &Symbol::new(env, "set_rate"),
        (key.clone(), drawn_rate, facility_rate).into_val(env),
    );
}

/// Pulls escrowed revenue for `token` out of the spigot. The spigot decides
/// the amount, pushes it to its owner (this line) and returns it.
pub fn claim_escrow(env: &Env, spigot: &Address, token: &Address) -> i128 {
    env.invoke_contract(
        spigot,
        &Symbol::new(env, "claim_escrow"),
        (token.clone(),).into_val(env),
    )
}

pub fn spigot_has_setting(env: &Env, spigot: &Address, revenue_contract: &Address) -> bool {
    env.invoke_contract(
        spigot,
        &Symbol::new(env, "has_setting"),
        (revenue_contract.clone(),).into_val(env),
    )
}

pub fn spigot_split(env: &Env, spigot: &Address, revenue_contract: &Address) -> u32 {
    env.invoke_contract(
        spigot,
        &Symbol::new(env, "get_split"),
        (revenue_contract.clone(),).into_val(env),
    )
}

pub fn spigot_update_split(
    env: &Env,
    spigot: &Address,
    revenue_contract: &Address,
    split: u32,
) -> bool {
    env.invoke_contract(
        spigot,
        &Symbol::new(env, "update_split"),
        (revenue_contract.clone(), split).into_val(env),
    )
}

pub fn spigot_update_owner(env: &Env, spigot: &Address, new_owner: &Address) -> bool {
    env.invoke_contract(
        spigot,
        &Symbol::new(env, "update_owner"),
        (new_owner.clone(),).into_val(env),
    )
}

pub fn spigot_update_whitelist(env: &Env, spigot: &Address, func: &Symbol, allowed: bool) -> bool {
    env.invoke_contract(
        spigot,
        &Symbol::new(env, "update_whitelist"),
        (func.clone(), allowed).into_val(env),
    )
}

pub fn collateral_is_healthy(env: &Env, escrow: &Address) -> bool {
    env.invoke_contract(escrow, &Symbol::new(env, "is_healthy"), Vec::new(env))
}

/// Runs the caller-supplied trade on the venue. Any failure inside the venue
/// surfaces as `TradeFailed`; success says nothing about what moved — the
/// caller must measure balances.
pub fn venue_trade(
    env: &Env,
    venue: &Address,
    func: &Symbol,
    args: Vec<Val>,
) -> Result<(), ContractError> {
    match env.try_invoke_contract::<Val, soroban_sdk::Error>(venue, func, args) {
        Ok(_) => Ok(()),
        Err(_) => Err(ContractError::TradeFailed),
    }
}
