//! Revenue-to-repayment bridge: claims escrowed revenue from the spigot,
//! trades it through the external venue, and tracks per-token value that was
//! bought (or left over) but not yet applied to debt. All debt mutation is
//! delegated back to the ledger's repayment primitive.
//!
//! The venue call is a reentrancy-hazardous boundary. Nothing is trusted
//! about it: balances are snapshotted before, and only the deltas afterwards
//! enter the accounting.

use soroban_sdk::{token, Address, Env, Symbol, Val, Vec};

use crate::events;
use crate::external;
use crate::types::{ContractError, DataKey};

/// ~1 day of ledgers; the venue allowance does not need to outlive the trade
/// by much.
const ALLOWANCE_TTL_LEDGERS: u32 = 17_280;

pub fn unused_tokens(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::UnusedTokens(token.clone()))
        .unwrap_or(0)
}

pub fn set_unused_tokens(env: &Env, token: &Address, amount: i128) {
    let key = DataKey::UnusedTokens(token.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
    }
}

fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Claims revenue for `claim_token`, lets the venue trade it into
/// `credit_token`, and returns `(claimed, bought)`.
///
/// `bought` is the credit-token balance delta and must be strictly positive —
/// no valid trade can fail to increase the balance of the token being bought.
/// Any claim-token residue left by a partial fill is credited to that token's
/// unused balance. The bought amount itself is NOT credited here; callers
/// decide whether it parks as unused or repays debt.
pub fn claim_and_trade(
    env: &Env,
    spigot: &Address,
    venue: &Address,
    claim_token: &Address,
    credit_token: &Address,
    trade_func: &Symbol,
    trade_args: Vec<Val>,
) -> Result<(i128, i128), ContractError> {
    let line = env.current_contract_address();
    let claim_client = token::Client::new(env, claim_token);
    let credit_client = token::Client::new(env, credit_token);

    let claim_before = claim_client.balance(&line);
    let credit_before = credit_client.balance(&line);

    let claimed = external::claim_escrow(env, spigot, claim_token);

    // the venue may sell everything we hold, not just this claim
    let sellable = checked_add(claim_before, claimed)?;
    if sellable > 0 {
        let live_until = env.ledger().sequence() + ALLOWANCE_TTL_LEDGERS;
        claim_client.approve(&line, venue, &sellable, &live_until);
    }

    external::venue_trade(env, venue, trade_func, trade_args)?;

    let credit_after = credit_client.balance(&line);
    let bought = credit_after
        .checked_sub(credit_before)
        .ok_or(ContractError::TradeFailed)?;
    if bought <= 0 {
        return Err(ContractError::TradeFailed);
    }

    if claim_token != credit_token {
        let claim_after = claim_client.balance(&line);
        if claim_after > claim_before {
            let residue = claim_after - claim_before;
            set_unused_tokens(
                env,
                claim_token,
                checked_add(unused_tokens(env, claim_token), residue)?,
            );
        }
    }

    events::revenue_traded(env, claim_token, claimed, credit_token, bought);
    Ok((claimed, bought))
}

/// Reconciles a trade's proceeds against what the front position is owed.
/// Returns the amount to hand to the repayment primitive, never more than
/// `owed`, and leaves the unused balance at
/// `unused_before + bought - repaid`.
pub fn reconcile_repayment(
    env: &Env,
    credit_token: &Address,
    bought: i128,
    owed: i128,
) -> Result<i128, ContractError> {
    let unused_before = unused_tokens(env, credit_token);
    let total = checked_add(bought, unused_before)?;
    let repaid = if total > owed { owed } else { total };
    set_unused_tokens(env, credit_token, total - repaid);
    Ok(repaid)
}

/// Moves the whole unused balance for `token` to `to` and zeroes it.
pub fn sweep_balance(env: &Env, token_address: &Address, to: &Address) -> i128 {
    let amount = unused_tokens(env, token_address);
    if amount > 0 {
        token::Client::new(env, token_address).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
        set_unused_tokens(env, token_address, 0);
        events::swept(env, token_address, amount, to);
    }
    amount
}
