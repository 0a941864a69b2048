//! Event types and topic constants for the line-of-credit contract.
//! Stable event schemas for indexing: every payload carries the position key
//! (or token) and amount, so the ledger can be reconstructed from the log.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::{CreditKey, LineStatus};

/// Event emitted when a credit position is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditAddedEvent {
    pub lender: Address,
    pub token: Address,
    pub deposit: i128,
    pub drawn_rate: u32,
    pub facility_rate: u32,
}

/// Event emitted when the borrower draws principal from a position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BorrowEvent {
    pub lender: Address,
    pub token: Address,
    pub amount: i128,
    pub principal: i128,
}

/// Per-position amount payload shared by the repayment, accrual, withdrawal,
/// close and default events. The topic pair distinguishes the event kind.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionAmountEvent {
    pub lender: Address,
    pub token: Address,
    pub amount: i128,
}

/// Event emitted when the line status changes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusChangedEvent {
    pub status: LineStatus,
}

/// Event emitted when both parties have agreed on new interest rates.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RatesSetEvent {
    pub lender: Address,
    pub token: Address,
    pub drawn_rate: u32,
    pub facility_rate: u32,
}

/// Event emitted when a one-sided proposal is recorded and now awaits the
/// counterparty's matching call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentRegisteredEvent {
    pub proposer: Address,
    pub pending: Address,
}

/// Event emitted when claimed revenue has been traded through the venue.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevenueTradeEvent {
    pub claim_token: Address,
    pub claimed: i128,
    pub credit_token: Address,
    pub bought: i128,
}

/// Event emitted when traded revenue has been applied to outstanding debt.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevenuePaymentEvent {
    pub token: Address,
    pub amount: i128,
}

/// Event emitted when spigot ownership is handed over at resolution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpigotReleasedEvent {
    pub to: Address,
}

/// Event emitted when an unused token balance is swept out at resolution.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SweepEvent {
    pub token: Address,
    pub amount: i128,
    pub to: Address,
}

fn position_amount(env: &Env, kind: Symbol, key: &CreditKey, amount: i128) {
    env.events().publish(
        (symbol_short!("credit"), kind),
        PositionAmountEvent {
            lender: key.lender.clone(),
            token: key.token.clone(),
            amount,
        },
    );
}

pub fn credit_added(env: &Env, key: &CreditKey, deposit: i128, drawn_rate: u32, facility_rate: u32) {
    env.events().publish(
        (symbol_short!("credit"), symbol_short!("added")),
        CreditAddedEvent {
            lender: key.lender.clone(),
            token: key.token.clone(),
            deposit,
            drawn_rate,
            facility_rate,
        },
    );
}

pub fn borrowed(env: &Env, key: &CreditKey, amount: i128, principal: i128) {
    env.events().publish(
        (symbol_short!("credit"), symbol_short!("borrowed")),
        BorrowEvent {
            lender: key.lender.clone(),
            token: key.token.clone(),
            amount,
            principal,
        },
    );
}

/// `amount` is the additional deposit the lender committed.
pub fn credit_increased(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("increased"), key, amount);
}

pub fn interest_accrued(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("accrued"), key, amount);
}

pub fn interest_repaid(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("repay_int"), key, amount);
}

pub fn principal_repaid(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("repay_prn"), key, amount);
}

pub fn deposit_withdrawn(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("wd_dep"), key, amount);
}

pub fn profit_withdrawn(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("wd_profit"), key, amount);
}

/// `amount` is the deposit + repaid interest refunded to the lender.
pub fn credit_closed(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("closed"), key, amount);
}

/// `amount` is the position's outstanding principal + accrued interest at the
/// moment the line went liquidatable.
pub fn defaulted(env: &Env, key: &CreditKey, amount: i128) {
    position_amount(env, symbol_short!("default"), key, amount);
}

pub fn status_changed(env: &Env, status: LineStatus) {
    env.events().publish(
        (symbol_short!("line"), symbol_short!("status")),
        StatusChangedEvent { status },
    );
}

pub fn rates_set(env: &Env, key: &CreditKey, drawn_rate: u32, facility_rate: u32) {
    env.events().publish(
        (symbol_short!("credit"), symbol_short!("rates")),
        RatesSetEvent {
            lender: key.lender.clone(),
            token: key.token.clone(),
            drawn_rate,
            facility_rate,
        },
    );
}

pub fn consent_registered(env: &Env, proposer: &Address, pending: &Address) {
    env.events().publish(
        (symbol_short!("line"), symbol_short!("consent")),
        ConsentRegisteredEvent {
            proposer: proposer.clone(),
            pending: pending.clone(),
        },
    );
}

pub fn revenue_traded(
    env: &Env,
    claim_token: &Address,
    claimed: i128,
    credit_token: &Address,
    bought: i128,
) {
    env.events().publish(
        (symbol_short!("spigot"), symbol_short!("trade")),
        RevenueTradeEvent {
            claim_token: claim_token.clone(),
            claimed,
            credit_token: credit_token.clone(),
            bought,
        },
    );
}

pub fn revenue_payment(env: &Env, token: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("spigot"), symbol_short!("payment")),
        RevenuePaymentEvent {
            token: token.clone(),
            amount,
        },
    );
}

pub fn spigot_released(env: &Env, to: &Address) {
    env.events().publish(
        (symbol_short!("spigot"), symbol_short!("release")),
        SpigotReleasedEvent { to: to.clone() },
    );
}

pub fn swept(env: &Env, token: &Address, amount: i128, to: &Address) {
    env.events().publish(
        (symbol_short!("spigot"), symbol_short!("sweep")),
        SweepEvent {
            token: token.clone(),
            amount,
            to: to.clone(),
        },
    );
}
