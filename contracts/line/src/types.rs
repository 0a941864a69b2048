//! Core data types for the line-of-credit contract.

use soroban_sdk::{contracttype, Address};

/// Overall lifecycle status of the line. `Repaid` and `Insolvent` are
/// terminal; `Liquidatable` is reversible while the distress condition can
/// still clear.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineStatus {
    Active = 0,
    Liquidatable = 1,
    Repaid = 2,
    Insolvent = 3,
}

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    CallerAccessDenied = 2,
    PositionExists = 3,
    PositionNotFound = 4,
    NoTokenPrice = 5,
    NoLiquidity = 6,
    NotActive = 7,
    CloseFailedWithPrincipal = 8,
    TradeFailed = 9,
    TokenTransferFailed = 10,
    NotBorrowing = 11,
    NoSpigot = 12,
    InvalidAmount = 13,
    RepayAmountExceedsDebt = 14,
    ArithmeticOverflow = 15,
}

/// Identity of a credit position. Each deployed line has its own storage, so
/// the (lender, token) pair is unique for the position's lifetime within a
/// line; closing deletes the entry and a later add starts a fresh position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditKey {
    pub lender: Address,
    pub token: Address,
}

/// Stored financial state of one lender's credit position.
///
/// * `deposit` – total funds the lender has made available (drawn + undrawn).
/// * `principal` – currently drawn amount owed back to the lender.
/// * `interest_accrued` – interest owed but not yet repaid.
/// * `interest_repaid` – interest paid but not yet withdrawn by the lender.
///
/// `principal <= deposit` holds at all times.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditPosition {
    pub lender: Address,
    pub token: Address,
    /// Token display precision captured at creation, used for valuation.
    pub decimals: u32,
    pub deposit: i128,
    pub principal: i128,
    pub interest_accrued: i128,
    pub interest_repaid: i128,
}

/// A proposal that needs sign-off from both the borrower and the lender
/// before it executes. The full parameter set is part of the key so that
/// differing proposals never satisfy each other.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConsentAction {
    /// drawn rate, facility rate, deposit amount, token, lender
    AddCredit(u32, u32, i128, Address, Address),
    /// position, deposit amount, principal to draw
    IncreaseCredit(CreditKey, i128, i128),
    /// position, drawn rate, facility rate
    SetRates(CreditKey, u32, u32),
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // instance configuration, set once at init
    Borrower,
    Arbiter,
    Oracle,
    InterestEngine,
    Spigot,
    SwapTarget,
    Collateral,
    Deadline,
    DefaultSplit,
    Status,
    // persistent ledger state
    Queue,
    Credit(CreditKey),
    UnusedTokens(Address),
    // temporary two-party intents
    Consent(ConsentAction),
}
