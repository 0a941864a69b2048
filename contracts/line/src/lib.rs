#![no_std]

//! Revolving line of credit: multiple lenders fund positions in their own
//! tokens, the borrower draws against them, interest accrues per position and
//! repayment is strictly queue-ordered. A spigot extension claims pledged
//! revenue, trades it through an external venue and feeds the proceeds into
//! the same repayment primitive as direct deposits.
//!
//! # External boundaries
//! Price discovery, interest rate math, collateral health and trade execution
//! all live in other contracts. Token movement around the venue call is never
//! trusted — balances are snapshotted before and only deltas are accounted
//! afterwards. Any error return rolls back the whole invocation, so every
//! operation is all-or-nothing.

mod consent;
mod events;
mod external;
mod ledger;
mod queue;
mod spigot;
mod types;


use soroban_sdk::{contract, contractimpl, token, Address, Env, Symbol, Val, Vec};

use types::{ConsentAction, ContractError, CreditKey, CreditPosition, DataKey, LineStatus};

/// Revenue split forced onto the spigot while the line is liquidatable: all
/// revenue services debt, none reaches the borrower.
const MAX_SPLIT: u32 = 100;

/// Decimals assumed for tokens that do not answer a decimals query.
const DEFAULT_DECIMALS: u32 = 18;

fn read_address(env: &Env, key: &DataKey) -> Address {
    env.storage()
        .instance()
        .get(key)
        .expect("line not initialized")
}

fn read_borrower(env: &Env) -> Address {
    read_address(env, &DataKey::Borrower)
}

fn read_arbiter(env: &Env) -> Address {
    read_address(env, &DataKey::Arbiter)
}

fn read_oracle(env: &Env) -> Address {
    read_address(env, &DataKey::Oracle)
}

fn read_interest_engine(env: &Env) -> Address {
    read_address(env, &DataKey::InterestEngine)
}

fn read_spigot(env: &Env) -> Address {
    read_address(env, &DataKey::Spigot)
}

fn read_swap_target(env: &Env) -> Address {
    read_address(env, &DataKey::SwapTarget)
}

fn read_collateral(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Collateral)
}

fn read_deadline(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::Deadline)
        .expect("line not initialized")
}

fn read_default_split(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::DefaultSplit)
        .expect("line not initialized")
}

fn read_status(env: &Env) -> LineStatus {
    env.storage()
        .instance()
        .get(&DataKey::Status)
        .expect("line not initialized")
}

fn write_status(env: &Env, status: LineStatus) {
    env.storage().instance().set(&DataKey::Status, &status);
}

fn add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

/// Re-derives the line status from the deadline and the collateral health
/// signal. Terminal states short-circuit, so the check is safe to run
/// arbitrarily often. On the deadline edge into `Liquidatable` every open
/// position is accrued and reported as defaulted with its full outstanding
/// amount.
fn update_status(env: &Env) -> Result<LineStatus, ContractError> {
    let current = read_status(env);
    if matches!(current, LineStatus::Repaid | LineStatus::Insolvent) {
        return Ok(current);
    }

    let open = queue::read(env);
    let expired = !open.is_empty() && env.ledger().timestamp() >= read_deadline(env);
    let mut next = LineStatus::Active;
    if expired {
        next = LineStatus::Liquidatable;
    } else if let Some(escrow) = read_collateral(env) {
        if !external::collateral_is_healthy(env, &escrow) {
            next = LineStatus::Liquidatable;
        }
    }

    if next == current {
        return Ok(current);
    }
    if next == LineStatus::Liquidatable && expired {
        let engine = read_interest_engine(env);
        for key in open.iter() {
            if let Some(mut credit) = ledger::read_credit(env, &key) {
                ledger::accrue(env, &engine, &key, &mut credit)?;
                ledger::write_credit(env, &key, &credit);
                events::defaulted(env, &key, add(credit.principal, credit.interest_accrued)?);
            }
        }
    }
    write_status(env, next);
    events::status_changed(env, next);
    Ok(next)
}

/// Front-of-queue position with principal outstanding, or `NotBorrowing`.
/// Repayment and the revenue bridge only ever service the front.
fn borrowing_front(env: &Env) -> Result<(CreditKey, CreditPosition), ContractError> {
    let key = queue::front(env).ok_or(ContractError::NotBorrowing)?;
    let credit = ledger::get_credit(env, &key)?;
    if credit.principal == 0 {
        return Err(ContractError::NotBorrowing);
    }
    Ok((key, credit))
}

/// Refunds the lender and deletes the position; the last close settles the
/// whole line as repaid.
fn close_position(
    env: &Env,
    key: &CreditKey,
    credit: &CreditPosition,
) -> Result<(), ContractError> {
    if credit.principal > 0 {
        return Err(ContractError::CloseFailedWithPrincipal);
    }
    let refund = add(credit.deposit, credit.interest_repaid)?;
    ledger::remove_credit(env, key);
    queue::remove(env, key);
    if queue::len(env) == 0 {
        write_status(env, LineStatus::Repaid);
        events::status_changed(env, LineStatus::Repaid);
    }
    events::credit_closed(env, key, refund);
    if refund > 0 {
        token::Client::new(env, &key.token).transfer(
            &env.current_contract_address(),
            &key.lender,
            &refund,
        );
    }
    Ok(())
}

#[contract]
pub struct LineOfCredit;

#[contractimpl]
impl LineOfCredit {
    /// Initialize the line with its parties, external collaborators, time to
    /// live and the default revenue split the spigot reverts to while the
    /// line is healthy. `collateral` is an optional health oracle; without it
    /// only the deadline can make the line liquidatable.
    pub fn init(
        env: Env,
        borrower: Address,
        arbiter: Address,
        oracle: Address,
        interest_engine: Address,
        spigot: Address,
        swap_target: Address,
        collateral: Option<Address>,
        ttl: u64,
        default_split: u32,
    ) -> Result<(), ContractError> {
        let store = env.storage().instance();
        if store.has(&DataKey::Status) {
            return Err(ContractError::AlreadyInitialized);
        }
        if default_split > MAX_SPLIT {
            return Err(ContractError::InvalidAmount);
        }
        store.set(&DataKey::Borrower, &borrower);
        store.set(&DataKey::Arbiter, &arbiter);
        store.set(&DataKey::Oracle, &oracle);
        store.set(&DataKey::InterestEngine, &interest_engine);
        store.set(&DataKey::Spigot, &spigot);
        store.set(&DataKey::SwapTarget, &swap_target);
        if let Some(escrow) = collateral {
            store.set(&DataKey::Collateral, &escrow);
        }
        store.set(&DataKey::Deadline, &(env.ledger().timestamp() + ttl));
        store.set(&DataKey::DefaultSplit, &default_split);
        store.set(&DataKey::Status, &LineStatus::Active);
        Ok(())
    }

    /// Open a credit position: `lender` commits `amount` of `token` under the
    /// proposed rates. Needs matching calls from both the borrower and the
    /// lender; the second call executes and pulls the deposit into line
    /// custody. Returns `false` while the proposal still awaits the
    /// counterparty.
    pub fn add_credit(
        env: Env,
        caller: Address,
        drawn_rate: u32,
        facility_rate: u32,
        amount: i128,
        token_address: Address,
        lender: Address,
    ) -> Result<bool, ContractError> {
        caller.require_auth();
        if update_status(&env)? != LineStatus::Active {
            return Err(ContractError::NotActive);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let borrower = read_borrower(&env);
        let action = ConsentAction::AddCredit(
            drawn_rate,
            facility_rate,
            amount,
            token_address.clone(),
            lender.clone(),
        );
        if !consent::mutual_consent(&env, &action, &borrower, &lender, &caller)? {
            return Ok(false);
        }

        let key = CreditKey {
            lender: lender.clone(),
            token: token_address.clone(),
        };
        if ledger::has_credit(&env, &key) {
            return Err(ContractError::PositionExists);
        }
        if external::oracle_price(&env, &read_oracle(&env), &token_address) <= 0 {
            return Err(ContractError::NoTokenPrice);
        }
        let token_client = token::Client::new(&env, &token_address);
        let decimals = match token_client.try_decimals() {
            Ok(Ok(d)) => d,
            _ => DEFAULT_DECIMALS,
        };

        let credit = CreditPosition {
            lender: lender.clone(),
            token: token_address.clone(),
            decimals,
            deposit: amount,
            principal: 0,
            interest_accrued: 0,
            interest_repaid: 0,
        };
        ledger::write_credit(&env, &key, &credit);
        queue::push_back(&env, &key);
        external::set_rate(&env, &read_interest_engine(&env), &key, drawn_rate, facility_rate);
        events::credit_added(&env, &key, amount, drawn_rate, facility_rate);
        token_client.transfer(&lender, &env.current_contract_address(), &amount);
        Ok(true)
    }

    /// Grow an existing position by `amount`, optionally drawing `principal`
    /// of it straight to the borrower. Mutual consent keyed by the existing
    /// position.
    pub fn increase_credit(
        env: Env,
        caller: Address,
        lender: Address,
        token_address: Address,
        amount: i128,
        principal: i128,
    ) -> Result<bool, ContractError> {
        caller.require_auth();
        if update_status(&env)? != LineStatus::Active {
            return Err(ContractError::NotActive);
        }
        if amount <= 0 || principal < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if principal > amount {
            return Err(ContractError::TokenTransferFailed);
        }
        let key = CreditKey {
            lender: lender.clone(),
            token: token_address.clone(),
        };
        let mut credit = ledger::get_credit(&env, &key)?;
        let borrower = read_borrower(&env);
        let action = ConsentAction::IncreaseCredit(key.clone(), amount, principal);
        if !consent::mutual_consent(&env, &action, &borrower, &key.lender, &caller)? {
            return Ok(false);
        }

        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        credit.deposit = add(credit.deposit, amount)?;
        if principal > 0 {
            credit.principal = add(credit.principal, principal)?;
        }
        ledger::write_credit(&env, &key, &credit);
        events::credit_increased(&env, &key, amount);

        let token_client = token::Client::new(&env, &token_address);
        let line = env.current_contract_address();
        token_client.transfer(&lender, &line, &amount);
        if principal > 0 {
            queue::sort_on_draw(&env, &key);
            events::borrowed(&env, &key, principal, credit.principal);
            token_client.transfer(&line, &borrower, &principal);
        }
        Ok(true)
    }

    /// Agree new drawn/facility rates for a position. Accrues at the old
    /// rates first so no interest is rewritten retroactively.
    pub fn set_rates(
        env: Env,
        caller: Address,
        lender: Address,
        token_address: Address,
        drawn_rate: u32,
        facility_rate: u32,
    ) -> Result<bool, ContractError> {
        caller.require_auth();
        let key = CreditKey {
            lender,
            token: token_address,
        };
        let mut credit = ledger::get_credit(&env, &key)?;
        let borrower = read_borrower(&env);
        let action = ConsentAction::SetRates(key.clone(), drawn_rate, facility_rate);
        if !consent::mutual_consent(&env, &action, &borrower, &key.lender, &caller)? {
            return Ok(false);
        }
        let engine = read_interest_engine(&env);
        ledger::accrue(&env, &engine, &key, &mut credit)?;
        ledger::write_credit(&env, &key, &credit);
        external::set_rate(&env, &engine, &key, drawn_rate, facility_rate);
        events::rates_set(&env, &key, drawn_rate, facility_rate);
        Ok(true)
    }

    /// Draw `amount` from a position to the borrower. Fails `NoLiquidity`
    /// past the undrawn deposit, and `NotActive` if the draw itself leaves
    /// the line unhealthy. The position is re-sorted ahead of undrawn
    /// positions in the repayment queue.
    pub fn borrow(
        env: Env,
        caller: Address,
        lender: Address,
        token_address: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let borrower = read_borrower(&env);
        if caller != borrower {
            return Err(ContractError::CallerAccessDenied);
        }
        if update_status(&env)? != LineStatus::Active {
            return Err(ContractError::NotActive);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let key = CreditKey {
            lender,
            token: token_address.clone(),
        };
        let mut credit = ledger::get_credit(&env, &key)?;
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;

        let available = credit
            .deposit
            .checked_sub(credit.principal)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if amount > available {
            return Err(ContractError::NoLiquidity);
        }
        credit.principal = add(credit.principal, amount)?;
        ledger::write_credit(&env, &key, &credit);
        queue::sort_on_draw(&env, &key);
        if update_status(&env)? != LineStatus::Active {
            return Err(ContractError::NotActive);
        }
        events::borrowed(&env, &key, amount, credit.principal);
        token::Client::new(&env, &token_address).transfer(
            &env.current_contract_address(),
            &borrower,
            &amount,
        );
        Ok(())
    }

    /// Repay the front-of-queue position with `amount` pulled from the
    /// caller. Open to anyone; interest settles before principal.
    pub fn deposit_and_repay(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let (key, mut credit) = borrowing_front(&env)?;
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        let owed = add(credit.principal, credit.interest_accrued)?;
        if amount > owed {
            return Err(ContractError::RepayAmountExceedsDebt);
        }
        token::Client::new(&env, &key.token).transfer(
            &caller,
            &env.current_contract_address(),
            &amount,
        );
        ledger::repay(&env, &key, &mut credit, amount)
    }

    /// Settle the front position in full from the borrower and close it.
    pub fn deposit_and_close(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        let borrower = read_borrower(&env);
        if caller != borrower {
            return Err(ContractError::CallerAccessDenied);
        }
        let key = queue::front(&env).ok_or(ContractError::NotBorrowing)?;
        let mut credit = ledger::get_credit(&env, &key)?;
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        let owed = add(credit.principal, credit.interest_accrued)?;
        if owed > 0 {
            token::Client::new(&env, &key.token).transfer(
                &borrower,
                &env.current_contract_address(),
                &owed,
            );
            ledger::repay(&env, &key, &mut credit, owed)?;
        }
        close_position(&env, &key, &credit)
    }

    /// Close a position once its principal is zero. Lender or borrower only.
    /// Accrued-but-unpaid interest settles from the borrower before the
    /// lender is refunded deposit plus repaid interest.
    pub fn close(
        env: Env,
        caller: Address,
        lender: Address,
        token_address: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let key = CreditKey {
            lender,
            token: token_address,
        };
        let mut credit = ledger::get_credit(&env, &key)?;
        let borrower = read_borrower(&env);
        if caller != credit.lender && caller != borrower {
            return Err(ContractError::CallerAccessDenied);
        }
        if credit.principal > 0 {
            return Err(ContractError::CloseFailedWithPrincipal);
        }
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        let facility_fee = credit.interest_accrued;
        if facility_fee > 0 {
            token::Client::new(&env, &key.token).transfer(
                &borrower,
                &env.current_contract_address(),
                &facility_fee,
            );
            ledger::repay(&env, &key, &mut credit, facility_fee)?;
        }
        close_position(&env, &key, &credit)
    }

    /// Withdraw up to the lender's unborrowed deposit plus repaid interest.
    /// Repaid interest is drawn down first; the two parts are reported
    /// separately but paid in one transfer.
    pub fn withdraw(
        env: Env,
        lender: Address,
        token_address: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        lender.require_auth();
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let key = CreditKey {
            lender: lender.clone(),
            token: token_address.clone(),
        };
        let mut credit = ledger::get_credit(&env, &key)?;
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        if amount > ledger::withdrawable(&credit)? {
            return Err(ContractError::NoLiquidity);
        }
        let from_interest = if amount < credit.interest_repaid {
            amount
        } else {
            credit.interest_repaid
        };
        let from_deposit = amount - from_interest;
        credit.interest_repaid -= from_interest;
        credit.deposit -= from_deposit;
        ledger::write_credit(&env, &key, &credit);
        if from_interest > 0 {
            events::profit_withdrawn(&env, &key, from_interest);
        }
        if from_deposit > 0 {
            events::deposit_withdrawn(&env, &key, from_deposit);
        }
        token::Client::new(&env, &token_address).transfer(
            &env.current_contract_address(),
            &lender,
            &amount,
        );
        Ok(())
    }

    /// Withdraw the lender's entire repaid-interest balance. Returns the
    /// amount paid out.
    pub fn withdraw_interest(
        env: Env,
        lender: Address,
        token_address: Address,
    ) -> Result<i128, ContractError> {
        lender.require_auth();
        let key = CreditKey {
            lender: lender.clone(),
            token: token_address.clone(),
        };
        let mut credit = ledger::get_credit(&env, &key)?;
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        let amount = credit.interest_repaid;
        credit.interest_repaid = 0;
        ledger::write_credit(&env, &key, &credit);
        if amount > 0 {
            events::profit_withdrawn(&env, &key, amount);
            token::Client::new(&env, &token_address).transfer(
                &env.current_contract_address(),
                &lender,
                &amount,
            );
        }
        Ok(amount)
    }

    /// Run accrual for one position and persist it. Open to anyone.
    pub fn accrue_interest(
        env: Env,
        lender: Address,
        token_address: Address,
    ) -> Result<(), ContractError> {
        let key = CreditKey {
            lender,
            token: token_address,
        };
        let mut credit = ledger::get_credit(&env, &key)?;
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        ledger::write_credit(&env, &key, &credit);
        Ok(())
    }

    /// Accrue every open position and return the oracle-priced totals of
    /// (principal, accrued interest) across the line. Tokens without a
    /// price contribute zero.
    pub fn update_outstanding_debt(env: Env) -> Result<(i128, i128), ContractError> {
        let engine = read_interest_engine(&env);
        let oracle = read_oracle(&env);
        let mut principal_value: i128 = 0;
        let mut interest_value: i128 = 0;
        for key in queue::read(&env).iter() {
            let mut credit = ledger::get_credit(&env, &key)?;
            ledger::accrue(&env, &engine, &key, &mut credit)?;
            ledger::write_credit(&env, &key, &credit);
            principal_value = add(
                principal_value,
                ledger::token_value(&env, &oracle, &credit, credit.principal)?,
            )?;
            interest_value = add(
                interest_value,
                ledger::token_value(&env, &oracle, &credit, credit.interest_accrued)?,
            )?;
        }
        Ok((principal_value, interest_value))
    }

    /// Re-evaluate and return the line status. Idempotent; anyone may call.
    pub fn health_check(env: Env) -> Result<LineStatus, ContractError> {
        update_status(&env)
    }

    /// Arbiter-only: mark a liquidatable line insolvent. Terminal.
    pub fn declare_insolvent(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        if caller != read_arbiter(&env) {
            return Err(ContractError::CallerAccessDenied);
        }
        if update_status(&env)? != LineStatus::Liquidatable {
            return Err(ContractError::NotActive);
        }
        write_status(&env, LineStatus::Insolvent);
        events::status_changed(&env, LineStatus::Insolvent);
        Ok(())
    }

    /// Claim revenue for `claim_token`, trade it into the front position's
    /// token and park the proceeds as unused value. Borrower or arbiter only;
    /// requires an active drawn position. Returns the amount bought.
    pub fn claim_and_trade(
        env: Env,
        caller: Address,
        claim_token: Address,
        trade_func: Symbol,
        trade_args: Vec<Val>,
    ) -> Result<i128, ContractError> {
        caller.require_auth();
        if caller != read_borrower(&env) && caller != read_arbiter(&env) {
            return Err(ContractError::CallerAccessDenied);
        }
        let (_, credit) = borrowing_front(&env)?;
        let (_claimed, bought) = spigot::claim_and_trade(
            &env,
            &read_spigot(&env),
            &read_swap_target(&env),
            &claim_token,
            &credit.token,
            &trade_func,
            trade_args,
        )?;
        spigot::set_unused_tokens(
            &env,
            &credit.token,
            add(spigot::unused_tokens(&env, &credit.token), bought)?,
        );
        Ok(bought)
    }

    /// Claim, trade and immediately apply the proceeds — topped up from any
    /// unused balance — to the front position, capped at what it is owed.
    /// Surplus beyond the debt parks as unused value for a later call.
    /// Returns the amount repaid.
    pub fn claim_and_repay(
        env: Env,
        caller: Address,
        claim_token: Address,
        trade_func: Symbol,
        trade_args: Vec<Val>,
    ) -> Result<i128, ContractError> {
        caller.require_auth();
        if caller != read_borrower(&env) && caller != read_arbiter(&env) {
            return Err(ContractError::CallerAccessDenied);
        }
        let (key, mut credit) = borrowing_front(&env)?;
        let (_claimed, bought) = spigot::claim_and_trade(
            &env,
            &read_spigot(&env),
            &read_swap_target(&env),
            &claim_token,
            &credit.token,
            &trade_func,
            trade_args,
        )?;
        ledger::accrue(&env, &read_interest_engine(&env), &key, &mut credit)?;
        let owed = add(credit.principal, credit.interest_accrued)?;
        let repaid = spigot::reconcile_repayment(&env, &credit.token, bought, owed)?;
        ledger::repay(&env, &key, &mut credit, repaid)?;
        events::revenue_payment(&env, &credit.token, repaid);
        Ok(repaid)
    }

    /// Push the spigot's revenue split back in line with the line status:
    /// the configured default while active, everything while liquidatable.
    /// No-op (false) when already aligned or the line is settled.
    pub fn update_owner_split(
        env: Env,
        revenue_contract: Address,
    ) -> Result<bool, ContractError> {
        let spigot_address = read_spigot(&env);
        if !external::spigot_has_setting(&env, &spigot_address, &revenue_contract) {
            return Err(ContractError::NoSpigot);
        }
        let current = external::spigot_split(&env, &spigot_address, &revenue_contract);
        let target = match update_status(&env)? {
            LineStatus::Active => read_default_split(&env),
            LineStatus::Liquidatable => MAX_SPLIT,
            _ => return Ok(false),
        };
        if current == target {
            return Ok(false);
        }
        if !external::spigot_update_split(&env, &spigot_address, &revenue_contract, target) {
            return Err(ContractError::NoSpigot);
        }
        Ok(true)
    }

    /// Arbiter-only: change which revenue-contract functions the borrower
    /// may call through the spigot.
    pub fn update_whitelisted_function(
        env: Env,
        caller: Address,
        func: Symbol,
        allowed: bool,
    ) -> Result<bool, ContractError> {
        caller.require_auth();
        if caller != read_arbiter(&env) {
            return Err(ContractError::CallerAccessDenied);
        }
        Ok(external::spigot_update_whitelist(
            &env,
            &read_spigot(&env),
            &func,
            allowed,
        ))
    }

    /// Hand spigot ownership to whoever the resolution entitles: the
    /// borrower once repaid, the arbiter once liquidatable or insolvent.
    /// No-op (false) while the line is healthy and open.
    pub fn release_spigot(env: Env) -> Result<bool, ContractError> {
        let to = match update_status(&env)? {
            LineStatus::Repaid => read_borrower(&env),
            LineStatus::Liquidatable | LineStatus::Insolvent => read_arbiter(&env),
            LineStatus::Active => return Ok(false),
        };
        if !external::spigot_update_owner(&env, &read_spigot(&env), &to) {
            return Err(ContractError::NoSpigot);
        }
        events::spigot_released(&env, &to);
        Ok(true)
    }

    /// Sweep a token's unused balance out to whoever the resolution
    /// entitles, mirroring `release_spigot`. Returns the amount moved; zero
    /// while the line is healthy and open.
    pub fn sweep(env: Env, token_address: Address) -> Result<i128, ContractError> {
        let to = match update_status(&env)? {
            LineStatus::Repaid => read_borrower(&env),
            LineStatus::Liquidatable | LineStatus::Insolvent => read_arbiter(&env),
            LineStatus::Active => return Ok(0),
        };
        Ok(spigot::sweep_balance(&env, &token_address, &to))
    }

    // ── views ────────────────────────────────────────────────────────────

    pub fn get_credit(env: Env, lender: Address, token_address: Address) -> Option<CreditPosition> {
        ledger::read_credit(
            &env,
            &CreditKey {
                lender,
                token: token_address,
            },
        )
    }

    pub fn get_status(env: Env) -> LineStatus {
        read_status(&env)
    }

    /// What the lender could withdraw right now, before fresh accrual.
    pub fn available_funds(env: Env, lender: Address, token_address: Address) -> i128 {
        ledger::read_credit(
            &env,
            &CreditKey {
                lender,
                token: token_address,
            },
        )
        .and_then(|credit| ledger::withdrawable(&credit).ok())
        .unwrap_or(0)
    }

    pub fn next_in_queue(env: Env) -> Option<CreditKey> {
        queue::front(&env)
    }

    pub fn queue_length(env: Env) -> u32 {
        queue::len(&env)
    }

    pub fn unused_tokens(env: Env, token_address: Address) -> i128 {
        spigot::unused_tokens(&env, &token_address)
    }
}
