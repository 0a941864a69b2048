//! Repayment queue: the ordered list of open position keys. Front = highest
//! repayment priority. Positions join at the back, fresh draws move forward
//! past undrawn positions, and repayment always services the front — the
//! borrower never picks which lender gets paid first.

use soroban_sdk::{Env, Vec};

use crate::ledger;
use crate::types::{CreditKey, DataKey};

pub fn read(env: &Env) -> Vec<CreditKey> {
    env.storage()
        .persistent()
        .get(&DataKey::Queue)
        .unwrap_or(Vec::new(env))
}

fn write(env: &Env, queue: &Vec<CreditKey>) {
    env.storage().persistent().set(&DataKey::Queue, queue);
}

pub fn len(env: &Env) -> u32 {
    read(env).len()
}

pub fn front(env: &Env) -> Option<CreditKey> {
    read(env).first()
}

pub fn push_back(env: &Env, key: &CreditKey) {
    let mut queue = read(env);
    queue.push_back(key.clone());
    write(env, &queue);
}

/// Moves a freshly-drawn position into the first slot currently held by an
/// undrawn position, preserving relative order among drawn positions. Single
/// left-to-right scan with at most one swap.
pub fn sort_on_draw(env: &Env, target: &CreditKey) {
    let mut queue = read(env);
    let mut open_slot: Option<u32> = None;
    for i in 0..queue.len() {
        let key = queue.get_unchecked(i);
        if key != *target {
            if open_slot.is_none() {
                let drawn = ledger::read_credit(env, &key)
                    .map(|c| c.principal > 0)
                    .unwrap_or(false);
                if !drawn {
                    open_slot = Some(i);
                }
            }
        } else {
            if let Some(slot) = open_slot {
                let displaced = queue.get_unchecked(slot);
                queue.set(i, displaced);
                queue.set(slot, target.clone());
                write(env, &queue);
            }
            return;
        }
    }
}

/// Rotates the front position to the back once its principal has been fully
/// repaid, so the next drawn position becomes first in line.
pub fn step(env: &Env) {
    let mut queue = read(env);
    if queue.len() < 2 {
        return;
    }
    if let Some(first) = queue.pop_front() {
        queue.push_back(first);
        write(env, &queue);
    }
}

/// Deletes a closed position's key, preserving the order of the remainder.
pub fn remove(env: &Env, target: &CreditKey) {
    let mut queue = read(env);
    if let Some(pos) = queue.iter().position(|key| key == *target) {
        queue.remove(pos as u32);
        write(env, &queue);
    }
}
