//! Mutual-consent gate: a two-party commit over the exact parameters of a
//! position change. The first authorized caller records an intent keyed by
//! the full proposal; the action runs only once the counterparty calls with
//! matching parameters. Intents live in temporary storage and are consumed on
//! execution.

use soroban_sdk::{Address, Env};

use crate::events;
use crate::types::{ConsentAction, ContractError, DataKey};

/// Returns `Ok(true)` when both parties have now agreed and the caller should
/// execute the action, `Ok(false)` when only the caller's intent was
/// recorded (or re-recorded). Callers outside the two parties are rejected.
pub fn mutual_consent(
    env: &Env,
    action: &ConsentAction,
    party_a: &Address,
    party_b: &Address,
    caller: &Address,
) -> Result<bool, ContractError> {
    if caller != party_a && caller != party_b {
        return Err(ContractError::CallerAccessDenied);
    }
    let key = DataKey::Consent(action.clone());
    let store = env.storage().temporary();
    match store.get::<DataKey, Address>(&key) {
        Some(pending) if pending == *caller => {
            store.remove(&key);
            Ok(true)
        }
        // the original proposer calling again; intent stands unchanged
        Some(_) => Ok(false),
        None => {
            let other = if caller == party_a { party_b } else { party_a };
            store.set(&key, other);
            events::consent_registered(env, caller, other);
            Ok(false)
        }
    }
}
