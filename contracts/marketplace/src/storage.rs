//! Typed accessors over contract storage.
//!
//! - `instance()`: admin, pending admin, token and halt flag. One entry,
//!   bumped by every write through this module, persistent writes included.
//! - `persistent()`: products and subscriptions. Each entry carries its own
//!   TTL and is bumped on write. Subscription entries are kept alive at least
//!   until they expire.

use soroban_sdk::{Address, BytesN, Env};

use crate::types::{
    DataKey, Error, Product, SubscriptionRecord, LEDGER_CLOSE_SECONDS, PERSISTENT_BUMP_LEDGERS,
    PERSISTENT_BUMP_THRESHOLD,
};

// ---------------------------------------------------------------------------
// Instance config
// ---------------------------------------------------------------------------

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn get_token(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(Error::NotInitialized)
}

pub fn is_halted(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Halted)
        .unwrap_or(false)
}

pub fn set_config(env: &Env, admin: &Address, token: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::Halted, &false);
    bump_instance(env);
}

pub fn set_halted(env: &Env, halted: bool) {
    env.storage().instance().set(&DataKey::Halted, &halted);
    bump_instance(env);
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
    bump_instance(env);
}

pub fn get_admin_candidate(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::AdminCandidate)
}

pub fn set_admin_candidate(env: &Env, candidate: Option<&Address>) {
    let instance = env.storage().instance();
    match candidate {
        Some(candidate) => instance.set(&DataKey::AdminCandidate, candidate),
        None => instance.remove(&DataKey::AdminCandidate),
    }
    bump_instance(env);
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(PERSISTENT_BUMP_THRESHOLD, PERSISTENT_BUMP_LEDGERS);
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub fn has_product(env: &Env, id: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Product(id.clone()))
}

pub fn get_product(env: &Env, id: &BytesN<32>) -> Option<Product> {
    env.storage()
        .persistent()
        .get(&DataKey::Product(id.clone()))
}

pub fn set_product(env: &Env, product: &Product) {
    let key = DataKey::Product(product.id.clone());
    env.storage().persistent().set(&key, product);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_BUMP_THRESHOLD,
        PERSISTENT_BUMP_LEDGERS,
    );
    bump_instance(env);
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// Expiry for a (product, subscriber) pair; never-subscribed reads as 0.
pub fn get_end_timestamp(env: &Env, product_id: &BytesN<32>, subscriber: &Address) -> u64 {
    env.storage()
        .persistent()
        .get::<_, SubscriptionRecord>(&DataKey::Subscription(
            product_id.clone(),
            subscriber.clone(),
        ))
        .map(|record| record.end_timestamp)
        .unwrap_or(0)
}

pub fn set_end_timestamp(
    env: &Env,
    product_id: &BytesN<32>,
    subscriber: &Address,
    end_timestamp: u64,
) {
    let key = DataKey::Subscription(product_id.clone(), subscriber.clone());
    env.storage()
        .persistent()
        .set(&key, &SubscriptionRecord { end_timestamp });

    // Extend whenever the entry would die before `extend_to`.
    let extend_to = subscription_ttl(env, end_timestamp);
    env.storage()
        .persistent()
        .extend_ttl(&key, extend_to, extend_to);
    bump_instance(env);
}

/// Ledgers an entry expiring at `end_timestamp` must live: the time left,
/// converted at the nominal close rate, plus the usual bump. Capped by the
/// network's max TTL.
fn subscription_ttl(env: &Env, end_timestamp: u64) -> u32 {
    let remaining = end_timestamp.saturating_sub(env.ledger().timestamp());
    let ledgers = u32::try_from(remaining / LEDGER_CLOSE_SECONDS).unwrap_or(u32::MAX);
    ledgers
        .saturating_add(PERSISTENT_BUMP_LEDGERS)
        .min(env.storage().max_ttl())
}
