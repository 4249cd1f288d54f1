//! Subscription ledger.
//!
//! Each (product, subscriber) pair stores one absolute `end_timestamp`.
//! Time is always added to the later of `now` and the current expiry, so
//! top-ups bought before expiry stack instead of being clipped.
//!
//! `buy` runs validate -> pay -> write -> emit. Nothing is stored until the
//! token transfer has succeeded.

use soroban_sdk::{Address, BytesN, Env};

use crate::admin;
use crate::events::{NewSubscription, SubscriptionExtended, SubscriptionTransferred};
use crate::payment::Payment;
use crate::registry;
use crate::storage;
use crate::types::{Currency, Error, Product, ProductState, SubscriptionInfo};

// ---------------------------------------------------------------------------
// Time accounting
// ---------------------------------------------------------------------------

/// New expiry after adding `seconds` to a subscription ending at `end`.
pub fn extend_end_timestamp(now: u64, end: u64, seconds: u64) -> Result<u64, Error> {
    now.max(end).checked_add(seconds).ok_or(Error::Overflow)
}

pub fn seconds_remaining(now: u64, end: u64) -> u64 {
    end.saturating_sub(now)
}

pub fn subscription_info(now: u64, end: u64) -> SubscriptionInfo {
    SubscriptionInfo {
        is_valid: now < end,
        end_timestamp: end,
        seconds_remaining: seconds_remaining(now, end),
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

pub fn buy(env: &Env, caller: Address, product_id: BytesN<32>, seconds: u64) -> Result<(), Error> {
    admin::require_not_halted(env)?;
    caller.require_auth();

    let product = storage::get_product(env, &product_id).ok_or(Error::NotDeployedState)?;
    if product.state != ProductState::Deployed {
        return Err(Error::NotDeployedState);
    }
    if product.currency != Currency::Token {
        return Err(Error::UnsupportedCurrency);
    }

    let now = env.ledger().timestamp();
    let end = storage::get_end_timestamp(env, &product_id, &caller);
    check_purchase(&product, now, end, seconds)?;

    let cost = i128::from(seconds)
        .checked_mul(product.price_per_second)
        .ok_or(Error::Overflow)?;
    let new_end = extend_end_timestamp(now, end, seconds)?;

    let token = storage::get_token(env)?;
    Payment::new(env, &token).collect(&caller, &product.beneficiary, cost)?;

    storage::set_end_timestamp(env, &product_id, &caller, new_end);
    publish_extension(env, product_id, caller, now < end, new_end);

    Ok(())
}

/// Owner-issued time, no payment. Same minimum rules as `buy`.
pub fn grant_subscription(
    env: &Env,
    caller: Address,
    product_id: BytesN<32>,
    seconds: u64,
    recipient: Address,
) -> Result<(), Error> {
    admin::require_not_halted(env)?;
    let product = registry::require_owned(env, &caller, &product_id)?;
    if product.state != ProductState::Deployed {
        return Err(Error::NotDeployedState);
    }

    let now = env.ledger().timestamp();
    let end = storage::get_end_timestamp(env, &product_id, &recipient);
    check_purchase(&product, now, end, seconds)?;
    let new_end = extend_end_timestamp(now, end, seconds)?;

    storage::set_end_timestamp(env, &product_id, &recipient, new_end);
    publish_extension(env, product_id, recipient, now < end, new_end);

    Ok(())
}

pub fn transfer_subscription(
    env: &Env,
    caller: Address,
    product_id: BytesN<32>,
    to: Address,
) -> Result<(), Error> {
    admin::require_not_halted(env)?;
    caller.require_auth();

    if to == caller {
        return Err(Error::InvalidRecipient);
    }

    let now = env.ledger().timestamp();
    let from_end = storage::get_end_timestamp(env, &product_id, &caller);
    if now >= from_end {
        return Err(Error::NoActiveSubscription);
    }
    let remaining = seconds_remaining(now, from_end);

    let to_end = storage::get_end_timestamp(env, &product_id, &to);
    let new_to_end = extend_end_timestamp(now, to_end, remaining)?;

    storage::set_end_timestamp(env, &product_id, &to, new_to_end);
    storage::set_end_timestamp(env, &product_id, &caller, now);

    SubscriptionTransferred {
        product_id,
        from: caller,
        to,
        seconds_transferred: remaining,
    }
    .publish(env);

    Ok(())
}

pub fn get_subscription(env: &Env, product_id: &BytesN<32>, subscriber: &Address) -> SubscriptionInfo {
    let end = storage::get_end_timestamp(env, product_id, subscriber);
    subscription_info(env.ledger().timestamp(), end)
}

pub fn has_valid_subscription(env: &Env, product_id: &BytesN<32>, subscriber: &Address) -> bool {
    env.ledger().timestamp() < storage::get_end_timestamp(env, product_id, subscriber)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Zero is never a purchase. The product minimum only binds when the
/// subscription is being (re)started, not when topping up a live one.
fn check_purchase(product: &Product, now: u64, end: u64, seconds: u64) -> Result<(), Error> {
    if seconds == 0 {
        return Err(Error::InvalidAmount);
    }
    if now >= end && seconds < product.minimum_subscription_seconds {
        return Err(Error::InvalidAmount);
    }
    Ok(())
}

fn publish_extension(
    env: &Env,
    product_id: BytesN<32>,
    subscriber: Address,
    was_valid: bool,
    end_timestamp: u64,
) {
    if was_valid {
        SubscriptionExtended {
            product_id,
            subscriber,
            end_timestamp,
        }
        .publish(env);
    } else {
        NewSubscription {
            product_id,
            subscriber,
            end_timestamp,
        }
        .publish(env);
    }
}
