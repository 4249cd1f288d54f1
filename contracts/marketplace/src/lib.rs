//! Marketplace Contract
//!
//! Registers digital products and sells time-metered subscriptions to them,
//! paid in a SEP-41 token. Product owners set a per-second price and a
//! beneficiary; buyers approve the marketplace as a spender and `buy` seconds
//! of access, which are paid straight to the beneficiary with `transfer_from`.
//! Access is checked with `has_valid_subscription` against ledger time.
//!
//! ## Storage Strategy
//! - `instance()`: Admin, the pending admin candidate, Token and the Halted
//!   flag. Small, fixed config shared in one ledger entry with a single TTL,
//!   bumped by every state-changing call.
//! - `persistent()`: one Product per id and one SubscriptionRecord per
//!   (product, subscriber). Each is a separate ledger entry with its own TTL,
//!   bumped on every write. Subscription entries are extended to outlive
//!   their expiry.
//!
//! ## Authorization
//! Every mutating entry point takes the acting account as an explicit
//! `caller` argument, calls `require_auth` on it and compares it against the
//! stored owner, candidate or subscriber. There is no ambient caller.
//!
//! ## Invariants
//! - A product id is registered at most once; deletion keeps the record,
//!   its owner and its id.
//! - NotDeployed products cannot be bought, granted or updated.
//! - Subscription time is never duplicated: a transfer zeroes the sender.
//! - A failed call writes nothing and publishes no event.
#![no_std]
#![allow(unexpected_cfgs)]

mod admin;
mod events;
mod payment;
mod registry;
mod storage;
mod subscriptions;
pub mod types;

pub use events::*;
pub use types::*;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String};

use registry::ProductTerms;

#[contract]
pub struct Marketplace;

#[contractimpl]
impl Marketplace {
    // -----------------------------------------------------------------------
    // Admin / Config
    // -----------------------------------------------------------------------

    /// Initialize the marketplace. May only be called once.
    ///
    /// `token` is the SEP-41 token every `buy` is paid in.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        admin::do_init(&env, admin, token)
    }

    /// Stop new products, purchases, grants and transfers. Admin only.
    pub fn halt(env: Env, admin: Address) -> Result<(), Error> {
        admin::do_set_halted(&env, admin, true)
    }

    /// Lift a halt. Admin only.
    pub fn resume(env: Env, admin: Address) -> Result<(), Error> {
        admin::do_set_halted(&env, admin, false)
    }

    /// Nominate `candidate` as the next admin. Admin only; replaces any
    /// pending nomination.
    pub fn offer_admin(env: Env, admin: Address, candidate: Address) -> Result<(), Error> {
        admin::do_offer_admin(&env, admin, candidate)
    }

    /// Accept a pending nomination. Only the nominated address may claim.
    pub fn claim_admin(env: Env, caller: Address) -> Result<(), Error> {
        admin::do_claim_admin(&env, caller)
    }

    pub fn admin_candidate(env: Env) -> Option<Address> {
        storage::get_admin_candidate(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        storage::get_token(&env)
    }

    pub fn is_halted(env: Env) -> bool {
        storage::is_halted(&env)
    }

    // -----------------------------------------------------------------------
    // Product registry
    // -----------------------------------------------------------------------

    /// Register product `id` owned by `caller`.
    ///
    /// Fails with `AlreadyExists` if `id` was ever registered, including
    /// products that have since been deleted.
    #[allow(clippy::too_many_arguments)]
    pub fn create_product(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        name: String,
        beneficiary: Address,
        price_per_second: i128,
        currency: Currency,
        minimum_subscription_seconds: u64,
    ) -> Result<(), Error> {
        registry::create_product(
            &env,
            caller,
            id,
            ProductTerms {
                name,
                beneficiary,
                price_per_second,
                currency,
                minimum_subscription_seconds,
            },
        )
    }

    /// Overwrite the terms of a Deployed product. Owner only.
    #[allow(clippy::too_many_arguments)]
    pub fn update_product(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        name: String,
        beneficiary: Address,
        price_per_second: i128,
        currency: Currency,
        minimum_subscription_seconds: u64,
    ) -> Result<(), Error> {
        registry::update_product(
            &env,
            caller,
            id,
            ProductTerms {
                name,
                beneficiary,
                price_per_second,
                currency,
                minimum_subscription_seconds,
            },
        )
    }

    /// Soft-delete: Deployed -> NotDeployed. Data and ownership are kept.
    pub fn delete_product(env: Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
        registry::delete_product(&env, caller, id)
    }

    /// NotDeployed -> Deployed. `NotFound` if the id was never registered.
    pub fn redeploy_product(env: Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
        registry::redeploy_product(&env, caller, id)
    }

    /// First half of the ownership handshake. Replaces any pending offer.
    pub fn offer_product_ownership(
        env: Env,
        caller: Address,
        id: BytesN<32>,
        candidate: Address,
    ) -> Result<(), Error> {
        registry::offer_product_ownership(&env, caller, id, candidate)
    }

    /// Second half of the handshake; only the pending candidate may claim.
    pub fn claim_product_ownership(env: Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
        registry::claim_product_ownership(&env, caller, id)
    }

    /// Never fails. Unknown ids return a zero record with `exists = false`.
    pub fn get_product(env: Env, id: BytesN<32>) -> ProductInfo {
        registry::get_product(&env, id)
    }

    // -----------------------------------------------------------------------
    // Subscriptions
    // -----------------------------------------------------------------------

    /// Buy `seconds` of access to `product_id` for `caller`.
    ///
    /// Costs `seconds * price_per_second`, pulled from `caller` to the
    /// product beneficiary through the marketplace's token allowance. Time is
    /// added to the later of now and the current expiry.
    pub fn buy(env: Env, caller: Address, product_id: BytesN<32>, seconds: u64) -> Result<(), Error> {
        subscriptions::buy(&env, caller, product_id, seconds)
    }

    /// Give `recipient` free access. Product owner only.
    pub fn grant_subscription(
        env: Env,
        caller: Address,
        product_id: BytesN<32>,
        seconds: u64,
        recipient: Address,
    ) -> Result<(), Error> {
        subscriptions::grant_subscription(&env, caller, product_id, seconds, recipient)
    }

    /// Move all of `caller`'s remaining time to `to`, stacking onto any time
    /// `to` already has. `caller` expires immediately.
    pub fn transfer_subscription(
        env: Env,
        caller: Address,
        product_id: BytesN<32>,
        to: Address,
    ) -> Result<(), Error> {
        subscriptions::transfer_subscription(&env, caller, product_id, to)
    }

    pub fn get_subscription(env: Env, product_id: BytesN<32>, subscriber: Address) -> SubscriptionInfo {
        subscriptions::get_subscription(&env, &product_id, &subscriber)
    }

    /// `get_subscription` with `caller` as the subscriber.
    pub fn get_subscription_to(env: Env, caller: Address, product_id: BytesN<32>) -> SubscriptionInfo {
        subscriptions::get_subscription(&env, &product_id, &caller)
    }

    pub fn has_valid_subscription(env: Env, product_id: BytesN<32>, subscriber: Address) -> bool {
        subscriptions::has_valid_subscription(&env, &product_id, &subscriber)
    }
}
