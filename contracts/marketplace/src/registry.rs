//! Product registry.
//!
//! ## State Machine
//!
//!   (none) --create--> Deployed --delete--> NotDeployed --redeploy--> Deployed
//!
//! Ownership runs alongside the lifecycle and survives deletion:
//!
//!   Owned(A) --offer(B)--> OfferPending(A, B) --claim by B--> Owned(B)
//!
//! A new offer replaces a pending one. Offers never expire.

use soroban_sdk::{Address, BytesN, Env, String};

use crate::admin;
use crate::events::{
    ProductCreated, ProductDeleted, ProductOwnershipChanged, ProductOwnershipOffered,
    ProductRedeployed, ProductUpdated,
};
use crate::storage;
use crate::types::{Currency, Error, Product, ProductInfo, ProductState};

/// Fields an owner sets on create and may overwrite on update.
pub struct ProductTerms {
    pub name: String,
    pub beneficiary: Address,
    pub price_per_second: i128,
    pub currency: Currency,
    pub minimum_subscription_seconds: u64,
}

impl ProductTerms {
    fn validate(&self) -> Result<(), Error> {
        if self.price_per_second < 0 || self.minimum_subscription_seconds == 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }
}

pub fn create_product(
    env: &Env,
    caller: Address,
    id: BytesN<32>,
    terms: ProductTerms,
) -> Result<(), Error> {
    admin::require_not_halted(env)?;
    caller.require_auth();

    // Deleted products keep their id and owner.
    if storage::has_product(env, &id) {
        return Err(Error::AlreadyExists);
    }
    terms.validate()?;

    let product = Product {
        id: id.clone(),
        name: terms.name.clone(),
        owner: caller.clone(),
        beneficiary: terms.beneficiary.clone(),
        price_per_second: terms.price_per_second,
        currency: terms.currency,
        minimum_subscription_seconds: terms.minimum_subscription_seconds,
        state: ProductState::Deployed,
        new_owner_candidate: None,
    };
    storage::set_product(env, &product);

    ProductCreated {
        owner: caller,
        id,
        name: terms.name,
        beneficiary: terms.beneficiary,
        price_per_second: terms.price_per_second,
        currency: terms.currency,
        minimum_subscription_seconds: terms.minimum_subscription_seconds,
    }
    .publish(env);

    Ok(())
}

pub fn update_product(
    env: &Env,
    caller: Address,
    id: BytesN<32>,
    terms: ProductTerms,
) -> Result<(), Error> {
    admin::require_initialized(env)?;
    let mut product = require_owned(env, &caller, &id)?;
    if product.state != ProductState::Deployed {
        return Err(Error::NotDeployedState);
    }
    terms.validate()?;

    product.name = terms.name.clone();
    product.beneficiary = terms.beneficiary.clone();
    product.price_per_second = terms.price_per_second;
    product.currency = terms.currency;
    product.minimum_subscription_seconds = terms.minimum_subscription_seconds;
    storage::set_product(env, &product);

    ProductUpdated {
        owner: caller,
        id,
        name: terms.name,
        beneficiary: terms.beneficiary,
        price_per_second: terms.price_per_second,
        minimum_subscription_seconds: terms.minimum_subscription_seconds,
    }
    .publish(env);

    Ok(())
}

pub fn delete_product(env: &Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
    admin::require_initialized(env)?;
    let mut product = require_owned(env, &caller, &id)?;
    if product.state != ProductState::Deployed {
        return Err(Error::WrongState);
    }

    product.state = ProductState::NotDeployed;
    storage::set_product(env, &product);

    ProductDeleted { id }.publish(env);

    Ok(())
}

pub fn redeploy_product(env: &Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
    admin::require_initialized(env)?;
    let mut product = require_owned(env, &caller, &id)?;
    if product.state != ProductState::NotDeployed {
        return Err(Error::WrongState);
    }

    product.state = ProductState::Deployed;
    storage::set_product(env, &product);

    ProductRedeployed { id }.publish(env);

    Ok(())
}

pub fn offer_product_ownership(
    env: &Env,
    caller: Address,
    id: BytesN<32>,
    candidate: Address,
) -> Result<(), Error> {
    admin::require_initialized(env)?;
    let mut product = require_owned(env, &caller, &id)?;

    product.new_owner_candidate = Some(candidate.clone());
    storage::set_product(env, &product);

    ProductOwnershipOffered {
        owner: caller,
        id,
        to: candidate,
    }
    .publish(env);

    Ok(())
}

pub fn claim_product_ownership(env: &Env, caller: Address, id: BytesN<32>) -> Result<(), Error> {
    admin::require_initialized(env)?;
    caller.require_auth();

    let mut product = storage::get_product(env, &id).ok_or(Error::NotFound)?;
    if product.new_owner_candidate.as_ref() != Some(&caller) {
        return Err(Error::NotCandidate);
    }

    let old_owner = product.owner.clone();
    product.owner = caller.clone();
    product.new_owner_candidate = None;
    storage::set_product(env, &product);

    ProductOwnershipChanged {
        new_owner: caller,
        id,
        old_owner,
    }
    .publish(env);

    Ok(())
}

pub fn get_product(env: &Env, id: BytesN<32>) -> ProductInfo {
    match storage::get_product(env, &id) {
        Some(product) => product.into(),
        None => ProductInfo::missing(env, id),
    }
}

/// Load `id` and check that `caller` owns it and signed the invocation.
pub(crate) fn require_owned(
    env: &Env,
    caller: &Address,
    id: &BytesN<32>,
) -> Result<Product, Error> {
    caller.require_auth();
    let product = storage::get_product(env, id).ok_or(Error::NotFound)?;
    if &product.owner != caller {
        return Err(Error::NotOwner);
    }
    Ok(product)
}
