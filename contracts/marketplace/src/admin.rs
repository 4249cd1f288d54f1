//! Marketplace config: one-time init, the halt switch and the two-step
//! admin handover.
//!
//!   Admin(A) --offer_admin(B)--> Pending(A, B) --claim_admin by B--> Admin(B)
//!
//! A new offer replaces a pending one. Until B claims, A keeps full rights.

use soroban_sdk::{log, Address, Env};

use crate::events::{
    AdminChanged, AdminOffered, MarketplaceHalted, MarketplaceInitialized, MarketplaceResumed,
};
use crate::storage;
use crate::types::Error;

pub fn do_init(env: &Env, admin: Address, token: Address) -> Result<(), Error> {
    if storage::is_initialized(env) {
        return Err(Error::AlreadyInitialized);
    }

    admin.require_auth();
    storage::set_config(env, &admin, &token);

    MarketplaceInitialized { admin, token }.publish(env);

    Ok(())
}

pub fn require_initialized(env: &Env) -> Result<(), Error> {
    if !storage::is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

/// Verify that `caller` is the stored admin and has signed the invocation.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = storage::get_admin(env)?;
    caller.require_auth();
    if caller != &admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

/// Gate for entry points that open new sales or move subscription time.
pub fn require_not_halted(env: &Env) -> Result<(), Error> {
    require_initialized(env)?;
    if storage::is_halted(env) {
        return Err(Error::Halted);
    }
    Ok(())
}

pub fn do_set_halted(env: &Env, admin: Address, halted: bool) -> Result<(), Error> {
    require_admin(env, &admin)?;
    storage::set_halted(env, halted);
    log!(env, "marketplace halted flag set", halted);

    if halted {
        MarketplaceHalted { admin }.publish(env);
    } else {
        MarketplaceResumed { admin }.publish(env);
    }

    Ok(())
}

pub fn do_offer_admin(env: &Env, admin: Address, candidate: Address) -> Result<(), Error> {
    require_admin(env, &admin)?;
    storage::set_admin_candidate(env, Some(&candidate));

    AdminOffered {
        admin,
        to: candidate,
    }
    .publish(env);

    Ok(())
}

pub fn do_claim_admin(env: &Env, caller: Address) -> Result<(), Error> {
    let old_admin = storage::get_admin(env)?;
    caller.require_auth();

    if storage::get_admin_candidate(env).as_ref() != Some(&caller) {
        return Err(Error::NotCandidate);
    }

    storage::set_admin(env, &caller);
    storage::set_admin_candidate(env, None);
    log!(env, "marketplace admin handed over", old_admin, caller);

    AdminChanged {
        new_admin: caller,
        old_admin,
    }
    .publish(env);

    Ok(())
}
