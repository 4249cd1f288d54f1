use soroban_sdk::{contractevent, Address, BytesN, String};

use crate::types::Currency;

#[contractevent]
pub struct MarketplaceInitialized {
    pub admin: Address,
    pub token: Address,
}

#[contractevent]
pub struct MarketplaceHalted {
    pub admin: Address,
}

#[contractevent]
pub struct MarketplaceResumed {
    pub admin: Address,
}

#[contractevent]
pub struct AdminOffered {
    #[topic]
    pub admin: Address,
    pub to: Address,
}

#[contractevent]
pub struct AdminChanged {
    #[topic]
    pub new_admin: Address,
    pub old_admin: Address,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[contractevent]
pub struct ProductCreated {
    #[topic]
    pub owner: Address,
    #[topic]
    pub id: BytesN<32>,
    pub name: String,
    pub beneficiary: Address,
    pub price_per_second: i128,
    pub currency: Currency,
    pub minimum_subscription_seconds: u64,
}

#[contractevent]
pub struct ProductUpdated {
    #[topic]
    pub owner: Address,
    #[topic]
    pub id: BytesN<32>,
    pub name: String,
    pub beneficiary: Address,
    pub price_per_second: i128,
    pub minimum_subscription_seconds: u64,
}

#[contractevent]
pub struct ProductDeleted {
    #[topic]
    pub id: BytesN<32>,
}

#[contractevent]
pub struct ProductRedeployed {
    #[topic]
    pub id: BytesN<32>,
}

#[contractevent]
pub struct ProductOwnershipOffered {
    #[topic]
    pub owner: Address,
    #[topic]
    pub id: BytesN<32>,
    pub to: Address,
}

#[contractevent]
pub struct ProductOwnershipChanged {
    #[topic]
    pub new_owner: Address,
    #[topic]
    pub id: BytesN<32>,
    pub old_owner: Address,
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

#[contractevent]
pub struct NewSubscription {
    #[topic]
    pub product_id: BytesN<32>,
    #[topic]
    pub subscriber: Address,
    pub end_timestamp: u64,
}

#[contractevent]
pub struct SubscriptionExtended {
    #[topic]
    pub product_id: BytesN<32>,
    #[topic]
    pub subscriber: Address,
    pub end_timestamp: u64,
}

#[contractevent]
pub struct SubscriptionTransferred {
    #[topic]
    pub product_id: BytesN<32>,
    pub from: Address,
    pub to: Address,
    pub seconds_transferred: u64,
}
