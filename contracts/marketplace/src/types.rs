use soroban_sdk::{contracterror, contracttype, Address, BytesN, Env, String};

// ---------------------------------------------------------------------------
// TTL / storage constants
// ---------------------------------------------------------------------------

pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400; // ~30 days
pub const PERSISTENT_BUMP_THRESHOLD: u32 = PERSISTENT_BUMP_LEDGERS - 100_800; // Renew ~7 days early
pub const LEDGER_CLOSE_SECONDS: u64 = 5;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotAuthorized = 3,
    NotFound = 4,
    AlreadyExists = 5,
    NotOwner = 6,
    NotCandidate = 7,
    WrongState = 8,
    NotDeployedState = 9,
    InvalidAmount = 10,
    PaymentFailed = 11,
    NoActiveSubscription = 12,
    UnsupportedCurrency = 13,
    InvalidRecipient = 14,
    Halted = 15,
    Overflow = 16,
}

// ---------------------------------------------------------------------------
// Storage keys
// ---------------------------------------------------------------------------

/// Instance keys hold marketplace config; persistent keys hold one ledger
/// entry per product and per (product, subscriber) pair.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // --- instance() ---
    Admin,
    AdminCandidate,
    Token,
    Halted,
    // --- persistent() ---
    Product(BytesN<32>),
    Subscription(BytesN<32>, Address),
}

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// Unit a product is priced in. Only `Token` products can be bought; other
/// units are stored for display and never converted.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Currency {
    Token = 0,
    Usd = 1,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProductState {
    NotDeployed = 0, // Deleted (or, in views, never created)
    Deployed = 1,
}

/// Stored product record. Its presence under `DataKey::Product(id)` is what
/// makes a product exist; deletion only flips `state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    pub id: BytesN<32>,
    pub name: String,
    pub owner: Address,
    pub beneficiary: Address,
    /// Smallest token unit charged per second of access.
    pub price_per_second: i128,
    pub currency: Currency,
    /// Floor on the seconds granted when a subscription is (re)started.
    pub minimum_subscription_seconds: u64,
    pub state: ProductState,
    pub new_owner_candidate: Option<Address>,
}

/// Read view of a product. Unknown ids yield the zero record with
/// `exists = false` rather than an error.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductInfo {
    pub exists: bool,
    pub id: BytesN<32>,
    pub name: String,
    pub owner: Option<Address>,
    pub beneficiary: Option<Address>,
    pub price_per_second: i128,
    pub currency: Currency,
    pub minimum_subscription_seconds: u64,
    pub state: ProductState,
    pub new_owner_candidate: Option<Address>,
}

impl ProductInfo {
    pub fn missing(env: &Env, id: BytesN<32>) -> Self {
        ProductInfo {
            exists: false,
            id,
            name: String::from_str(env, ""),
            owner: None,
            beneficiary: None,
            price_per_second: 0,
            currency: Currency::Token,
            minimum_subscription_seconds: 0,
            state: ProductState::NotDeployed,
            new_owner_candidate: None,
        }
    }
}

impl From<Product> for ProductInfo {
    fn from(p: Product) -> Self {
        ProductInfo {
            exists: true,
            id: p.id,
            name: p.name,
            owner: Some(p.owner),
            beneficiary: Some(p.beneficiary),
            price_per_second: p.price_per_second,
            currency: p.currency,
            minimum_subscription_seconds: p.minimum_subscription_seconds,
            state: p.state,
            new_owner_candidate: p.new_owner_candidate,
        }
    }
}

/// Per-(product, subscriber) record. Stored as an absolute expiry so that
/// extending is a plain addition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionRecord {
    pub end_timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionInfo {
    /// `now < end_timestamp`.
    pub is_valid: bool,
    /// Expiry in seconds since epoch. 0 if never subscribed.
    pub end_timestamp: u64,
    pub seconds_remaining: u64,
}
