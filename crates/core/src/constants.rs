/// Decimal precision for currency amounts
pub const CURRENCY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for share quantities
pub const SHARES_DECIMAL_PRECISION: u32 = 4;

/// Decimal precision for per-share cost basis
pub const PRICE_DECIMAL_PRECISION: u32 = 4;

/// Default absolute amount at which a transaction notifies the account owner
pub const DEFAULT_LARGE_TRANSACTION_THRESHOLD: &str = "1000";

/// Reference prefix for plain ledger transfers
pub const DEFAULT_REFERENCE_PREFIX: &str = "TXN";

/// Default page size for "recent" listings
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Username of the seeded demo user, accepted in place of its id
pub const DEMO_USERNAME: &str = "demo-user-123";
