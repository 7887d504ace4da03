pub mod decimal_utils;
pub mod time_utils;

pub use decimal_utils::*;
pub use time_utils::*;

/// Generates a new entity id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Builds a unique reference number such as `TXN-1A2B3C4D`.
pub fn reference_number(prefix: &str) -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, token[..8].to_uppercase())
}
