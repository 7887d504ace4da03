use super::accounts_model::AccountType;

/// Prefix of generated account numbers
pub const ACCOUNT_NUMBER_PREFIX: &str = "FH";

/// Name given to loan accounts opened automatically on disbursement
pub const LOAN_ACCOUNT_NAME: &str = "Loan Account";

/// Returns the default display name for a given account type.
pub fn default_name_for_account_type(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Checking => "Checking Account",
        AccountType::Savings => "Savings Account",
        AccountType::Investment => "Investment Account",
        AccountType::Loan => LOAN_ACCOUNT_NAME,
    }
}

/// Returns true if the account type carries a liability (negative balance).
pub fn is_liability_type(account_type: AccountType) -> bool {
    account_type == AccountType::Loan
}
