use super::state::Account;

/// Actions handled by the accounts reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountsAction {
    /// Insert the account or replace the one with the same login.
    Patch(Account),
    Remove { login: String },
}
