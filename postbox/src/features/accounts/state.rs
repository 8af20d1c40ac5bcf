use super::action::AccountsAction;

/// Mail account as seen by the settings pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub login: String,
    pub logged_in: bool,
    pub unread: usize,
}

impl Account {
    pub fn new(
        login: impl Into<String>,
        logged_in: bool,
        unread: usize,
    ) -> Self {
        Self {
            login: login.into(),
            logged_in,
            unread,
        }
    }
}

/// Accounts slice of the application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountsState {
    pub accounts: Vec<Account>,
}

/// Reduce an accounts action; `None` when the slice did not change.
pub fn reduce(
    state: &AccountsState,
    action: &AccountsAction,
) -> Option<AccountsState> {
    let mut next = state.clone();

    match action {
        AccountsAction::Patch(account) => {
            match next
                .accounts
                .iter_mut()
                .find(|existing| existing.login == account.login)
            {
                Some(existing) => *existing = account.clone(),
                None => next.accounts.push(account.clone()),
            }
        },
        AccountsAction::Remove { login } => {
            next.accounts.retain(|account| &account.login != login);
        },
    }

    (next != *state).then_some(next)
}
