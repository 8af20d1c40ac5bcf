use crate::features::accounts::{self, AccountsAction, AccountsState};
use crate::features::navigation::NavigationAction;
use crate::features::options::{self, OptionsAction, OptionsState};

/// Root application state held by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub options: OptionsState,
    pub accounts: AccountsState,
}

/// Every action the store accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Options(OptionsAction),
    Accounts(AccountsAction),
    Navigation(NavigationAction),
}

/// Root reducer delegating to the feature slices.
pub fn app_reducer(state: &AppState, action: &AppAction) -> Option<AppState> {
    match action {
        AppAction::Options(action) => {
            options::reduce(&state.options, action).map(|options| AppState {
                options,
                accounts: state.accounts.clone(),
            })
        },
        AppAction::Accounts(action) => accounts::reduce(&state.accounts, action)
            .map(|accounts| AppState {
                options: state.options.clone(),
                accounts,
            }),
        AppAction::Navigation(_) => None,
    }
}
