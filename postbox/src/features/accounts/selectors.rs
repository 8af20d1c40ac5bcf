//! Read-only projections of the accounts slice.

use crate::state::AppState;

/// Unread messages across logged-in accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnreadSummary {
    /// At least one account is not logged in.
    pub has_logged_out: bool,
    pub unread: usize,
}

pub fn logged_in_and_unread_summary(state: &AppState) -> UnreadSummary {
    state
        .accounts
        .accounts
        .iter()
        .fold(UnreadSummary::default(), |summary, account| UnreadSummary {
            has_logged_out: summary.has_logged_out || !account.logged_in,
            unread: summary.unread
                + if account.logged_in { account.unread } else { 0 },
        })
}

#[cfg(test)]
mod tests {
    use super::{UnreadSummary, logged_in_and_unread_summary};
    use crate::features::accounts::{Account, AccountsState};
    use crate::state::AppState;

    #[test]
    fn given_mixed_accounts_then_only_logged_in_unread_is_counted() {
        let state = AppState {
            accounts: AccountsState {
                accounts: vec![
                    Account::new("a@example.com", true, 3),
                    Account::new("b@example.com", false, 10),
                    Account::new("c@example.com", true, 2),
                ],
            },
            ..AppState::default()
        };

        let summary = logged_in_and_unread_summary(&state);

        assert_eq!(
            summary,
            UnreadSummary {
                has_logged_out: true,
                unread: 5,
            }
        );
    }

    #[test]
    fn given_no_accounts_then_summary_is_empty() {
        let summary = logged_in_and_unread_summary(&AppState::default());

        assert_eq!(summary, UnreadSummary::default());
    }
}
