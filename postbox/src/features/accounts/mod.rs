mod action;
pub mod selectors;
mod state;

pub use action::AccountsAction;
pub use selectors::UnreadSummary;
pub use state::{Account, AccountsState, reduce};
