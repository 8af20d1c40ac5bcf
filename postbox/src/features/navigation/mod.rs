mod action;
mod effects;

pub use action::NavigationAction;
pub use effects::open_settings_folder;
