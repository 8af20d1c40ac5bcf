//! Read-only projections of the options slice.

use crate::state::AppState;

use super::model::{BaseConfig, Config};
use super::state::OptionsProgress;

pub fn progress(state: &AppState) -> OptionsProgress {
    state.options.progress
}

/// Full configuration including the revision marker.
pub fn featured_config(state: &AppState) -> Config {
    state.options.config.clone()
}

pub fn base_config(state: &AppState) -> BaseConfig {
    state.options.config.base.clone()
}

pub fn tray_icon_color(state: &AppState) -> String {
    state.options.config.base.custom_tray_icon_color.clone()
}

pub fn unread_bg_color(state: &AppState) -> String {
    state.options.config.base.custom_unread_bg_color.clone()
}

pub fn unread_text_color(state: &AppState) -> String {
    state.options.config.base.custom_unread_text_color.clone()
}

pub fn last_error(state: &AppState) -> Option<String> {
    state.options.last_error.clone()
}
