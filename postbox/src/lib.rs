//! Base settings panel of the Postbox desktop mail client.
//!
//! The [`widgets::base_settings::BaseSettingsComponent`] binds a settings
//! form to the application store built by [`app::create_store`]. Changes
//! flow through store actions; effects persist them to `config.json`.

pub mod app;
pub mod cli;
pub mod features;
pub mod form;
pub mod host;
pub mod state;
pub mod widgets;
