pub mod base_settings;
