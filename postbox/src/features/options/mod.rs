mod action;
pub mod catalog;
mod effects;
mod errors;
mod field;
mod model;
pub mod selectors;
mod state;
mod storage;

pub use action::OptionsAction;
pub use catalog::{IdleTimeout, ZoomPreset};
pub use effects::patch_base_settings;
pub use errors::{FieldError, OptionsError, StorageError};
pub use field::{BaseField, BaseSettingsPatch, FieldValue};
pub use model::{BaseConfig, Config, LayoutMode, LogLevel, is_valid_hex_color};
pub use state::{OptionsProgress, OptionsState, reduce};
pub use storage::{
    ConfigLoad, ConfigLoadStatus, ConfigStorage, FileConfigStorage,
    MemoryConfigStorage, default_settings_dir,
};
