use std::collections::BTreeMap;

use crate::features::accounts::UnreadSummary;
use crate::features::options::catalog::{
    IDLE_TIME_LOG_OUT_SEC_VALUES, LAYOUT_MODES, LOG_LEVELS, zoom_factors,
};
use crate::features::options::{
    BaseField, FieldValue, IdleTimeout, LayoutMode, LogLevel, ZoomPreset,
};
use crate::form::ValidationError;

/// Which color pickers are expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorPickers {
    pub bg: bool,
    pub text: bool,
    pub icon: bool,
}

impl ColorPickers {
    pub fn any_open(&self) -> bool {
        self.bg || self.text || self.icon
    }
}

/// Static option lists of the selects.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs {
    pub log_levels: &'static [LogLevel],
    pub layout_modes: &'static [LayoutMode],
    pub zoom_factors: Vec<ZoomPreset>,
    pub idle_time_log_out_sec_values: &'static [IdleTimeout],
}

impl Default for Catalogs {
    fn default() -> Self {
        Self {
            log_levels: &LOG_LEVELS,
            layout_modes: &LAYOUT_MODES,
            zoom_factors: zoom_factors(),
            idle_time_log_out_sec_values: &IDLE_TIME_LOG_OUT_SEC_VALUES,
        }
    }
}

/// Everything the base settings template renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSettingsView {
    /// A base settings patch is being stored.
    pub processing: bool,
    pub unread: UnreadSummary,
    pub tray_icon_color: String,
    pub unread_bg_color: String,
    pub unread_text_color: String,
    pub last_error: Option<String>,
    pub show_start_minimized_to_tray_issue_link: bool,
    pub appearance_block_collapsed: bool,
    pub color_picker_opened: ColorPickers,
    pub catalogs: Catalogs,
    pub values: BTreeMap<BaseField, FieldValue>,
    /// Errors of the invalid controls, empty when the form is valid.
    pub errors: BTreeMap<BaseField, Vec<ValidationError>>,
    pub valid: bool,
}
