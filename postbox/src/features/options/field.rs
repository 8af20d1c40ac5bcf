use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::form::FormValue;

use super::errors::FieldError;
use super::model::{
    BaseConfig, LayoutMode, LogLevel, is_valid_hex_color, is_valid_zoom_factor,
};

/// Names of the controls on the base settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseField {
    CheckUpdateAndNotify,
    CloseToTray,
    LayoutMode,
    CustomTrayIconColor,
    CustomUnreadBgColor,
    CustomUnreadTextColor,
    DisableSpamNotifications,
    EnableHideControlsHotkey,
    FindInPage,
    FullTextSearch,
    HideControls,
    IdleTimeLogOutSec,
    LogLevel,
    StartHidden,
    UnreadNotifications,
    ZoomFactor,
}

impl BaseField {
    pub const ALL: [BaseField; 16] = [
        BaseField::CheckUpdateAndNotify,
        BaseField::CloseToTray,
        BaseField::LayoutMode,
        BaseField::CustomTrayIconColor,
        BaseField::CustomUnreadBgColor,
        BaseField::CustomUnreadTextColor,
        BaseField::DisableSpamNotifications,
        BaseField::EnableHideControlsHotkey,
        BaseField::FindInPage,
        BaseField::FullTextSearch,
        BaseField::HideControls,
        BaseField::IdleTimeLogOutSec,
        BaseField::LogLevel,
        BaseField::StartHidden,
        BaseField::UnreadNotifications,
        BaseField::ZoomFactor,
    ];

    /// Key used in the configuration file.
    pub fn key(&self) -> &'static str {
        match self {
            BaseField::CheckUpdateAndNotify => "checkUpdateAndNotify",
            BaseField::CloseToTray => "closeToTray",
            BaseField::LayoutMode => "layoutMode",
            BaseField::CustomTrayIconColor => "customTrayIconColor",
            BaseField::CustomUnreadBgColor => "customUnreadBgColor",
            BaseField::CustomUnreadTextColor => "customUnreadTextColor",
            BaseField::DisableSpamNotifications => "disableSpamNotifications",
            BaseField::EnableHideControlsHotkey => "enableHideControlsHotkey",
            BaseField::FindInPage => "findInPage",
            BaseField::FullTextSearch => "fullTextSearch",
            BaseField::HideControls => "hideControls",
            BaseField::IdleTimeLogOutSec => "idleTimeLogOutSec",
            BaseField::LogLevel => "logLevel",
            BaseField::StartHidden => "startHidden",
            BaseField::UnreadNotifications => "unreadNotifications",
            BaseField::ZoomFactor => "zoomFactor",
        }
    }

    /// Whether the form rejects an empty value for this field.
    pub fn is_required(&self) -> bool {
        matches!(self, BaseField::LogLevel)
    }
}

impl fmt::Display for BaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BaseField {
    type Err = FieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == value)
            .ok_or_else(|| FieldError::UnknownField(value.to_string()))
    }
}

/// Value held by one base settings control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Flag(bool),
    Color(String),
    Seconds(u32),
    Zoom(f64),
    Layout(LayoutMode),
    /// `None` until the control is seeded.
    LogLevel(Option<LogLevel>),
}

impl FormValue for FieldValue {
    fn is_empty(&self) -> bool {
        match self {
            FieldValue::LogLevel(level) => level.is_none(),
            FieldValue::Color(color) => color.is_empty(),
            _ => false,
        }
    }
}

impl FieldValue {
    /// Parse text input for `field`.
    pub fn parse(field: BaseField, raw: &str) -> Result<Self, FieldError> {
        let raw = raw.trim();
        let invalid = |reason: &'static str| FieldError::InvalidValue {
            field,
            value: raw.to_string(),
            reason,
        };

        match field {
            BaseField::LayoutMode => LayoutMode::from_name(raw)
                .map(FieldValue::Layout)
                .ok_or_else(|| invalid("expected top, left or left-thin")),
            BaseField::CustomTrayIconColor
            | BaseField::CustomUnreadBgColor
            | BaseField::CustomUnreadTextColor => {
                if raw.is_empty() || is_valid_hex_color(raw) {
                    Ok(FieldValue::Color(raw.to_string()))
                } else {
                    Err(invalid("expected #rrggbb or an empty value"))
                }
            },
            BaseField::IdleTimeLogOutSec => raw
                .parse::<u32>()
                .map(FieldValue::Seconds)
                .map_err(|_| invalid("expected whole seconds")),
            BaseField::LogLevel => LogLevel::from_name(raw)
                .map(|level| FieldValue::LogLevel(Some(level)))
                .ok_or_else(|| invalid("unknown log level")),
            BaseField::ZoomFactor => match raw.parse::<f64>() {
                Ok(value) if is_valid_zoom_factor(value) => {
                    Ok(FieldValue::Zoom(value))
                },
                _ => Err(invalid("expected a positive number")),
            },
            _ => parse_flag(raw)
                .map(FieldValue::Flag)
                .ok_or_else(|| invalid("expected true or false")),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Flag(value) => write!(f, "{value}"),
            FieldValue::Color(value) => f.write_str(value),
            FieldValue::Seconds(value) => write!(f, "{value}"),
            FieldValue::Zoom(value) => write!(f, "{value}"),
            FieldValue::Layout(mode) => f.write_str(mode.as_str()),
            FieldValue::LogLevel(Some(level)) => f.write_str(level.as_str()),
            FieldValue::LogLevel(None) => Ok(()),
        }
    }
}

/// Full set of base settings values as read from the form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseSettingsPatch {
    values: BTreeMap<BaseField, FieldValue>,
}

impl BaseSettingsPatch {
    pub fn new(values: BTreeMap<BaseField, FieldValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &BTreeMap<BaseField, FieldValue> {
        &self.values
    }

    pub fn get(&self, field: BaseField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply every value on top of `base`.
    pub fn apply_to(
        &self,
        base: &BaseConfig,
    ) -> Result<BaseConfig, FieldError> {
        let mut next = base.clone();
        for (field, value) in &self.values {
            next.apply(*field, value)?;
        }
        Ok(next)
    }
}

impl BaseConfig {
    /// Current value of one field.
    pub fn value_of(&self, field: BaseField) -> FieldValue {
        match field {
            BaseField::CheckUpdateAndNotify => {
                FieldValue::Flag(self.check_update_and_notify)
            },
            BaseField::CloseToTray => FieldValue::Flag(self.close_to_tray),
            BaseField::LayoutMode => FieldValue::Layout(self.layout_mode),
            BaseField::CustomTrayIconColor => {
                FieldValue::Color(self.custom_tray_icon_color.clone())
            },
            BaseField::CustomUnreadBgColor => {
                FieldValue::Color(self.custom_unread_bg_color.clone())
            },
            BaseField::CustomUnreadTextColor => {
                FieldValue::Color(self.custom_unread_text_color.clone())
            },
            BaseField::DisableSpamNotifications => {
                FieldValue::Flag(self.disable_spam_notifications)
            },
            BaseField::EnableHideControlsHotkey => {
                FieldValue::Flag(self.enable_hide_controls_hotkey)
            },
            BaseField::FindInPage => FieldValue::Flag(self.find_in_page),
            BaseField::FullTextSearch => {
                FieldValue::Flag(self.full_text_search)
            },
            BaseField::HideControls => FieldValue::Flag(self.hide_controls),
            BaseField::IdleTimeLogOutSec => {
                FieldValue::Seconds(self.idle_time_log_out_sec)
            },
            BaseField::LogLevel => FieldValue::LogLevel(Some(self.log_level)),
            BaseField::StartHidden => FieldValue::Flag(self.start_hidden),
            BaseField::UnreadNotifications => {
                FieldValue::Flag(self.unread_notifications)
            },
            BaseField::ZoomFactor => FieldValue::Zoom(self.zoom_factor),
        }
    }

    /// Every field with its current value.
    pub fn field_values(&self) -> BTreeMap<BaseField, FieldValue> {
        BaseField::ALL
            .into_iter()
            .map(|field| (field, self.value_of(field)))
            .collect()
    }

    /// Set one field, rejecting values of the wrong kind.
    pub fn apply(
        &mut self,
        field: BaseField,
        value: &FieldValue,
    ) -> Result<(), FieldError> {
        match (field, value) {
            (BaseField::LayoutMode, FieldValue::Layout(mode)) => {
                self.layout_mode = *mode;
            },
            (BaseField::CustomTrayIconColor, FieldValue::Color(color)) => {
                self.custom_tray_icon_color = color.clone();
            },
            (BaseField::CustomUnreadBgColor, FieldValue::Color(color)) => {
                self.custom_unread_bg_color = color.clone();
            },
            (BaseField::CustomUnreadTextColor, FieldValue::Color(color)) => {
                self.custom_unread_text_color = color.clone();
            },
            (BaseField::IdleTimeLogOutSec, FieldValue::Seconds(seconds)) => {
                self.idle_time_log_out_sec = *seconds;
            },
            (BaseField::LogLevel, FieldValue::LogLevel(Some(level))) => {
                self.log_level = *level;
            },
            (BaseField::LogLevel, FieldValue::LogLevel(None)) => {
                return Err(FieldError::Required(field));
            },
            (BaseField::ZoomFactor, FieldValue::Zoom(factor)) => {
                self.zoom_factor = *factor;
            },
            (field, FieldValue::Flag(flag)) => match self.flag_mut(field) {
                Some(slot) => *slot = *flag,
                None => return Err(FieldError::TypeMismatch(field)),
            },
            (field, _) => return Err(FieldError::TypeMismatch(field)),
        }

        Ok(())
    }

    fn flag_mut(&mut self, field: BaseField) -> Option<&mut bool> {
        let slot = match field {
            BaseField::CheckUpdateAndNotify => {
                &mut self.check_update_and_notify
            },
            BaseField::CloseToTray => &mut self.close_to_tray,
            BaseField::DisableSpamNotifications => {
                &mut self.disable_spam_notifications
            },
            BaseField::EnableHideControlsHotkey => {
                &mut self.enable_hide_controls_hotkey
            },
            BaseField::FindInPage => &mut self.find_in_page,
            BaseField::FullTextSearch => &mut self.full_text_search,
            BaseField::HideControls => &mut self.hide_controls,
            BaseField::StartHidden => &mut self.start_hidden,
            BaseField::UnreadNotifications => &mut self.unread_notifications,
            _ => return None,
        };
        Some(slot)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
