use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const DEFAULT_ZOOM_FACTOR: f64 = 1.0;

/// Verbosity of the application log.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Verbose,
    Debug,
    Silly,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Silly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Silly => "silly",
        }
    }

    /// Closest filter of the `log` facade.
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Verbose | LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Silly => log::LevelFilter::Trace,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == name)
    }
}

/// Placement of the account list relative to the mail view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    #[default]
    Top,
    Left,
    LeftThin,
}

impl LayoutMode {
    pub const ALL: [LayoutMode; 3] =
        [LayoutMode::Top, LayoutMode::Left, LayoutMode::LeftThin];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Top => "top",
            LayoutMode::Left => "left",
            LayoutMode::LeftThin => "left-thin",
        }
    }

    /// Label shown in the layout select.
    pub fn title(&self) -> &'static str {
        match self {
            LayoutMode::Top => "Top",
            LayoutMode::Left => "Left",
            LayoutMode::LeftThin => "Left (thin)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }
}

/// Preferences edited on the base settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseConfig {
    pub check_update_and_notify: bool,
    pub close_to_tray: bool,
    pub layout_mode: LayoutMode,
    /// Empty means the built-in tray icon color.
    pub custom_tray_icon_color: String,
    pub custom_unread_bg_color: String,
    pub custom_unread_text_color: String,
    pub disable_spam_notifications: bool,
    pub enable_hide_controls_hotkey: bool,
    pub find_in_page: bool,
    pub full_text_search: bool,
    pub hide_controls: bool,
    /// Zero disables the idle logout.
    pub idle_time_log_out_sec: u32,
    pub log_level: LogLevel,
    pub start_hidden: bool,
    pub unread_notifications: bool,
    pub zoom_factor: f64,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            check_update_and_notify: true,
            close_to_tray: true,
            layout_mode: LayoutMode::Top,
            custom_tray_icon_color: String::new(),
            custom_unread_bg_color: String::new(),
            custom_unread_text_color: String::new(),
            disable_spam_notifications: false,
            enable_hide_controls_hotkey: false,
            find_in_page: true,
            full_text_search: true,
            hide_controls: false,
            idle_time_log_out_sec: 0,
            log_level: LogLevel::Error,
            start_hidden: true,
            unread_notifications: true,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
        }
    }
}

impl BaseConfig {
    /// Replace values that cannot be used with their defaults.
    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();

        for color in [
            &mut normalized.custom_tray_icon_color,
            &mut normalized.custom_unread_bg_color,
            &mut normalized.custom_unread_text_color,
        ] {
            if !color.is_empty() && !is_valid_hex_color(color) {
                color.clear();
            }
        }

        if !is_valid_zoom_factor(normalized.zoom_factor) {
            normalized.zoom_factor = DEFAULT_ZOOM_FACTOR;
        }

        normalized
    }
}

/// Persisted configuration with its revision marker.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Incremented every time a new configuration is stored.
    #[serde(rename = "_rev")]
    pub rev: u64,
    #[serde(flatten)]
    pub base: BaseConfig,
}

impl Config {
    pub fn new(rev: u64, base: BaseConfig) -> Self {
        Self { rev, base }
    }

    /// Next revision carrying `base`.
    pub fn next_revision(&self, base: BaseConfig) -> Self {
        Self {
            rev: self.rev.wrapping_add(1),
            base,
        }
    }

    pub fn normalized(&self) -> Self {
        Self {
            rev: self.rev,
            base: self.base.normalized(),
        }
    }

    /// Read a stored configuration one field at a time.
    ///
    /// Missing or unreadable fields keep their default; every other value
    /// is kept as stored.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut config = Config::default();
        let base = &mut config.base;

        read_field(value, "_rev", &mut config.rev);
        read_field(
            value,
            "checkUpdateAndNotify",
            &mut base.check_update_and_notify,
        );
        read_field(value, "closeToTray", &mut base.close_to_tray);
        read_field(value, "layoutMode", &mut base.layout_mode);
        read_field(
            value,
            "customTrayIconColor",
            &mut base.custom_tray_icon_color,
        );
        read_field(
            value,
            "customUnreadBgColor",
            &mut base.custom_unread_bg_color,
        );
        read_field(
            value,
            "customUnreadTextColor",
            &mut base.custom_unread_text_color,
        );
        read_field(
            value,
            "disableSpamNotifications",
            &mut base.disable_spam_notifications,
        );
        read_field(
            value,
            "enableHideControlsHotkey",
            &mut base.enable_hide_controls_hotkey,
        );
        read_field(value, "findInPage", &mut base.find_in_page);
        read_field(value, "fullTextSearch", &mut base.full_text_search);
        read_field(value, "hideControls", &mut base.hide_controls);
        read_field(value, "idleTimeLogOutSec", &mut base.idle_time_log_out_sec);
        read_field(value, "logLevel", &mut base.log_level);
        read_field(value, "startHidden", &mut base.start_hidden);
        read_field(
            value,
            "unreadNotifications",
            &mut base.unread_notifications,
        );
        read_field(value, "zoomFactor", &mut base.zoom_factor);

        config
    }
}

fn read_field<T: DeserializeOwned>(
    value: &serde_json::Value,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = value.get(key) else {
        return;
    };

    match T::deserialize(raw) {
        Ok(parsed) => *slot = parsed,
        Err(err) => {
            log::warn!("ignoring unreadable settings field `{key}`: {err}");
        },
    }
}

/// `#rrggbb` check used for the custom color fields.
pub fn is_valid_hex_color(value: &str) -> bool {
    let mut chars = value.chars();
    if chars.next() != Some('#') || value.len() != 7 {
        return false;
    }
    chars.all(|ch| ch.is_ascii_hexdigit())
}

pub(crate) fn is_valid_zoom_factor(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        BaseConfig, Config, LayoutMode, LogLevel, is_valid_hex_color,
    };

    #[test]
    fn given_config_when_serialized_then_keys_are_camel_case_with_rev() {
        let config = Config::new(7, BaseConfig::default());

        let value = serde_json::to_value(&config)
            .expect("config should serialize");

        assert_eq!(value["_rev"], json!(7));
        assert_eq!(value["closeToTray"], json!(true));
        assert_eq!(value["idleTimeLogOutSec"], json!(0));
        assert_eq!(value["layoutMode"], json!("top"));
        assert_eq!(value["logLevel"], json!("error"));
    }

    #[test]
    fn given_partial_json_when_deserialized_then_missing_fields_default() {
        let value = json!({
            "_rev": 3,
            "hideControls": true,
            "layoutMode": "left-thin",
        });

        let config: Config = serde_json::from_value(value)
            .expect("partial config should deserialize");

        assert_eq!(config.rev, 3);
        assert!(config.base.hide_controls);
        assert_eq!(config.base.layout_mode, LayoutMode::LeftThin);
        assert_eq!(config.base.zoom_factor, 1.0);
        assert_eq!(config.base.log_level, LogLevel::Error);
    }

    #[test]
    fn given_invalid_colors_when_normalized_then_they_are_cleared() {
        let mut base = BaseConfig::default();
        base.custom_tray_icon_color = String::from("red");
        base.custom_unread_bg_color = String::from("#aabbcc");
        base.zoom_factor = f64::NAN;

        let normalized = base.normalized();

        assert_eq!(normalized.custom_tray_icon_color, "");
        assert_eq!(normalized.custom_unread_bg_color, "#aabbcc");
        assert_eq!(normalized.zoom_factor, 1.0);
    }

    #[test]
    fn given_config_when_next_revision_then_rev_is_incremented() {
        let config = Config::new(41, BaseConfig::default());
        let mut base = config.base.clone();
        base.start_hidden = false;

        let next = config.next_revision(base.clone());

        assert_eq!(next.rev, 42);
        assert_eq!(next.base, base);
    }

    #[test]
    fn given_log_level_names_when_resolved_then_match_serialized_form() {
        for level in LogLevel::ALL {
            let encoded = serde_json::to_value(level)
                .expect("log level should serialize");
            assert_eq!(encoded, json!(level.as_str()));
            assert_eq!(LogLevel::from_name(level.as_str()), Some(level));
        }
        assert_eq!(LogLevel::Silly.level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn given_hex_color_value_when_validated_then_result_matches_format() {
        assert!(is_valid_hex_color("#aBc123"));
        assert!(!is_valid_hex_color("#12345"));
        assert!(!is_valid_hex_color("123456"));
    }
}
