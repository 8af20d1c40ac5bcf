use super::model::{LayoutMode, LogLevel};

pub const LOG_LEVELS: [LogLevel; 6] = LogLevel::ALL;

pub const LAYOUT_MODES: [LayoutMode; 3] = LayoutMode::ALL;

/// Zoom factors offered by the zoom select.
pub const ZOOM_FACTORS: [f64; 13] = [
    0.5, 0.67, 0.75, 0.8, 0.9, 1.0, 1.1, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0,
];

/// Entry of the idle logout select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTimeout {
    pub title: &'static str,
    pub value_sec: u32,
}

pub const IDLE_TIME_LOG_OUT_SEC_VALUES: [IdleTimeout; 8] = [
    IdleTimeout {
        title: "disabled",
        value_sec: 0,
    },
    IdleTimeout {
        title: "3 minutes",
        value_sec: 60 * 3,
    },
    IdleTimeout {
        title: "5 minutes",
        value_sec: 60 * 5,
    },
    IdleTimeout {
        title: "10 minutes",
        value_sec: 60 * 10,
    },
    IdleTimeout {
        title: "15 minutes",
        value_sec: 60 * 15,
    },
    IdleTimeout {
        title: "20 minutes",
        value_sec: 60 * 20,
    },
    IdleTimeout {
        title: "25 minutes",
        value_sec: 60 * 25,
    },
    IdleTimeout {
        title: "30 minutes",
        value_sec: 60 * 30,
    },
];

/// Entry of the zoom select.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomPreset {
    pub value: f64,
    pub title: String,
}

pub fn zoom_factors() -> Vec<ZoomPreset> {
    ZOOM_FACTORS
        .iter()
        .map(|&value| ZoomPreset {
            value,
            title: zoom_title(value),
        })
        .collect()
}

/// Percentage label, e.g. `1.25` becomes `125%`.
pub fn zoom_title(factor: f64) -> String {
    format!("{}%", (factor * 100.0).round() as i64)
}
