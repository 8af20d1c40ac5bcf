use super::action::OptionsAction;
use super::model::Config;

/// Operations of the options feature currently in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionsProgress {
    pub updating_base_settings: bool,
}

/// Options slice of the application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsState {
    pub config: Config,
    pub progress: OptionsProgress,
    /// Message of the last failed base settings update.
    pub last_error: Option<String>,
}

impl OptionsState {
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

/// Reduce an options action; `None` when the slice did not change.
pub fn reduce(
    state: &OptionsState,
    action: &OptionsAction,
) -> Option<OptionsState> {
    let mut next = state.clone();

    match action {
        OptionsAction::InitConfig(config) => {
            next.config = config.clone();
        },
        OptionsAction::PatchBaseSettingsRequest(_) => {
            next.progress.updating_base_settings = true;
            next.last_error = None;
        },
        OptionsAction::PatchBaseSettingsResponse(config) => {
            next.config = config.clone();
            next.progress.updating_base_settings = false;
        },
        OptionsAction::PatchBaseSettingsFailed(message) => {
            next.progress.updating_base_settings = false;
            next.last_error = Some(message.clone());
        },
    }

    (next != *state).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::{OptionsState, reduce};
    use crate::features::options::action::OptionsAction;
    use crate::features::options::field::BaseSettingsPatch;
    use crate::features::options::model::{BaseConfig, Config};

    #[test]
    fn given_patch_request_when_reduced_then_progress_flag_is_set() {
        let state = OptionsState::default();

        let next = reduce(
            &state,
            &OptionsAction::PatchBaseSettingsRequest(
                BaseSettingsPatch::default(),
            ),
        )
        .expect("request should change progress");

        assert!(next.progress.updating_base_settings);
        assert_eq!(next.config, state.config);
    }

    #[test]
    fn given_response_when_reduced_then_config_replaced_and_progress_cleared()
    {
        let mut state = OptionsState::default();
        state.progress.updating_base_settings = true;
        let mut base = BaseConfig::default();
        base.close_to_tray = false;
        let stored = Config::new(1, base);

        let next = reduce(
            &state,
            &OptionsAction::PatchBaseSettingsResponse(stored.clone()),
        )
        .expect("response should change state");

        assert_eq!(next.config, stored);
        assert!(!next.progress.updating_base_settings);
    }

    #[test]
    fn given_failure_when_reduced_then_error_recorded_and_progress_cleared() {
        let mut state = OptionsState::default();
        state.progress.updating_base_settings = true;

        let next = reduce(
            &state,
            &OptionsAction::PatchBaseSettingsFailed(String::from("disk full")),
        )
        .expect("failure should change state");

        assert!(!next.progress.updating_base_settings);
        assert_eq!(next.last_error.as_deref(), Some("disk full"));
    }

    #[test]
    fn given_same_config_when_initialized_then_state_is_unchanged() {
        let state = OptionsState::with_config(Config::default());

        let next =
            reduce(&state, &OptionsAction::InitConfig(Config::default()));

        assert!(next.is_none());
    }
}
