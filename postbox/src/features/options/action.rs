use super::field::BaseSettingsPatch;
use super::model::Config;

/// Actions handled by the options reducer and effects.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsAction {
    /// Configuration read from storage at startup.
    InitConfig(Config),
    /// Persist the full set of base settings values.
    PatchBaseSettingsRequest(BaseSettingsPatch),
    /// Storage accepted the patch; carries the stored configuration.
    PatchBaseSettingsResponse(Config),
    /// The patch was rejected or could not be stored.
    PatchBaseSettingsFailed(String),
}
