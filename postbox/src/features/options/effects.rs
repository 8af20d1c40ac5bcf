use std::rc::Rc;

use crate::app::AppStore;
use crate::state::AppAction;

use super::action::OptionsAction;
use super::errors::OptionsError;
use super::field::BaseSettingsPatch;
use super::model::Config;
use super::storage::ConfigStorage;

/// Persist base settings patches and report the outcome to the store.
pub fn patch_base_settings(
    storage: Rc<dyn ConfigStorage>,
) -> impl Fn(&AppAction, &AppStore) + 'static {
    move |action: &AppAction, store: &AppStore| {
        let AppAction::Options(OptionsAction::PatchBaseSettingsRequest(patch)) =
            action
        else {
            return;
        };

        let current = store.snapshot().options.config.clone();
        let outcome = match store_patch(storage.as_ref(), &current, patch) {
            Ok(config) => {
                log::debug!("base settings stored at revision {}", config.rev);
                OptionsAction::PatchBaseSettingsResponse(config)
            },
            Err(err) => {
                log::warn!("base settings update failed: {err}");
                OptionsAction::PatchBaseSettingsFailed(format!("{err}"))
            },
        };

        store.dispatch(AppAction::Options(outcome));
    }
}

fn store_patch(
    storage: &dyn ConfigStorage,
    current: &Config,
    patch: &BaseSettingsPatch,
) -> Result<Config, OptionsError> {
    let base = patch.apply_to(&current.base)?;
    let next = current.next_revision(base.normalized());
    storage.save(&next)?;
    Ok(next)
}
