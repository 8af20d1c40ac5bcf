use std::rc::Rc;

use postbox_store::Store;

use crate::features::{navigation, options};
use crate::features::options::{Config, ConfigStorage, OptionsState};
use crate::host::DesktopHost;
use crate::state::{AppAction, AppState, app_reducer};

/// Store type shared by every view of the application.
pub type AppStore = Store<AppState, AppAction>;

/// Build the application store with its effects wired.
pub fn create_store(
    config: Config,
    storage: Rc<dyn ConfigStorage>,
    host: Rc<dyn DesktopHost>,
) -> AppStore {
    let initial = AppState {
        options: OptionsState::with_config(config),
        ..AppState::default()
    };
    let settings_dir = storage.settings_dir().to_path_buf();
    let store = Store::new(initial, app_reducer);

    store.register_effect(options::patch_base_settings(storage));
    store.register_effect(navigation::open_settings_folder(host, settings_dir));

    store
}
