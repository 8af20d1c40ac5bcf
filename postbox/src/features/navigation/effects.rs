use std::path::PathBuf;
use std::rc::Rc;

use crate::app::AppStore;
use crate::host::DesktopHost;
use crate::state::AppAction;

use super::action::NavigationAction;

/// Ask the host to reveal `settings_dir` on `OpenSettingsFolder`.
pub fn open_settings_folder(
    host: Rc<dyn DesktopHost>,
    settings_dir: PathBuf,
) -> impl Fn(&AppAction, &AppStore) + 'static {
    move |action: &AppAction, _store: &AppStore| {
        let AppAction::Navigation(NavigationAction::OpenSettingsFolder) =
            action
        else {
            return;
        };

        log::debug!("opening settings folder {}", settings_dir.display());
        if let Err(err) = host.open_path(&settings_dir) {
            log::warn!(
                "failed to open settings folder {}: {err}",
                settings_dir.display()
            );
        }
    }
}
