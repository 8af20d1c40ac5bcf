/// Requests handled by the host shell rather than by a reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Reveal the directory holding the configuration file.
    OpenSettingsFolder,
}
