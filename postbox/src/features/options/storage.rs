use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::StorageError;
use super::model::Config;

const CONFIG_FILE_NAME: &str = "config.json";

/// Status describing how the configuration was loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// Result of loading the configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    config: Config,
    status: ConfigLoadStatus,
}

impl ConfigLoad {
    pub fn new(config: Config, status: ConfigLoadStatus) -> Self {
        Self { config, status }
    }

    pub fn status(&self) -> &ConfigLoadStatus {
        &self.status
    }

    /// Consume the value and return both payload and status.
    pub fn into_parts(self) -> (Config, ConfigLoadStatus) {
        (self.config, self.status)
    }
}

/// Where the configuration lives.
pub trait ConfigStorage {
    fn load(&self) -> Result<ConfigLoad, StorageError>;

    fn save(&self, config: &Config) -> Result<(), StorageError>;

    /// Directory revealed by the "open settings folder" action.
    fn settings_dir(&self) -> &Path;
}

/// JSON file in the settings directory.
#[derive(Debug, Clone)]
pub struct FileConfigStorage {
    dir: PathBuf,
}

impl FileConfigStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }
}

impl ConfigStorage for FileConfigStorage {
    fn load(&self) -> Result<ConfigLoad, StorageError> {
        load_config_from_path(&self.config_path())
    }

    fn save(&self, config: &Config) -> Result<(), StorageError> {
        save_config_to_path(&self.config_path(), config)
    }

    fn settings_dir(&self) -> &Path {
        &self.dir
    }
}

/// Keeps the configuration in memory; used for dry runs and embedding.
#[derive(Debug)]
pub struct MemoryConfigStorage {
    dir: PathBuf,
    config: RefCell<Option<Config>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl MemoryConfigStorage {
    pub fn new(dir: impl Into<PathBuf>, config: Option<Config>) -> Self {
        Self {
            dir: dir.into(),
            config: RefCell::new(config),
            saves: Cell::new(0),
            fail_saves: Cell::new(false),
        }
    }

    /// Make subsequent saves fail with an IO error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    pub fn stored(&self) -> Option<Config> {
        self.config.borrow().clone()
    }
}

impl ConfigStorage for MemoryConfigStorage {
    fn load(&self) -> Result<ConfigLoad, StorageError> {
        Ok(match self.stored() {
            Some(config) => ConfigLoad::new(config, ConfigLoadStatus::Loaded),
            None => {
                ConfigLoad::new(Config::default(), ConfigLoadStatus::Missing)
            },
        })
    }

    fn save(&self, config: &Config) -> Result<(), StorageError> {
        if self.fail_saves.get() {
            return Err(StorageError::Io(std::io::Error::other(
                "memory storage rejects writes",
            )));
        }

        *self.config.borrow_mut() = Some(config.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn settings_dir(&self) -> &Path {
        &self.dir
    }
}

/// Per-user settings directory.
pub fn default_settings_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home).join(".config").join("postbox");
    }

    std::env::temp_dir().join("postbox")
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoad, StorageError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ConfigLoad::new(
                Config::default(),
                ConfigLoadStatus::Missing,
            ));
        },
        Err(err) => return Err(err.into()),
    };

    let parsed = match serde_json::from_str::<serde_json::Value>(&data) {
        Ok(value) if value.is_object() => value,
        Ok(_) => {
            return Ok(ConfigLoad::new(
                Config::default(),
                ConfigLoadStatus::Invalid(String::from(
                    "expected a JSON object",
                )),
            ));
        },
        Err(err) => {
            return Ok(ConfigLoad::new(
                Config::default(),
                ConfigLoadStatus::Invalid(format!("{err}")),
            ));
        },
    };

    Ok(ConfigLoad::new(
        Config::from_json(&parsed).normalized(),
        ConfigLoadStatus::Loaded,
    ))
}

fn save_config_to_path(
    path: &Path,
    config: &Config,
) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let payload = serde_json::to_string_pretty(config)?;
    write_atomic(path, payload.as_bytes())?;

    Ok(())
}

fn write_atomic(path: &Path, payload: &[u8]) -> Result<(), std::io::Error> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
