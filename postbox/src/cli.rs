//! Headless driver for the base settings panel.

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::app::create_store;
use crate::features::options::{
    BaseField, ConfigLoadStatus, ConfigStorage, FieldError, FieldValue,
    FileConfigStorage, MemoryConfigStorage, StorageError, default_settings_dir,
    selectors,
};
use crate::host::{DesktopHost, ElementRef, UiEvent};
use crate::widgets::base_settings::{BaseSettingsComponent, BaseSettingsView};

#[derive(Debug, Parser)]
#[command(name = "postbox-settings")]
#[command(about = "Inspect and edit Postbox base settings")]
#[command(version)]
pub struct Cli {
    /// Directory holding config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub settings_dir: Option<PathBuf>,

    /// Apply edits in memory without writing the settings file
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print every base setting
    Show {
        /// Output the stored configuration as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change base settings, e.g. `set closeToTray=false zoomFactor=1.25`
    Set {
        /// FIELD=VALUE pairs
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<Assignment>,
    },
    /// Reveal the settings folder in the file manager
    OpenFolder,
    /// List the values offered by the settings selects
    Presets,
}

/// One `FIELD=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: BaseField,
    pub value: FieldValue,
}

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("expected FIELD=VALUE, got `{0}`")]
    MissingSeparator(String),
    #[error(transparent)]
    Field(#[from] FieldError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to render settings: {0}")]
    Render(#[from] serde_json::Error),
    #[error("settings were not saved: {0}")]
    Rejected(String),
}

pub fn parse_assignment(raw: &str) -> Result<Assignment, AssignmentError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| AssignmentError::MissingSeparator(raw.to_string()))?;
    let field = name.trim().parse::<BaseField>()?;
    let value = FieldValue::parse(field, value)?;

    Ok(Assignment { field, value })
}

impl Cli {
    pub fn settings_dir(&self) -> PathBuf {
        self.settings_dir.clone().unwrap_or_else(default_settings_dir)
    }
}

/// Log verbosity configured by the stored `logLevel`.
///
/// Falls back to the default level when the settings cannot be read.
pub fn stored_log_filter(cli: &Cli) -> log::LevelFilter {
    FileConfigStorage::new(cli.settings_dir())
        .load()
        .map(|load| load.into_parts().0.base.log_level)
        .unwrap_or_default()
        .level_filter()
}

/// Execute one command against the settings directory.
pub fn run(
    cli: Cli,
    host: Rc<dyn DesktopHost>,
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let dir = cli.settings_dir();
    let file_storage = FileConfigStorage::new(&dir);
    let (config, status) = file_storage.load()?.into_parts();
    match status {
        ConfigLoadStatus::Loaded => {
            log::debug!("loaded {}", file_storage.config_path().display());
        },
        ConfigLoadStatus::Missing => {
            log::info!(
                "no settings file in {}, using defaults",
                dir.display()
            );
        },
        ConfigLoadStatus::Invalid(message) => {
            log::warn!(
                "ignoring invalid {}: {message}",
                file_storage.config_path().display()
            );
        },
    }

    let storage: Rc<dyn ConfigStorage> = if cli.dry_run {
        Rc::new(MemoryConfigStorage::new(&dir, Some(config.clone())))
    } else {
        Rc::new(file_storage)
    };
    let store = create_store(config, storage, Rc::clone(&host));
    let mut component = BaseSettingsComponent::new(
        store.clone(),
        host,
        ElementRef::new("base-settings"),
    );
    component.initialize();

    let result = match cli.command {
        Commands::Show { json } => {
            if json {
                let config = selectors::featured_config(&store.snapshot());
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                write_values(out, &component.view())?;
            }
            Ok(())
        },
        Commands::Set { assignments } => {
            let before = selectors::featured_config(&store.snapshot()).rev;
            for Assignment { field, value } in assignments {
                component.edit(field, value);
                if let Some(message) = selectors::last_error(&store.snapshot())
                {
                    component.teardown();
                    return Err(AppError::Rejected(message));
                }
            }

            let after = selectors::featured_config(&store.snapshot()).rev;
            if after == before {
                writeln!(out, "no changes")?;
            } else if cli.dry_run {
                writeln!(out, "revision {after} (dry run, not written)")?;
            } else {
                writeln!(out, "saved revision {after} to {}", dir.display())?;
            }
            Ok(())
        },
        Commands::OpenFolder => {
            component.open_settings_folder(&mut UiEvent::default());
            Ok(())
        },
        Commands::Presets => write_presets(out, &component.view()),
    };

    component.teardown();
    result
}

fn write_values(
    out: &mut dyn Write,
    view: &BaseSettingsView,
) -> Result<(), AppError> {
    for (field, value) in &view.values {
        writeln!(out, "{field} = {value}")?;
    }
    if view.show_start_minimized_to_tray_issue_link {
        writeln!(
            out,
            "note: start minimized to tray depends on the desktop environment"
        )?;
    }
    Ok(())
}

fn write_presets(
    out: &mut dyn Write,
    view: &BaseSettingsView,
) -> Result<(), AppError> {
    let catalogs = &view.catalogs;

    writeln!(out, "logLevel:")?;
    for level in catalogs.log_levels {
        writeln!(out, "  {}", level.as_str())?;
    }
    writeln!(out, "layoutMode:")?;
    for mode in catalogs.layout_modes {
        writeln!(out, "  {} ({})", mode.as_str(), mode.title())?;
    }
    writeln!(out, "zoomFactor:")?;
    for preset in &catalogs.zoom_factors {
        writeln!(out, "  {} ({})", preset.value, preset.title)?;
    }
    writeln!(out, "idleTimeLogOutSec:")?;
    for timeout in catalogs.idle_time_log_out_sec_values {
        writeln!(out, "  {} ({})", timeout.value_sec, timeout.title)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::rc::Rc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use super::{
        AssignmentError, Cli, parse_assignment, run, stored_log_filter,
    };
    use crate::features::options::{
        BaseField, ConfigStorage, FieldError, FieldValue, FileConfigStorage,
        LayoutMode, LogLevel,
    };
    use crate::host::SystemHost;

    fn run_cli(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).expect("arguments should parse");
        let mut out = Vec::new();
        run(cli, Rc::new(SystemHost::new()), &mut out)
            .expect("command should succeed");
        String::from_utf8(out).expect("output should be utf-8")
    }

    #[test]
    fn given_assignment_when_parsed_then_field_and_value_are_typed() {
        let assignment =
            parse_assignment("layoutMode=left-thin").expect("valid pair");

        assert_eq!(assignment.field, BaseField::LayoutMode);
        assert_eq!(assignment.value, FieldValue::Layout(LayoutMode::LeftThin));
    }

    #[test]
    fn given_malformed_assignments_when_parsed_then_errors_name_the_problem() {
        assert!(matches!(
            parse_assignment("closeToTray"),
            Err(AssignmentError::MissingSeparator(_))
        ));
        assert!(matches!(
            parse_assignment("volume=3"),
            Err(AssignmentError::Field(FieldError::UnknownField(_)))
        ));
        assert!(matches!(
            parse_assignment("zoomFactor=-1"),
            Err(AssignmentError::Field(FieldError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn given_set_command_when_run_then_file_holds_next_revision() {
        let root = test_temp_dir("set");
        let dir = root.to_string_lossy().into_owned();

        let output = run_cli(&[
            "postbox-settings",
            "--settings-dir",
            &dir,
            "set",
            "closeToTray=false",
        ]);

        let (config, _) = FileConfigStorage::new(&root)
            .load()
            .expect("saved config should load")
            .into_parts();
        assert!(output.starts_with("saved revision 1"));
        assert_eq!(config.rev, 1);
        assert!(!config.base.close_to_tray);

        let shown =
            run_cli(&["postbox-settings", "--settings-dir", &dir, "show"]);
        assert!(shown.contains("closeToTray = false"));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_file_with_unreadable_field_when_set_then_other_values_survive() {
        let root = test_temp_dir("partial_file");
        let dir = root.to_string_lossy().into_owned();
        fs::write(
            root.join("config.json"),
            r#"{"_rev": 12, "closeToTray": false, "logLevel": "debug",
                "layoutMode": "left", "zoomFactor": "big"}"#,
        )
        .expect("test payload should be written");

        let output = run_cli(&[
            "postbox-settings",
            "--settings-dir",
            &dir,
            "set",
            "findInPage=false",
        ]);

        let (config, _) = FileConfigStorage::new(&root)
            .load()
            .expect("saved config should load")
            .into_parts();
        assert!(output.starts_with("saved revision 13"));
        assert_eq!(config.rev, 13);
        assert!(!config.base.close_to_tray);
        assert!(!config.base.find_in_page);
        assert_eq!(config.base.log_level, LogLevel::Debug);
        assert_eq!(config.base.layout_mode, LayoutMode::Left);
        assert_eq!(config.base.zoom_factor, 1.0);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_stored_log_level_then_log_filter_follows_it() {
        let root = test_temp_dir("log_level");
        let dir = root.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "postbox-settings",
            "--settings-dir",
            dir.as_str(),
            "show",
        ])
        .expect("arguments should parse");

        assert_eq!(stored_log_filter(&cli), log::LevelFilter::Error);

        fs::write(root.join("config.json"), r#"{"logLevel": "silly"}"#)
            .expect("test payload should be written");

        assert_eq!(stored_log_filter(&cli), log::LevelFilter::Trace);

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_dry_run_when_set_then_nothing_is_written() {
        let root = test_temp_dir("dry_run");
        let dir = root.to_string_lossy().into_owned();

        let output = run_cli(&[
            "postbox-settings",
            "--settings-dir",
            &dir,
            "--dry-run",
            "set",
            "zoomFactor=1.5",
        ]);

        assert_eq!(output.trim(), "revision 1 (dry run, not written)");
        assert!(!root.join("config.json").exists());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_unchanged_value_when_set_then_no_revision_is_stored() {
        let root = test_temp_dir("unchanged");
        let dir = root.to_string_lossy().into_owned();

        let output = run_cli(&[
            "postbox-settings",
            "--settings-dir",
            &dir,
            "set",
            "findInPage=true",
        ]);

        assert_eq!(output.trim(), "no changes");
        assert!(!root.join("config.json").exists());

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    #[test]
    fn given_presets_command_when_run_then_catalogs_are_listed() {
        let root = test_temp_dir("presets");
        let dir = root.to_string_lossy().into_owned();

        let output =
            run_cli(&["postbox-settings", "--settings-dir", &dir, "presets"]);

        assert!(output.contains("  left-thin (Left (thin))"));
        assert!(output.contains("  1.25 (125%)"));
        assert!(output.contains("  180 (3 minutes)"));

        fs::remove_dir_all(&root)
            .expect("temporary directory should be removed");
    }

    fn test_temp_dir(test_name: &str) -> std::path::PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "postbox-cli-{test_name}-{stamp}-{}",
            std::process::id()
        ));

        fs::create_dir_all(&dir)
            .expect("temporary directory should be created");
        dir
    }
}
