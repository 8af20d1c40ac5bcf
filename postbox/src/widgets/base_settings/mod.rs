//! Base settings panel: keeps the settings form and the store in sync.
//!
//! The form is seeded once from the stored base configuration. Afterwards
//! every form change is sent to the store as a full base settings patch,
//! and only `hideControls` is pulled back from the store, when both the
//! configuration revision and the flag itself changed.

mod view;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use postbox_store::SubscriptionBag;

use crate::app::AppStore;
use crate::features::accounts::selectors::logged_in_and_unread_summary;
use crate::features::navigation::NavigationAction;
use crate::features::options::selectors;
use crate::features::options::{
    BaseConfig, BaseField, BaseSettingsPatch, Config, FieldValue,
    OptionsAction,
};
use crate::form::{FormControl, FormGroup, Validators};
use crate::host::{DesktopHost, ElementRef, Platform, UiEvent};
use crate::state::AppAction;

pub use view::{BaseSettingsView, Catalogs, ColorPickers};

pub const LOG_TARGET: &str = "postbox::widgets::base_settings";

/// Settings form bound to base configuration fields.
pub type BaseSettingsForm = FormGroup<BaseField, FieldValue>;

/// Color picker of the appearance block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPicker {
    Icon,
    Bg,
    Text,
}

impl ColorPicker {
    pub fn field(&self) -> BaseField {
        match self {
            ColorPicker::Icon => BaseField::CustomTrayIconColor,
            ColorPicker::Bg => BaseField::CustomUnreadBgColor,
            ColorPicker::Text => BaseField::CustomUnreadTextColor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Initialized,
    TornDown,
}

pub struct BaseSettingsComponent {
    store: AppStore,
    host: Rc<dyn DesktopHost>,
    element: ElementRef,
    form: Rc<BaseSettingsForm>,
    subscription: SubscriptionBag,
    lifecycle: Lifecycle,
    appearance_block_collapsed: bool,
    color_picker_opened: Rc<Cell<ColorPickers>>,
    show_start_minimized_to_tray_issue_link: bool,
}

impl BaseSettingsComponent {
    pub fn new(
        store: AppStore,
        host: Rc<dyn DesktopHost>,
        element: ElementRef,
    ) -> Self {
        let show_start_minimized_to_tray_issue_link =
            host.platform() == Platform::Linux;

        Self {
            store,
            host,
            element,
            form: Rc::new(build_form()),
            subscription: SubscriptionBag::new(),
            lifecycle: Lifecycle::Created,
            appearance_block_collapsed: true,
            color_picker_opened: Rc::new(Cell::new(ColorPickers::default())),
            show_start_minimized_to_tray_issue_link,
        }
    }

    /// Seed the form and open the live subscriptions.
    ///
    /// Only the first call has an effect.
    pub fn initialize(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            log::debug!(
                target: LOG_TARGET,
                "initialize skipped, component is {:?}",
                self.lifecycle
            );
            return;
        }
        self.lifecycle = Lifecycle::Initialized;

        let color_picker_opened = Rc::clone(&self.color_picker_opened);
        self.subscription.add(self.host.register_document_click_listener(
            &self.element,
            LOG_TARGET,
            Box::new(move || color_picker_opened.set(ColorPickers::default())),
        ));

        let form = Rc::clone(&self.form);
        self.subscription.add(
            self.store.select(selectors::base_config).take(1).subscribe(
                move |base: BaseConfig| form.patch_value(&base.field_values()),
            ),
        );

        let form = Rc::clone(&self.form);
        self.subscription.add(
            self.store
                .select(selectors::featured_config)
                .distinct_until_key_changed(|config: &Config| config.rev)
                .distinct_until_key_changed(|config: &Config| {
                    config.base.hide_controls
                })
                .subscribe(move |config: Config| {
                    form.patch_control(
                        BaseField::HideControls,
                        FieldValue::Flag(config.base.hide_controls),
                    );
                }),
        );

        let store = self.store.clone();
        self.subscription.add(self.form.value_changes(move |raw| {
            log::debug!(target: LOG_TARGET, "form changed, patching settings");
            store.dispatch(AppAction::Options(
                OptionsAction::PatchBaseSettingsRequest(BaseSettingsPatch::new(
                    raw.clone(),
                )),
            ));
        }));

        log::debug!(target: LOG_TARGET, "initialized on {}", self.element.id());
    }

    /// Release every subscription and the document click registration.
    pub fn teardown(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.subscription.unsubscribe();
        self.lifecycle = Lifecycle::TornDown;
        log::debug!(target: LOG_TARGET, "torn down");
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Initialized
    }

    /// Apply a user edit to one control.
    pub fn edit(&self, field: BaseField, value: FieldValue) {
        self.form.patch_control(field, value);
    }

    pub fn set_color(&self, picker: ColorPicker, color: impl Into<String>) {
        self.edit(picker.field(), FieldValue::Color(color.into()));
    }

    pub fn update_tray_icon_color(&self, color: impl Into<String>) {
        self.set_color(ColorPicker::Icon, color);
    }

    pub fn update_unread_bg_color(&self, color: impl Into<String>) {
        self.set_color(ColorPicker::Bg, color);
    }

    pub fn update_unread_text_color(&self, color: impl Into<String>) {
        self.set_color(ColorPicker::Text, color);
    }

    pub fn open_settings_folder(&self, event: &mut UiEvent) {
        event.prevent_default();
        self.store.dispatch(AppAction::Navigation(
            NavigationAction::OpenSettingsFolder,
        ));
    }

    pub fn toggle_appearance_block(&mut self) {
        self.appearance_block_collapsed = !self.appearance_block_collapsed;
    }

    pub fn toggle_color_picker(&self, picker: ColorPicker) {
        let mut opened = self.color_picker_opened.get();
        match picker {
            ColorPicker::Icon => opened.icon = !opened.icon,
            ColorPicker::Bg => opened.bg = !opened.bg,
            ColorPicker::Text => opened.text = !opened.text,
        }
        self.color_picker_opened.set(opened);
    }

    /// Close every picker; document clicks outside the component do the
    /// same while it is initialized.
    pub fn close_color_pickers(&self) {
        self.color_picker_opened.set(ColorPickers::default());
    }

    pub fn form(&self) -> &BaseSettingsForm {
        &self.form
    }

    pub fn view(&self) -> BaseSettingsView {
        let state = self.store.snapshot();

        BaseSettingsView {
            processing: selectors::progress(&state).updating_base_settings,
            unread: logged_in_and_unread_summary(&state),
            tray_icon_color: selectors::tray_icon_color(&state),
            unread_bg_color: selectors::unread_bg_color(&state),
            unread_text_color: selectors::unread_text_color(&state),
            last_error: selectors::last_error(&state),
            show_start_minimized_to_tray_issue_link: self
                .show_start_minimized_to_tray_issue_link,
            appearance_block_collapsed: self.appearance_block_collapsed,
            color_picker_opened: self.color_picker_opened.get(),
            catalogs: Catalogs::default(),
            values: self.form.raw_value(),
            errors: self.form.errors(),
            valid: self.form.is_valid(),
        }
    }
}

/// Form with default values; the log level stays empty until seeded.
fn build_form() -> BaseSettingsForm {
    let mut values: BTreeMap<BaseField, FieldValue> =
        BaseConfig::default().field_values();
    values.insert(BaseField::LogLevel, FieldValue::LogLevel(None));

    FormGroup::new(values.into_iter().map(|(field, value)| {
        let control = FormControl::new(value);
        let control = if field.is_required() {
            control.with_validator(Validators::required)
        } else {
            control
        };
        (field, control)
    }))
}
