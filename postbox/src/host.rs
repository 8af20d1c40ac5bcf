//! Bridge to the desktop shell hosting the views.

use std::cell::RefCell;
use std::io;
use std::path::Path;
use std::process::Command;
use std::rc::Rc;

use postbox_store::Subscription;

/// Operating system the application runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }
}

/// Identifier of the element a view is mounted on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef(String);

impl ElementRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// UI event whose default handling can be suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiEvent {
    default_prevented: bool,
}

impl UiEvent {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Services the desktop shell exposes to views.
pub trait DesktopHost {
    fn platform(&self) -> Platform;

    /// Call `on_outside_click` for every document click that lands outside
    /// `element`, logging under `log_target`. The registration lasts until
    /// the handle is released.
    fn register_document_click_listener(
        &self,
        element: &ElementRef,
        log_target: &'static str,
        on_outside_click: Box<dyn Fn()>,
    ) -> Subscription;

    /// Reveal a path in the system file manager.
    fn open_path(&self, path: &Path) -> io::Result<()>;
}

struct ClickListener {
    element: ElementRef,
    on_outside_click: Rc<dyn Fn()>,
}

/// Host backed by the running operating system.
#[derive(Default)]
pub struct SystemHost {
    click_listeners: Rc<RefCell<Vec<ClickListener>>>,
}

impl SystemHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements with a live document click registration.
    pub fn click_listeners(&self) -> Vec<ElementRef> {
        self.click_listeners
            .borrow()
            .iter()
            .map(|listener| listener.element.clone())
            .collect()
    }

    /// Deliver a document click on `target` to every listener mounted on
    /// another element.
    pub fn document_click(&self, target: &ElementRef) {
        let outside: Vec<Rc<dyn Fn()>> = self
            .click_listeners
            .borrow()
            .iter()
            .filter(|listener| listener.element != *target)
            .map(|listener| Rc::clone(&listener.on_outside_click))
            .collect();

        for on_outside_click in outside {
            on_outside_click();
        }
    }
}

impl DesktopHost for SystemHost {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn register_document_click_listener(
        &self,
        element: &ElementRef,
        log_target: &'static str,
        on_outside_click: Box<dyn Fn()>,
    ) -> Subscription {
        log::debug!(
            target: log_target,
            "document click listener registered for {}",
            element.id()
        );
        let on_outside_click: Rc<dyn Fn()> = Rc::from(on_outside_click);
        self.click_listeners.borrow_mut().push(ClickListener {
            element: element.clone(),
            on_outside_click: Rc::clone(&on_outside_click),
        });

        let listeners = Rc::clone(&self.click_listeners);
        let element = element.clone();
        Subscription::new(move || {
            listeners.borrow_mut().retain(|listener| {
                !Rc::ptr_eq(&listener.on_outside_click, &on_outside_click)
            });
            log::debug!(
                target: log_target,
                "document click listener released for {}",
                element.id()
            );
        })
    }

    fn open_path(&self, path: &Path) -> io::Result<()> {
        let opener = match self.platform() {
            Platform::MacOs => "open",
            Platform::Windows => "explorer",
            Platform::Linux | Platform::Other => "xdg-open",
        };

        Command::new(opener).arg(path).spawn().map(|_| ())
    }
}
