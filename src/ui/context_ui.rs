use std::sync::Arc;
use tracing::{debug, warn};

use super::host::{BUSY_DIALOG_IDS, DialogHost, InputKind, Notification, SelectEntry};
use super::properties::WindowProperties;
use crate::config::{AddonConfig, UiConfig};

/// Host notification asking every open listing to refresh
pub const REFRESH_CONTAINER: &str = "kodion.refresh_container";

pub const DEFAULT_NOTIFICATION_MS: u32 = 5000;

/// Localized strings by id
pub trait Localize: Send + Sync {
    fn localize(&self, id: &str) -> String;
}

/// Row offered by [`ContextUi::on_select`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    /// Picking it yields its index
    Plain(String),
    Pair {
        label: String,
        value: String,
    },
    /// Two-line row; an icon switches the dialog to detailed rows
    Detailed {
        label: String,
        label2: String,
        value: String,
        icon: Option<String>,
        selected: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Value(String),
}

/// User interaction surface available to providers and the runner
pub trait ContextUi: Send + Sync {
    fn on_keyboard_input(&self, title: &str, default: &str, hidden: bool) -> Option<String>;

    fn on_numeric_input(&self, title: &str, default: Option<i64>) -> Option<i64>;

    fn on_yes_no_input(&self, title: &str, text: &str, no_label: &str, yes_label: &str) -> bool;

    fn on_ok(&self, title: &str, text: &str) -> bool;

    fn on_remove_content(&self, name: &str) -> bool;

    fn on_delete_content(&self, name: &str) -> bool;

    fn on_clear_content(&self, name: &str) -> bool;

    /// `None` when the dialog was cancelled
    fn on_select(
        &self,
        title: &str,
        items: &[SelectItem],
        preselect: Option<usize>,
        use_details: bool,
    ) -> Option<Selection>;

    fn show_notification(
        &self,
        message: &str,
        header: Option<&str>,
        image: Option<&str>,
        time_ms: u32,
        audible: bool,
    );

    fn refresh_container(&self);

    fn set_property(&self, id: &str, value: &str);

    fn get_property(&self, id: &str) -> String;

    fn clear_property(&self, id: &str);

    fn pop_property(&self, id: &str) -> String;

    fn set_focus_next_item(&self);

    /// Id of the busy dialog currently shown, if any
    fn busy_dialog_active(&self) -> Option<i32>;

    /// Preferred container view for listings
    fn view_mode(&self) -> Option<i32>;
}

/// [`ContextUi`] backed by host dialog primitives
pub struct HostUi {
    host: Arc<dyn DialogHost>,
    localizer: Arc<dyn Localize>,
    addon: AddonConfig,
    view_mode: Option<i32>,
}

impl HostUi {
    pub fn new(
        host: Arc<dyn DialogHost>,
        localizer: Arc<dyn Localize>,
        addon: AddonConfig,
        ui: &UiConfig,
    ) -> Self {
        Self {
            host,
            localizer,
            addon,
            view_mode: ui.view_mode,
        }
    }

    fn properties(&self) -> WindowProperties<'_> {
        WindowProperties::new(self.host.as_ref(), &self.addon.id)
    }

    fn confirm(&self, title_id: &str, text_id: &str, name: &str) -> bool {
        let title = self.localizer.localize(title_id);
        let text = self.localizer.localize(text_id).replacen("%s", name, 1);
        self.on_yes_no_input(&title, &text, "", "")
    }
}

impl ContextUi for HostUi {
    fn on_keyboard_input(&self, title: &str, default: &str, hidden: bool) -> Option<String> {
        let text = self
            .host
            .input(title, default, InputKind::Alphanumeric { hidden });
        (!text.is_empty()).then_some(text)
    }

    fn on_numeric_input(&self, title: &str, default: Option<i64>) -> Option<i64> {
        let default = default.map(|n| n.to_string()).unwrap_or_default();
        let text = self.host.input(title, &default, InputKind::Numeric);
        if text.is_empty() {
            return None;
        }

        match text.trim().parse() {
            Ok(number) => Some(number),
            Err(e) => {
                warn!(input = %text, error = %e, "Numeric input is not a number");
                None
            }
        }
    }

    fn on_yes_no_input(&self, title: &str, text: &str, no_label: &str, yes_label: &str) -> bool {
        self.host.yes_no(title, text, no_label, yes_label)
    }

    fn on_ok(&self, title: &str, text: &str) -> bool {
        self.host.ok(title, text)
    }

    fn on_remove_content(&self, name: &str) -> bool {
        self.confirm("content.remove", "content.remove.check", name)
    }

    fn on_delete_content(&self, name: &str) -> bool {
        self.confirm("content.delete", "content.delete.check", name)
    }

    fn on_clear_content(&self, name: &str) -> bool {
        self.confirm("content.clear", "content.clear.check", name)
    }

    fn on_select(
        &self,
        title: &str,
        items: &[SelectItem],
        preselect: Option<usize>,
        use_details: bool,
    ) -> Option<Selection> {
        let mut use_details = use_details;
        let mut preselect = preselect;
        let mut entries = Vec::with_capacity(items.len());
        let mut results = Vec::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            match item {
                SelectItem::Plain(label) => {
                    entries.push(SelectEntry::plain(label.clone()));
                    results.push(Selection::Index(idx));
                }
                SelectItem::Pair { label, value } => {
                    entries.push(SelectEntry::plain(label.clone()));
                    results.push(Selection::Value(value.clone()));
                }
                SelectItem::Detailed {
                    label,
                    label2,
                    value,
                    icon,
                    selected,
                } => {
                    if icon.is_some() {
                        use_details = true;
                        if *selected {
                            preselect = Some(idx);
                        }
                    }
                    entries.push(SelectEntry {
                        label: label.clone(),
                        label2: Some(label2.clone()),
                        icon: icon.clone(),
                    });
                    results.push(Selection::Value(value.clone()));
                }
            }
        }

        let preselect = preselect.map_or(-1, |idx| idx as i32);
        let picked = self.host.select(title, &entries, preselect, use_details);
        usize::try_from(picked)
            .ok()
            .and_then(|idx| results.get(idx).cloned())
    }

    fn show_notification(
        &self,
        message: &str,
        header: Option<&str>,
        image: Option<&str>,
        time_ms: u32,
        audible: bool,
    ) {
        let header = header
            .filter(|h| !h.is_empty())
            .unwrap_or(&self.addon.name);
        let image = image.filter(|i| !i.is_empty()).unwrap_or(&self.addon.icon);

        self.host.notification(&Notification {
            header: header.to_string(),
            message: message.replace([',', '\n'], " "),
            image: image.to_string(),
            time_ms,
            audible,
        });
    }

    fn refresh_container(&self) {
        self.host.notify(REFRESH_CONTAINER);
    }

    fn set_property(&self, id: &str, value: &str) {
        self.properties().set(id, value);
    }

    fn get_property(&self, id: &str) -> String {
        self.properties().get(id)
    }

    fn clear_property(&self, id: &str) {
        self.properties().clear(id);
    }

    fn pop_property(&self, id: &str) -> String {
        self.properties().pop(id)
    }

    fn set_focus_next_item(&self) {
        let container = self.host.info_label("System.CurrentControlId");
        let Ok(position) = self.host.info_label("Container.CurrentItem").parse::<i64>() else {
            return;
        };
        let command = format!("SetFocus({container},{},absolute)", position + 1);
        debug!(command, "Moving focus");
        self.host.execute_builtin(&command);
    }

    fn busy_dialog_active(&self) -> Option<i32> {
        let dialog_id = self.host.current_dialog_id();
        BUSY_DIALOG_IDS.contains(&dialog_id).then_some(dialog_id)
    }

    fn view_mode(&self) -> Option<i32> {
        self.view_mode
    }
}
