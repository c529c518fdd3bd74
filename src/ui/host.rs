//! Dialog and window primitives provided by the host application

/// Home window, where addon-wide properties live
pub const HOME_WINDOW: i32 = 10000;

/// Busy spinner dialogs (modal and non-modal)
pub const BUSY_DIALOG_IDS: [i32; 2] = [10160, 10138];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Alphanumeric { hidden: bool },
    Numeric,
}

/// Row of a select dialog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectEntry {
    pub label: String,
    pub label2: Option<String>,
    pub icon: Option<String>,
}

impl SelectEntry {
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub header: String,
    pub message: String,
    pub image: String,
    pub time_ms: u32,
    pub audible: bool,
}

pub trait DialogHost: Send + Sync {
    fn ok(&self, title: &str, text: &str) -> bool;

    fn yes_no(&self, title: &str, text: &str, no_label: &str, yes_label: &str) -> bool;

    /// Returns the entered text, empty when cancelled
    fn input(&self, title: &str, default: &str, kind: InputKind) -> String;

    /// Returns the picked row, or -1 when cancelled
    fn select(&self, title: &str, entries: &[SelectEntry], preselect: i32, use_details: bool) -> i32;

    fn notification(&self, notification: &Notification);

    fn execute_builtin(&self, command: &str);

    fn info_label(&self, label: &str) -> String;

    fn current_dialog_id(&self) -> i32;

    /// Returns `""` when the property is unset
    fn window_property(&self, window: i32, key: &str) -> String;

    fn set_window_property(&self, window: i32, key: &str, value: &str);

    fn clear_window_property(&self, window: i32, key: &str);

    /// Broadcast an addon notification to other host components
    fn notify(&self, method: &str);
}
