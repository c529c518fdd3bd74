//! User interface facade over host dialog primitives

mod context_ui;
mod host;
pub mod markup;
mod properties;

pub use context_ui::{
    ContextUi, DEFAULT_NOTIFICATION_MS, HostUi, Localize, REFRESH_CONTAINER, SelectItem,
    Selection,
};
pub use host::{BUSY_DIALOG_IDS, DialogHost, HOME_WINDOW, InputKind, Notification, SelectEntry};
pub use properties::WindowProperties;
