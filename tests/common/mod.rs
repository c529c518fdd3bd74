#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kodion::config::{Config, Settings};
use kodion::observability::LogSink;
use kodion::runner::{Context, Handle, HostPresentation, ListEntry};
use kodion::ui::{ContextUi, DialogHost, HostUi, InputKind, Localize, Notification, SelectEntry};

pub const TEST_HANDLE: i32 = 7;

/// Host presentation call as seen by the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    EndListing {
        handle: i32,
        succeeded: bool,
        update_listing: bool,
        cache_to_disc: bool,
    },
    Resolved {
        handle: i32,
        entry: ListEntry,
    },
    AddEntry {
        handle: i32,
        url: String,
        entry: ListEntry,
        is_folder: bool,
        total: usize,
    },
    OverrideView(i32),
}

#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn terminal_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, HostCall::EndListing { .. } | HostCall::Resolved { .. }))
            .count()
    }
}

impl HostPresentation for RecordingHost {
    fn end_listing(&self, handle: Handle, succeeded: bool, update_listing: bool, cache_to_disc: bool) {
        self.calls.lock().unwrap().push(HostCall::EndListing {
            handle: handle.raw(),
            succeeded,
            update_listing,
            cache_to_disc,
        });
    }

    fn set_resolved_playback(&self, handle: Handle, entry: ListEntry) {
        self.calls.lock().unwrap().push(HostCall::Resolved {
            handle: handle.raw(),
            entry,
        });
    }

    fn add_list_entry(&self, handle: &Handle, url: &str, entry: ListEntry, is_folder: bool, total: usize) {
        self.calls.lock().unwrap().push(HostCall::AddEntry {
            handle: handle.raw(),
            url: url.to_string(),
            entry,
            is_folder,
            total,
        });
    }

    fn override_view(&self, view_id: i32) {
        self.calls.lock().unwrap().push(HostCall::OverrideView(view_id));
    }
}

/// Dialog host that records modal dialogs and keeps properties in memory
#[derive(Default)]
pub struct FakeDialogHost {
    pub dialogs: Mutex<Vec<(String, String)>>,
    properties: Mutex<HashMap<(i32, String), String>>,
}

impl FakeDialogHost {
    pub fn dialogs(&self) -> Vec<(String, String)> {
        self.dialogs.lock().unwrap().clone()
    }
}

impl DialogHost for FakeDialogHost {
    fn ok(&self, title: &str, text: &str) -> bool {
        self.dialogs
            .lock()
            .unwrap()
            .push((title.to_string(), text.to_string()));
        true
    }

    fn yes_no(&self, _title: &str, _text: &str, _no_label: &str, _yes_label: &str) -> bool {
        true
    }

    fn input(&self, _title: &str, default: &str, _kind: InputKind) -> String {
        default.to_string()
    }

    fn select(&self, _title: &str, _entries: &[SelectEntry], _preselect: i32, _use_details: bool) -> i32 {
        -1
    }

    fn notification(&self, _notification: &Notification) {}

    fn execute_builtin(&self, _command: &str) {}

    fn info_label(&self, _label: &str) -> String {
        String::new()
    }

    fn current_dialog_id(&self) -> i32 {
        9999
    }

    fn window_property(&self, window: i32, key: &str) -> String {
        self.properties
            .lock()
            .unwrap()
            .get(&(window, key.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn set_window_property(&self, window: i32, key: &str, value: &str) {
        self.properties
            .lock()
            .unwrap()
            .insert((window, key.to_string()), value.to_string());
    }

    fn clear_window_property(&self, window: i32, key: &str) {
        self.properties.lock().unwrap().remove(&(window, key.to_string()));
    }

    fn notify(&self, _method: &str) {}
}

/// Returns the string id itself
pub struct EchoLocalize;

impl Localize for EchoLocalize {
    fn localize(&self, id: &str) -> String {
        id.to_string()
    }
}

pub struct TestContext {
    pub config: Config,
    pub dialogs: Arc<FakeDialogHost>,
    ui: HostUi,
    pub errors: Mutex<Vec<String>>,
    pub debugs: Mutex<Vec<String>>,
}

impl TestContext {
    pub fn new(config: Config) -> Self {
        let dialogs = Arc::new(FakeDialogHost::default());
        let ui = HostUi::new(
            dialogs.clone(),
            Arc::new(EchoLocalize),
            config.addon.clone(),
            &config.ui,
        );
        Self {
            config,
            dialogs,
            ui,
            errors: Mutex::new(Vec::new()),
            debugs: Mutex::new(Vec::new()),
        }
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn debugs(&self) -> Vec<String> {
        self.debugs.lock().unwrap().clone()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Context for TestContext {
    fn handle(&self) -> Handle {
        Handle::new(TEST_HANDLE)
    }

    fn settings(&self) -> &dyn Settings {
        &self.config
    }

    fn ui(&self) -> &dyn ContextUi {
        &self.ui
    }

    fn localize(&self, id: &str) -> String {
        id.to_string()
    }

    fn create_uri(&self, path: &[&str]) -> String {
        format!("plugin://{}/{}/", self.config.addon.id, path.join("/"))
    }

    fn create_resource_path(&self, path: &str) -> String {
        format!("special://home/addons/{}/resources/{path}", self.config.addon.id)
    }

    fn fanart(&self) -> String {
        "special://home/addons/plugin.video.youtube/fanart.jpg".to_string()
    }

    fn log_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn log_debug(&self, message: &str) {
        self.debugs.lock().unwrap().push(message.to_string());
    }
}

/// Log sink that keeps every record
#[derive(Default)]
pub struct RecordingSink {
    errors: Mutex<Vec<String>>,
    debugs: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn debug(&self, message: &str) {
        self.debugs.lock().unwrap().push(message.to_string());
    }
}
