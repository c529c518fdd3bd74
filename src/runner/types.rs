use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::items::{ContextMenuEntry, InfoKind, InfoLabels, Item};

/// Host-issued identifier for one cycle
///
/// Not `Clone`: terminal host calls consume it.
#[derive(PartialEq, Eq)]
pub struct Handle(i32);

impl Handle {
    pub fn new(raw: i32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i32 {
        self.0
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

/// What a provider returned for the host to present
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Nothing to show; the listing fails
    False,
    Single(Item),
    Sequence(Vec<Item>),
}

impl From<Item> for Payload {
    fn from(item: Item) -> Self {
        Payload::Single(item)
    }
}

impl From<Vec<Item>> for Payload {
    fn from(items: Vec<Item>) -> Self {
        Payload::Sequence(items)
    }
}

/// Listing options that accompany a payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultOptions {
    /// Replace the current listing instead of pushing a new one
    #[serde(default)]
    pub update_listing: bool,
    #[serde(default = "default_cache_to_disc")]
    pub cache_to_disc: bool,
    /// Unrecognised keys, reported and otherwise ignored
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn default_cache_to_disc() -> bool {
    true
}

impl Default for ResultOptions {
    fn default() -> Self {
        Self {
            update_listing: false,
            cache_to_disc: default_cache_to_disc(),
            extra: BTreeMap::new(),
        }
    }
}

impl ResultOptions {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationResult {
    pub payload: Payload,
    pub options: ResultOptions,
}

impl NavigationResult {
    pub fn new(payload: impl Into<Payload>) -> Self {
        Self {
            payload: payload.into(),
            options: ResultOptions::default(),
        }
    }

    pub fn nothing() -> Self {
        Self::new(Payload::False)
    }

    pub fn with_options(mut self, options: ResultOptions) -> Self {
        self.options = options;
        self
    }
}

/// Host list row under construction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListEntry {
    pub label: String,
    pub offscreen: bool,
    pub art: BTreeMap<String, String>,
    pub info_kind: Option<InfoKind>,
    pub info: InfoLabels,
    pub context_menu: Vec<ContextMenuEntry>,
    pub replace_context_menu: bool,
    pub properties: BTreeMap<String, String>,
    pub path: String,
}

impl ListEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            offscreen: true,
            ..Self::default()
        }
    }

    pub fn set_art(&mut self, art: BTreeMap<String, String>) {
        self.art = art;
    }

    pub fn set_info(&mut self, kind: InfoKind, info: InfoLabels) {
        self.info_kind = Some(kind);
        self.info = info;
    }

    pub fn add_context_menu_items(&mut self, items: &[ContextMenuEntry], replace: bool) {
        self.context_menu.extend_from_slice(items);
        self.replace_context_menu = replace;
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
}

/// How a cycle ended when no error was returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The provider failed; the listing was ended as failed
    ProviderFailed,
    /// The provider had nothing to show
    NotListed,
    Resolved,
    Listed { entries: usize },
}
