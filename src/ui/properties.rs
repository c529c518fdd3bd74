use super::host::{DialogHost, HOME_WINDOW};

/// Addon-scoped view of the home window's property map
///
/// Keys are prefixed with the addon id; the map is global to the host and
/// last writer wins.
pub struct WindowProperties<'a> {
    host: &'a dyn DialogHost,
    addon_id: &'a str,
}

impl<'a> WindowProperties<'a> {
    pub fn new(host: &'a dyn DialogHost, addon_id: &'a str) -> Self {
        Self { host, addon_id }
    }

    pub fn key(&self, id: &str) -> String {
        format!("{}-{}", self.addon_id, id)
    }

    pub fn set(&self, id: &str, value: &str) {
        self.host.set_window_property(HOME_WINDOW, &self.key(id), value);
    }

    pub fn get(&self, id: &str) -> String {
        self.host.window_property(HOME_WINDOW, &self.key(id))
    }

    pub fn clear(&self, id: &str) {
        self.host.clear_window_property(HOME_WINDOW, &self.key(id));
    }

    /// Read and clear in one call; unset properties read as `""`
    pub fn pop(&self, id: &str) -> String {
        let key = self.key(id);
        let value = self.host.window_property(HOME_WINDOW, &key);
        if !value.is_empty() {
            self.host.clear_window_property(HOME_WINDOW, &key);
        }
        value
    }
}
