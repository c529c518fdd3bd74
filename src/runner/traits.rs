use async_trait::async_trait;

use super::error::NavigationError;
use super::types::{Handle, ListEntry, NavigationResult};
use crate::config::Settings;
use crate::items::{AudioItem, Item, VideoItem};
use crate::ui::ContextUi;

/// Per-invocation view of the host the provider runs in
pub trait Context: Send + Sync {
    /// Handle for the current cycle
    fn handle(&self) -> Handle;

    fn settings(&self) -> &dyn Settings;

    fn ui(&self) -> &dyn ContextUi;

    fn localize(&self, id: &str) -> String;

    /// Plugin URI for a path inside this addon
    fn create_uri(&self, path: &[&str]) -> String;

    fn create_resource_path(&self, path: &str) -> String;

    /// Addon-wide default fanart
    fn fanart(&self) -> String;

    fn log_error(&self, message: &str) {
        tracing::error!(target: "kodion", "{}", message);
    }

    fn log_debug(&self, message: &str) {
        tracing::debug!(target: "kodion", "{}", message);
    }
}

/// Content source driven by the runner
#[async_trait]
pub trait Provider: Send + Sync {
    async fn navigate(&self, context: &dyn Context) -> Result<NavigationResult, NavigationError>;

    /// Return true to show the error to the user
    fn handle_exception(&self, _context: &dyn Context, _error: &NavigationError) -> bool {
        true
    }
}

/// Presentation calls the host exposes for one cycle
pub trait HostPresentation: Send + Sync {
    fn end_listing(&self, handle: Handle, succeeded: bool, update_listing: bool, cache_to_disc: bool);

    fn set_resolved_playback(&self, handle: Handle, entry: ListEntry);

    fn add_list_entry(&self, handle: &Handle, url: &str, entry: ListEntry, is_folder: bool, total: usize);

    /// Deferred container view switch
    fn override_view(&self, view_id: i32);
}

/// Builds host entries for playable items
pub trait ItemAdapter: Send + Sync {
    fn to_video_item(&self, context: &dyn Context, item: &VideoItem) -> ListEntry;

    fn to_audio_item(&self, context: &dyn Context, item: &AudioItem) -> ListEntry;

    fn to_playback_item(&self, context: &dyn Context, item: &Item) -> ListEntry {
        match item {
            Item::Video(video) => self.to_video_item(context, video),
            Item::Audio(audio) => self.to_audio_item(context, audio),
            other => ListEntry::new(other.name()),
        }
    }
}
