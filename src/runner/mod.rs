//! Provider result dispatch
//!
//! [`ProviderRunner`] drives one host invocation: it asks a [`Provider`] to
//! navigate, classifies the returned [`Payload`] and turns it into calls on a
//! [`HostPresentation`].
//!
//! ## Key Components
//!
//! - [`Provider`] - content source invoked once per cycle
//! - [`Context`] - handle, settings, UI and logging for the cycle
//! - [`HostPresentation`] - listing and playback calls of the host
//! - [`ItemAdapter`] - list entries for playable items
//! - [`ListEntry`] - host row built from an item

mod entry;
mod error;
#[allow(clippy::module_inception)]
mod runner;
mod traits;
mod types;

pub use entry::{
    DEFAULT_AUDIO_ICON, DEFAULT_FOLDER_ICON, DEFAULT_PICTURE_ICON, DEFAULT_VIDEO_ICON,
    DefaultItemAdapter, directory_entry, image_entry,
};
pub use error::{NavigationError, Result, RunnerError};
pub use runner::{EXCEPTION_DIALOG_TITLE, ProviderRunner};
pub use traits::{Context, HostPresentation, ItemAdapter, Provider};
pub use types::{CycleOutcome, Handle, ListEntry, NavigationResult, Payload, ResultOptions};
