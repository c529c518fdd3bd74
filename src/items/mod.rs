//! Item taxonomy returned by providers
//!
//! Items are a closed tagged set serialised as JSON objects with a `type`
//! discriminator; favorites store them in this form.

mod info_labels;
mod types;

pub use info_labels::{InfoKind, InfoLabels, create_from_item};
pub use types::{
    AudioItem, BaseItem, ContextMenuEntry, DirectoryItem, ImageItem, Item, UriItem, VideoItem,
};
