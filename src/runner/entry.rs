//! Item to list-entry conversion

use std::collections::BTreeMap;

use super::traits::{Context, ItemAdapter};
use super::types::ListEntry;
use crate::items::{AudioItem, BaseItem, DirectoryItem, ImageItem, InfoKind, Item, VideoItem, create_from_item};

pub const DEFAULT_FOLDER_ICON: &str = "DefaultFolder.png";
pub const DEFAULT_PICTURE_ICON: &str = "DefaultPicture.png";
pub const DEFAULT_VIDEO_ICON: &str = "DefaultVideo.png";
pub const DEFAULT_AUDIO_ICON: &str = "DefaultAudio.png";

/// Art map with icon and thumb; fanart only when present and enabled
fn art_for(base: &BaseItem, icon: &str, show_fanart: bool) -> BTreeMap<String, String> {
    let mut art = BTreeMap::from([
        ("icon".to_string(), icon.to_string()),
        ("thumb".to_string(), base.image.clone()),
    ]);
    if show_fanart && !base.fanart.is_empty() {
        art.insert("fanart".to_string(), base.fanart.clone());
    }
    art
}

fn entry_for(base: &BaseItem, icon: &str, show_fanart: bool) -> ListEntry {
    let mut entry = ListEntry::new(base.name.clone());
    entry.set_art(art_for(base, icon, show_fanart));
    if let Some(menu) = &base.context_menu {
        entry.add_context_menu_items(menu, base.replace_context_menu);
    }
    entry
}

/// Returns the entry and whether the host should treat it as a folder
pub fn directory_entry(item: &DirectoryItem, show_fanart: bool) -> (ListEntry, bool) {
    let mut entry = entry_for(&item.base, DEFAULT_FOLDER_ICON, show_fanart);
    entry.set_info(InfoKind::Video, create_from_item(&Item::Directory(item.clone())));
    entry.set_path(item.base.uri.clone());

    let is_folder = !item.action;
    if item.action {
        entry.set_property("isPlayable", "false");
    }
    if item.next_page {
        entry.set_property("specialSort", "bottom");
    }
    if let Some(id) = item.channel_subscription_id.as_deref().filter(|id| !id.is_empty()) {
        entry.set_property("channel_subscription_id", id);
    }

    (entry, is_folder)
}

pub fn image_entry(item: &ImageItem, show_fanart: bool) -> ListEntry {
    let mut entry = entry_for(&item.base, DEFAULT_PICTURE_ICON, show_fanart);
    entry.set_info(InfoKind::Picture, create_from_item(&Item::Image(item.clone())));
    entry.set_path(item.base.uri.clone());
    entry
}

/// Stock adapter for playable items
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultItemAdapter;

impl DefaultItemAdapter {
    fn playable(&self, context: &dyn Context, item: &Item, icon: &str) -> ListEntry {
        let show_fanart = context.settings().show_fanart();
        let mut entry = entry_for(item.base(), icon, show_fanart);
        entry.set_info(InfoKind::for_item(item), create_from_item(item));
        entry.set_property("IsPlayable", "true");
        entry
    }
}

impl ItemAdapter for DefaultItemAdapter {
    fn to_video_item(&self, context: &dyn Context, item: &VideoItem) -> ListEntry {
        self.playable(context, &Item::Video(item.clone()), DEFAULT_VIDEO_ICON)
    }

    fn to_audio_item(&self, context: &dyn Context, item: &AudioItem) -> ListEntry {
        self.playable(context, &Item::Audio(item.clone()), DEFAULT_AUDIO_ICON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ContextMenuEntry;

    #[test]
    fn test_directory_entry_folder() {
        let item = DirectoryItem::new("Popular", "plugin://x/popular")
            .with_image("thumb.jpg")
            .with_fanart("fanart.jpg");

        let (entry, is_folder) = directory_entry(&item, true);

        assert!(is_folder);
        assert_eq!(entry.label, "Popular");
        assert_eq!(entry.art["icon"], DEFAULT_FOLDER_ICON);
        assert_eq!(entry.art["thumb"], "thumb.jpg");
        assert_eq!(entry.art["fanart"], "fanart.jpg");
        assert_eq!(entry.path, "plugin://x/popular");
        assert_eq!(entry.info_kind, Some(InfoKind::Video));
        assert!(entry.properties.is_empty());
    }

    #[test]
    fn test_directory_entry_fanart_setting() {
        let item = DirectoryItem::new("Popular", "plugin://x/popular").with_fanart("fanart.jpg");
        let (entry, _) = directory_entry(&item, false);
        assert!(!entry.art.contains_key("fanart"));

        let item = DirectoryItem::new("Popular", "plugin://x/popular");
        let (entry, _) = directory_entry(&item, true);
        assert!(!entry.art.contains_key("fanart"));
    }

    #[test]
    fn test_directory_entry_properties() {
        let item = DirectoryItem::new("Subscribe", "plugin://x/subscribe")
            .with_action(true)
            .with_next_page(true)
            .with_channel_subscription_id("UC123");

        let (entry, is_folder) = directory_entry(&item, true);

        assert!(!is_folder);
        assert_eq!(entry.property("isPlayable"), Some("false"));
        assert_eq!(entry.property("specialSort"), Some("bottom"));
        assert_eq!(entry.property("channel_subscription_id"), Some("UC123"));
    }

    #[test]
    fn test_image_entry_context_menu() {
        let mut item = ImageItem::new("Poster", "https://img/1.jpg");
        item.base.context_menu = Some(vec![ContextMenuEntry::new("Save", "RunPlugin(save)")]);
        item.base.replace_context_menu = true;

        let entry = image_entry(&item, true);

        assert_eq!(entry.art["icon"], DEFAULT_PICTURE_ICON);
        assert_eq!(entry.info_kind, Some(InfoKind::Picture));
        assert_eq!(entry.context_menu.len(), 1);
        assert!(entry.replace_context_menu);
    }
}
