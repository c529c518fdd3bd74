use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One context-menu row: label shown to the user and the builtin it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuEntry {
    pub label: String,
    pub action: String,
}

impl ContextMenuEntry {
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Fields shared by every item variant
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseItem {
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub fanart: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_menu: Option<Vec<ContextMenuEntry>>,
    #[serde(default)]
    pub replace_context_menu: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDateTime>,
}

impl BaseItem {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Stable id derived from name and URI
    pub fn id(&self) -> String {
        let seed = format!("{}{}", self.name, self.uri);
        Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.as_bytes())
            .simple()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DirectoryItem {
    #[serde(flatten)]
    pub base: BaseItem,
    /// Runs a command instead of opening a folder
    #[serde(default)]
    pub action: bool,
    /// Paging sentinel sorted to the bottom of the listing
    #[serde(default)]
    pub next_page: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_subscription_id: Option<String>,
}

impl DirectoryItem {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            base: BaseItem::new(name, uri),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.base.image = image.into();
        self
    }

    pub fn with_fanart(mut self, fanart: impl Into<String>) -> Self {
        self.base.fanart = fanart.into();
        self
    }

    pub fn with_action(mut self, action: bool) -> Self {
        self.action = action;
        self
    }

    pub fn with_next_page(mut self, next_page: bool) -> Self {
        self.next_page = next_page;
        self
    }

    pub fn with_channel_subscription_id(mut self, id: impl Into<String>) -> Self {
        self.channel_subscription_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoItem {
    #[serde(flatten)]
    pub base: BaseItem,
    /// Length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_count: Option<u32>,
    #[serde(default)]
    pub live: bool,
}

impl VideoItem {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            base: BaseItem::new(name, uri),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioItem {
    #[serde(flatten)]
    pub base: BaseItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
}

impl AudioItem {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            base: BaseItem::new(name, uri),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageItem {
    #[serde(flatten)]
    pub base: BaseItem,
}

impl ImageItem {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            base: BaseItem::new(name, uri),
        }
    }
}

/// Bare playable URI with no listing metadata of its own
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UriItem {
    #[serde(flatten)]
    pub base: BaseItem,
}

impl UriItem {
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self {
            base: BaseItem::new(uri.clone(), uri),
        }
    }
}

/// Closed set of items a provider can return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Item {
    Directory(DirectoryItem),
    Video(VideoItem),
    Audio(AudioItem),
    Image(ImageItem),
    Uri(UriItem),
}

impl Item {
    pub fn base(&self) -> &BaseItem {
        match self {
            Item::Directory(item) => &item.base,
            Item::Video(item) => &item.base,
            Item::Audio(item) => &item.base,
            Item::Image(item) => &item.base,
            Item::Uri(item) => &item.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseItem {
        match self {
            Item::Directory(item) => &mut item.base,
            Item::Video(item) => &mut item.base,
            Item::Audio(item) => &mut item.base,
            Item::Image(item) => &mut item.base,
            Item::Uri(item) => &mut item.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn uri(&self) -> &str {
        &self.base().uri
    }

    pub fn id(&self) -> String {
        self.base().id()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Item::Directory(_) => "directory",
            Item::Video(_) => "video",
            Item::Audio(_) => "audio",
            Item::Image(_) => "image",
            Item::Uri(_) => "uri",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<DirectoryItem> for Item {
    fn from(item: DirectoryItem) -> Self {
        Item::Directory(item)
    }
}

impl From<VideoItem> for Item {
    fn from(item: VideoItem) -> Self {
        Item::Video(item)
    }
}

impl From<AudioItem> for Item {
    fn from(item: AudioItem) -> Self {
        Item::Audio(item)
    }
}

impl From<ImageItem> for Item {
    fn from(item: ImageItem) -> Self {
        Item::Image(item)
    }
}

impl From<UriItem> for Item {
    fn from(item: UriItem) -> Self {
        Item::Uri(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_is_stable() {
        let a = VideoItem::new("Clip", "plugin://x/play?id=42");
        let b = VideoItem::new("Clip", "plugin://x/play?id=42");
        let c = VideoItem::new("Clip", "plugin://x/play?id=43");

        assert_eq!(a.base.id(), b.base.id());
        assert_ne!(a.base.id(), c.base.id());
        assert_eq!(a.base.id().len(), 32);
    }

    #[test]
    fn test_tagged_json_shape() {
        let item: Item = DirectoryItem::new("Subscriptions", "plugin://x/subs")
            .with_next_page(true)
            .into();

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "directory");
        assert_eq!(value["name"], "Subscriptions");
        assert_eq!(value["next_page"], true);
        assert!(value.get("channel_subscription_id").is_none());
    }

    #[test]
    fn test_from_json_with_defaults() {
        let value = json!({
            "type": "video",
            "name": "Talk",
            "uri": "plugin://x/play?id=1",
            "duration": 90,
            "date": "2024-03-01T12:00:00"
        });

        let item = Item::from_json(&value.to_string()).unwrap();
        let Item::Video(video) = &item else {
            panic!("expected video, got {}", item.kind());
        };
        assert_eq!(video.duration, Some(90));
        assert_eq!(video.base.image, "");
        assert!(!video.live);
        assert!(video.base.date.is_some());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = Item::from_json(r#"{"type":"playlist","name":"x","uri":"y"}"#);
        assert!(result.is_err());
    }
}
