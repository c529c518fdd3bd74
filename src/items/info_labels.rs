//! Projection of item metadata onto host info labels

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{BaseItem, Item};

pub type InfoLabels = Map<String, Value>;

/// Which typed info tag the host should populate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoKind {
    Video,
    Music,
    Picture,
}

impl InfoKind {
    pub fn for_item(item: &Item) -> Self {
        match item {
            Item::Audio(_) => InfoKind::Music,
            Item::Image(_) => InfoKind::Picture,
            _ => InfoKind::Video,
        }
    }
}

pub fn create_from_item(item: &Item) -> InfoLabels {
    let mut labels = base_labels(item.base());

    match item {
        Item::Video(video) => {
            labels.insert("mediatype".into(), "video".into());
            insert_opt(&mut labels, "duration", video.duration);
            insert_opt(&mut labels, "studio", video.studio.clone());
            insert_opt(&mut labels, "genre", video.genre.clone());
            insert_opt(&mut labels, "playcount", video.play_count);
        }
        Item::Audio(audio) => {
            labels.insert("mediatype".into(), "song".into());
            insert_opt(&mut labels, "duration", audio.duration);
            insert_opt(&mut labels, "artist", audio.artist.clone());
            insert_opt(&mut labels, "album", audio.album.clone());
            insert_opt(&mut labels, "tracknumber", audio.track_number);
        }
        Item::Image(_) => {
            labels.insert("picturepath".into(), item.uri().into());
        }
        Item::Directory(_) | Item::Uri(_) => {}
    }

    labels
}

fn base_labels(base: &BaseItem) -> InfoLabels {
    let mut labels = InfoLabels::new();
    labels.insert("title".into(), base.name.clone().into());
    insert_opt(&mut labels, "plot", base.plot.clone());
    if let Some(date) = base.date {
        labels.insert("date".into(), date.format("%d.%m.%Y").to_string().into());
        labels.insert("aired".into(), date.format("%Y-%m-%d").to_string().into());
    }
    labels
}

fn insert_opt<T: Into<Value>>(labels: &mut InfoLabels, key: &str, value: Option<T>) {
    if let Some(value) = value {
        labels.insert(key.to_string(), value.into());
    }
}
