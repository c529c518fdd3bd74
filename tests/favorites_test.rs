mod common;

use tempfile::TempDir;

use common::TestContext;
use kodion::favorites::{FAVORITES_PATH, FavoriteList, favorites_item};
use kodion::items::{Item, VideoItem};

#[test]
fn test_favorites_item_defaults() {
    let context = TestContext::default();

    let item = favorites_item(&context, None, None, None);

    assert_eq!(item.base.name, "favorites");
    assert_eq!(
        item.base.uri,
        format!("plugin://plugin.video.youtube/{FAVORITES_PATH}/list/")
    );
    assert_eq!(
        item.base.image,
        "special://home/addons/plugin.video.youtube/resources/media/favorites.png"
    );
    assert_eq!(
        item.base.fanart,
        "special://home/addons/plugin.video.youtube/fanart.jpg"
    );
}

#[test]
fn test_favorites_item_overrides() {
    let context = TestContext::default();

    let item = favorites_item(&context, Some("My picks"), Some("icon.png"), Some(""));

    assert_eq!(item.base.name, "My picks");
    assert_eq!(item.base.image, "icon.png");
    // empty fanart falls back to the addon fanart
    assert_eq!(
        item.base.fanart,
        "special://home/addons/plugin.video.youtube/fanart.jpg"
    );
}

#[test]
fn test_favorites_round_trip_through_listing() {
    let temp_dir = TempDir::new().unwrap();
    let favorites = FavoriteList::open(temp_dir.path()).unwrap();

    let zulu: Item = VideoItem::new("zulu", "plugin://x/play?id=z").into();
    let alpha: Item = VideoItem::new("Alpha", "plugin://x/play?id=a").into();
    favorites.add(&zulu).unwrap();
    favorites.add(&alpha).unwrap();
    favorites.add(&zulu).unwrap();

    let names: Vec<String> = favorites
        .get_items()
        .unwrap()
        .into_iter()
        .map(|record| record.item.name().to_string())
        .collect();
    assert_eq!(names, vec!["Alpha", "zulu"]);

    assert!(favorites.remove(&zulu).unwrap());
    assert!(!favorites.contains(&zulu.id()).unwrap());
    assert_eq!(favorites.clear().unwrap(), 1);
    assert!(favorites.get_items().unwrap().is_empty());
}
