use crate::items::DirectoryItem;
use crate::runner::Context;

/// Path segment of the favorites listing
pub const FAVORITES_PATH: &str = "favorites";

/// Directory item opening the favorites list
///
/// `image` defaults to the bundled favorites icon and `fanart` to the
/// addon fanart.
pub fn favorites_item(
    context: &dyn Context,
    alt_name: Option<&str>,
    image: Option<&str>,
    fanart: Option<&str>,
) -> DirectoryItem {
    let name = match alt_name.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => context.localize("favorites"),
    };

    let image = match image {
        Some(image) => image.to_string(),
        None => context.create_resource_path("media/favorites.png"),
    };

    let fanart = match fanart.filter(|fanart| !fanart.is_empty()) {
        Some(fanart) => fanart.to_string(),
        None => context.fanart(),
    };

    DirectoryItem::new(name, context.create_uri(&[FAVORITES_PATH, "list"]))
        .with_image(image)
        .with_fanart(fanart)
}
