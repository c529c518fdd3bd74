//! Persistent favorites list
//!
//! Favorites are stored in an embedded fjall keyspace, one record per item
//! keyed by the item's stable id, so adding the same item twice keeps a
//! single entry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kodion::favorites::FavoriteList;
//!
//! let favorites = FavoriteList::open("data/favorites")?;
//! favorites.add(&item)?;
//! for record in favorites.get_items()? {
//!     println!("{}", record.item.name());
//! }
//! ```

pub mod error;
mod item;
pub mod keys;
mod store;

pub use error::{FavoritesError, Result};
pub use item::{FAVORITES_PATH, favorites_item};
pub use store::{FavoriteList, FavoriteRecord};
