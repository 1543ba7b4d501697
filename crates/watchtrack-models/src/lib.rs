pub mod catalog;
pub mod media;
pub mod session;
pub mod status;
pub mod tracked_item;

pub use catalog::{CatalogItem, SeriesExtents};
pub use media::MediaKind;
pub use session::{Profile, Session, User};
pub use status::WatchStatus;
pub use tracked_item::{NewTrackedItem, TrackedItem, TrackedItemPatch};
