pub mod excerpt;
pub mod format;
pub mod listing;
pub mod locate;
pub mod persist;
pub mod render;

pub use listing::{DocumentListing, ListingEntry, render_listing};
pub use locate::locate_response;
pub use persist::persist;
pub use render::{RenderOptions, render_response};
