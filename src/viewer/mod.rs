mod anchors;
mod scrollview;
mod state;
mod sync;

pub use anchors::{DEFAULT_CELL_PX, DEFAULT_PAGE_SIZE_PT, PageColumnLayout, PageExtent};
pub use scrollview::ScrollView;
pub use state::ViewerState;
pub use sync::{PageSync, ScrollTo};
