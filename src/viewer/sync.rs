use super::anchors::PageColumnLayout;
use super::state::ViewerState;

/// Fire-and-forget command to bring a page's anchor to the top of the
/// viewport with a smooth scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTo {
    pub offset: f32,
}

/// Viewport offset observed at the previous wheel event. The only memory the
/// controller keeps between wheel events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ScrollSample {
    last_offset: f32,
}

/// Bridges discrete wheel input to page-indexed navigation.
///
/// One wheel tick moves at most one page: the delta decides the direction and
/// a consistency check against the previously sampled viewport offset acts as
/// the debounce. Delta magnitude is ignored on purpose; the mapping is
/// direction-only rather than free scrolling proportional to distance.
///
/// No operation here can fail. Out-of-range requests and missing anchors
/// degrade to no-ops, and the controls above self-disable at the boundaries.
#[derive(Debug, Default)]
pub struct PageSync {
    pub state: ViewerState,
    sample: ScrollSample,
}

impl PageSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load notification from the rendering backend. Trusted input; the
    /// single Unloaded -> Loaded transition of a document life.
    pub fn on_document_loaded(&mut self, total_pages: usize) {
        self.state.total_pages = total_pages;
    }

    pub fn go_to_previous_page(&mut self, anchors: &PageColumnLayout) -> Option<ScrollTo> {
        if self.state.current_page <= 1 {
            return None;
        }

        self.state.current_page -= 1;
        self.scroll_to_page(self.state.current_page, anchors)
    }

    pub fn go_to_next_page(&mut self, anchors: &PageColumnLayout) -> Option<ScrollTo> {
        if self.state.current_page >= self.state.total_pages {
            return None;
        }

        self.state.current_page += 1;
        self.scroll_to_page(self.state.current_page, anchors)
    }

    /// Scroll-direction disambiguation: a positive delta advances only while
    /// the viewport has not retreated since the last sample, and vice versa.
    /// The sample always updates afterwards, whichever branch fired.
    pub fn on_wheel(
        &mut self,
        delta: f32,
        viewport_offset: f32,
        anchors: &PageColumnLayout,
    ) -> Option<ScrollTo> {
        let scroll = if delta > 0.0 && self.sample.last_offset <= viewport_offset {
            self.go_to_next_page(anchors)
        } else if delta < 0.0 && self.sample.last_offset >= viewport_offset {
            self.go_to_previous_page(anchors)
        } else {
            None
        };

        self.sample.last_offset = viewport_offset;
        scroll
    }

    /// Anchor lookup for the 1-based `page`; silently does nothing while the
    /// layout has not been measured yet.
    pub fn scroll_to_page(&self, page: usize, anchors: &PageColumnLayout) -> Option<ScrollTo> {
        anchors
            .anchor_offset(page)
            .map(|offset| ScrollTo { offset })
    }

    pub fn last_sampled_offset(&self) -> f32 {
        self.sample.last_offset
    }
}

#[cfg(test)]
mod tests {
    use crate::viewer::anchors::{DEFAULT_CELL_PX, PageColumnLayout};

    use super::PageSync;

    fn loaded(total_pages: usize) -> (PageSync, PageColumnLayout) {
        let mut sync = PageSync::new();
        sync.on_document_loaded(total_pages);
        let layout = PageColumnLayout::build(
            &vec![(100.0, 100.0); total_pages],
            40,
            DEFAULT_CELL_PX,
            2,
        );
        (sync, layout)
    }

    #[test]
    fn load_notification_starts_at_page_one() {
        let mut sync = PageSync::new();
        sync.on_document_loaded(9);
        assert_eq!(sync.state.current_page, 1);
        assert_eq!(sync.state.total_pages, 9);
        assert!(sync.state.is_loaded());
    }

    #[test]
    fn previous_page_at_first_page_issues_nothing() {
        let (mut sync, layout) = loaded(3);
        assert_eq!(sync.go_to_previous_page(&layout), None);
        assert_eq!(sync.state.current_page, 1);
    }

    #[test]
    fn next_page_at_last_page_issues_nothing() {
        let (mut sync, layout) = loaded(2);
        assert!(sync.go_to_next_page(&layout).is_some());
        assert_eq!(sync.state.current_page, 2);
        assert_eq!(sync.go_to_next_page(&layout), None);
        assert_eq!(sync.state.current_page, 2);
    }

    #[test]
    fn navigation_is_inert_while_unloaded() {
        let mut sync = PageSync::new();
        let layout = PageColumnLayout::default();
        assert_eq!(sync.go_to_next_page(&layout), None);
        assert_eq!(sync.go_to_previous_page(&layout), None);
        assert_eq!(sync.state.current_page, 1);
    }

    #[test]
    fn walking_forward_stops_at_the_last_page() {
        let (mut sync, layout) = loaded(5);
        for _ in 0..4 {
            sync.go_to_next_page(&layout);
        }
        assert_eq!(sync.state.current_page, 5);
        assert_eq!(sync.go_to_next_page(&layout), None);
        assert_eq!(sync.state.current_page, 5);
    }

    #[test]
    fn every_navigation_keeps_current_page_in_range() {
        let (mut sync, layout) = loaded(3);
        let deltas = [10.0, 10.0, 10.0, -10.0, -10.0, -10.0, -10.0, 10.0];
        let mut offset = 0.0;
        for delta in deltas {
            offset += delta;
            sync.on_wheel(delta, offset, &layout);
            assert!(sync.state.current_page >= 1);
            assert!(sync.state.current_page <= sync.state.total_pages.max(1));
        }
    }

    #[test]
    fn forward_wheel_advances_and_resamples_the_offset() {
        let (mut sync, layout) = loaded(3);
        assert_eq!(sync.last_sampled_offset(), 0.0);

        let scroll = sync.on_wheel(10.0, 50.0, &layout);
        assert_eq!(sync.state.current_page, 2);
        assert_eq!(sync.last_sampled_offset(), 50.0);
        assert!(scroll.is_some());
    }

    #[test]
    fn inconsistent_forward_wheel_only_resamples() {
        let (mut sync, layout) = loaded(3);
        sync.on_wheel(10.0, 50.0, &layout);

        // Forward delta while the viewport retreated: debounced.
        let scroll = sync.on_wheel(10.0, 40.0, &layout);
        assert_eq!(scroll, None);
        assert_eq!(sync.state.current_page, 2);
        assert_eq!(sync.last_sampled_offset(), 40.0);
    }

    #[test]
    fn backward_wheel_needs_a_non_advancing_viewport() {
        let (mut sync, layout) = loaded(3);
        sync.on_wheel(10.0, 50.0, &layout);
        sync.on_wheel(10.0, 100.0, &layout);
        assert_eq!(sync.state.current_page, 3);

        // Backward delta but the viewport moved forward: debounced.
        assert_eq!(sync.on_wheel(-10.0, 120.0, &layout), None);
        assert_eq!(sync.state.current_page, 3);

        // Backward delta with the viewport at rest: retreat one page.
        assert!(sync.on_wheel(-10.0, 120.0, &layout).is_some());
        assert_eq!(sync.state.current_page, 2);
    }

    #[test]
    fn zero_delta_never_navigates() {
        let (mut sync, layout) = loaded(3);
        assert_eq!(sync.on_wheel(0.0, 25.0, &layout), None);
        assert_eq!(sync.state.current_page, 1);
        assert_eq!(sync.last_sampled_offset(), 25.0);
    }

    #[test]
    fn scroll_to_unmeasured_page_is_a_silent_no_op() {
        let (sync, layout) = loaded(3);
        assert_eq!(sync.scroll_to_page(7, &layout), None);

        let unmeasured = PageColumnLayout::default();
        assert_eq!(sync.scroll_to_page(1, &unmeasured), None);
    }

    #[test]
    fn scroll_commands_target_the_page_anchor() {
        let (mut sync, layout) = loaded(3);
        let scroll = sync.go_to_next_page(&layout).expect("page 2 is anchored");
        assert_eq!(scroll.offset, layout.anchor_offset(2).unwrap());
    }
}
