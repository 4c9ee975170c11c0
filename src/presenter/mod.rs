use crate::viewer::{DEFAULT_CELL_PX, DEFAULT_PAGE_SIZE_PT};

mod halfblocks;
mod image_ops;

pub use halfblocks::draw_page_column;
pub use image_ops::resize_frame;

/// Terminal cell geometry in pixels, with a conservative fallback when the
/// terminal does not report window metrics.
pub fn cell_size_px() -> (u16, u16) {
    cell_size_from_window().unwrap_or(DEFAULT_CELL_PX)
}

fn cell_size_from_window() -> Option<(u16, u16)> {
    let window = crossterm::terminal::window_size().ok()?;
    cell_size_from_window_metrics(window.width, window.height, window.columns, window.rows)
}

pub(crate) fn cell_size_from_window_metrics(
    width_px: u16,
    height_px: u16,
    columns: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if width_px == 0 || height_px == 0 || columns == 0 || rows == 0 {
        return None;
    }
    let cell_width = width_px / columns;
    let cell_height = height_px / rows;
    if cell_width == 0 || cell_height == 0 {
        return None;
    }
    Some((cell_width, cell_height))
}

/// Backend scale that renders a page at the viewer's on-screen pixel width,
/// leaving headroom for the downscale to halfblock resolution.
pub fn render_scale(
    page_width_pt: f32,
    viewer_cols: u16,
    cell_px: (u16, u16),
    max_scale: f32,
) -> f32 {
    let page_width_pt = if page_width_pt.is_finite() && page_width_pt > 0.0 {
        page_width_pt
    } else {
        DEFAULT_PAGE_SIZE_PT.0
    };
    let target_px = f32::from(viewer_cols.max(1)) * f32::from(cell_px.0.max(1));
    let max_scale = if max_scale.is_finite() && max_scale >= 1.0 {
        max_scale
    } else {
        1.0
    };

    (target_px / page_width_pt).clamp(0.1, max_scale)
}
