use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use crate::backend::PageFrame;
use crate::viewer::PageColumnLayout;

const UPPER_HALF_BLOCK: &str = "▀";
/// Pages render on white; out-of-frame samples blend in as paper.
const PAGE_BLANK: Color = Color::Rgb(255, 255, 255);

/// Paints the visible slice of the page column into the viewer area.
///
/// Each terminal row shows two frame pixel rows via the upper-half block.
/// `frame_for_page` supplies a frame already resized to the page's band
/// (viewer columns wide, two pixels per row); pages without a frame yet get
/// a centered pending label, gap rows stay untouched.
pub fn draw_page_column(
    buf: &mut Buffer,
    area: Rect,
    layout: &PageColumnLayout,
    offset_rows: u32,
    mut frame_for_page: impl FnMut(usize) -> Option<PageFrame>,
) {
    if area.width == 0 || area.height == 0 || layout.is_empty() {
        return;
    }

    let mut frames: HashMap<usize, Option<PageFrame>> = HashMap::new();

    for row in 0..area.height {
        let content_row = offset_rows.saturating_add(u32::from(row));
        let Some(page) = layout.page_at_row(content_row) else {
            continue;
        };
        let Some(extent) = layout.extent(page) else {
            continue;
        };
        let local_row = content_row - extent.top_row;

        let frame = frames.entry(page).or_insert_with(|| frame_for_page(page));
        match frame {
            Some(frame) => paint_frame_row(buf, area, row, frame, local_row),
            None => {
                if content_row == extent.top_row + extent.rows / 2 {
                    draw_pending_label(buf, area, row, page);
                }
            }
        }
    }
}

fn paint_frame_row(buf: &mut Buffer, area: Rect, row: u16, frame: &PageFrame, local_row: u32) {
    let Ok(pixels) = bytemuck::try_cast_slice::<u8, [u8; 4]>(frame.pixels.as_ref()) else {
        return;
    };

    let cols = u32::from(area.width).min(frame.width);
    let left = area.x + (area.width - cols as u16) / 2;
    for x in 0..cols {
        let top = sample(pixels, frame, x, local_row * 2);
        let bottom = sample(pixels, frame, x, local_row * 2 + 1);
        if let Some(cell) = buf.cell_mut((left + x as u16, area.y + row)) {
            cell.set_symbol(UPPER_HALF_BLOCK);
            cell.fg = top;
            cell.bg = bottom;
        }
    }
}

fn sample(pixels: &[[u8; 4]], frame: &PageFrame, x: u32, y: u32) -> Color {
    if x >= frame.width || y >= frame.height {
        return PAGE_BLANK;
    }
    pixels
        .get((y * frame.width + x) as usize)
        .map(|px| Color::Rgb(px[0], px[1], px[2]))
        .unwrap_or(PAGE_BLANK)
}

fn draw_pending_label(buf: &mut Buffer, area: Rect, row: u16, page: usize) {
    let label = format!("rendering page {page}...");
    let width = (label.len() as u16).min(area.width);
    let x = area.x + (area.width - width) / 2;
    buf.set_stringn(
        x,
        area.y + row,
        &label,
        usize::from(width),
        Style::default(),
    );
}
