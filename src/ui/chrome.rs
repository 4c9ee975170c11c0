use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::StatusState;
use crate::viewer::ViewerState;

use super::layout::{UiLayout, centered_rect};

/// Controls the viewer exposes, in bar order. Boundary controls disappear
/// instead of disabling: no prev on the first page, no next on the last,
/// no save copy without a configured name, no page indicator before load.
pub fn controls_segments(state: &ViewerState, download_offered: bool) -> Vec<String> {
    let mut segments = Vec::new();

    if state.current_page != 1 {
        segments.push("[k] prev".to_string());
    }
    if state.is_loaded() && state.current_page != state.total_pages {
        segments.push("[j] next".to_string());
    }
    if state.is_loaded() {
        segments.push(format!(
            "page {} of {}",
            state.current_page, state.total_pages
        ));
    }
    if download_offered {
        segments.push("[d] save copy".to_string());
    }

    segments
}

#[allow(clippy::too_many_arguments)]
pub fn draw_controls(
    frame: &mut Frame<'_>,
    layout: UiLayout,
    state: &ViewerState,
    file_name: &str,
    download_offered: bool,
    status: &StatusState,
    debug_status_visible: bool,
) {
    let segments = controls_segments(state, download_offered);
    let bar = if segments.is_empty() {
        file_name.to_string()
    } else {
        format!("{file_name} | {}", segments.join("  "))
    };
    let bar = truncate_to_width(&bar, usize::from(layout.controls.width));

    let controls_row = Rect::new(
        layout.controls.x,
        layout.controls.y,
        layout.controls.width,
        1,
    );
    frame.render_widget(Paragraph::new(bar).style(Style::default()), controls_row);

    if debug_status_visible && layout.controls.height >= 2 {
        let action = status.last_action_id.map(|id| id.as_str()).unwrap_or("-");
        let message = if status.message.is_empty() {
            "-"
        } else {
            status.message.as_str()
        };
        let debug_text = truncate_to_width(
            &format!("cmd={action} | msg={message}"),
            usize::from(layout.controls.width),
        );
        let debug_row = Rect::new(
            layout.controls.x,
            layout.controls.y + 1,
            layout.controls.width,
            1,
        );
        frame.render_widget(Paragraph::new(debug_text), debug_row);
    }
}

/// Shown in the viewer area for as long as the document has not loaded.
pub fn draw_opening_overlay(frame: &mut Frame<'_>, area: Rect, file_name: &str) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let text = truncate_to_width(&format!("opening {file_name}..."), usize::from(area.width));
    let line = centered_rect(area, text.width() as u16, 1);
    frame.render_widget(Paragraph::new(text), line);
}

pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.to_string().width();
        if used + ch_width > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}
