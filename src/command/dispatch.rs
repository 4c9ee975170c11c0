use crate::app::App;
use crate::download;
use crate::viewer::ScrollTo;

use super::types::{Command, CommandOutcome};

/// Applies one command to the app state. Runs to completion on the event
/// loop; nothing here can fail, boundary requests come back as `Noop`.
pub fn dispatch(app: &mut App, cmd: Command) -> CommandOutcome {
    app.status.last_action_id = Some(cmd.action_id());

    match cmd {
        Command::NextPage => {
            let before = app.viewer.state.current_page;
            let scroll = app.viewer.go_to_next_page(&app.layout);
            apply_scroll(app, scroll);
            if app.viewer.state.current_page != before {
                set_page_message(app);
                CommandOutcome::Applied
            } else {
                app.status.message = if app.viewer.state.is_loaded() {
                    format!(
                        "already at last page ({}/{})",
                        app.viewer.state.current_page, app.viewer.state.total_pages
                    )
                } else {
                    "document is still opening".to_string()
                };
                CommandOutcome::Noop
            }
        }
        Command::PrevPage => {
            let before = app.viewer.state.current_page;
            let scroll = app.viewer.go_to_previous_page(&app.layout);
            apply_scroll(app, scroll);
            if app.viewer.state.current_page != before {
                set_page_message(app);
                CommandOutcome::Applied
            } else {
                app.status.message = "already at first page (1)".to_string();
                CommandOutcome::Noop
            }
        }
        Command::Wheel { delta } => {
            let before = app.viewer.state.current_page;
            let offset = app.scroll.offset();
            let scroll = app.viewer.on_wheel(delta, offset, &app.layout);
            apply_scroll(app, scroll);
            if app.viewer.state.current_page != before {
                set_page_message(app);
                CommandOutcome::Applied
            } else {
                CommandOutcome::Noop
            }
        }
        Command::ScrollBy { rows } => {
            let max = app.layout.max_scroll(app.viewport_rows);
            app.scroll.scroll_by(rows, max);
            app.status.message = format!("scrolled to row {}", app.scroll.offset().round() as i64);
            CommandOutcome::Applied
        }
        Command::SaveCopy => match app.download.file_name.clone() {
            Some(name) => {
                let _ = download::save_copy(&app.download.source, &name, &app.download.directory);
                app.status.message = format!("saving copy as {name}");
                CommandOutcome::Applied
            }
            None => {
                app.status.message = "no save name configured".to_string();
                CommandOutcome::Noop
            }
        },
        Command::ToggleStatus => {
            app.debug_status_visible = !app.debug_status_visible;
            let state = if app.debug_status_visible { "on" } else { "off" };
            app.status.message = format!("status line {state}");
            CommandOutcome::Applied
        }
        Command::Quit => {
            app.status.message = "quit requested".to_string();
            CommandOutcome::QuitRequested
        }
    }
}

fn apply_scroll(app: &mut App, scroll: Option<ScrollTo>) {
    if let Some(ScrollTo { offset }) = scroll {
        let max = app.layout.max_scroll(app.viewport_rows);
        app.scroll.glide_to(offset.min(max));
    }
}

fn set_page_message(app: &mut App) {
    app.status.message = format!(
        "page {}/{}",
        app.viewer.state.current_page, app.viewer.state.total_pages
    );
}
