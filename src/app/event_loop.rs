use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::backend::{DocumentHandle, load_document};
use crate::command::{self, ActionId, Command, CommandOutcome};
use crate::error::AppResult;
use crate::event::DomainEvent;
use crate::input;
use crate::presenter;
use crate::render::{FrameCache, FrameKey, RenderOutcome, RenderRequest, RenderWorker};
use crate::ui;
use crate::viewer::{DEFAULT_PAGE_SIZE_PT, PageColumnLayout};

use super::core::App;
use super::terminal_session::{TerminalSession, TerminalSurface};

struct LoopRuntime {
    session: TerminalSession,
    event_rx: UnboundedReceiver<DomainEvent>,
    tasks: Vec<JoinHandle<()>>,
    redraw_tick: time::Interval,
    doc: Option<DocumentHandle>,
    worker: Option<RenderWorker>,
    cache: FrameCache,
    in_flight: HashSet<FrameKey>,
    failed: HashSet<FrameKey>,
    needs_redraw: bool,
}

enum LoopEvent {
    Domain(DomainEvent),
    Render(RenderOutcome),
    RedrawTick,
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let session = TerminalSession::enter()?;
        let (event_tx, event_rx) = unbounded_channel();
        let tasks = vec![
            spawn_input_task(event_tx.clone()),
            spawn_load_task(event_tx, self.source_path().to_path_buf()),
        ];

        let mut redraw_tick =
            time::interval(Duration::from_millis(self.config.render.redraw_interval_ms));
        redraw_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut runtime = LoopRuntime {
            session,
            event_rx,
            tasks,
            redraw_tick,
            doc: None,
            worker: None,
            cache: FrameCache::new(
                self.config.cache.max_entries,
                self.config.cache.memory_budget_bytes(),
            ),
            in_flight: HashSet::new(),
            failed: HashSet::new(),
            needs_redraw: true,
        };

        let result = self.run_loop(&mut runtime).await;

        for task in runtime.tasks.drain(..) {
            task.abort();
        }
        runtime.session.restore()?;
        result
    }

    async fn run_loop(&mut self, runtime: &mut LoopRuntime) -> AppResult<()> {
        loop {
            if runtime.needs_redraw {
                runtime.needs_redraw = false;
                self.draw_frame(runtime)?;
            }

            let event = wait_next_event(
                &mut runtime.event_rx,
                runtime.worker.as_mut(),
                &mut runtime.redraw_tick,
            )
            .await;

            match event {
                LoopEvent::Domain(event) => {
                    if matches!(self.handle_domain_event(event, runtime), LoopControl::Break) {
                        break;
                    }
                }
                LoopEvent::Render(outcome) => self.handle_render_outcome(outcome, runtime),
                LoopEvent::RedrawTick => {
                    if self.scroll.step_glide(self.config.scroll.glide_fraction) {
                        runtime.needs_redraw = true;
                    }
                }
                LoopEvent::Closed => break,
            }
        }
        Ok(())
    }

    fn handle_domain_event(&mut self, event: DomainEvent, runtime: &mut LoopRuntime) -> LoopControl {
        match event {
            DomainEvent::Input(Event::Key(key))
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
            {
                if let Some(cmd) = input::map_key(key) {
                    return self.apply_command(cmd, runtime);
                }
            }
            DomainEvent::Input(Event::Mouse(mouse)) => {
                if let Some(cmd) = input::map_wheel(mouse) {
                    return self.apply_command(cmd, runtime);
                }
            }
            DomainEvent::Input(Event::Resize(_, _)) => runtime.needs_redraw = true,
            DomainEvent::Input(_) => {}
            DomainEvent::InputError(message) => {
                self.status.last_action_id = None;
                self.status.message = format!("input error: {message}");
                runtime.needs_redraw = true;
            }
            DomainEvent::DocumentLoaded(doc) => {
                self.viewer.on_document_loaded(doc.page_count);
                self.status.last_action_id = Some(ActionId::Load);
                self.status.message = format!("{} pages", doc.page_count);
                runtime.worker = Some(RenderWorker::spawn(
                    doc.path.clone(),
                    Arc::clone(&doc.bytes),
                    self.config.render.worker_threads,
                ));
                runtime.doc = Some(doc);
                runtime.needs_redraw = true;
            }
            DomainEvent::DocumentFailed(message) => {
                // The viewer stays in its unloaded phase for good; only the
                // status line learns why.
                self.status.last_action_id = Some(ActionId::Load);
                self.status.message = format!("could not open document: {message}");
                runtime.needs_redraw = true;
            }
        }
        LoopControl::Continue
    }

    fn apply_command(&mut self, cmd: Command, runtime: &mut LoopRuntime) -> LoopControl {
        let outcome = command::dispatch(self, cmd);
        runtime.needs_redraw = true;
        if outcome == CommandOutcome::QuitRequested {
            LoopControl::Break
        } else {
            LoopControl::Continue
        }
    }

    fn handle_render_outcome(&mut self, outcome: RenderOutcome, runtime: &mut LoopRuntime) {
        runtime.in_flight.remove(&outcome.key);
        match outcome.result {
            Ok(frame) => runtime.cache.insert(outcome.key, frame),
            Err(err) => {
                runtime.failed.insert(outcome.key);
                self.status.last_action_id = Some(ActionId::RenderPage);
                self.status.message = format!("render error: {err}");
            }
        }
        runtime.needs_redraw = true;
    }

    fn draw_frame(&mut self, runtime: &mut LoopRuntime) -> AppResult<()> {
        let LoopRuntime {
            session,
            doc,
            worker,
            cache,
            in_flight,
            failed,
            ..
        } = runtime;

        let size = session.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let panes = ui::split_layout(area, self.debug_status_visible);
        self.viewport_rows = panes.viewer.height;
        let cell_px = presenter::cell_size_px();
        let gap_rows = self.config.scroll.page_gap_rows;

        if let Some(doc) = doc.as_ref() {
            if !self
                .layout
                .matches(doc.page_count, panes.viewer.width.max(1), cell_px, gap_rows)
            {
                self.layout =
                    PageColumnLayout::build(&doc.page_sizes, panes.viewer.width, cell_px, gap_rows);
            }
            self.scroll
                .clamp_to(self.layout.max_scroll(panes.viewer.height));
            if let Some(worker) = worker.as_ref() {
                self.request_missing_frames(
                    doc,
                    worker,
                    cache,
                    in_flight,
                    failed,
                    cell_px,
                    panes.viewer.height,
                );
            }
        }

        let file_name = self.source_file_name();
        let offset_rows = self.scroll.offset().round().max(0.0) as u32;
        let doc_id = doc.as_ref().map(|doc| doc.doc_id);

        session.draw(|frame| {
            let panes = ui::split_layout(frame.area(), self.debug_status_visible);
            ui::draw_controls(
                frame,
                panes,
                &self.viewer.state,
                &file_name,
                self.download.is_offered(),
                &self.status,
                self.debug_status_visible,
            );

            frame.render_widget(Clear, panes.viewer);
            match doc_id {
                Some(doc_id) if !self.layout.is_empty() => {
                    let layout = &self.layout;
                    let viewer_cols = layout.viewer_cols();
                    let buf = frame.buffer_mut();
                    presenter::draw_page_column(buf, panes.viewer, layout, offset_rows, |page| {
                        let extent = layout.extent(page)?;
                        let key = FrameKey {
                            doc_id,
                            page_index: page - 1,
                            px_width: u32::from(viewer_cols),
                        };
                        let full = cache.get(&key)?;
                        presenter::resize_frame(full, u32::from(viewer_cols), extent.rows * 2).ok()
                    });
                }
                _ => ui::draw_opening_overlay(frame, panes.viewer, &file_name),
            }
        })?;

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn request_missing_frames(
        &self,
        doc: &DocumentHandle,
        worker: &RenderWorker,
        cache: &FrameCache,
        in_flight: &mut HashSet<FrameKey>,
        failed: &HashSet<FrameKey>,
        cell_px: (u16, u16),
        viewport_rows: u16,
    ) {
        let mut wanted = self.layout.visible_pages(self.scroll.offset(), viewport_rows);
        if let Some(&last) = wanted.last()
            && last < doc.page_count
        {
            wanted.push(last + 1);
        }

        for page in wanted {
            let key = FrameKey {
                doc_id: doc.doc_id,
                page_index: page - 1,
                px_width: u32::from(self.layout.viewer_cols()),
            };
            if cache.contains(&key) || in_flight.contains(&key) || failed.contains(&key) {
                continue;
            }

            let page_width_pt = doc
                .page_sizes
                .get(page - 1)
                .map(|&(width, _)| width)
                .unwrap_or(DEFAULT_PAGE_SIZE_PT.0);
            let scale = presenter::render_scale(
                page_width_pt,
                self.layout.viewer_cols(),
                cell_px,
                self.config.render.max_render_scale,
            );
            worker.request(RenderRequest { key, scale });
            in_flight.insert(key);
        }
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let domain_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(domain_event).is_err() {
                return;
            }
        }
    })
}

fn spawn_load_task(tx: UnboundedSender<DomainEvent>, path: PathBuf) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let event = match load_document(&path) {
            Ok(doc) => DomainEvent::DocumentLoaded(doc),
            Err(err) => DomainEvent::DocumentFailed(err.to_string()),
        };
        let _ = tx.send(event);
    })
}

async fn wait_next_event(
    event_rx: &mut UnboundedReceiver<DomainEvent>,
    worker: Option<&mut RenderWorker>,
    redraw_tick: &mut time::Interval,
) -> LoopEvent {
    let render_results = async move {
        match worker {
            Some(worker) => worker.recv_result().await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        biased;
        maybe_event = event_rx.recv() => match maybe_event {
            Some(event) => LoopEvent::Domain(event),
            None => LoopEvent::Closed,
        },
        maybe_render = render_results => match maybe_render {
            Some(outcome) => LoopEvent::Render(outcome),
            None => LoopEvent::Closed,
        },
        _ = redraw_tick.tick() => LoopEvent::RedrawTick,
    }
}
