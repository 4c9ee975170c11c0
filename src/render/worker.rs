use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::{PageFrame, open_default_backend_with_bytes};
use crate::error::{AppError, AppResult};

use super::cache::FrameKey;

#[derive(Debug, Clone, Copy)]
pub struct RenderRequest {
    pub key: FrameKey,
    pub scale: f32,
}

#[derive(Debug)]
pub struct RenderOutcome {
    pub key: FrameKey,
    pub result: AppResult<PageFrame>,
}

/// Background page rendering.
///
/// Worker threads reopen the document from the shared bytes so the event
/// loop never blocks on a decode; requests and results flow over unbounded
/// channels. Dropping the worker closes the request channel and the threads
/// drain out on their own.
pub struct RenderWorker {
    request_tx: flume::Sender<RenderRequest>,
    result_rx: flume::Receiver<RenderOutcome>,
}

impl RenderWorker {
    pub fn spawn(path: PathBuf, bytes: Arc<Vec<u8>>, worker_threads: usize) -> Self {
        let (request_tx, request_rx) = flume::unbounded::<RenderRequest>();
        let (result_tx, result_rx) = flume::unbounded::<RenderOutcome>();

        for worker in 0..worker_threads.max(1) {
            let path = path.clone();
            let bytes = Arc::clone(&bytes);
            let request_rx = request_rx.clone();
            let result_tx = result_tx.clone();
            std::thread::Builder::new()
                .name(format!("ppane-render-{worker}"))
                .spawn(move || render_worker_main(path, bytes, request_rx, result_tx))
                .expect("render worker thread should spawn");
        }

        Self {
            request_tx,
            result_rx,
        }
    }

    pub fn request(&self, request: RenderRequest) {
        let _ = self.request_tx.send(request);
    }

    pub async fn recv_result(&mut self) -> Option<RenderOutcome> {
        self.result_rx.recv_async().await.ok()
    }
}

fn render_worker_main(
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    request_rx: flume::Receiver<RenderRequest>,
    result_tx: flume::Sender<RenderOutcome>,
) {
    match open_default_backend_with_bytes(&path, bytes) {
        Ok(backend) => {
            while let Ok(request) = request_rx.recv() {
                let result = backend
                    .render_page(request.key.page_index, request.scale)
                    .map_err(|err| AppError::page_render(request.key.page_index, err));
                let outcome = RenderOutcome {
                    key: request.key,
                    result,
                };
                if result_tx.send(outcome).is_err() {
                    return;
                }
            }
        }
        Err(err) => {
            let message = err.to_string();
            while let Ok(request) = request_rx.recv() {
                let outcome = RenderOutcome {
                    key: request.key,
                    result: Err(AppError::page_render(
                        request.key.page_index,
                        AppError::invalid_argument(message.clone()),
                    )),
                };
                if result_tx.send(outcome).is_err() {
                    return;
                }
            }
        }
    }
}
