mod cache;
mod worker;

pub use cache::{FrameCache, FrameKey};
pub use worker::{RenderOutcome, RenderRequest, RenderWorker};
