mod dispatch;
mod types;

pub use dispatch::dispatch;
pub use types::{ActionId, Command, CommandOutcome};
