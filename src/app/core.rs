use std::path::{Path, PathBuf};

use crate::command::ActionId;
use crate::config::Config;
use crate::download::DownloadSpec;
use crate::error::AppResult;
use crate::viewer::{PageColumnLayout, PageSync, ScrollView};

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

/// Everything the viewer tracks for one document life. The event loop owns
/// the runtime pieces (terminal, worker, cache); this is the state commands
/// operate on.
pub struct App {
    pub viewer: PageSync,
    pub scroll: ScrollView,
    pub layout: PageColumnLayout,
    pub status: StatusState,
    pub debug_status_visible: bool,
    /// Height of the viewer pane at the last draw, in rows.
    pub viewport_rows: u16,
    pub download: DownloadSpec,
    pub config: Config,
}

impl App {
    pub fn new(source: PathBuf, save_as: Option<String>) -> AppResult<Self> {
        let config = Config::load()?;
        Ok(Self::new_with_config(source, save_as, config))
    }

    pub fn new_with_config(source: PathBuf, save_as: Option<String>, config: Config) -> Self {
        let download = DownloadSpec::new(source, save_as, config.download.directory.clone());
        Self {
            viewer: PageSync::new(),
            scroll: ScrollView::default(),
            layout: PageColumnLayout::default(),
            status: StatusState::default(),
            debug_status_visible: false,
            viewport_rows: 0,
            download,
            config,
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.download.source
    }

    pub fn source_file_name(&self) -> String {
        self.download
            .source
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .unwrap_or_else(|| self.download.source.display().to_string())
    }
}
