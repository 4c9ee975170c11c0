use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub scroll: ScrollConfig,
    pub cache: CacheConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub worker_threads: usize,
    pub redraw_interval_ms: u64,
    pub max_render_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            worker_threads: 1,
            redraw_interval_ms: 33,
            max_render_scale: 2.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollConfig {
    pub page_gap_rows: u16,
    pub glide_fraction: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            page_gap_rows: 1,
            glide_fraction: 0.35,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: usize,
    pub memory_budget_mb: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            memory_budget_mb: 256,
        }
    }
}

impl CacheConfig {
    const MEBIBYTE: usize = 1024 * 1024;

    pub fn memory_budget_bytes(&self) -> usize {
        self.memory_budget_mb.saturating_mul(Self::MEBIBYTE).max(1)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DownloadConfig {
    pub directory: Option<PathBuf>,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.render.worker_threads = self.render.worker_threads.max(1);
        self.render.redraw_interval_ms = self.render.redraw_interval_ms.max(1);
        if !self.render.max_render_scale.is_finite() || self.render.max_render_scale < 1.0 {
            self.render.max_render_scale = RenderConfig::default().max_render_scale;
        }
        if !self.scroll.glide_fraction.is_finite()
            || self.scroll.glide_fraction <= 0.0
            || self.scroll.glide_fraction > 1.0
        {
            self.scroll.glide_fraction = ScrollConfig::default().glide_fraction;
        }
        self.cache.max_entries = self.cache.max_entries.max(1);
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("PDF_PANE_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("pdf-pane").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("pdf-pane")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("pdf-pane").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::Config;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("ppane_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [render]
            worker_threads = 0
            redraw_interval_ms = 0
            max_render_scale = 0.25

            [scroll]
            page_gap_rows = 2
            glide_fraction = 7.0

            [cache]
            max_entries = 0

            [download]
            directory = "/tmp/saved-pdfs"
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.render.worker_threads, 1);
        assert_eq!(config.render.redraw_interval_ms, 1);
        assert_eq!(config.render.max_render_scale, 2.5);
        assert_eq!(config.scroll.page_gap_rows, 2);
        assert_eq!(config.scroll.glide_fraction, 0.35);
        assert_eq!(config.cache.max_entries, 1);
        assert_eq!(config.cache.memory_budget_mb, 256);
        assert_eq!(
            config.download.directory,
            Some(PathBuf::from("/tmp/saved-pdfs"))
        );

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_rejects_directory() {
        let dir = unique_temp_path("dir");
        fs::create_dir_all(&dir).expect("test directory should be created");

        assert!(Config::load_from_path(&dir).is_err());

        fs::remove_dir_all(&dir).expect("test directory should be removed");
    }
}
