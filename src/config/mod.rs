use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::grid::{GridOptions, DEFAULT_IDENTITY_FIELD, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub identity_field: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            identity_field: DEFAULT_IDENTITY_FIELD.to_string(),
        }
    }
}

impl GridConfig {
    /// Grid options with sanitized page sizes
    pub fn grid_options(&self) -> GridOptions {
        let mut options: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|size| *size > 0)
            .collect();
        options.sort_unstable();
        options.dedup();
        if options.is_empty() {
            options = DEFAULT_PAGE_SIZE_OPTIONS.to_vec();
        }
        let page_size = if options.contains(&self.default_page_size) {
            self.default_page_size
        } else {
            options[0]
        };
        let identity_field = if self.identity_field.trim().is_empty() {
            DEFAULT_IDENTITY_FIELD.to_string()
        } else {
            self.identity_field.trim().to_string()
        };
        GridOptions {
            identity_field,
            page_size,
            page_size_options: options,
            ..GridOptions::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    pub completed: Option<String>,
    pub ongoing: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Load from the default location; missing or invalid files yield defaults.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => Config::default(),
    }
}

pub fn load_from(path: &Path) -> Config {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    match Config::parse(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("DISPATCH_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("dispatch").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("dispatch").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "dispatch", "dispatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("dispatch"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("dispatch"));
    }
    directories::ProjectDirs::from("io", "dispatch", "dispatch")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn exports_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("exports"))
        .unwrap_or_else(|| PathBuf::from(".dispatch").join("exports"))
}

pub fn log_path(config: &LogConfig) -> Option<PathBuf> {
    match config.file.as_deref() {
        Some(file) => expand_path(file),
        None => data_dir().map(|dir| dir.join("dispatch.log")),
    }
}

/// Expand `~/` and resolve relative paths against the working directory.
pub fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    let mut buf = PathBuf::from(trimmed);
    if buf.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            buf = cwd.join(buf);
        }
    }
    Some(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").expect("empty parses");
        let options = config.grid.grid_options();
        assert_eq!(options.page_size, 10);
        assert_eq!(options.page_size_options, vec![10, 20, 50]);
        assert_eq!(options.identity_field, "id");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_grid_section() {
        let config = Config::parse(
            r#"
            [grid]
            page_size_options = [50, 5, 0, 5, 25]

            [data]
            completed = "~/dispatch/completed.csv"
            "#,
        )
        .expect("parses");
        let options = config.grid.grid_options();
        assert_eq!(options.page_size_options, vec![5, 25, 50]);
        // 10 is not offered any more, fall back to the smallest option
        assert_eq!(options.page_size, 5);
        assert_eq!(config.data.completed.as_deref(), Some("~/dispatch/completed.csv"));
        assert!(config.data.ongoing.is_none());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[grid\nbroken").expect("write");
        let config = load_from(&path);
        assert_eq!(config.grid.default_page_size, 10);
    }

    #[test]
    fn test_expand_path() {
        assert!(expand_path("   ").is_none());
        let abs = expand_path("/tmp/a.csv").expect("absolute");
        assert_eq!(abs, PathBuf::from("/tmp/a.csv"));
        assert!(expand_path("relative.csv").expect("relative").is_absolute());
    }
}
