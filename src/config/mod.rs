use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_THEME: &str = "dark";
pub const PROJECT_CONFIG_DIR: &str = ".wgf";
const APP_DIR: &str = "whatsgroup-finder";

#[derive(Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub theme: String,
    pub http: HttpConfig,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("theme", &self.theme)
            .field("http", &self.http)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    /// Whole-request timeout. Unset means a search may wait forever.
    pub request_timeout_ms: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            request_timeout_ms: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            theme: DEFAULT_THEME.to_string(),
            http: HttpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub theme: Option<String>,
    pub http: Option<PartialHttpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialHttpConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

/// Values given on the command line; they beat every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub theme: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI overrides, the process environment,
    /// `.wgf/config.toml` in the working directory and the global config
    /// file.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let project_root = std::env::current_dir().context("resolve current dir")?;
        let project_cfg = load_project_config(&project_root).unwrap_or_default();
        let file_cfg = load_file_config().unwrap_or_default();
        Ok(Self::resolve(
            overrides,
            |name| std::env::var(name).ok(),
            project_cfg,
            file_cfg,
        ))
    }

    /// Precedence: overrides > env > project file > global file > default.
    pub fn resolve(
        overrides: &ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
        project_cfg: FileConfig,
        file_cfg: FileConfig,
    ) -> Self {
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = overrides
            .api_key
            .clone()
            .or_else(|| env("GEMINI_API_KEY"))
            .or_else(|| env("API_KEY"))
            .or(project_cfg.api_key)
            .or(file_cfg.api_key);
        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| env("GEMINI_BASE_URL"))
            .or(project_cfg.base_url)
            .or(file_cfg.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = overrides
            .model
            .clone()
            .or_else(|| env("GEMINI_MODEL"))
            .or(project_cfg.model)
            .or(file_cfg.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let theme = overrides
            .theme
            .clone()
            .or(project_cfg.theme)
            .or(file_cfg.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let http_defaults = HttpConfig::default();
        let project_http = project_cfg.http.unwrap_or_default();
        let file_http = file_cfg.http.unwrap_or_default();
        let http = HttpConfig {
            connect_timeout_ms: project_http
                .connect_timeout_ms
                .or(file_http.connect_timeout_ms)
                .unwrap_or(http_defaults.connect_timeout_ms),
            request_timeout_ms: project_http
                .request_timeout_ms
                .or(file_http.request_timeout_ms)
                .or(http_defaults.request_timeout_ms),
        };

        Self {
            base_url,
            model,
            api_key,
            theme,
            http,
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Ok(p) = std::env::var("WGF_CONFIG") {
        v.push(PathBuf::from(p));
    }
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        v.push(Path::new(&xdg_home).join(APP_DIR).join("config.toml"));
    }
    if let Some(dir) = dirs::config_dir() {
        let p = dir.join(APP_DIR).join("config.toml");
        if !v.contains(&p) {
            v.push(p);
        }
    }
    v
}

fn read_config(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(path)
        .with_context(|| format!("read config file: {}", path.display()))?;
    match toml::from_str::<FileConfig>(&s) {
        Ok(cfg) => {
            info!(path = %path.display(), "loaded config file");
            Ok(Some(cfg))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "parse config failed");
            Ok(None)
        }
    }
}

/// First readable global config file, or defaults.
pub fn load_file_config() -> Result<FileConfig> {
    for p in candidate_paths() {
        if let Some(cfg) = read_config(&p)? {
            return Ok(cfg);
        }
    }
    Ok(FileConfig::default())
}

/// Load project-specific configuration from `.wgf/config.toml`.
pub fn load_project_config(project_root: &Path) -> Result<FileConfig> {
    let path = project_root.join(PROJECT_CONFIG_DIR).join("config.toml");
    Ok(read_config(&path)?.unwrap_or_default())
}

#[cfg(test)]
mod tests;
