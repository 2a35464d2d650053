//! Configuration file support and per-invocation settings.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::infra::ResultCache;
use crate::provider::Backend;
use crate::store::NoteStore;

/// Cache lifetime used when nothing valid is configured.
const DEFAULT_TTL_SECS: u64 = 30;

/// Shell the search UI runs preview commands with.
const DEFAULT_FZF_SHELL: &str = "/bin/sh";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Notes backend (auto, sqlite, applescript)
    pub backend: Option<String>,

    /// Listing cache lifetime in seconds
    pub cache_ttl_seconds: Option<i64>,

    /// Disable the listing cache
    pub no_cache: Option<bool>,

    /// Notes database location
    pub db_path: Option<PathBuf>,

    /// Report step timings on stderr
    pub timing: Option<bool>,

    /// Shell used by the search UI
    pub fzf_shell: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/memo/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("memo")
            .join("config.toml")
    }
}

/// Everything a listing needs to know, resolved once per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub backend: Backend,
    /// Zero disables the cache.
    pub cache_ttl: Duration,
    pub no_cache: bool,
    pub db_path: PathBuf,
    pub cache_path: PathBuf,
    pub timing: bool,
    pub fzf_shell: String,
}

impl Settings {
    /// Resolves settings from the process environment.
    pub fn from_env(config: &Config, cli_backend: Option<&str>, cli_no_cache: bool) -> Self {
        Self::resolve(config, cli_backend, cli_no_cache, |key| std::env::var(key).ok())
    }

    /// Resolves settings with an explicit environment lookup.
    ///
    /// Precedence order:
    /// 1. CLI flags (`--backend`, `--no-cache`)
    /// 2. `MEMO_*` environment variables
    /// 3. Config file
    /// 4. Built-in defaults
    pub fn resolve<F>(config: &Config, cli_backend: Option<&str>, cli_no_cache: bool, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = cli_backend
            .map(str::to_string)
            .or_else(|| env("MEMO_NOTES_BACKEND"))
            .or_else(|| config.backend.clone())
            .map(|v| Backend::from_setting(&v))
            .unwrap_or_default();

        let ttl_secs = match env("MEMO_CACHE_TTL_SECONDS") {
            Some(raw) => parse_ttl(&raw),
            None => config
                .cache_ttl_seconds
                .map_or(DEFAULT_TTL_SECS, |secs| secs.max(0) as u64),
        };

        let no_cache = cli_no_cache
            || env("MEMO_NO_CACHE").is_some_and(|v| is_truthy(&v))
            || config.no_cache.unwrap_or(false);

        let timing = env("MEMO_TIMING").is_some_and(|v| is_truthy(&v))
            || config.timing.unwrap_or(false);

        let db_path = env("MEMO_NOTES_DB_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| config.db_path.clone())
            .unwrap_or_else(NoteStore::default_path);

        let cache_root = env("XDG_CACHE_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .unwrap_or_else(|| PathBuf::from("."));

        let fzf_shell = env("MEMO_FZF_SHELL")
            .or_else(|| config.fzf_shell.clone())
            .unwrap_or_else(|| DEFAULT_FZF_SHELL.to_string());

        Self {
            backend,
            cache_ttl: Duration::from_secs(ttl_secs),
            no_cache,
            db_path,
            cache_path: ResultCache::path_in(&cache_root),
            timing,
            fzf_shell,
        }
    }

    /// Builds the listing cache these settings describe.
    pub fn cache(&self) -> ResultCache {
        if self.no_cache {
            return ResultCache::disabled();
        }
        ResultCache::new(&self.cache_path, self.cache_ttl)
    }
}

/// Parses a TTL in seconds: non-numeric falls back to the default and
/// negative values clamp to zero.
fn parse_ttl(raw: &str) -> u64 {
    match raw.trim().parse::<i64>() {
        Ok(secs) => secs.max(0) as u64,
        Err(_) => DEFAULT_TTL_SECS,
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
