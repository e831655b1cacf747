//! Environment-driven runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use nathara_types::ArenaId;

/// Which backend the telemetry source talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// In-process randomized generator (bench / UI development).
    Sim,
    /// HTTP reads against the hosted document store.
    Remote,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP/Socket.IO listen port (default 3001)
    pub port: u16,
    /// Refresh cadence (default 1000 ms)
    pub refresh: Duration,
    /// Per-fetch timeout; clamped to the refresh period (default 800 ms)
    pub fetch_timeout: Duration,
    /// Trajectory FIFO capacity, 0 = unbounded (default 3600)
    pub trajectory_cap: usize,
    /// Arena selected when a session starts (default A)
    pub default_arena: ArenaId,
    pub source: SourceKind,
    /// Document store base URL (remote source only)
    pub remote_url: String,
    /// Document store API key, optional
    pub remote_key: Option<String>,
    /// Directory holding the static picture assets
    pub media_dir: PathBuf,
    /// Enabled info panels, comma-separated
    pub panels: Vec<String>,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        let refresh_ms: u64 = env_parse("NATHARA_REFRESH_MS", 1000);
        let timeout_ms: u64 = env_parse("NATHARA_FETCH_TIMEOUT_MS", 800);
        // A fetch slower than the refresh period is useless: latest value wins
        let timeout_ms = timeout_ms.min(refresh_ms);

        let source = match std::env::var("NATHARA_SOURCE").as_deref() {
            Ok("remote") => SourceKind::Remote,
            _ => SourceKind::Sim,
        };

        let default_arena = std::env::var("NATHARA_ARENA")
            .ok()
            .and_then(|v| ArenaId::parse(&v))
            .unwrap_or(ArenaId::A);

        let panels = std::env::var("NATHARA_PANELS")
            .unwrap_or_else(|_| "monitoring,vision,autonomous,hardware,media".to_string())
            .split(',')
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        Self {
            port: env_parse("NATHARA_PORT", 3001),
            refresh: Duration::from_millis(refresh_ms),
            fetch_timeout: Duration::from_millis(timeout_ms),
            trajectory_cap: env_parse("NATHARA_TRAJECTORY_CAP", 3600),
            default_arena,
            source,
            remote_url: std::env::var("NATHARA_REMOTE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8090".to_string()),
            remote_key: std::env::var("NATHARA_REMOTE_KEY").ok(),
            media_dir: std::env::var("NATHARA_MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets")),
            panels,
        }
    }
}

impl Config {
    pub fn panel_enabled(&self, name: &str) -> bool {
        self.panels.iter().any(|p| p == name)
    }
}
