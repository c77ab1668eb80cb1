pub mod schema;

pub use schema::{
    ChartConfig, DemoConfig, OverlayConfig, RedrawConfig, TimestampPolicy, WindowConfig,
};

use fps_core::{FpsError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FPSMETER_CONFIG";

/// Load and validate `path`.  A missing file gives `OverlayConfig::default()`
/// with a warning; a file that exists but cannot be read is an
/// [`FpsError::Io`].
pub fn load(path: impl AsRef<Path>) -> Result<OverlayConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "No config at '{}'; running with built-in defaults.",
            path.display()
        );
        return Ok(OverlayConfig::default());
    }

    let raw = std::fs::read_to_string(path)?;
    let config = parse(&raw)?;
    tracing::debug!("Loaded config from '{}'", path.display());
    Ok(config)
}

/// Parse and validate a TOML document.
pub fn parse(raw: &str) -> Result<OverlayConfig> {
    let config: OverlayConfig =
        toml::from_str(raw).map_err(|e| FpsError::Config(format!("TOML parse error: {e}")))?;
    config.validate()?;
    Ok(config)
}

/// Config path for this process: `$FPSMETER_CONFIG` if set, otherwise
/// `fpsmeter/fpsmeter.toml` under `$XDG_CONFIG_HOME` (or `~/.config`).
pub fn default_path() -> PathBuf {
    resolve_path(
        std::env::var_os(CONFIG_ENV),
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn resolve_path(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    let base = match xdg_config_home.filter(|p| !p.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.unwrap_or_else(|| ".".into())).join(".config"),
    };
    base.join("fpsmeter").join("fpsmeter.toml")
}
