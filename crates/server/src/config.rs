use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::protocol::INDEX_DOCUMENT;
use tracing::warn;

pub const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub public_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .with_context(|| format!("invalid bind address '{raw}'"))
    }

    pub fn index_path(&self) -> PathBuf {
        self.public_dir.join(INDEX_DOCUMENT)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    host: Option<String>,
    port: Option<u16>,
    public_dir: Option<String>,
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml`, then environment. Bad values are logged and skipped.
pub fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.host {
                    settings.host = v;
                }
                if let Some(v) = file_cfg.port {
                    settings.port = v;
                }
                if let Some(v) = file_cfg.public_dir {
                    settings.public_dir = PathBuf::from(v);
                }
            }
            Err(error) => warn!(%error, file = SETTINGS_FILE, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("HOST").or_else(|| env("APP__HOST")) {
        settings.host = v;
    }

    if let Some(v) = env("PORT").or_else(|| env("APP__PORT")) {
        match v.trim().parse::<u16>() {
            Ok(port) => settings.port = port,
            Err(error) => warn!(value = %v, %error, "invalid PORT, keeping {}", settings.port),
        }
    }

    if let Some(v) = env("PUBLIC_DIR").or_else(|| env("APP__PUBLIC_DIR")) {
        settings.public_dir = PathBuf::from(v);
    }

    settings
}

/// Logs, but does not fail on, a missing entry document or menu.
pub fn check_public_dir(public_dir: &Path) -> anyhow::Result<()> {
    let meta = fs::metadata(public_dir).with_context(|| {
        format!("public directory '{}' is not readable", public_dir.display())
    })?;
    anyhow::ensure!(
        meta.is_dir(),
        "public path '{}' is not a directory",
        public_dir.display()
    );

    if !public_dir.join(INDEX_DOCUMENT).is_file() {
        warn!(dir = %public_dir.display(), "no {INDEX_DOCUMENT}; SPA fallback will return 404");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
