use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use directories::ProjectDirs;
use euphoria::layout::HEX_HIT_RADIUS;
use euphoria::sink::{LogSink, Transport, WriterSink};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Log,
    #[strum(serialize = "stdout", serialize = "lines")]
    Stdout,
    #[strum(serialize = "none", serialize = "off")]
    None,
}

impl TransportKind {
    pub fn build(&self) -> Transport {
        match self {
            Self::Log => Transport::connected(LogSink),
            Self::Stdout => Transport::connected(WriterSink::stdout()),
            Self::None => Transport::disconnected(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub transport: TransportKind,
    pub hit_radius: f64,
    pub panel: bool,
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: TransportKind::Log,
            hit_radius: HEX_HIT_RADIUS,
            panel: true,
            frame_interval_ms: 16,
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.hit_radius.is_finite() && self.hit_radius > 0.0) {
            return Err(ConfigError::Invalid {
                key: "hit_radius",
                reason: format!("must be a positive number, got {}", self.hit_radius),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "frame_interval_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(self)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("org", "euphoria", "euphoria-surface")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::ConfigDirNotFound)
}

/// File values first, then `EUPHORIA_*` environment overrides.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("EUPHORIA"))
        .build()?
        .try_deserialize()?;
    config.validate()
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_or_setup() -> Config {
    if let Err(e) = get_config_path().and_then(|path| write_default_config(&path)) {
        log::warn!("Failed to write default config: {}", e);
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

/// Writes the bundled default config unless a file is already there.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

type WatchEvents = Receiver<notify::Result<notify::Event>>;

fn watch_dir(dir: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, bridge_rx))
}

fn touches_config(event: &notify::Event, path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == path)
}

/// Reloads the config whenever its file changes and hands the validated
/// result to the GUI. A file that fails to load keeps the running config.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_and_reload(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch_and_reload(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let path = get_config_path()?;
    let dir = path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(dir)?;
    let (_watcher, events) = watch_dir(dir)?;

    while let Ok(res) = events.recv().await {
        match res.map_err(ConfigError::from) {
            Ok(event) if touches_config(&event, &path) => match load_config_from(&path) {
                Ok(config) => {
                    if tx.send(AppEvent::ConfigReload(config)).await.is_err() {
                        break;
                    }
                }
                Err(e) => log::error!("Ignoring config change: {}", e),
            },
            Ok(_) => {}
            Err(e) => log::warn!("{}", e),
        }
    }
    Ok(())
}
