use arcmenu::{AnimationType, MenuConfig, Mode};
use derive_more::Deref;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `#rrggbb` colour as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deref, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::from_str(s.trim()).map(Self)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    pub panel: HexColor,
    pub separator: HexColor,
    pub button: HexColor,
    pub close_icon: HexColor,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            panel: HexColor::new(0x38, 0x48, 0xa5),
            separator: HexColor::new(0, 0, 0),
            button: HexColor::new(0x38, 0x48, 0xa5),
            close_icon: HexColor::new(0xff, 0xff, 0xff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub items: usize,
    /// Container width in pixels; the height follows from the mode.
    pub width: f64,
    pub item_size: f64,
    pub skeleton: bool,
    pub separators: bool,
    pub menu: MenuConfig,
    pub style: StyleConfig,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            items: 5,
            width: 640.0,
            item_size: 72.0,
            skeleton: false,
            separators: false,
            menu: MenuConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

/// Command line values that win over the config file, re-applied on every
/// reload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub items: Option<usize>,
    pub mode: Option<Mode>,
    pub animation: Option<AnimationType>,
}

impl Overrides {
    pub fn apply(&self, config: &mut PreviewConfig) {
        if let Some(items) = self.items {
            config.items = items;
        }
        if let Some(mode) = self.mode {
            config.menu.mode = mode;
        }
        if let Some(animation) = self.animation {
            config.menu.animation = animation;
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcmenu", "arcmenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<PreviewConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("ARCMENU").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> PreviewConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            PreviewConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_deserialization() {
        let cases = vec![
            ("\"#3848A5\"", HexColor::new(0x38, 0x48, 0xa5)),
            ("\"3848a5\"", HexColor::new(0x38, 0x48, 0xa5)),
            ("\"#000000\"", HexColor::new(0, 0, 0)),
            ("\" #ffffff \"", HexColor::new(255, 255, 255)),
        ];

        for (json, expected) in cases {
            let deserialized: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
        assert_eq!(HexColor::new(0x38, 0x48, 0xa5).to_string(), "#3848a5");
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let parsed: PreviewConfig = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(parsed.items, 5);
        assert_eq!(parsed.menu.mode, Mode::Circular);
        assert_eq!(parsed.menu.animation, AnimationType::FromCenter);
        assert_eq!(parsed.style, StyleConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = PreviewConfig::default();
        let overrides = Overrides {
            items: Some(3),
            mode: Some(Mode::Radial),
            animation: None,
        };
        overrides.apply(&mut config);
        assert_eq!(config.items, 3);
        assert_eq!(config.menu.mode, Mode::Radial);
        assert_eq!(config.menu.animation, AnimationType::FromCenter);
    }
}
