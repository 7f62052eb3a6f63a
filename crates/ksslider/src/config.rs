use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sectioned::host::{BlurStyle, ButtonTitle, PaletteConfig, SliderOptions, Title};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What the dialog shows and the value model it starts from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DialogConfig {
    pub title: Option<Title>,
    pub button_title: Option<ButtonTitle>,
    pub icon: Option<PathBuf>,
    pub start_value: f64,
    pub sections: usize,
    pub half_sections: bool,
    pub divider: f64,
    pub blur_style: BlurStyle,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: Some(Title::new("Demo title")),
            button_title: Some(ButtonTitle::new("Save")),
            icon: None,
            start_value: 5.2121313,
            sections: 10,
            half_sections: true,
            divider: 1.0,
            blur_style: BlurStyle::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub palette: PaletteConfig,
}

impl Config {
    pub fn slider_options(&self) -> SliderOptions {
        let dialog = self.dialog.clone();
        SliderOptions {
            title: dialog.title,
            button_title: dialog.button_title,
            icon: dialog.icon,
            start_value: dialog.start_value,
            sections: dialog.sections,
            half_sections: dialog.half_sections,
            divider: dialog.divider,
            palette: self.palette.into(),
            blur_style: dialog.blur_style,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "ksslider", "ksslider").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("KSSLIDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the config, falling back to defaults when it can't be read.
pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config from {}: {}", path.display(), e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
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
    use sectioned::color::HexColor;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        assert_eq!(parse(DEFAULT_CONFIG), Config::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse(
            r##"
[dialog]
sections = 6
half_sections = false
blur_style = "dark"

[palette]
accent = "#ff0000"
"##,
        );

        assert_eq!(config.dialog.sections, 6);
        assert!(!config.dialog.half_sections);
        assert_eq!(config.dialog.blur_style, BlurStyle::Dark);
        assert_eq!(config.dialog.divider, DialogConfig::default().divider);
        assert_eq!(config.palette.accent, HexColor::new(255, 0, 0, 255));
        assert_eq!(config.palette.track, PaletteConfig::default().track);
    }

    #[test]
    fn test_dialog_config_deserialization() {
        let dialog: DialogConfig =
            serde_json::from_str(r#"{"title": "Water", "divider": 0.25, "blur_style": "none"}"#)
                .unwrap();
        assert_eq!(dialog.title, Some(Title::from("Water")));
        assert_eq!(dialog.divider, 0.25);
        assert_eq!(dialog.blur_style, BlurStyle::None);
        assert_eq!(dialog.sections, 10);
    }

    #[test]
    fn test_slider_options_from_config() {
        let options = Config::default().slider_options();
        assert_eq!(options.sections, 10);
        assert!(options.half_sections);
        assert_eq!(options.palette.accent.red, 1.0);
        assert_eq!(options.button_title, Some(ButtonTitle::from("Save")));
    }
}
