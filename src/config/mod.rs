//! Startup configuration from an optional `trail.ron` next to the binary's
//! working directory.

use bevy::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::shared::*;

pub const CONFIG_FILE: &str = "trail.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Reads `GameConfig` at build time and sizes the event log from it.
/// A resource inserted before this plugin is kept as is.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(load_or_default(Path::new(CONFIG_FILE)));
        }
        let capacity = app
            .world()
            .get_resource::<GameConfig>()
            .map(|c| c.log_capacity)
            .unwrap_or(DEFAULT_LOG_CAPACITY);
        app.insert_resource(EventLog::with_capacity(capacity));
    }
}

/// `Ok(None)` when the file simply isn't there.
pub fn read_config(path: &Path) -> Result<Option<GameConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(parse_config(&text)?))
}

pub fn parse_config(text: &str) -> Result<GameConfig, ConfigError> {
    Ok(ron::from_str(text)?)
}

pub fn load_or_default(path: &Path) -> GameConfig {
    match read_config(path) {
        Ok(Some(config)) => {
            info!("[Config] Loaded {}", path.display());
            config
        }
        Ok(None) => GameConfig::default(),
        Err(e) => {
            warn!("[Config] {}; using defaults", e);
            GameConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = parse_config("(save_path: \"saves/trail.json\")").unwrap();
        assert_eq!(config.save_path, Path::new("saves/trail.json"));
        assert_eq!(config.log_capacity, DEFAULT_LOG_CAPACITY);
        assert_eq!(config.log_scroll_step, 1);
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        assert!(matches!(
            parse_config("(log_capacity: \"lots\")"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let path = std::env::temp_dir().join("oregon-trail-no-such-config.ron");
        assert!(read_config(&path).unwrap().is_none());
        assert_eq!(load_or_default(&path), GameConfig::default());
    }

    #[test]
    fn test_plugin_keeps_preinserted_config() {
        let mut app = App::new();
        app.insert_resource(GameConfig {
            log_capacity: 12,
            ..default()
        });
        app.add_plugins(ConfigPlugin);
        assert_eq!(app.world().resource::<GameConfig>().log_capacity, 12);
        assert!(app.world().resource::<EventLog>().is_empty());
    }
}
