use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("no saved game at {}", .0.display())]
    NotFound(PathBuf),
    #[error("save file is corrupt: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<SaveError> for LoadOutcome {
    fn from(err: SaveError) -> Self {
        match err {
            SaveError::NotFound(_) => LoadOutcome::Missing,
            SaveError::Corrupt(reason) => LoadOutcome::Corrupt(reason),
            SaveError::Io(e) => LoadOutcome::Failed(e.to_string()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (handle_save_request, handle_load_request).in_set(FlowSet::Results),
        )
        .add_systems(Last, save_on_exit);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FILE FORMAT
// ═══════════════════════════════════════════════════════════════════════

/// On-disk layout: the GameState fields at top level plus a timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveFile {
    /// UNIX seconds. Informational; ignored on load.
    #[serde(default)]
    saved_at: u64,
    #[serde(flatten)]
    game: GameState,
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ═══════════════════════════════════════════════════════════════════════
// SAVE / LOAD LOGIC
// ═══════════════════════════════════════════════════════════════════════

/// Writes `game` to `path`, replacing any previous save. Returns the
/// timestamp stored in the file.
pub fn write_save(path: &Path, game: &GameState) -> Result<u64, SaveError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let saved_at = current_timestamp();
    let file = SaveFile {
        saved_at,
        game: game.clone(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(std::io::Error::from)?;

    // Write to a temp file first, then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(saved_at)
}

pub fn read_save(path: &Path) -> Result<GameState, SaveError> {
    let json = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SaveError::NotFound(path.to_path_buf()),
        _ => SaveError::Io(e),
    })?;
    let file: SaveFile =
        serde_json::from_str(&json).map_err(|e| SaveError::Corrupt(e.to_string()))?;
    let mut game = file.game;

    if game.current_location_index > LAST_WAYPOINT {
        return Err(SaveError::Corrupt(format!(
            "current_location_index {} is past the last waypoint {}",
            game.current_location_index, LAST_WAYPOINT
        )));
    }

    let expected = GameState::progress_at(game.current_location_index);
    if (game.progress - expected).abs() > 0.01 {
        warn!(
            "[Save] Stored progress {:.2} disagrees with waypoint {}; using {:.2}",
            game.progress, game.current_location_index, expected
        );
    }
    game.progress = expected;
    Ok(game)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn handle_save_request(
    mut save_events: EventReader<SaveRequestEvent>,
    mut complete_events: EventWriter<SaveCompleteEvent>,
    config: Res<GameConfig>,
    game: Res<GameState>,
    mut status: ResMut<SaveStatus>,
) {
    // Several requests in one frame would all write the same state.
    if save_events.read().count() == 0 {
        return;
    }

    info!("[Save] Saving to {}...", config.save_path.display());
    match write_save(&config.save_path, &game) {
        Ok(saved_at) => {
            status.unsaved_changes = false;
            info!("[Save] Save succeeded at {}.", saved_at);
            complete_events.send(SaveCompleteEvent {
                success: true,
                error_message: None,
            });
        }
        Err(e) => {
            warn!("[Save] Save FAILED: {}", e);
            complete_events.send(SaveCompleteEvent {
                success: false,
                error_message: Some(e.to_string()),
            });
        }
    }
}

fn handle_load_request(
    mut load_events: EventReader<LoadRequestEvent>,
    mut actions: EventWriter<Action>,
    config: Res<GameConfig>,
    mut game: ResMut<GameState>,
) {
    if load_events.read().count() == 0 {
        return;
    }

    info!("[Save] Loading from {}...", config.save_path.display());
    let outcome = match read_save(&config.save_path) {
        Ok(loaded) => {
            *game = loaded;
            info!(
                "[Save] Load succeeded: {} at {}",
                game.character_name,
                game.current_location()
            );
            LoadOutcome::Restored
        }
        Err(SaveError::NotFound(path)) => {
            info!("[Save] No save file at {}", path.display());
            LoadOutcome::Missing
        }
        Err(e) => {
            warn!("[Save] Load FAILED: {}", e);
            e.into()
        }
    };
    actions.send(Action::LoadFinished(outcome));
}

/// Final save when the window closes with progress the file doesn't hold.
fn save_on_exit(
    mut exits: EventReader<AppExit>,
    config: Res<GameConfig>,
    game: Res<GameState>,
    mut status: ResMut<SaveStatus>,
) {
    if exits.read().count() == 0 || !status.unsaved_changes {
        return;
    }
    match write_save(&config.save_path, &game) {
        Ok(saved_at) => {
            status.unsaved_changes = false;
            info!(
                "[Save] Saved on exit to {} at {}",
                config.save_path.display(),
                saved_at
            );
        }
        Err(e) => error!("[Save] Save on exit FAILED: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("oregon-trail-save-{}-{}", std::process::id(), name))
            .join("savegame.json")
    }

    fn midway_game() -> GameState {
        let mut game = GameState {
            character_name: "Ezra".to_string(),
            character_class: Some(CharacterClass::Carpenter),
            difficulty: Some(Difficulty::Medium),
            ..default()
        };
        for _ in 0..4 {
            let _ = game.advance();
        }
        game
    }

    #[test]
    fn test_round_trip_restores_state() {
        let path = scratch_path("round-trip");
        let game = midway_game();
        write_save(&path, &game).unwrap();
        let loaded = read_save(&path).unwrap();
        assert_eq!(loaded, game);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_uses_flat_keys() {
        let path = scratch_path("flat-keys");
        write_save(&path, &midway_game()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["character_name"], "Ezra");
        assert_eq!(value["difficulty"], "MEDIUM");
        assert_eq!(value["current_location_index"], 4);
        assert!(value["saved_at"].is_u64());
        assert!(!path.with_extension("json.tmp").exists());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = scratch_path("missing");
        assert!(matches!(read_save(&path), Err(SaveError::NotFound(_))));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let path = scratch_path("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_save(&path), Err(SaveError::Corrupt(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_index_past_trail_is_corrupt() {
        let path = scratch_path("bad-index");
        let mut game = midway_game();
        game.current_location_index = 40;
        write_save(&path, &game).unwrap();
        assert!(matches!(read_save(&path), Err(SaveError::Corrupt(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_progress_is_recomputed_from_index() {
        let path = scratch_path("stale-progress");
        let mut game = midway_game();
        game.progress = 99.0;
        write_save(&path, &game).unwrap();
        let loaded = read_save(&path).unwrap();
        assert_eq!(loaded.progress, GameState::progress_at(4));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_outcome_mapping() {
        assert_eq!(
            LoadOutcome::from(SaveError::NotFound(PathBuf::from("x"))),
            LoadOutcome::Missing
        );
        assert!(matches!(
            LoadOutcome::from(SaveError::Corrupt("bad".into())),
            LoadOutcome::Corrupt(_)
        ));
    }
}
