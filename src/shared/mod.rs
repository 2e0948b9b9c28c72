//! Shared components, resources, events, and states for the trail game.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No gameplay domain imports from another; only `ui` reads the trail
//! map to draw it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod event_log;
mod modal;
mod widgets;
pub mod theme;

pub use event_log::*;
pub use modal::*;
pub use widgets::*;

// ═══════════════════════════════════════════════════════════════════════
// UI STATE: top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum UiState {
    #[default]
    MainMenu,
    CharacterCreation,
    ClassSelection,
    DifficultySelection,
    Travel,
    Shop,
    HighScores,
    Victory,
    Defeat,
    Death,
    RiverCrossing,
    Inventory,
    CharacterProgress,
    ProgressMap,
    Hunting,
}

impl UiState {
    pub const ALL: [UiState; 15] = [
        UiState::MainMenu,
        UiState::CharacterCreation,
        UiState::ClassSelection,
        UiState::DifficultySelection,
        UiState::Travel,
        UiState::Shop,
        UiState::HighScores,
        UiState::Victory,
        UiState::Defeat,
        UiState::Death,
        UiState::RiverCrossing,
        UiState::Inventory,
        UiState::CharacterProgress,
        UiState::ProgressMap,
        UiState::Hunting,
    ];

    /// Screens whose Back button leads to Travel instead of the main menu.
    pub fn backs_onto_travel(self) -> bool {
        matches!(
            self,
            UiState::Shop
                | UiState::Inventory
                | UiState::CharacterProgress
                | UiState::ProgressMap
                | UiState::Hunting
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            UiState::MainMenu => "The Oregon Trail",
            UiState::CharacterCreation => "Create Character",
            UiState::ClassSelection => "Select Class",
            UiState::DifficultySelection => "Select Difficulty",
            UiState::Travel => "Map of the Oregon Trail",
            UiState::Shop => "Shop",
            UiState::HighScores => "High Scores",
            UiState::Victory => "Victory!",
            UiState::Defeat => "Defeat",
            UiState::Death => "You Have Died",
            UiState::RiverCrossing => "River Crossing",
            UiState::Inventory => "Inventory",
            UiState::CharacterProgress => "Character Progress",
            UiState::ProgressMap => "Progress Map",
            UiState::Hunting => "Hunting",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CHARACTER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Banker,
    Farmer,
    Carpenter,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 3] = [
        CharacterClass::Banker,
        CharacterClass::Farmer,
        CharacterClass::Carpenter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Banker => "Banker",
            CharacterClass::Farmer => "Farmer",
            CharacterClass::Carpenter => "Carpenter",
        }
    }

    /// Button caption on the class selection screen.
    pub fn caption(self) -> &'static str {
        match self {
            CharacterClass::Banker => "Banker: Start with more money",
            CharacterClass::Farmer => "Farmer: Better at hunting and gathering",
            CharacterClass::Carpenter => "Carpenter: Wagon breaks down less often",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// TRAIL
// ═══════════════════════════════════════════════════════════════════════

/// A named checkpoint along the trail. Positions are map-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub name: &'static str,
    pub position: Vec2,
}

const fn waypoint(name: &'static str, x: f32, y: f32) -> Waypoint {
    Waypoint {
        name,
        position: Vec2::new(x, y),
    }
}

/// The trail, in travel order.
pub const WAYPOINTS: [Waypoint; 14] = [
    waypoint("INDEPENDENCE (START)", 40.0, 350.0),
    waypoint("FORT KEARNEY", 100.0, 320.0),
    waypoint("CHIMNEY ROCK", 160.0, 290.0),
    waypoint("LARAMIE", 220.0, 260.0),
    waypoint("INDEPENDENCE ROCK", 280.0, 230.0),
    waypoint("SOUTH PASS", 340.0, 200.0),
    waypoint("FORT BRIDGER", 390.0, 170.0),
    waypoint("SODA SPRINGS", 430.0, 140.0),
    waypoint("FORT HALL", 460.0, 110.0),
    waypoint("FORT BOISE", 480.0, 80.0),
    waypoint("BLUE MOUNTAINS", 490.0, 50.0),
    waypoint("FORT WALLA WALLA", 490.0, 20.0),
    waypoint("THE DALLES", 480.0, 10.0),
    waypoint("OREGON CITY (FINISH)", 470.0, 5.0),
];

pub const LAST_WAYPOINT: usize = WAYPOINTS.len() - 1;

/// Length of the whole trail in miles.
pub const TOTAL_DISTANCE_MILES: u32 = 2000;

/// Result of a single travel step.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelOutcome {
    Advanced,
    AlreadyAtDestination,
}

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: the persisted session record
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub character_name: String,
    pub character_class: Option<CharacterClass>,
    pub difficulty: Option<Difficulty>,
    /// Declared for the shop; nothing consumes it yet.
    pub inventory: BTreeMap<String, u32>,
    /// Percent of the trail covered, 0.0–100.0.
    pub progress: f32,
    pub health: i32,
    pub money: i32,
    pub current_location_index: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            character_name: String::new(),
            character_class: None,
            difficulty: None,
            inventory: BTreeMap::new(),
            progress: 0.0,
            health: 100,
            money: 1000,
            current_location_index: 0,
        }
    }
}

impl GameState {
    /// Percent of the trail covered when standing at waypoint `index`.
    pub fn progress_at(index: usize) -> f32 {
        index as f32 / LAST_WAYPOINT as f32 * 100.0
    }

    /// Moves one waypoint along the trail.
    pub fn advance(&mut self) -> TravelOutcome {
        if self.current_location_index >= LAST_WAYPOINT {
            return TravelOutcome::AlreadyAtDestination;
        }
        self.current_location_index += 1;
        self.progress = Self::progress_at(self.current_location_index);
        TravelOutcome::Advanced
    }

    pub fn current_location(&self) -> &'static str {
        WAYPOINTS
            .get(self.current_location_index)
            .map(|w| w.name)
            .unwrap_or(WAYPOINTS[LAST_WAYPOINT].name)
    }

    pub fn is_at_destination(&self) -> bool {
        self.current_location_index >= LAST_WAYPOINT
    }

    /// Progress as a fraction in 0.0–1.0.
    pub fn progress_fraction(&self) -> f32 {
        (self.progress / 100.0).clamp(0.0, 1.0)
    }

    pub fn miles_travelled(&self) -> u32 {
        (self.progress_fraction() * TOTAL_DISTANCE_MILES as f32).round() as u32
    }
}

/// Startup settings, read once from `trail.ron` when present.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub save_path: std::path::PathBuf,
    /// Oldest log entries are dropped past this many.
    pub log_capacity: usize,
    /// Rows moved per mouse-wheel notch over the log panel.
    pub log_scroll_step: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_path: "savegame.json".into(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            log_scroll_step: 1,
        }
    }
}

/// Tracks whether the session holds progress the save file doesn't.
#[derive(Resource, Debug, Clone, Default)]
pub struct SaveStatus {
    pub unsaved_changes: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// ACTIONS: every UI intent flows through here
// ═══════════════════════════════════════════════════════════════════════

/// What a confirmation dialog will do when the player answers Yes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    StartNewGame,
    ReturnToMainMenu,
}

/// Result of reading the save slot, reported back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored,
    Missing,
    Corrupt(String),
    Failed(String),
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum Action {
    // Main menu
    NewGame,
    Continue,
    Settings,
    HighScores,
    Help,
    // Setup screens
    Next,
    ChooseClass(CharacterClass),
    ChooseDifficulty(Difficulty),
    // Travel screen
    OpenInventory,
    OpenCharacter,
    OpenShop,
    OpenMap,
    Hunt,
    Travel,
    // Navigation present on every non-menu screen
    Back,
    MainMenu,
    Escape,
    VictoryMenu,
    // Modal answers
    ConfirmYes,
    ConfirmNo,
    CloseHelp,
    Confirmed(Pending),
    // Results from other plugins
    HuntFinished(u32),
    LoadFinished(LoadOutcome),
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Space pressed during a hunt, with the cursor position at that instant.
#[derive(Event, Debug, Clone, Copy)]
pub struct HuntShot {
    pub cursor: Option<Vec2>,
}

/// Write the current GameState to the save slot.
#[derive(Event, Debug, Clone, Default)]
pub struct SaveRequestEvent;

/// Read the save slot into GameState.
#[derive(Event, Debug, Clone, Default)]
pub struct LoadRequestEvent;

/// Sent by SavePlugin after a save completes (success or failure).
/// FlowPlugin reports it to the player.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SaveCompleteEvent {
    pub success: bool,
    pub error_message: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEM ORDERING
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame order of the Update schedule: widgets are rebuilt for the
/// current screen, input turns into Actions, the dispatcher applies them,
/// then save/hunt results are produced for the next frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowSet {
    Prepare,
    Input,
    Dispatch,
    Results,
}

// ═══════════════════════════════════════════════════════════════════════
// WIDGET RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// Clickable controls valid for the current UiState, in hit-test order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActiveWidgets(pub Vec<Widget>);

/// The character-name text field.
#[derive(Resource, Debug, Clone)]
pub struct NameEntry(pub InputBox);

impl Default for NameEntry {
    fn default() -> Self {
        Self(InputBox::new(canvas_rect(200.0, 200.0, 400.0, 32.0)))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Top-left corner of the trail map surface on the canvas.
pub const MAP_ORIGIN: Vec2 = Vec2::new(270.0, 100.0);
pub const MAP_SIZE: Vec2 = Vec2::new(510.0, 380.0);
