//! The screen state machine as a pure function.
//!
//! `transition` decides, for the current screen and one `Action`, which
//! screen comes next and which side effect (save or load) the caller must
//! run. It mutates only what `FlowContext` lends it, so every rule here is
//! testable without an `App`.

use bevy::prelude::*;

use crate::shared::*;

const NEW_GAME_PROMPT: &str = "Start a new game? Unsaved progress will be lost.";
const MENU_PROMPT: &str = "Return to Main Menu?";
const ESCAPE_PROMPT: &str =
    "Are you sure you want to return to the main menu? Your progress will be saved.";
const NEW_GAME_HINT: &str = "Start a new game instead";

/// Work the dispatcher must hand to another plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Save,
    Load,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub next: Option<UiState>,
    pub effect: Option<Effect>,
}

impl Step {
    pub fn stay() -> Self {
        Self::default()
    }

    pub fn goto(state: UiState) -> Self {
        Self {
            next: Some(state),
            effect: None,
        }
    }

    pub fn with(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

/// Everything a transition may touch.
pub struct FlowContext<'a> {
    pub modal: &'a mut ActiveModal,
    pub game: &'a mut GameState,
    pub log: &'a mut EventLog,
    pub status: &'a mut SaveStatus,
    pub name_entry: &'a mut InputBox,
}

pub fn transition(current: UiState, action: &Action, ctx: &mut FlowContext) -> Step {
    match action {
        Action::LoadFinished(outcome) => return resume(current, outcome, ctx),
        Action::HuntFinished(score) => return finish_hunt(current, *score, ctx),
        Action::Confirmed(pending) => return apply_confirmed(*pending, ctx),
        _ => {}
    }

    if ctx.modal.is_open() {
        return answer_modal(current, action, ctx);
    }

    if current != UiState::MainMenu {
        if let Some(step) = navigate(current, action, ctx) {
            return step;
        }
    }

    let step = match current {
        UiState::MainMenu => main_menu(action, ctx),
        UiState::CharacterCreation => character_creation(action, ctx),
        UiState::ClassSelection => class_selection(action, ctx),
        UiState::DifficultySelection => difficulty_selection(action, ctx),
        UiState::Travel => travel(action, ctx),
        UiState::Victory => victory(action, ctx),
        UiState::Shop
        | UiState::HighScores
        | UiState::Defeat
        | UiState::Death
        | UiState::RiverCrossing
        | UiState::Inventory
        | UiState::CharacterProgress
        | UiState::ProgressMap
        | UiState::Hunting => None,
    };

    step.unwrap_or_else(|| {
        debug!("[Flow] {:?} has no meaning on {:?}", action, current);
        Step::stay()
    })
}

/// Back / Main Menu / Escape, shared by every screen except the main menu.
fn navigate(current: UiState, action: &Action, ctx: &mut FlowContext) -> Option<Step> {
    match action {
        Action::Back => {
            if current.backs_onto_travel() {
                ctx.log.push("Returned to Travel");
                Some(Step::goto(UiState::Travel))
            } else {
                ctx.log.push("Returned to Main Menu");
                Some(Step::goto(UiState::MainMenu))
            }
        }
        Action::MainMenu => {
            ctx.modal
                .open(Modal::confirm(MENU_PROMPT, Pending::ReturnToMainMenu));
            Some(Step::stay())
        }
        Action::Escape => {
            ctx.modal
                .open(Modal::confirm(ESCAPE_PROMPT, Pending::ReturnToMainMenu));
            Some(Step::stay())
        }
        _ => None,
    }
}

fn answer_modal(current: UiState, action: &Action, ctx: &mut FlowContext) -> Step {
    let pending = match &ctx.modal.0 {
        Some(Modal::Confirm { pending, .. }) => Some(*pending),
        _ => None,
    };

    match (action, pending) {
        (Action::ConfirmYes, Some(pending)) => {
            ctx.modal.close();
            transition(current, &Action::Confirmed(pending), ctx)
        }
        (Action::ConfirmNo, Some(_)) => {
            ctx.modal.close();
            Step::stay()
        }
        (Action::CloseHelp, None) if matches!(ctx.modal.0, Some(Modal::Help)) => {
            ctx.modal.close();
            Step::stay()
        }
        _ => {
            debug!("[Flow] {:?} blocked by open modal", action);
            Step::stay()
        }
    }
}

fn apply_confirmed(pending: Pending, ctx: &mut FlowContext) -> Step {
    match pending {
        Pending::StartNewGame => start_new_game(ctx),
        Pending::ReturnToMainMenu => {
            ctx.log.push("Returned to Main Menu");
            Step::goto(UiState::MainMenu).with(Effect::Save)
        }
    }
}

fn start_new_game(ctx: &mut FlowContext) -> Step {
    *ctx.game = GameState::default();
    ctx.name_entry.clear();
    ctx.status.unsaved_changes = false;
    ctx.log.push("Started a new game");
    Step::goto(UiState::CharacterCreation)
}

fn main_menu(action: &Action, ctx: &mut FlowContext) -> Option<Step> {
    match action {
        Action::NewGame => {
            if ctx.status.unsaved_changes {
                ctx.modal
                    .open(Modal::confirm(NEW_GAME_PROMPT, Pending::StartNewGame));
                Some(Step::stay())
            } else {
                Some(start_new_game(ctx))
            }
        }
        Action::Continue => Some(Step::stay().with(Effect::Load)),
        Action::Settings => {
            ctx.log.push("Opened settings");
            Some(Step::goto(UiState::DifficultySelection))
        }
        Action::HighScores => {
            ctx.log.push("Viewing high scores");
            Some(Step::goto(UiState::HighScores))
        }
        Action::Help => {
            ctx.modal.open(Modal::Help);
            Some(Step::stay())
        }
        _ => None,
    }
}

fn character_creation(action: &Action, ctx: &mut FlowContext) -> Option<Step> {
    let Action::Next = action else { return None };
    ctx.game.character_name = ctx.name_entry.text.clone();
    ctx.status.unsaved_changes = true;
    ctx.log
        .push(format!("Created character: {}", ctx.game.character_name));
    Some(Step::goto(UiState::ClassSelection))
}

fn class_selection(action: &Action, ctx: &mut FlowContext) -> Option<Step> {
    let Action::ChooseClass(class) = action else { return None };
    ctx.game.character_class = Some(*class);
    ctx.status.unsaved_changes = true;
    ctx.log.push(format!("Selected class: {}", class.name()));
    Some(Step::goto(UiState::DifficultySelection))
}

fn difficulty_selection(action: &Action, ctx: &mut FlowContext) -> Option<Step> {
    let Action::ChooseDifficulty(difficulty) = action else { return None };
    ctx.game.difficulty = Some(*difficulty);
    ctx.status.unsaved_changes = true;
    ctx.log.push(format!("Set difficulty: {}", difficulty.label()));
    Some(Step::goto(UiState::Travel))
}

fn travel(action: &Action, ctx: &mut FlowContext) -> Option<Step> {
    let (message, target) = match action {
        Action::OpenInventory => ("Opened inventory", UiState::Inventory),
        Action::OpenCharacter => ("Opened character", UiState::CharacterProgress),
        Action::OpenShop => ("Opened shop", UiState::Shop),
        Action::OpenMap => ("Opened map", UiState::ProgressMap),
        Action::Hunt => ("Went hunting", UiState::Hunting),
        Action::Travel => return Some(travel_one_stop(ctx)),
        _ => return None,
    };
    ctx.log.push(message);
    Some(Step::goto(target))
}

fn travel_one_stop(ctx: &mut FlowContext) -> Step {
    match ctx.game.advance() {
        TravelOutcome::Advanced => {
            ctx.status.unsaved_changes = true;
            ctx.log
                .push(format!("Traveled to {}", ctx.game.current_location()));
            if ctx.game.is_at_destination() {
                ctx.log.push("Congratulations! You've reached Oregon!");
                Step::goto(UiState::Victory)
            } else {
                Step::stay()
            }
        }
        TravelOutcome::AlreadyAtDestination => {
            ctx.log.push("You've already reached Oregon City!");
            Step::stay()
        }
    }
}

fn victory(action: &Action, ctx: &mut FlowContext) -> Option<Step> {
    let Action::VictoryMenu = action else { return None };
    ctx.log.push("Returned to Main Menu");
    Some(Step::goto(UiState::MainMenu))
}

fn finish_hunt(current: UiState, score: u32, ctx: &mut FlowContext) -> Step {
    if current != UiState::Hunting {
        warn!("[Flow] Hunt result {} arrived outside the hunt", score);
        return Step::stay();
    }
    ctx.log
        .push(format!("Completed hunting game with score: {}", score));
    Step::goto(UiState::Travel)
}

fn resume(current: UiState, outcome: &LoadOutcome, ctx: &mut FlowContext) -> Step {
    if current != UiState::MainMenu {
        warn!("[Flow] Load result {:?} arrived outside the main menu", outcome);
        return Step::stay();
    }
    match outcome {
        LoadOutcome::Restored => {
            ctx.status.unsaved_changes = false;
            ctx.log.push("Continued saved game");
            return Step::goto(UiState::Travel);
        }
        LoadOutcome::Missing => {
            ctx.modal
                .open(Modal::notice("No saved game found", NEW_GAME_HINT));
        }
        LoadOutcome::Corrupt(reason) => {
            ctx.modal
                .open(Modal::notice("Save file is corrupt", reason.as_str()));
        }
        LoadOutcome::Failed(reason) => {
            ctx.modal
                .open(Modal::notice("Could not read saved game", reason.as_str()));
        }
    }
    Step::stay()
}
