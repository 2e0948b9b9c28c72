//! Screen flow: turns `Action` events into UiState changes.
//!
//! The rules live in `transition`; this plugin only feeds it events and
//! forwards the resulting save/load work to SavePlugin.

use bevy::prelude::*;

use crate::shared::*;

mod transition;
mod widget_sets;

pub use transition::{transition, Effect, FlowContext, Step};
pub use widget_sets::widgets_for;

pub struct FlowPlugin;

impl Plugin for FlowPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FlowSet::Prepare,
                FlowSet::Input,
                FlowSet::Dispatch,
                FlowSet::Results,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                refresh_widgets.run_if(state_changed::<UiState>),
                tick_notice,
                report_saves,
            )
                .in_set(FlowSet::Prepare),
        )
        .add_systems(Update, dispatch_actions.in_set(FlowSet::Dispatch));
    }
}

/// Rebuilds the clickable set whenever the screen changes.
pub fn refresh_widgets(state: Res<State<UiState>>, mut widgets: ResMut<ActiveWidgets>) {
    widgets.0 = widgets_for(*state.get());
}

/// Counts down an open error notice and dismisses it when it expires.
pub fn tick_notice(time: Res<Time<Real>>, mut modal: ResMut<ActiveModal>) {
    // The countdown alone is not a change; only the dismissal is.
    if modal.bypass_change_detection().tick(time.delta()) {
        modal.set_changed();
        debug!("[Flow] Notice dismissed");
    }
}

/// Tells the player how the last save went.
pub fn report_saves(
    mut results: EventReader<SaveCompleteEvent>,
    mut log: ResMut<EventLog>,
    mut modal: ResMut<ActiveModal>,
) {
    for result in results.read() {
        report_save(result, &mut log, &mut modal);
    }
}

fn report_save(result: &SaveCompleteEvent, log: &mut EventLog, modal: &mut ActiveModal) {
    if result.success {
        log.push("Game saved");
        return;
    }
    let reason = result.error_message.as_deref().unwrap_or("unknown error");
    log.push(format!("Save failed: {}", reason));
    modal.open(Modal::notice(
        "Could not save the game",
        "Check that the save location is writable",
    ));
}

#[allow(clippy::too_many_arguments)]
pub fn dispatch_actions(
    mut actions: EventReader<Action>,
    state: Res<State<UiState>>,
    mut next_state: ResMut<NextState<UiState>>,
    mut modal: ResMut<ActiveModal>,
    mut game: ResMut<GameState>,
    mut log: ResMut<EventLog>,
    mut status: ResMut<SaveStatus>,
    mut name_entry: ResMut<NameEntry>,
    mut save_requests: EventWriter<SaveRequestEvent>,
    mut load_requests: EventWriter<LoadRequestEvent>,
) {
    if actions.is_empty() {
        return;
    }

    // Several actions may arrive in one frame; later ones see the screen
    // the earlier ones moved to.
    let mut current = *state.get();
    let mut ctx = FlowContext {
        modal: &mut modal,
        game: &mut game,
        log: &mut log,
        status: &mut status,
        name_entry: &mut name_entry.0,
    };

    for action in actions.read() {
        let step = transition(current, action, &mut ctx);

        match step.effect {
            Some(Effect::Save) => {
                save_requests.send(SaveRequestEvent);
            }
            Some(Effect::Load) => {
                load_requests.send(LoadRequestEvent);
            }
            None => {}
        }

        if let Some(next) = step.next {
            if next != current {
                info!("[Flow] {:?} -> {:?}", current, next);
                next_state.set(next);
                current = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_save_is_logged() {
        let mut log = EventLog::default();
        let mut modal = ActiveModal::default();
        let result = SaveCompleteEvent {
            success: true,
            error_message: None,
        };
        report_save(&result, &mut log, &mut modal);
        assert_eq!(log.last(), Some("Game saved"));
        assert!(!modal.is_open());
    }

    #[test]
    fn test_failed_save_opens_notice() {
        let mut log = EventLog::default();
        let mut modal = ActiveModal::default();
        let result = SaveCompleteEvent {
            success: false,
            error_message: Some("disk full".to_string()),
        };
        report_save(&result, &mut log, &mut modal);
        assert_eq!(log.last(), Some("Save failed: disk full"));
        assert!(matches!(
            &modal.0,
            Some(Modal::Notice { message, .. }) if message == "Could not save the game"
        ));
    }
}
