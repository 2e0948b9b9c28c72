//! Hunting domain: the timed target-shooting mini-game.

use bevy::prelude::*;

use crate::shared::*;

mod render;
mod session;

pub use session::{
    HuntingSession, HUNT_DURATION, TARGET_MAX_X, TARGET_SIZE, TARGET_SPEED, TARGET_Y,
};

pub struct HuntingPlugin;

impl Plugin for HuntingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(UiState::Hunting),
            (start_hunt, render::spawn_hunt_overlay).chain(),
        )
        .add_systems(
            OnExit(UiState::Hunting),
            (end_hunt, render::despawn_hunt_overlay),
        )
        .add_systems(
            Update,
            (apply_shots, run_hunt, render::update_hunt_overlay)
                .chain()
                .run_if(in_state(UiState::Hunting))
                .run_if(resource_exists::<HuntingSession>)
                .in_set(FlowSet::Results),
        );
    }
}

fn start_hunt(mut commands: Commands, time: Res<Time<Real>>) {
    let session = HuntingSession::new(time.elapsed(), &mut rand::thread_rng());
    info!(
        "[Hunting] Hunt started, target at x={:.0}",
        session.target_x()
    );
    commands.insert_resource(session);
}

fn end_hunt(mut commands: Commands) {
    commands.remove_resource::<HuntingSession>();
}

fn apply_shots(
    mut shots: EventReader<HuntShot>,
    time: Res<Time<Real>>,
    mut session: ResMut<HuntingSession>,
) {
    let now = time.elapsed();
    let mut rng = rand::thread_rng();
    for shot in shots.read() {
        if session.shoot(now, shot.cursor, &mut rng) {
            debug!("[Hunting] Hit! Score is now {}", session.score());
        }
    }
}

fn run_hunt(
    time: Res<Time<Real>>,
    mut session: ResMut<HuntingSession>,
    mut actions: EventWriter<Action>,
) {
    let now = time.elapsed();
    session.advance(now);
    if let Some(score) = session.take_result(now) {
        info!("[Hunting] Time's up, final score {}", score);
        actions.send(Action::HuntFinished(score));
    }
}
