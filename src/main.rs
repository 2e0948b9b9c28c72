mod shared;
mod config;
mod flow;
mod trail;
mod hunting;
mod save;
mod input;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "The Oregon Trail".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        // UI state
        .init_state::<UiState>()
        // Shared resources
        .init_resource::<GameState>()
        .init_resource::<SaveStatus>()
        .init_resource::<ActiveModal>()
        .init_resource::<ActiveWidgets>()
        .init_resource::<NameEntry>()
        // Events
        .add_event::<Action>()
        .add_event::<HuntShot>()
        .add_event::<SaveRequestEvent>()
        .add_event::<LoadRequestEvent>()
        .add_event::<SaveCompleteEvent>()
        // Configuration first: it sizes the event log
        .add_plugins(config::ConfigPlugin)
        // Domain plugins
        .add_plugins(flow::FlowPlugin)
        .add_plugins(trail::TrailPlugin)
        .add_plugins(hunting::HuntingPlugin)
        .add_plugins(save::SavePlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
