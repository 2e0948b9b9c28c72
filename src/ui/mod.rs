mod hud;
mod log_panel;
mod modal_overlay;
mod screens;
mod tooltip;
mod trail_map;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(theme::PRAIRIE_GREEN));

        // ─── ALWAYS PRESENT ───
        app.add_systems(
            Startup,
            (
                spawn_backdrop,
                hud::spawn_progress_bar,
                log_panel::spawn_log_panel,
                tooltip::spawn_tooltip,
                trail_map::spawn_trail_map,
            ),
        );

        // ─── SCREENS: rebuilt after the frame's actions are applied ───
        app.add_systems(
            Update,
            (
                screens::rebuild_screen.run_if(state_changed::<UiState>),
                screens::update_name_field.run_if(resource_changed::<NameEntry>),
            )
                .chain()
                .after(FlowSet::Results),
        );

        // ─── HUD / LOG / TOOLTIP ───
        app.add_systems(
            Update,
            (
                hud::update_progress_bar.run_if(resource_changed::<GameState>),
                log_panel::update_log_panel.run_if(resource_changed::<EventLog>),
                tooltip::update_tooltip,
            )
                .after(FlowSet::Results),
        );

        // ─── MODAL OVERLAY ───
        app.add_systems(
            Update,
            modal_overlay::sync_modal_overlay
                .run_if(resource_changed::<ActiveModal>)
                .after(FlowSet::Results),
        );

        // ─── TRAIL MAP ───
        app.add_systems(
            Update,
            (
                trail_map::update_trail_map
                    .run_if(resource_changed::<crate::trail::TrailMap>),
                trail_map::show_on_map_screens.run_if(state_changed::<UiState>),
            )
                .after(FlowSet::Results),
        );
    }
}

/// Sky over the top half of the window; the clear color is the prairie.
fn spawn_backdrop(mut commands: Commands) {
    commands.spawn((
        Sprite::from_color(theme::SKY_BLUE, Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT / 2.0)),
        Transform::from_xyz(0.0, SCREEN_HEIGHT / 4.0, -10.0),
    ));
}

/// A bordered, labelled button at the widget's canvas rect.
pub(crate) fn spawn_button(parent: &mut ChildBuilder, widget: &Widget) {
    parent
        .spawn((
            Node {
                border: UiRect::all(Val::Px(2.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..theme::place(widget.rect)
            },
            BackgroundColor(theme::tone_color(widget.tone)),
            BorderColor(theme::BLACK),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(widget.label),
                theme::font(theme::BUTTON_FONT),
                TextColor(theme::WHITE),
            ));
        });
}
