//! The trail drawn in world space on the Travel and Progress Map screens.
//!
//! Waypoints are stored in map-surface pixels; `waypoint_canvas_position`
//! places them on the canvas and `canvas_to_world` converts to the 2D
//! camera's space.

use bevy::prelude::*;

use crate::shared::theme;
use crate::shared::*;
use crate::trail::{canvas_to_world, waypoint_canvas_position, TrailMap};

// ─── Z-layers ─────────────────────────────────────────────────────────────────

const Z_PANEL: f32 = 0.0;
const Z_TRAIL: f32 = 1.0;
const Z_PROGRESS: f32 = 2.0;
const Z_MARKER: f32 = 3.0;
const Z_LABEL: f32 = 4.0;

const TRAIL_THICKNESS: f32 = 3.0;
const PROGRESS_THICKNESS: f32 = 5.0;
const MARKER_RADIUS: f32 = 5.0;

#[derive(Component)]
pub struct TrailMapRoot;

/// Green overlay on the leg that ends at waypoint `to`.
#[derive(Component)]
pub struct ProgressLeg {
    pub to: usize,
}

#[derive(Component)]
pub struct WaypointMarker {
    pub index: usize,
}

#[derive(Resource)]
pub struct MarkerMaterials {
    pub reached: Handle<ColorMaterial>,
    pub pending: Handle<ColorMaterial>,
}

fn world_point(index: usize) -> Vec2 {
    canvas_to_world(waypoint_canvas_position(&WAYPOINTS[index]))
}

/// A thin rotated sprite from `a` to `b`.
fn segment(a: Vec2, b: Vec2, thickness: f32, color: Color, z: f32) -> (Sprite, Transform) {
    let delta = b - a;
    let mid = (a + b) / 2.0;
    (
        Sprite::from_color(color, Vec2::new(delta.length(), thickness)),
        Transform::from_translation(mid.extend(z))
            .with_rotation(Quat::from_rotation_z(delta.y.atan2(delta.x))),
    )
}

pub fn spawn_trail_map(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    trail: Res<TrailMap>,
) {
    let marker_mesh = meshes.add(Circle::new(MARKER_RADIUS));
    let handles = MarkerMaterials {
        reached: materials.add(ColorMaterial::from(theme::GREEN)),
        pending: materials.add(ColorMaterial::from(theme::BLUE)),
    };

    let panel_center = canvas_to_world(MAP_ORIGIN + MAP_SIZE / 2.0);

    commands
        .spawn((
            TrailMapRoot,
            Transform::default(),
            Visibility::Hidden,
        ))
        .with_children(|map| {
            map.spawn((
                Sprite::from_color(theme::WHITE, MAP_SIZE),
                Transform::from_translation(panel_center.extend(Z_PANEL)),
            ));

            for to in 1..WAYPOINTS.len() {
                let (a, b) = (world_point(to - 1), world_point(to));
                map.spawn(segment(a, b, TRAIL_THICKNESS, theme::RED, Z_TRAIL));

                let visibility = if trail.is_reached(to) {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
                map.spawn((
                    ProgressLeg { to },
                    segment(a, b, PROGRESS_THICKNESS, theme::GREEN, Z_PROGRESS),
                    visibility,
                ));
            }

            for (index, (waypoint, reached)) in trail.waypoints().enumerate() {
                let at = world_point(index);
                let material = if reached {
                    handles.reached.clone()
                } else {
                    handles.pending.clone()
                };
                map.spawn((
                    WaypointMarker { index },
                    Mesh2d(marker_mesh.clone()),
                    MeshMaterial2d(material),
                    Transform::from_translation(at.extend(Z_MARKER)),
                ));
                map.spawn((
                    Text2d::new(waypoint.name),
                    TextFont {
                        font_size: theme::MAP_LABEL_FONT,
                        ..default()
                    },
                    TextColor(theme::BLACK),
                    Transform::from_translation((at + Vec2::new(0.0, 10.0)).extend(Z_LABEL)),
                ));
            }
        });

    commands.insert_resource(handles);
}

/// Recolors markers and shows progress legs after the trail map changes.
pub fn update_trail_map(
    trail: Res<TrailMap>,
    handles: Res<MarkerMaterials>,
    mut markers: Query<(&WaypointMarker, &mut MeshMaterial2d<ColorMaterial>)>,
    mut legs: Query<(&ProgressLeg, &mut Visibility)>,
) {
    for (marker, mut material) in &mut markers {
        material.0 = if trail.is_reached(marker.index) {
            handles.reached.clone()
        } else {
            handles.pending.clone()
        };
    }
    for (leg, mut visibility) in &mut legs {
        *visibility = if trail.is_reached(leg.to) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn show_on_map_screens(
    state: Res<State<UiState>>,
    mut roots: Query<&mut Visibility, With<TrailMapRoot>>,
) {
    let shown = matches!(state.get(), UiState::Travel | UiState::ProgressMap);
    for mut visibility in &mut roots {
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
