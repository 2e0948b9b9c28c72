//! Trail progress tracking for the map display.

use bevy::prelude::*;

use crate::shared::*;

pub struct TrailPlugin;

impl Plugin for TrailPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrailMap>().add_systems(
            Update,
            sync_trail_map
                .run_if(resource_changed::<GameState>)
                .in_set(FlowSet::Results),
        );
    }
}

/// Which waypoints the wagon has passed.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TrailMap {
    reached: [bool; WAYPOINTS.len()],
}

impl Default for TrailMap {
    fn default() -> Self {
        let mut map = Self {
            reached: [false; WAYPOINTS.len()],
        };
        map.update_progress(0.0);
        map
    }
}

impl TrailMap {
    /// Marks every waypoint up to the one nearest `fraction` of the trail.
    pub fn update_progress(&mut self, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        let last_reached = (fraction * LAST_WAYPOINT as f32).round() as usize;
        for (index, reached) in self.reached.iter_mut().enumerate() {
            *reached = index <= last_reached;
        }
    }

    pub fn is_reached(&self, index: usize) -> bool {
        self.reached.get(index).copied().unwrap_or(false)
    }

    pub fn reached_count(&self) -> usize {
        self.reached.iter().filter(|r| **r).count()
    }

    /// Waypoints with their reached flag, in travel order.
    pub fn waypoints(&self) -> impl Iterator<Item = (&'static Waypoint, bool)> + '_ {
        WAYPOINTS.iter().zip(self.reached.iter().copied())
    }
}

/// Canvas position of a waypoint: map surface offset by `MAP_ORIGIN`.
pub fn waypoint_canvas_position(waypoint: &Waypoint) -> Vec2 {
    MAP_ORIGIN + waypoint.position
}

/// Converts a top-left-origin canvas point to 2D world space, whose origin
/// is the window center with +y up.
pub fn canvas_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - point.y)
}

pub fn sync_trail_map(game: Res<GameState>, mut map: ResMut<TrailMap>) {
    let before = map.reached_count();
    map.update_progress(game.progress_fraction());
    let after = map.reached_count();
    if before != after {
        debug!("[Trail] {} of {} waypoints reached", after, WAYPOINTS.len());
    }
}
