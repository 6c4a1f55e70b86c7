use glam::Vec2;
use log::info;
use rapier2d::control::{CharacterLength, KinematicCharacterController};
use rapier2d::prelude::*;

use super::body::{
    self, feet_offset, player_hitbox, presets, TileLayer, CEILING_PROBE_CENTER,
    CEILING_PROBE_HALF_EXTENTS, FEET_PROBE_HALF_EXTENTS, WALL_PROBE_HALF_EXTENTS,
};
use super::tiles::{TileMap, LADDER_TOP_ID, TILE_SIZE};
use crate::game::player::{
    presentation, ActorState, CollisionShape, EnvironmentProbe, Motion, TileKind, World,
};

/// How far below a ladder top the feet may sink and still stand on it
const ONE_WAY_TOLERANCE: f32 = 0.5;
/// Horizontal shortfall that counts as running into a wall
const WALL_BLOCK_EPSILON: f32 = 1e-3;

/// Level collision built from a tile map
pub struct TileWorld {
    map: TileMap,

    /// Always empty; the rapier queries need one
    rigid_body_set: RigidBodySet,

    /// One collider per solid or ladder-top cell
    collider_set: ColliderSet,

    /// Query pipeline for shape casts and overlap tests
    query_pipeline: QueryPipeline,

    character_controller: KinematicCharacterController,

    /// Whether the last move was blocked sideways
    wall_touching: bool,
}

impl TileWorld {
    pub fn new(map: TileMap) -> Self {
        let mut collider_set = ColliderSet::new();
        for (column, row, cell) in map.iter() {
            if cell.solid {
                collider_set.insert(presets::solid_tile(column, row));
            } else if cell.id == LADDER_TOP_ID {
                collider_set.insert(presets::ladder_top_tile(column, row));
            }
        }

        let rigid_body_set = RigidBodySet::new();
        let mut query_pipeline = QueryPipeline::new();
        query_pipeline.update(&rigid_body_set, &collider_set);

        info!(
            "Tile world {}x{} built with {} colliders",
            map.columns(),
            map.rows(),
            collider_set.len()
        );

        Self {
            map,
            rigid_body_set,
            collider_set,
            query_pipeline,
            character_controller: KinematicCharacterController {
                // Screen space: y grows downward
                up: nalgebra::Unit::new_normalize(vector![0.0, -1.0]),
                offset: CharacterLength::Absolute(0.01),
                autostep: None,
                snap_to_ground: None,
                ..Default::default()
            },
            wall_touching: false,
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    /// Check a box against the level
    ///
    /// Ladder tops only count when `feet_y` is at or above their surface.
    fn overlaps(&self, center: Vec2, half_extents: Vec2, feet_y: Option<f32>) -> bool {
        let predicate = |_: ColliderHandle, collider: &Collider| {
            if TileLayer::LadderTop.contains(collider) {
                feet_y.is_some_and(|feet| stands_on(collider, feet))
            } else {
                true
            }
        };
        let filter = QueryFilter::default().predicate(&predicate);

        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &body::isometry(center),
                &body::cuboid(half_extents),
                filter,
            )
            .is_some()
    }
}

/// Check if feet at `feet_y` rest on (or above) a ladder-top collider
fn stands_on(collider: &Collider, feet_y: f32) -> bool {
    let surface = collider.translation().y - TILE_SIZE / 2.0;
    feet_y <= surface + ONE_WAY_TOLERANCE
}

impl World for TileWorld {
    fn probe(&mut self, actor: &ActorState) -> EnvironmentProbe {
        let frame = presentation::present(actor);
        let position = actor.position;

        let feet = feet_offset(actor.active_shape);
        let feet_probe = position + Vec2::new(0.0, feet + FEET_PROBE_HALF_EXTENTS.y);
        let is_grounded = self.overlaps(feet_probe, FEET_PROBE_HALF_EXTENTS, Some(position.y + feet));

        let mut obstacle_overlap =
            self.overlaps(position + CEILING_PROBE_CENTER, CEILING_PROBE_HALF_EXTENTS, None);
        if frame.wall_probe_enabled {
            obstacle_overlap |=
                self.overlaps(position + frame.wall_probe_offset, WALL_PROBE_HALF_EXTENTS, None);
        }

        let (column, row) = self.map.world_to_map(position);
        let origin = self.map.map_to_world(column, row);

        EnvironmentProbe {
            is_grounded,
            is_wall_touching: self.wall_touching,
            obstacle_overlap,
            overlap_tile_kind: TileKind::from_id(self.map.id_at(column, row)),
            below_tile_kind: TileKind::from_id(self.map.id_at(column, row + 1)),
            overlap_world_position: origin,
            ladder_snap_x: origin.x + TILE_SIZE / 2.0,
        }
    }

    fn move_and_slide(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        shape: CollisionShape,
        dt: f32,
    ) -> Motion {
        let (hitbox, center) = player_hitbox(shape);
        let desired = velocity * dt;
        let feet_y = position.y + feet_offset(shape);
        let rising = velocity.y < 0.0;

        let predicate = |_: ColliderHandle, collider: &Collider| {
            !TileLayer::LadderTop.contains(collider) || (!rising && stands_on(collider, feet_y))
        };
        let filter = QueryFilter::default().predicate(&predicate);

        let movement = self.character_controller.move_shape(
            dt,
            &self.rigid_body_set,
            &self.collider_set,
            &self.query_pipeline,
            &hitbox,
            &body::isometry(position + center),
            vector![desired.x, desired.y],
            filter,
            |_| {},
        );
        let moved = Vec2::new(movement.translation.x, movement.translation.y);

        let mut velocity = velocity;
        self.wall_touching =
            desired.x != 0.0 && (desired.x - moved.x).abs() > WALL_BLOCK_EPSILON;
        if self.wall_touching {
            velocity.x = 0.0;
        }

        let landed = desired.y > 0.0 && (movement.grounded || moved.y < desired.y - WALL_BLOCK_EPSILON);
        let bumped_head = desired.y < 0.0 && moved.y > desired.y + WALL_BLOCK_EPSILON;
        if landed || bumped_head {
            velocity.y = 0.0;
        }

        Motion {
            position: position + moved,
            velocity,
        }
    }
}
