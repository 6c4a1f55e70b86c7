// Collider presets for tiles and the player hitboxes

use glam::Vec2;
use rapier2d::prelude::*;

use super::tiles::TILE_SIZE;
use crate::game::player::CollisionShape;

/// Collision groups for the level geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLayer {
    /// Blocks from every side
    Solid = 0b0000_0001,

    /// One-way platform: blocks only from above
    LadderTop = 0b0000_0010,
}

impl TileLayer {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_truncate(self as u32), Group::ALL)
    }

    /// Check if `collider` belongs to this layer
    pub fn contains(self, collider: &Collider) -> bool {
        collider
            .collision_groups()
            .memberships
            .contains(Group::from_bits_truncate(self as u32))
    }
}

/// Half extents of the standing hitbox
pub const STANDING_HALF_EXTENTS: Vec2 = Vec2::new(7.0, 10.0);
/// Half extents of the sliding hitbox
pub const SLIDING_HALF_EXTENTS: Vec2 = Vec2::new(7.0, 7.0);
/// Offset of the sliding hitbox centre from the player origin
pub const SLIDING_CENTER: Vec2 = Vec2::new(0.0, 3.0);

/// Headroom above the sliding box, used to spot low ceilings
pub const CEILING_PROBE_HALF_EXTENTS: Vec2 = Vec2::new(6.5, 3.0);
pub const CEILING_PROBE_CENTER: Vec2 = Vec2::new(0.0, -7.0);
/// Strip just ahead of the standing box
pub const WALL_PROBE_HALF_EXTENTS: Vec2 = Vec2::new(1.5, 6.0);
/// Strip under the feet used for the ground check
pub const FEET_PROBE_HALF_EXTENTS: Vec2 = Vec2::new(6.5, 0.5);

/// Cuboid and centre offset of a player hitbox
pub fn player_hitbox(shape: CollisionShape) -> (Cuboid, Vec2) {
    match shape {
        CollisionShape::Standing => (cuboid(STANDING_HALF_EXTENTS), Vec2::ZERO),
        CollisionShape::Sliding => (cuboid(SLIDING_HALF_EXTENTS), SLIDING_CENTER),
    }
}

/// Distance from the player origin down to the bottom of its hitbox
pub fn feet_offset(shape: CollisionShape) -> f32 {
    let (hitbox, center) = player_hitbox(shape);
    center.y + hitbox.half_extents.y
}

pub fn cuboid(half_extents: Vec2) -> Cuboid {
    Cuboid::new(vector![half_extents.x, half_extents.y])
}

pub fn isometry(position: Vec2) -> Isometry<Real> {
    Isometry::translation(position.x, position.y)
}

/// Common collider configurations for level tiles
pub mod presets {
    use super::*;

    fn tile_collider(column: i32, row: i32, layer: TileLayer) -> Collider {
        let half = TILE_SIZE / 2.0;
        ColliderBuilder::cuboid(half, half)
            .translation(vector![
                column as f32 * TILE_SIZE + half,
                row as f32 * TILE_SIZE + half
            ])
            .collision_groups(layer.to_interaction_groups())
            .friction(0.0)
            .build()
    }

    /// Create a solid block collider for the cell at `(column, row)`
    pub fn solid_tile(column: i32, row: i32) -> Collider {
        tile_collider(column, row, TileLayer::Solid)
    }

    /// Create a one-way ladder-top collider for the cell at `(column, row)`
    pub fn ladder_top_tile(column: i32, row: i32) -> Collider {
        tile_collider(column, row, TileLayer::LadderTop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_tile_preset() {
        let collider = presets::solid_tile(2, 3);
        assert_eq!(collider.translation().x, 40.0);
        assert_eq!(collider.translation().y, 56.0);
        assert!(TileLayer::Solid.contains(&collider));
        assert!(!TileLayer::LadderTop.contains(&collider));
    }

    #[test]
    fn test_ladder_top_preset() {
        let collider = presets::ladder_top_tile(0, 0);
        assert!(TileLayer::LadderTop.contains(&collider));
        assert!(!collider.is_sensor());
    }

    #[test]
    fn test_hitboxes_share_feet() {
        assert_eq!(feet_offset(CollisionShape::Standing), 10.0);
        assert_eq!(feet_offset(CollisionShape::Sliding), 10.0);
    }

    #[test]
    fn test_ceiling_probe_sits_above_slide_box() {
        let probe_bottom = CEILING_PROBE_CENTER.y + CEILING_PROBE_HALF_EXTENTS.y;
        let slide_top = SLIDING_CENTER.y - SLIDING_HALF_EXTENTS.y;
        assert_eq!(probe_bottom, slide_top);
        let probe_top = CEILING_PROBE_CENTER.y - CEILING_PROBE_HALF_EXTENTS.y;
        assert_eq!(probe_top, -STANDING_HALF_EXTENTS.y);
    }
}
