// World queries sampled before the state machine runs

use glam::Vec2;

/// Classification of a tile cell as far as movement is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    /// Empty cell
    #[default]
    None,
    /// Climbable ladder shaft
    LadderBody,
    /// Topmost ladder cell, the dismount platform
    LadderTop,
    /// Water; makes gravity lighter
    Liquid,
    /// Anything else
    Plain,
}

impl TileKind {
    /// Map a raw tile-map cell id
    ///
    /// Unknown ids are treated as plain tiles so that guards keyed on
    /// ladders or liquid never fire on them.
    pub fn from_id(id: i32) -> Self {
        match id {
            -1 => Self::None,
            1 => Self::LadderTop,
            2 => Self::LadderBody,
            3 => Self::Liquid,
            _ => Self::Plain,
        }
    }

    pub fn is_ladder(&self) -> bool {
        matches!(self, Self::LadderBody | Self::LadderTop)
    }
}

/// Everything the world tells the controller about the actor's surroundings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnvironmentProbe {
    /// Standing on a floor after the last move
    pub is_grounded: bool,
    /// Blocked by a wall during the last move
    pub is_wall_touching: bool,
    /// Low-ceiling / wall probe area overlaps a solid
    pub obstacle_overlap: bool,
    /// Tile under the actor's origin
    pub overlap_tile_kind: TileKind,
    /// Tile one cell below the actor's origin
    pub below_tile_kind: TileKind,
    /// World position of the overlapped cell's origin
    pub overlap_world_position: Vec2,
    /// Horizontal coordinate of the overlapped cell's ladder axis
    pub ladder_snap_x: f32,
}

impl EnvironmentProbe {
    /// Standing on open ground
    pub fn grounded() -> Self {
        Self {
            is_grounded: true,
            ..Default::default()
        }
    }

    /// In open air
    pub fn airborne() -> Self {
        Self::default()
    }

    pub fn with_wall(mut self) -> Self {
        self.is_wall_touching = true;
        self
    }

    pub fn with_obstacle(mut self) -> Self {
        self.obstacle_overlap = true;
        self
    }

    /// Overlap a tile whose origin is at `origin`, with its ladder axis at `snap_x`
    pub fn over_tile(mut self, kind: TileKind, origin: Vec2, snap_x: f32) -> Self {
        self.overlap_tile_kind = kind;
        self.overlap_world_position = origin;
        self.ladder_snap_x = snap_x;
        self
    }

    pub fn above_tile(mut self, kind: TileKind) -> Self {
        self.below_tile_kind = kind;
        self
    }
}
