// Level collision using rapier2d
//
// - `tiles`: the tile grid and raw tile ids
// - `body`: collider presets and the player hitbox geometry
// - `world`: the `World` implementation the player controller runs against

pub mod body;
pub mod tiles;
mod world;

pub use tiles::{TileMap, TILE_SIZE};
pub use world::TileWorld;

/// Tile map layout errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileMapError {
    #[error("Tile map has no cells")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown tile {ch:?} at row {row}, column {column}")]
    UnknownTile { ch: char, row: usize, column: usize },
}

/// Level used by the demo binary: 32x15 tiles, 512 px wide
pub const DEMO_LEVEL: &[&str] = &[
    "................................",
    "................................",
    "................................",
    "................................",
    "..................T.............",
    "..................H.............",
    ".........#####....H.......####..",
    "..................H.............",
    "..................H.............",
    "......T...........H.............",
    "......H...........H.............",
    "......H......###########........",
    "......H...................######",
    "######H.......~~~~..............",
    "################################",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_map_error_display() {
        let err = TileMapError::RaggedRow {
            row: 2,
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "Row 2 has 3 cells, expected 4");
    }

    #[test]
    fn test_demo_level_parses() {
        let map = TileMap::parse(DEMO_LEVEL).unwrap();
        assert_eq!(map.columns(), 32);
        assert_eq!(map.pixel_size().x, 512.0);
    }
}
