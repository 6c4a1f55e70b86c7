// Tile grid describing a level
//
// Cells hold the raw ids the controller classifies (see `TileKind::from_id`)
// plus a solid flag for the collision layer.

use glam::Vec2;

use super::TileMapError;
use crate::core::math::{cell_index, cell_origin};

/// Size of one tile in pixels
pub const TILE_SIZE: f32 = 16.0;

/// Raw id of an empty cell
pub const EMPTY_ID: i32 = -1;
/// Raw id of a solid block
pub const BLOCK_ID: i32 = 0;
pub const LADDER_TOP_ID: i32 = 1;
pub const LADDER_BODY_ID: i32 = 2;
pub const LIQUID_ID: i32 = 3;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub id: i32,
    pub solid: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        id: EMPTY_ID,
        solid: false,
    };

    /// Parse a layout character
    ///
    /// `.` empty, `#` solid block, `T` ladder top, `H` ladder body, `~` liquid.
    pub fn from_char(ch: char) -> Option<Self> {
        let cell = match ch {
            '.' => Self::EMPTY,
            '#' => Cell {
                id: BLOCK_ID,
                solid: true,
            },
            'T' => Cell {
                id: LADDER_TOP_ID,
                solid: false,
            },
            'H' => Cell {
                id: LADDER_BODY_ID,
                solid: false,
            },
            '~' => Cell {
                id: LIQUID_ID,
                solid: false,
            },
            _ => return None,
        };
        Some(cell)
    }
}

/// Rectangular tile grid, row-major, row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl TileMap {
    /// Build a map from text rows, one character per cell
    pub fn parse(rows: &[&str]) -> Result<Self, TileMapError> {
        let columns = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        if columns == 0 {
            return Err(TileMapError::Empty);
        }

        let mut cells = Vec::with_capacity(columns * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != columns {
                return Err(TileMapError::RaggedRow {
                    row: row_index,
                    expected: columns,
                    found,
                });
            }
            for (column, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(TileMapError::UnknownTile {
                    ch,
                    row: row_index,
                    column,
                })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            columns,
            rows: rows.len(),
            cells,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Size of the map in pixels
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.columns as f32, self.rows as f32) * TILE_SIZE
    }

    /// Cell at grid coordinates; outside the map every cell is empty
    pub fn cell(&self, column: i32, row: i32) -> Cell {
        if column < 0 || row < 0 {
            return Cell::EMPTY;
        }
        let (column, row) = (column as usize, row as usize);
        if column >= self.columns || row >= self.rows {
            return Cell::EMPTY;
        }
        self.cells[row * self.columns + column]
    }

    /// Raw id at grid coordinates
    pub fn id_at(&self, column: i32, row: i32) -> i32 {
        self.cell(column, row).id
    }

    /// Grid coordinates of the cell containing a world point
    pub fn world_to_map(&self, point: Vec2) -> (i32, i32) {
        (cell_index(point.x, TILE_SIZE), cell_index(point.y, TILE_SIZE))
    }

    /// World position of a cell's top-left corner
    pub fn map_to_world(&self, column: i32, row: i32) -> Vec2 {
        Vec2::new(cell_origin(column, TILE_SIZE), cell_origin(row, TILE_SIZE))
    }

    /// Iterate over every cell with its grid coordinates
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let column = (index % self.columns) as i32;
            let row = (index / self.columns) as i32;
            (column, row, *cell)
        })
    }
}
