// Math utilities and helper functions

/// Collapse a pair of opposing buttons into a direction
///
/// Returns 1 for `positive` only, -1 for `negative` only, 0 for neither or both.
pub fn axis(positive: bool, negative: bool) -> i8 {
    i8::from(positive) - i8::from(negative)
}

/// Index of the grid cell containing `coord`
pub fn cell_index(coord: f32, cell_size: f32) -> i32 {
    (coord / cell_size).floor() as i32
}

/// World coordinate of the origin of cell `index`
pub fn cell_origin(index: i32, cell_size: f32) -> f32 {
    index as f32 * cell_size
}
