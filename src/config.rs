// Shared maze/UI constants.
pub const NUM_ROWS: usize = 10;
pub const NUM_COLS: usize = 16;
pub const TILE_W: usize = 2; // render each tile as two characters wide
pub const VIEW_H: usize = NUM_ROWS * 2 + 1; // cell rows plus wall rows
pub const VIEW_W: usize = NUM_COLS * 2 + 1; // cell columns plus wall columns
// Minimal pane width to fit the playfield plus the cabinet border.
pub const MIN_PANE_WIDTH: u16 = (VIEW_W * TILE_W) as u16 + 4;
pub const TICK_MS: u64 = 80;
pub const SEED_ENV: &str = "MAZE_SEED";
