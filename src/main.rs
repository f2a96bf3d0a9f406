use std::error::Error;

mod app;
mod config;
mod maze;
mod render;
mod ui;

pub use config::{
    MIN_PANE_WIDTH, NUM_COLS, NUM_ROWS, SEED_ENV, TICK_MS, TILE_W, VIEW_H, VIEW_W,
};
pub use maze::{solve, Cell, Generator, Grid, GridError, Pos, Side};
pub use render::{DrawEvent, EventRecorder, MarkerStyle, NullSink, RenderSink};

fn main() -> Result<(), Box<dyn Error>> {
    app::run()
}
