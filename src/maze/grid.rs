use std::error::Error;
use std::fmt;

use crate::maze::{Cell, Side};
use crate::render::RenderSink;

pub type Pos = (usize, usize);

#[derive(Debug, PartialEq, Eq)]
pub enum GridError {
    EmptyDimensions { num_rows: usize, num_cols: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyDimensions { num_rows, num_cols } => {
                write!(f, "grid dimensions must be at least 1x1, got {num_rows}x{num_cols}")
            }
        }
    }
}

impl Error for GridError {}

pub struct Grid {
    pub num_rows: usize,
    pub num_cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(num_rows: usize, num_cols: usize) -> Result<Self, GridError> {
        if num_rows == 0 || num_cols == 0 {
            return Err(GridError::EmptyDimensions { num_rows, num_cols });
        }
        Ok(Self {
            num_rows,
            num_cols,
            cells: vec![Cell::new(); num_rows * num_cols],
        })
    }

    fn idx(&self, (row, col): Pos) -> usize {
        row * self.num_cols + col
    }

    pub fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.idx(pos)]
    }

    pub fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        let idx = self.idx(pos);
        &mut self.cells[idx]
    }

    pub fn entrance(&self) -> Pos {
        (0, 0)
    }

    pub fn exit(&self) -> Pos {
        (self.num_rows - 1, self.num_cols - 1)
    }

    // Bounds are checked here; off-grid lookups are filtered out, never an error.
    pub fn neighbor(&self, (row, col): Pos, side: Side) -> Option<Pos> {
        let (dr, dc) = side.delta();
        let nr = row.checked_add_signed(dr)?;
        let nc = col.checked_add_signed(dc)?;
        if nr < self.num_rows && nc < self.num_cols {
            Some((nr, nc))
        } else {
            None
        }
    }

    // Clears the matching wall pair between a cell and its neighbor on `side`.
    pub fn open_between(&mut self, pos: Pos, side: Side) {
        if let Some(next) = self.neighbor(pos, side) {
            self.cell_mut(pos).set_wall(side, false);
            self.cell_mut(next).set_wall(side.opposite(), false);
        }
    }

    pub fn reset_visited(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
        }
    }

    // Emit the full wall state cell by cell. Absent walls are painted over
    // explicitly rather than skipped, so a sink can erase stale segments.
    pub fn draw_to<S: RenderSink>(&self, sink: &mut S) {
        for row in 0..self.num_rows {
            for col in 0..self.num_cols {
                let cell = self.cell((row, col));
                for side in Side::ALL {
                    sink.draw_wall((row, col), side, cell.has_wall(side));
                }
                sink.on_step();
            }
        }
    }
}
