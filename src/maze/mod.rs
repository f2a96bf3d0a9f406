pub mod cell;
pub mod generate;
pub mod grid;
pub mod solve;

pub use cell::{Cell, Side};
pub use generate::Generator;
pub use grid::{Grid, GridError, Pos};
pub use solve::solve;
