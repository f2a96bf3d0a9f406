use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::maze::{Grid, Pos, Side};
use crate::render::RenderSink;

// Randomized depth-first carver. Owns its RNG so runs are reproducible from
// the seed alone and independent of any process-wide generator state.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // Carve a spanning tree over the grid, then open the entrance and exit
    // gaps. Depth-first with an explicit stack: the cell on top keeps trying
    // its remaining unvisited neighbors each time a descent returns, and is
    // popped only when none are left. Leaves every visited flag reset so the
    // solver starts from a clean slate.
    pub fn carve<S: RenderSink>(&mut self, grid: &mut Grid, sink: &mut S) {
        let start = grid.entrance();
        grid.cell_mut(start).visited = true;
        let mut stack = vec![start];

        while let Some(&curr) = stack.last() {
            let candidates: Vec<(Side, Pos)> = Side::ALL
                .into_iter()
                .filter_map(|side| grid.neighbor(curr, side).map(|next| (side, next)))
                .filter(|&(_, next)| !grid.cell(next).visited)
                .collect();

            let Some(&(side, next)) = candidates.choose(&mut self.rng) else {
                stack.pop();
                continue;
            };

            grid.open_between(curr, side);
            grid.cell_mut(next).visited = true;
            sink.on_step();
            stack.push(next);
        }

        // Entrance and exit are opened unconditionally, carved state or not.
        let exit = grid.exit();
        grid.cell_mut(start).set_wall(Side::Top, false);
        grid.cell_mut(exit).set_wall(Side::Bottom, false);

        grid.reset_visited();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSink;

    fn carved(num_rows: usize, num_cols: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(num_rows, num_cols).unwrap();
        Generator::new(seed).carve(&mut grid, &mut NullSink);
        grid
    }

    // Open internal adjacencies, counting each shared wall once.
    fn open_internal_walls(grid: &Grid) -> usize {
        let mut open = 0;
        for row in 0..grid.num_rows {
            for col in 0..grid.num_cols {
                for side in [Side::Right, Side::Bottom] {
                    if grid.neighbor((row, col), side).is_some()
                        && !grid.cell((row, col)).has_wall(side)
                    {
                        open += 1;
                    }
                }
            }
        }
        open
    }

    // Open walls on the outer boundary as (pos, side) pairs.
    fn open_boundary_walls(grid: &Grid) -> Vec<(Pos, Side)> {
        let mut open = Vec::new();
        for row in 0..grid.num_rows {
            for col in 0..grid.num_cols {
                for side in Side::ALL {
                    if grid.neighbor((row, col), side).is_none()
                        && !grid.cell((row, col)).has_wall(side)
                    {
                        open.push(((row, col), side));
                    }
                }
            }
        }
        open
    }

    fn wall_snapshot(grid: &Grid) -> Vec<bool> {
        let mut walls = Vec::new();
        for row in 0..grid.num_rows {
            for col in 0..grid.num_cols {
                for side in Side::ALL {
                    walls.push(grid.cell((row, col)).has_wall(side));
                }
            }
        }
        walls
    }

    #[test]
    fn carving_produces_a_spanning_tree() {
        for (rows, cols, seed) in [(10, 5, 0), (1, 8, 3), (7, 1, 9), (12, 12, 42)] {
            let grid = carved(rows, cols, seed);
            assert_eq!(
                open_internal_walls(&grid),
                rows * cols - 1,
                "{rows}x{cols} seed {seed}"
            );
        }
    }

    #[test]
    fn only_entrance_and_exit_open_the_boundary() {
        let grid = carved(10, 5, 0);
        let mut boundary = open_boundary_walls(&grid);
        boundary.sort();
        assert_eq!(boundary, vec![((0, 0), Side::Top), ((9, 4), Side::Bottom)]);
    }

    #[test]
    fn same_seed_gives_identical_walls() {
        let first = carved(10, 5, 7);
        let second = carved(10, 5, 7);
        assert_eq!(wall_snapshot(&first), wall_snapshot(&second));
    }

    #[test]
    fn different_seeds_give_different_walls() {
        let first = carved(10, 5, 1);
        let second = carved(10, 5, 2);
        assert_ne!(wall_snapshot(&first), wall_snapshot(&second));
    }

    #[test]
    fn visited_flags_are_reset_after_carving() {
        let grid = carved(10, 5, 0);
        for row in 0..grid.num_rows {
            for col in 0..grid.num_cols {
                assert!(!grid.cell((row, col)).visited);
            }
        }
    }

    #[test]
    fn one_by_one_grid_is_a_trivial_maze() {
        let grid = carved(1, 1, 0);
        assert_eq!(open_internal_walls(&grid), 0);
        assert!(!grid.cell((0, 0)).has_wall(Side::Top));
        assert!(!grid.cell((0, 0)).has_wall(Side::Bottom));
        assert!(grid.cell((0, 0)).has_wall(Side::Left));
        assert!(grid.cell((0, 0)).has_wall(Side::Right));
    }

    #[test]
    fn carving_steps_once_per_cell_reached() {
        struct StepCounter(usize);
        impl RenderSink for StepCounter {
            fn draw_wall(&mut self, _: Pos, _: Side, _: bool) {}
            fn draw_move(&mut self, _: Pos, _: Pos, _: bool) {}
            fn draw_marker(&mut self, _: Pos, _: crate::render::MarkerStyle) {}
            fn on_step(&mut self) {
                self.0 += 1;
            }
        }

        let mut grid = Grid::new(6, 4).unwrap();
        let mut counter = StepCounter(0);
        Generator::new(11).carve(&mut grid, &mut counter);
        // One wall pair cleared per cell after the start.
        assert_eq!(counter.0, 6 * 4 - 1);
    }
}
