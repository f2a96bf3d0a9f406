use crate::maze::{Grid, Pos, Side};
use crate::render::{MarkerStyle, RenderSink};

struct Frame {
    pos: Pos,
    next_side: usize,
}

// Depth-first search from the entrance to the exit over open walls only,
// emitting a forward move per descent and an undo move per backtrack.
// Explicit stack of frames, each holding its direction cursor, so an outer
// cell resumes with its next direction after an inner branch fails.
//
// The exit check runs on arrival, before the cell would be marked visited,
// so the exit cell's flag stays unset on the success path. Harmless while
// the maze is a spanning tree, since the exit can only be reached once.
pub fn solve<S: RenderSink>(grid: &mut Grid, sink: &mut S) -> bool {
    let entrance = grid.entrance();
    let exit = grid.exit();

    sink.draw_marker(entrance, MarkerStyle::Entrance);
    sink.on_step();
    if entrance == exit {
        sink.draw_marker(exit, MarkerStyle::Exit);
        return true;
    }

    grid.cell_mut(entrance).visited = true;
    let mut stack = vec![Frame {
        pos: entrance,
        next_side: 0,
    }];

    loop {
        let Some(frame) = stack.last_mut() else {
            // Every branch from the entrance is exhausted.
            return false;
        };
        let curr = frame.pos;

        let mut chosen: Option<Pos> = None;
        while frame.next_side < Side::ALL.len() {
            let side = Side::ALL[frame.next_side];
            frame.next_side += 1;

            if grid.cell(curr).has_wall(side) {
                continue;
            }
            let Some(next) = grid.neighbor(curr, side) else {
                continue;
            };
            if grid.cell(next).visited {
                continue;
            }
            chosen = Some(next);
            break;
        }

        match chosen {
            Some(next) => {
                sink.draw_move(curr, next, false);
                sink.on_step();
                if next == exit {
                    sink.draw_marker(exit, MarkerStyle::Exit);
                    return true;
                }
                grid.cell_mut(next).visited = true;
                stack.push(Frame {
                    pos: next,
                    next_side: 0,
                });
            }
            None => {
                // Dead end: pop and repaint the segment back to the parent.
                stack.pop();
                if let Some(parent) = stack.last() {
                    sink.draw_move(parent.pos, curr, true);
                    sink.on_step();
                }
            }
        }
    }
}
