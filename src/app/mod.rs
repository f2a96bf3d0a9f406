use std::error::Error;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::maze::{Generator, Grid, Pos};
use crate::render::{DrawEvent, EventRecorder, MarkerStyle, NullSink};
use crate::ui::draw_maze;
use crate::{NUM_COLS, NUM_ROWS, SEED_ENV, TICK_MS, VIEW_H, VIEW_W};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut tui = TuiGuard::new()?;
    run_loop(tui.terminal_mut())
}

fn run_loop(terminal: &mut Term) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(initial_seed())?;
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| draw_maze(frame, &session))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(' ') => session.paused = !session.paused,
                    KeyCode::Char('r') => {
                        session = Session::new(rand::random())?;
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_MS) {
            session.tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn initial_seed() -> u64 {
    if let Ok(raw) = std::env::var(SEED_ENV) {
        if let Ok(seed) = raw.trim().parse() {
            return seed;
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos() as u64
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Carving,
    Solving,
    Solved,
    NoPath,
}

// One generate-then-solve run: the maze is carved and solved up front, the
// recorded draw stream is replayed one pacing step per tick.
pub struct Session {
    pub seed: u64,
    pub view: View,
    pub paused: bool,
    events: Vec<DrawEvent>,
    cursor: usize,
    walls_end: usize,
    solved: bool,
}

impl Session {
    pub fn new(seed: u64) -> Result<Self, Box<dyn Error>> {
        let mut grid = Grid::new(NUM_ROWS, NUM_COLS)?;
        // Carving is silent; the animated wall pass and the solve are what
        // get replayed.
        Generator::new(seed).carve(&mut grid, &mut NullSink);

        let mut recorder = EventRecorder::new();
        grid.draw_to(&mut recorder);
        let walls_end = recorder.events.len();
        let solved = crate::maze::solve(&mut grid, &mut recorder);

        Ok(Self {
            seed,
            view: View::new(VIEW_H, VIEW_W),
            paused: false,
            events: recorder.events,
            cursor: 0,
            walls_end,
            solved,
        })
    }

    // Apply draw events up to the next pacing boundary.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        while self.cursor < self.events.len() {
            let ev = self.events[self.cursor];
            self.cursor += 1;
            match ev {
                DrawEvent::Step => break,
                _ => self.view.apply(ev),
            }
        }
    }

    pub fn phase(&self) -> Phase {
        if self.cursor < self.walls_end {
            Phase::Carving
        } else if self.cursor < self.events.len() {
            Phase::Solving
        } else if self.solved {
            Phase::Solved
        } else {
            Phase::NoPath
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Blank,
    Wall,
    Floor,
    Path,
    Backtrack,
    Marker,
}

// Doubled-resolution playback canvas: odd/odd tiles are cell centers,
// even/even tiles are wall posts, the rest are wall segments.
pub struct View {
    pub height: usize,
    pub width: usize,
    tiles: Vec<Tile>,
}

impl View {
    fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            tiles: vec![Tile::Blank; height * width],
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        self.tiles[self.idx(row, col)]
    }

    fn set(&mut self, row: usize, col: usize, tile: Tile) {
        let idx = self.idx(row, col);
        self.tiles[idx] = tile;
    }

    fn center(pos: Pos) -> (usize, usize) {
        (pos.0 * 2 + 1, pos.1 * 2 + 1)
    }

    fn apply(&mut self, ev: DrawEvent) {
        match ev {
            DrawEvent::Wall { pos, side, present } => {
                let (cr, cc) = Self::center(pos);
                // The cell's corner posts come along with its walls.
                for (pr, pc) in [(cr - 1, cc - 1), (cr - 1, cc + 1), (cr + 1, cc - 1), (cr + 1, cc + 1)] {
                    self.set(pr, pc, Tile::Wall);
                }
                if self.tile(cr, cc) == Tile::Blank {
                    self.set(cr, cc, Tile::Floor);
                }
                let (dr, dc) = side.delta();
                let wr = cr.wrapping_add_signed(dr);
                let wc = cc.wrapping_add_signed(dc);
                // Absent walls are painted over, not skipped, erasing any
                // stale segment under them.
                self.set(wr, wc, if present { Tile::Wall } else { Tile::Floor });
            }
            DrawEvent::Move { from, to, undo } => {
                let (fr, fc) = Self::center(from);
                let (tr, tc) = Self::center(to);
                let style = if undo { Tile::Backtrack } else { Tile::Path };
                self.set(fr, fc, style);
                self.set((fr + tr) / 2, (fc + tc) / 2, style);
                self.set(tr, tc, style);
            }
            DrawEvent::Marker { pos, style } => {
                let (cr, cc) = Self::center(pos);
                let gap = match style {
                    MarkerStyle::Entrance => (cr - 1, cc),
                    MarkerStyle::Exit => (cr + 1, cc),
                };
                self.set(gap.0, gap.1, Tile::Marker);
            }
            DrawEvent::Step => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Side;

    #[test]
    fn wall_events_paint_segments_and_posts() {
        let mut view = View::new(3, 3);
        view.apply(DrawEvent::Wall {
            pos: (0, 0),
            side: Side::Top,
            present: true,
        });
        assert_eq!(view.tile(0, 1), Tile::Wall);
        assert_eq!(view.tile(0, 0), Tile::Wall);
        assert_eq!(view.tile(0, 2), Tile::Wall);
        assert_eq!(view.tile(1, 1), Tile::Floor);

        view.apply(DrawEvent::Wall {
            pos: (0, 0),
            side: Side::Top,
            present: false,
        });
        assert_eq!(view.tile(0, 1), Tile::Floor);
    }

    #[test]
    fn undo_moves_repaint_the_segment() {
        let mut view = View::new(3, 5);
        view.apply(DrawEvent::Move {
            from: (0, 0),
            to: (0, 1),
            undo: false,
        });
        assert_eq!(view.tile(1, 1), Tile::Path);
        assert_eq!(view.tile(1, 2), Tile::Path);
        assert_eq!(view.tile(1, 3), Tile::Path);

        view.apply(DrawEvent::Move {
            from: (0, 0),
            to: (0, 1),
            undo: true,
        });
        assert_eq!(view.tile(1, 2), Tile::Backtrack);
        assert_eq!(view.tile(1, 3), Tile::Backtrack);
    }

    #[test]
    fn session_playback_runs_to_completion() {
        let mut session = Session::new(0).unwrap();
        assert_eq!(session.phase(), Phase::Carving);
        for _ in 0..session.events.len() + 1 {
            session.tick();
        }
        assert_eq!(session.cursor, session.events.len());
        assert_eq!(session.phase(), Phase::Solved);
        // Entrance and exit gaps end up marked.
        assert_eq!(session.view.tile(0, 1), Tile::Marker);
        assert_eq!(
            session.view.tile(VIEW_H - 1, VIEW_W - 2),
            Tile::Marker
        );
    }

    #[test]
    fn pausing_freezes_playback() {
        let mut session = Session::new(3).unwrap();
        session.paused = true;
        session.tick();
        assert_eq!(session.cursor, 0);
    }
}
