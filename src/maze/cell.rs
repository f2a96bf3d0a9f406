#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    // Enumeration order doubles as the solver's fixed search order.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    // (row, col) offset of the adjacent cell on this side.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Side::Left => (0, -1),
            Side::Right => (0, 1),
            Side::Top => (-1, 0),
            Side::Bottom => (1, 0),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Cell {
    walls: [bool; 4],
    pub visited: bool,
}

impl Cell {
    pub fn new() -> Self {
        Self {
            walls: [true; 4],
            visited: false,
        }
    }

    pub fn has_wall(&self, side: Side) -> bool {
        self.walls[side as usize]
    }

    pub fn set_wall(&mut self, side: Side, present: bool) {
        self.walls[side as usize] = present;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
