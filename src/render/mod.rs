use crate::maze::{Pos, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerStyle {
    Entrance,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawEvent {
    Wall { pos: Pos, side: Side, present: bool },
    Move { from: Pos, to: Pos, undo: bool },
    Marker { pos: Pos, style: MarkerStyle },
    Step,
}

// Drawing collaborator for the maze core. `on_step` is a pacing hook fired
// after each state-mutating step; the core works the same if it does nothing.
pub trait RenderSink {
    fn draw_wall(&mut self, pos: Pos, side: Side, present: bool);
    fn draw_move(&mut self, from: Pos, to: Pos, undo: bool);
    fn draw_marker(&mut self, pos: Pos, style: MarkerStyle);
    fn on_step(&mut self) {}
}

// Headless sink: records the draw stream for playback or assertions.
pub struct EventRecorder {
    pub events: Vec<DrawEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn moves(&self) -> impl Iterator<Item = (Pos, Pos, bool)> + '_ {
        self.events.iter().filter_map(|ev| match ev {
            DrawEvent::Move { from, to, undo } => Some((*from, *to, *undo)),
            _ => None,
        })
    }
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for EventRecorder {
    fn draw_wall(&mut self, pos: Pos, side: Side, present: bool) {
        self.events.push(DrawEvent::Wall { pos, side, present });
    }

    fn draw_move(&mut self, from: Pos, to: Pos, undo: bool) {
        self.events.push(DrawEvent::Move { from, to, undo });
    }

    fn draw_marker(&mut self, pos: Pos, style: MarkerStyle) {
        self.events.push(DrawEvent::Marker { pos, style });
    }

    fn on_step(&mut self) {
        self.events.push(DrawEvent::Step);
    }
}

// Discards everything, including the pacing hook.
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_wall(&mut self, _pos: Pos, _side: Side, _present: bool) {}
    fn draw_move(&mut self, _from: Pos, _to: Pos, _undo: bool) {}
    fn draw_marker(&mut self, _pos: Pos, _style: MarkerStyle) {}
}
