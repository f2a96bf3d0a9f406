use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::app::{Phase, Session, Tile};
use crate::{MIN_PANE_WIDTH, NUM_COLS, NUM_ROWS, TILE_W, VIEW_H, VIEW_W};

pub fn draw_maze(frame: &mut Frame, session: &Session) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH {
        let msg = Paragraph::new(format!("RESIZE PANE (min width: {})", MIN_PANE_WIDTH))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("MAZE"));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("MAZE SOLVER")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    let field_w = (VIEW_W * TILE_W) as u16;
    let field_h = VIEW_H as u16;

    let col_rect = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(field_w),
            Constraint::Min(0),
        ])
        .split(cabinet_inner)[1];

    let info_h = 5u16;
    let controls_h = 4u16;
    let stack = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(info_h),
            Constraint::Length(field_h),
            Constraint::Length(controls_h),
            Constraint::Min(0),
        ])
        .split(col_rect);

    draw_info(frame, session, stack[1]);
    draw_field(frame, session, stack[2]);
    draw_controls(frame, stack[3]);
}

fn draw_field(frame: &mut Frame, session: &Session, area: Rect) {
    let lines: Vec<Line> = (0..session.view.height)
        .map(|row| {
            let spans: Vec<Span> = (0..session.view.width)
                .map(|col| tile_span(session.view.tile(row, col)))
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}

fn tile_span(tile: Tile) -> Span<'static> {
    match tile {
        Tile::Blank | Tile::Floor => Span::raw("  "),
        Tile::Wall => Span::styled("██", Style::default().fg(Color::White)),
        Tile::Path => Span::styled("██", Style::default().fg(Color::Red)),
        Tile::Backtrack => Span::styled("··", Style::default().fg(Color::DarkGray)),
        Tile::Marker => Span::styled("██", Style::default().fg(Color::Yellow)),
    }
}

fn draw_info(frame: &mut Frame, session: &Session, area: Rect) {
    let phase = match session.phase() {
        Phase::Carving => "CARVING",
        Phase::Solving => "SOLVING",
        Phase::Solved => "SOLVED",
        Phase::NoPath => "NO PATH",
    };
    // Blink the phase label while playback is still running.
    let label = if matches!(session.phase(), Phase::Carving | Phase::Solving) {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        if (millis / 300) % 2 == 0 { phase } else { "" }
    } else {
        phase
    };

    let block = Block::default().title("INFO").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let left = Paragraph::new(vec![
        Line::raw(format!("{:<6} {}", "SEED:", session.seed)),
        Line::raw(format!("{:<6} {}x{}", "SIZE:", NUM_ROWS, NUM_COLS)),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(left, cols[0]);

    let right = Paragraph::new(vec![
        Line::raw(format!("{:<7} {}", "PHASE:", label)),
        Line::raw(if session.paused { "PAUSED" } else { "" }),
    ])
    .alignment(Alignment::Left);
    frame.render_widget(right, cols[1]);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let block = Block::default().title("CONTROLS").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let left = Paragraph::new(vec![Line::raw("space pause"), Line::raw("r new maze")])
        .alignment(Alignment::Left);
    frame.render_widget(left, cols[0]);

    let right = Paragraph::new(vec![Line::raw("q/esc quit"), Line::raw("")])
        .alignment(Alignment::Left);
    frame.render_widget(right, cols[1]);
}
