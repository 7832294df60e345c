//! Stateless rendering of the game screen.

use std::collections::BTreeMap;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::board::{Board, Cursor, MAX_ROWS, TileStatus, WORD_LENGTH};
use crate::input::VirtualKey;
use crate::notice::NoticeLevel;
use crate::session::SessionPhase;

use super::app::App;
use super::keyboard::{KEYBOARD_HEIGHT, KeyHit, layout_keys};

const TILE_WIDTH: u16 = 5;
const TILE_HEIGHT: u16 = 3;
const TILE_GAP: u16 = 1;
const BOARD_WIDTH: u16 = TILE_WIDTH * WORD_LENGTH as u16 + TILE_GAP * (WORD_LENGTH as u16 - 1);
const BOARD_HEIGHT: u16 = TILE_HEIGHT * MAX_ROWS as u16;
const SUGGESTION_WIDTH: u16 = 30;
const HELP_TEXT: &str =
    "Type letters · Enter submit · ^N new · F2 random · F3 daily · Esc/^D dismiss · ^Q quit";

/// Draws the whole screen and returns where the on-screen keys landed.
pub fn draw(frame: &mut Frame, app: &App) -> Vec<KeyHit> {
    let area = frame.area();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(BOARD_WIDTH + 2), Constraint::Length(SUGGESTION_WIDTH)])
        .split(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // Title
            Constraint::Length(3),               // Notices
            Constraint::Min(BOARD_HEIGHT),       // Board
            Constraint::Length(KEYBOARD_HEIGHT), // Keyboard
            Constraint::Length(1),               // Help
        ])
        .split(columns[0]);

    draw_title(frame, chunks[0], app);
    draw_notices(frame, chunks[1], app);
    draw_board(
        frame,
        chunks[2],
        app.controller().board(),
        *app.controller().cursor(),
        app.controller().phase(),
    );
    let hits = layout_keys(chunks[3]);
    draw_keyboard(frame, &hits, &app.controller().letter_hints());
    draw_help(frame, chunks[4]);
    draw_suggestions(frame, columns[1], app);

    hits
}

fn draw_title(frame: &mut Frame, area: Rect, app: &App) {
    let controller = app.controller();
    let mode = match controller.mode() {
        Some(mode) => mode.name(),
        None => app.mode().name(),
    };
    let daily = if *controller.session().is_daily() { " (daily)" } else { "" };
    let status = if app.is_starting() {
        "starting...".to_string()
    } else {
        match controller.phase() {
            SessionPhase::Idle => "no game".to_string(),
            SessionPhase::Active if !controller.cursor().on_board() => {
                "waiting for result".to_string()
            }
            SessionPhase::Active => format!("guess {}/{}", controller.cursor().row + 1, MAX_ROWS),
            SessionPhase::Submitting => "scoring...".to_string(),
            SessionPhase::Over => match controller.session().revealed_word() {
                Some(word) => format!("over - {}", word),
                None => "over".to_string(),
            },
        }
    };

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Strictly Wordle",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}{}  ", mode, daily)),
        Span::styled(status, Style::default().fg(Color::Yellow)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn draw_notices(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .controller()
        .notices()
        .items()
        .iter()
        .rev()
        .take(area.height as usize)
        .map(|notice| {
            let color = match notice.level() {
                NoticeLevel::Info => Color::White,
                NoticeLevel::Success => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(
                notice.message().clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Colours for a tile or key in the given state.
pub fn status_style(status: TileStatus) -> Style {
    match status {
        TileStatus::Empty => Style::default().fg(Color::DarkGray),
        TileStatus::Filled => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        TileStatus::Correct => Style::default()
            .fg(Color::White)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        TileStatus::Present => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        TileStatus::Absent => Style::default().fg(Color::White).bg(Color::DarkGray),
    }
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Cursor, phase: SessionPhase) {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    for (r, row) in board.rows().iter().enumerate() {
        for (c, tile) in row.iter().enumerate() {
            let x = board_area.x + c as u16 * (TILE_WIDTH + TILE_GAP);
            let y = board_area.y + r as u16 * TILE_HEIGHT;
            let cell = Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT).intersection(board_area);
            if cell.width == 0 || cell.height == 0 {
                continue;
            }

            let is_cursor = phase == SessionPhase::Active && r == cursor.row && c == cursor.tile;
            let border = if is_cursor {
                Style::default().fg(Color::Cyan)
            } else if tile.status == TileStatus::Empty {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Gray)
            };

            let letter = tile.letter.map(String::from).unwrap_or_default();
            let paragraph = Paragraph::new(Span::styled(letter, status_style(tile.status)))
                .style(status_style(tile.status))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(paragraph, cell);
        }
    }
}

fn draw_keyboard(frame: &mut Frame, hits: &[KeyHit], hints: &BTreeMap<char, TileStatus>) {
    for hit in hits {
        let style = match hit.key {
            VirtualKey::Letter(c) => hints
                .get(&c)
                .map(|s| status_style(*s))
                .unwrap_or_else(|| Style::default().fg(Color::White)),
            VirtualKey::Enter | VirtualKey::Back => {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            }
        };
        let key = Paragraph::new(hit.key.label())
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(key, hit.area);
    }
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(HELP_TEXT)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn draw_suggestions(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .controller()
        .suggestions()
        .iter()
        .take(app.suggestion_limit())
        .map(|s| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<7}", s.word.to_uppercase()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>6.2}%", s.probability * 100.0),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Suggestions").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
