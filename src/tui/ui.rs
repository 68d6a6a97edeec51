//! Stateless UI rendering for the client screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tictactoe_client::{Board, Cell, GameApi, Phase, Position};

use super::app::{App, Screen, StartField};

/// Draws the whole UI for the current screen.
pub fn draw<A: GameApi>(frame: &mut Frame, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Body
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let help = match app.screen() {
        Screen::Start => {
            draw_start(frame, chunks[1], app);
            "Tab/Up/Down: Field | Enter: Submit | Esc: Quit"
        }
        Screen::Room => {
            draw_room(frame, chunks[1], app);
            "Enter: Add player | F2: Start game | Esc: Back"
        }
        Screen::Game => {
            draw_game(frame, chunks[1], app);
            "Arrows: Move | Enter/Space or 1-9: Play | R: Recheck | Esc: Back | Q: Quit"
        }
    };

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn input<'a>(title: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    )
}

fn draw_start<A: GameApi>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let area = center_rect(area, 60, 9);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3); 3])
        .split(area);

    for (i, (field, value)) in app.start_inputs().into_iter().enumerate() {
        let title = match field {
            StartField::Name => "Player name to create",
            StartField::PlayerId => "Player ID to create a room",
            StartField::RoomId => "Room ID to join",
        };
        frame.render_widget(input(title, value, app.focus() == field), rows[i]);
    }
}

fn draw_room<A: GameApi>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let area = center_rect(area, 60, 5);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(3)])
        .split(area);

    let label = Paragraph::new(format!("Room: {}", app.open_room_id()))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(label, rows[0]);
    frame.render_widget(
        input("Second player ID", app.second_player_id(), true),
        rows[1],
    );
}

fn draw_game<A: GameApi>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let Some(game) = app.game() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let heading = match game.phase() {
        Phase::InPlay => format!("Current player: {}", game.active_player()),
        Phase::Draw => "Game over: draw".to_string(),
        Phase::Won(winner) => format!("Game over: {} won", winner.name()),
    };
    let heading = Paragraph::new(heading).alignment(Alignment::Center);
    frame.render_widget(heading, rows[0]);

    let cursor = (!game.phase().is_over()).then_some(app.cursor());
    draw_board(frame, rows[1], game.board(), cursor);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 1..=3u8 {
        let slot = (row as usize - 1) * 2;
        draw_row(frame, rows[slot], board, cursor, row);
        if row < 3 {
            draw_separator(frame, rows[slot + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>, row: u8) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 1..=3u8 {
        let slot = (col as usize - 1) * 2;
        if let Ok(pos) = Position::new(row, col) {
            draw_cell(frame, cols[slot], board, cursor, pos);
        }
        if col < 3 {
            draw_separator_vertical(frame, cols[slot + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Position>, pos: Position) {
    let (symbol, base_style) = match board.get(pos) {
        Cell::Empty => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::X => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::O => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if cursor == Some(pos) {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    // Vertically center within the 3-line cell.
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(symbol, style)),
        Line::from(""),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
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
