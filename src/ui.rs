//! Layout and drawing: tile board, sidebar (score, best, keys, notices), win prompt, game over.

use crate::game::{Ending, GameState, Phase};
use crate::grid::tile_value;
use crate::lang::Message;
use crate::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

/// Terminal cells per tile.
const TILE_WIDTH: u16 = 8;
const TILE_HEIGHT: u16 = 3;

const SIDEBAR_WIDTH: u16 = 34;

/// Glyph for an empty cell.
const EMPTY_GLYPH: &str = ".";

/// Board size in terminal cells, border included.
fn board_size(state: &GameState) -> (u16, u16) {
    let w = state.grid.width() as u16 * TILE_WIDTH;
    let h = state.grid.height() as u16 * TILE_HEIGHT;
    (w + 2, h + 2)
}

/// Text shown on a tile of `rank`.
pub fn tile_label(rank: u8) -> String {
    match tile_value(rank) {
        0 => EMPTY_GLYPH.to_string(),
        v => v.to_string(),
    }
}

/// Draw one frame: board and sidebar centred, then the win prompt or game-over popup if any.
pub fn draw(frame: &mut Frame, state: &GameState, theme: &Theme, hint: &[String], best: u64) {
    let area = frame.area();
    let (bw, bh) = board_size(state);
    let sidebar_h = sidebar_height(hint);
    let total_w = bw + SIDEBAR_WIDTH;
    let total_h = bh.max(sidebar_h);

    let horiz_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_w),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(total_h),
            Constraint::Fill(1),
        ])
        .split(horiz_chunks[1]);
    let active_area = vert_chunks[1];

    let (board_area, sidebar_area) = {
        let inner = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(bw), Constraint::Length(SIDEBAR_WIDTH)])
            .split(active_area);
        (inner[0], inner[1])
    };

    draw_board(frame, state, theme, board_area);
    draw_sidebar(frame, state, theme, sidebar_area, hint, best);

    match state.phase {
        Phase::Playing => {}
        Phase::WonPrompt => draw_won_prompt(frame, state, theme, area),
        Phase::Over(ending) => draw_game_over(frame, state, theme, area, ending, best),
    }
}

fn draw_board(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.frame()).bg(theme.tile(0).bg.color()))
        .title(Span::styled(
            " gravity 2048 ",
            Style::default().fg(theme.tile(state.grid.max_rank()).bg.color()),
        ));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    for row in 0..state.grid.height() {
        for col in 0..state.grid.width() {
            let rect = Rect {
                x: inner.x + col as u16 * TILE_WIDTH,
                y: inner.y + row as u16 * TILE_HEIGHT,
                width: TILE_WIDTH,
                height: TILE_HEIGHT,
            }
            .intersection(inner);
            if rect.is_empty() {
                continue;
            }
            let rank = state.grid.rank(row, col);
            let colors = theme.tile(rank);
            let mut style = Style::default()
                .bg(colors.bg.color())
                .fg(colors.label.color());
            if rank > 0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            let lines = vec![Line::from(""), Line::from(tile_label(rank)), Line::from("")];
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(style)
                .render(rect, frame.buffer_mut());
        }
    }
}

fn sidebar_height(hint: &[String]) -> u16 {
    // Stats box (4) + gap + keys box (3 + hint) + gap + status box (4).
    4 + 1 + (3 + hint.len() as u16) + 1 + 4
}

fn draw_sidebar(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    area: Rect,
    hint: &[String],
    best: u64,
) {
    let lang = state.language;
    let title_style = Style::default().fg(theme.tile(11).bg.color());
    let fg_style = Style::default().fg(theme.text());
    let border_style = Style::default().fg(theme.frame());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                       // score, best
            Constraint::Length(1),                       // gap
            Constraint::Length(3 + hint.len() as u16),   // key hint
            Constraint::Length(1),                       // gap
            Constraint::Length(4),                       // prompt / notice, quit hint
        ])
        .split(area);

    let stats_block = Block::default().borders(Borders::ALL).border_style(border_style);
    let stats_inner = stats_block.inner(chunks[0]);
    stats_block.render(chunks[0], frame.buffer_mut());
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{}: ", lang.text(Message::CurrentScore)), title_style),
            Span::styled(state.score().to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", lang.text(Message::BestScore)), title_style),
            Span::styled(best.max(state.score()).to_string(), fg_style),
        ]),
    ])
    .render(stats_inner, frame.buffer_mut());

    let keys_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", state.mode), title_style));
    let keys_inner = keys_block.inner(chunks[2]);
    keys_block.render(chunks[2], frame.buffer_mut());
    let mut key_lines = vec![Line::from(Span::styled(lang.text(Message::Use), title_style))];
    key_lines.extend(hint.iter().map(|l| Line::from(Span::styled(l.clone(), fg_style))));
    Paragraph::new(key_lines).render(keys_inner, frame.buffer_mut());

    let status_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            format!(" seed {} / move {} ", state.seed, state.moves),
            Style::default().fg(theme.frame()),
        ));
    let status_inner = status_block.inner(chunks[4]);
    status_block.render(chunks[4], frame.buffer_mut());
    let status = match state.notice {
        Some(msg) => Span::styled(
            lang.text(msg),
            Style::default().fg(Color::White).bg(Color::Red),
        ),
        None => Span::styled(lang.text(Message::SelectDirection), fg_style),
    };
    Paragraph::new(vec![
        Line::from(status),
        Line::from(Span::styled(lang.text(Message::QuitHint), Style::default().fg(theme.frame()))),
    ])
    .render(status_inner, frame.buffer_mut());
}

fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_won_prompt(frame: &mut Frame, state: &GameState, theme: &Theme, area: Rect) {
    let lang = state.language;
    let question = lang.text(Message::WonMsg);
    let popup = popup_rect(area, (question.chars().count() as u16 + 6).max(30), 7);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " 2048 ",
            Style::default().fg(Color::Black).bg(theme.tile(11).bg.color()),
        )),
        Line::from(""),
        Line::from(Span::styled(question, Style::default().fg(theme.text()))),
        Line::from(Span::styled(
            format!("[Y] {}    [Esc]", lang.text(Message::Yes)),
            Style::default().fg(theme.frame()),
        )),
    ];
    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.frame()).bg(theme.tile(0).label.color())),
        )
        .render(popup, frame.buffer_mut());
}

fn draw_game_over(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    area: Rect,
    ending: Ending,
    best: u64,
) {
    let lang = state.language;
    let popup = popup_rect(area, 34, 9);
    let mut lines: Vec<Line> = vec![Line::from("")];
    if ending == Ending::Lost {
        lines.push(Line::from(Span::styled(
            format!(" {} ", lang.text(Message::YouLost)),
            Style::default().fg(Color::White).bg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!("{}: {}", lang.text(Message::FinalScore), state.score()),
        Style::default().fg(theme.text()).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("{}: {}", lang.text(Message::BestScore), best.max(state.score())),
        Style::default().fg(theme.text()),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        lang.text(Message::PressAnyKey),
        Style::default().fg(theme.frame()),
    )));
    Clear.render(popup, frame.buffer_mut());
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.frame()).bg(theme.tile(0).label.color())),
        )
        .render(popup, frame.buffer_mut());
}
