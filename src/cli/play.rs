//! Play command implementation - Interactive TUI.

// Board coordinates are small; casts to terminal units cannot truncate
#![allow(clippy::cast_possible_truncation)]

use super::{CliError, GameArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::{HashMap, VecDeque};
use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tactica::game::HealthLevel;
use tactica::render::glyph;
use tactica::{
    Announcement, BoardView, CursorHint, GameController, HighlightColor, JsonFileStore, Placement,
    Side, Stats,
};
use tracing::info;

/// How long a damage number stays on screen.
const EFFECT_DURATION: Duration = Duration::from_millis(700);

/// Messages kept in the side panel.
const MESSAGE_LOG: usize = 8;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the TUI fails.
pub(crate) fn execute(game: GameArgs, save: PathBuf) -> Result<(), CliError> {
    let config = game.config()?;
    let seed = game.seed();
    info!(seed, save = %save.display(), "starting interactive game");

    let view = TerminalView::new();
    let store = JsonFileStore::new(save);
    let mut controller =
        GameController::new(config, view, store, ChaCha8Rng::seed_from_u64(seed))?;
    if controller.init() {
        controller.view_mut().push_message("Saved game restored".to_string());
    }

    run_tui(App::new(controller))
}

/// Board view that records what the controller asks for and draws it each frame.
#[derive(Debug)]
struct TerminalView {
    placements: Vec<Placement>,
    highlights: HashMap<usize, HighlightColor>,
    effect: Option<(usize, f64, Instant)>,
    cursor: CursorHint,
    stats: Option<Stats>,
    messages: VecDeque<String>,
}

impl TerminalView {
    fn new() -> Self {
        Self {
            placements: Vec::new(),
            highlights: HashMap::new(),
            effect: None,
            cursor: CursorHint::Idle,
            stats: None,
            messages: VecDeque::with_capacity(MESSAGE_LOG),
        }
    }

    fn push_message(&mut self, message: String) {
        if self.messages.len() == MESSAGE_LOG {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    fn active_effect(&self) -> Option<(usize, f64)> {
        self.effect
            .filter(|(_, _, shown)| shown.elapsed() < EFFECT_DURATION)
            .map(|(cell, value, _)| (cell, value))
    }
}

impl BoardView for TerminalView {
    fn render(&mut self, placements: &[Placement]) {
        self.placements = placements.to_vec();
    }

    fn highlight_cell(&mut self, cell: usize, color: HighlightColor) {
        self.highlights.insert(cell, color);
    }

    fn clear_highlight(&mut self, cell: usize) {
        self.highlights.remove(&cell);
    }

    fn show_transient_effect(&mut self, cell: usize, value: f64) {
        self.effect = Some((cell, value, Instant::now()));
        self.push_message(format!("-{value:.1} on cell {cell}"));
    }

    fn set_cursor(&mut self, hint: CursorHint) {
        self.cursor = hint;
    }

    fn show_stats(&mut self, stats: Stats) {
        self.stats = Some(stats);
    }

    fn announce(&mut self, announcement: &Announcement) {
        self.push_message(announcement.to_string());
    }
}

type Controller = GameController<TerminalView, JsonFileStore, ChaCha8Rng>;

/// App state for the TUI.
struct App {
    controller: Controller,
    cursor: usize,
    info: Option<String>,
}

impl App {
    fn new(controller: Controller) -> Self {
        let mut app = Self {
            controller,
            cursor: 0,
            info: None,
        };
        app.hover();
        app
    }

    fn board_size(&self) -> usize {
        self.controller.state().board_size
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let size = self.board_size();
        let row = (self.cursor / size).saturating_add_signed(d_row).min(size - 1);
        let col = (self.cursor % size).saturating_add_signed(d_col).min(size - 1);
        let next = row * size + col;
        if next != self.cursor {
            self.controller.leave(self.cursor);
            self.cursor = next;
            self.hover();
        }
    }

    fn hover(&mut self) {
        self.info = self
            .controller
            .hover(self.cursor)
            .ok()
            .and_then(|preview| preview.info);
    }

    fn activate(&mut self) {
        // The move or attack preview on this cell is stale once the click lands.
        self.controller.leave(self.cursor);
        // Rejections are announced to the view by the controller.
        let _ = self.controller.apply_player_action(self.cursor);
        self.hover();
    }

    fn new_game(&mut self) {
        self.controller.new_game();
        self.clamp_cursor();
    }

    fn save(&mut self) {
        // Failures are announced to the view by the controller.
        let _ = self.controller.save_game();
    }

    fn load(&mut self) {
        let _ = self.controller.load_game();
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let size = self.board_size();
        self.cursor = self.cursor.min(size * size - 1);
        self.hover();
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(50)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1, 0),
                KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1, 0),
                KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0, -1),
                KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0, 1),
                KeyCode::Enter | KeyCode::Char(' ') => app.activate(),
                KeyCode::Char('n') => app.new_game(),
                KeyCode::Char('s') => app.save(),
                KeyCode::Char('o') => app.load(),
                _ => {}
            }
        }
    }

    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let board_width = (app.board_size() * 3 + 2) as u16;
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(20)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);
    render_side_panel(f, main_chunks[1], app);
    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let view = app.controller.view();
    let status = match view.stats {
        Some(stats) if stats.game_over => "GAME OVER",
        _ if view.cursor == CursorHint::Waiting => "COMPUTER",
        _ => "YOUR TURN",
    };
    let title = view.stats.map_or_else(
        || " Tactica ".to_string(),
        |stats| {
            format!(
                " Tactica | Level {} | Score {} | Best {} | {status} ",
                stats.level, stats.score, stats.high_score
            )
        },
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let view = app.controller.view();
    let size = app.board_size();
    let effect = view.active_effect();
    let units: HashMap<usize, &Placement> = view.placements.iter().map(|p| (p.cell, p)).collect();

    let mut lines: Vec<Line> = Vec::with_capacity(size);
    for row in 0..size {
        let mut spans = Vec::with_capacity(size);
        for col in 0..size {
            let cell = row * size + col;
            let (text, mut style) = match units.get(&cell) {
                Some(placement) => (
                    format!(" {} ", glyph(placement.unit.archetype)),
                    unit_style(placement),
                ),
                None => (" . ".to_string(), Style::default().fg(Color::DarkGray)),
            };

            if let Some(color) = view.highlights.get(&cell) {
                style = style.bg(highlight_color(*color));
            }
            if effect.is_some_and(|(target, _)| target == cell) {
                style = style.bg(Color::Magenta);
            }
            if cell == app.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));
    f.render_widget(board, area);
}

fn unit_style(placement: &Placement) -> Style {
    let color = match placement.unit.side() {
        Side::Player => Color::Cyan,
        Side::Computer => Color::Red,
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    match placement.unit.health_level() {
        HealthLevel::Critical => style.add_modifier(Modifier::SLOW_BLINK),
        HealthLevel::Normal => style.add_modifier(Modifier::DIM),
        HealthLevel::High => style,
    }
}

const fn highlight_color(color: HighlightColor) -> Color {
    match color {
        HighlightColor::Selected => Color::Yellow,
        HighlightColor::Move => Color::Green,
        HighlightColor::Attack => Color::LightRed,
    }
}

fn render_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let view = app.controller.view();
    let size = app.board_size();
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        format!("Cursor ({}, {})", app.cursor / size, app.cursor % size),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(cursor_label(view.cursor)));
    if let Some(info) = &app.info {
        lines.push(Line::from(info.clone()));
    }
    if let Some((cell, value)) = view.active_effect() {
        lines.push(Line::from(Span::styled(
            format!("-{value:.1} at cell {cell}"),
            Style::default().fg(Color::Magenta),
        )));
    }

    lines.push(Line::from(""));
    for message in view.messages.iter().rev() {
        lines.push(Line::from(message.clone()));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Info "))
        .wrap(Wrap { trim: false });

    f.render_widget(panel, area);
}

const fn cursor_label(hint: CursorHint) -> &'static str {
    match hint {
        CursorHint::Idle => "",
        CursorHint::AwaitingMove => "move here",
        CursorHint::AwaitingAttack => "attack",
        CursorHint::Blocked => "out of reach",
        CursorHint::Waiting => "computer is thinking",
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let game_over = app.controller.view().stats.is_some_and(|s| s.game_over);
    let controls = if game_over {
        " [q] Quit  [n] New game  [o] Load "
    } else {
        " [q] Quit  [←↑↓→/hjkl] Cursor  [Enter/Space] Act  [n] New  [s] Save  [o] Load "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactica::{Archetype, BattlefieldState, GameConfig, Unit};
    use tempfile::TempDir;

    fn app_with(placements: Vec<Placement>, dir: &TempDir) -> App {
        let mut state = BattlefieldState::new(8);
        state.placements = placements;
        let controller = GameController::with_state(
            GameConfig::default(),
            state,
            TerminalView::new(),
            JsonFileStore::new(dir.path().join("save.json")),
            ChaCha8Rng::seed_from_u64(0),
        )
        .unwrap();
        App::new(controller)
    }

    #[test]
    fn test_move_clears_target_highlight() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(
            vec![
                Placement::new(Unit::new(Archetype::Bowman, 1), 0),
                Placement::new(Unit::new(Archetype::Vampire, 1), 63),
            ],
            &dir,
        );

        app.activate();
        app.move_cursor(0, 1);
        assert_eq!(
            app.controller.view().highlights.get(&1),
            Some(&HighlightColor::Move)
        );

        app.activate();
        assert!(app.controller.state().unit_at(1).is_some());
        assert_eq!(app.controller.view().highlights.get(&1), None);
        assert_eq!(app.controller.view().highlights.get(&0), None);
    }

    #[test]
    fn test_terminal_view_records_calls() {
        let mut view = TerminalView::new();
        view.render(&[Placement::new(Unit::new(Archetype::Bowman, 1), 3)]);
        view.highlight_cell(3, HighlightColor::Selected);
        view.show_transient_effect(5, 15.0);

        assert_eq!(view.placements.len(), 1);
        assert_eq!(view.highlights.get(&3), Some(&HighlightColor::Selected));
        assert_eq!(view.active_effect(), Some((5, 15.0)));

        view.clear_highlight(3);
        assert!(view.highlights.is_empty());
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut view = TerminalView::new();
        for i in 0..20 {
            view.push_message(format!("message {i}"));
        }
        assert_eq!(view.messages.len(), MESSAGE_LOG);
        assert_eq!(view.messages.back().map(String::as_str), Some("message 19"));
    }
}
