use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use soccer_pulse::config::Config;
use soccer_pulse::countdown::{self, CountdownBoard, CountdownState, TICK_PERIOD};
use soccer_pulse::feed;
use soccer_pulse::filter::{StatusFilter, status_filter_label};
use soccer_pulse::state::{AppState, Delta, Focus, apply_delta};

struct App {
    state: AppState,
    board: CountdownBoard,
    should_quit: bool,
    last_countdown_tick: Instant,
}

impl App {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            board: CountdownBoard::new(),
            should_quit: false,
            last_countdown_tick: Instant::now(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.focus == Focus::Search {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.state.focus = Focus::List,
                KeyCode::Backspace => self.state.pop_search_char(),
                KeyCode::Char(ch) => self.state.push_search_char(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.state.focus = Focus::Search,
            KeyCode::Char('a') => self.state.set_status_filter(StatusFilter::All),
            KeyCode::Char('l') => self.state.set_status_filter(StatusFilter::Live),
            KeyCode::Char('u') => self.state.set_status_filter(StatusFilter::Upcoming),
            KeyCode::Tab => self.state.cycle_status_filter(),
            KeyCode::Char('c') => self.state.clear_search(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn sync_cards(&mut self) {
        let now = Utc::now();
        self.board.sync(self.state.filtered_matches(), now);
        if self.last_countdown_tick.elapsed() >= TICK_PERIOD {
            self.board.tick(now);
            self.last_countdown_tick = Instant::now();
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::load();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    feed::spawn_loader(tx, config);

    let mut app = App::new();
    app.state.push_log("[INFO] Fetching scoreboard");
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.sync_cards();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_filters(frame, chunks[1], &app.state);
    render_cards(frame, chunks[2], app);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[4]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = format!(
        "SOCCER PULSE | {} | {}/{} matches",
        status_filter_label(state.status_filter).to_uppercase(),
        state.filtered.len(),
        state.matches.len()
    );
    let line1 = format!("  .-.  {}", title);
    let line2 = " /___\\".to_string();
    let line3 = "  |_|".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.focus {
        Focus::Search => "Type to search | Backspace Delete | Enter/Esc Done".to_string(),
        Focus::List => [
            "/ Search | c Clear",
            "a All | l Live | u Upcoming | Tab Cycle",
            "j/k/↑/↓ Move | ? Help | q Quit",
        ]
        .join(" | "),
    }
}

fn render_filters(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(7),
            Constraint::Length(8),
            Constraint::Length(12),
        ])
        .split(area);

    let search_style = if state.focus == Focus::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search_text = if state.search.is_empty() && state.focus != Focus::Search {
        "Search team or league...".to_string()
    } else if state.focus == Focus::Search {
        format!("{}_", state.search)
    } else {
        state.search.clone()
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(Block::default().title("Search").borders(Borders::ALL));
    frame.render_widget(search, cols[0]);

    let buttons = [StatusFilter::All, StatusFilter::Live, StatusFilter::Upcoming];
    for (filter, area) in buttons.into_iter().zip(cols.iter().skip(1)) {
        let style = if filter == state.status_filter {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let button = Paragraph::new(status_filter_label(filter))
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, *area);
    }
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App) {
    let filtered = app.state.filtered_matches();
    if filtered.is_empty() {
        let msg = if app.state.matches_loaded {
            "No matches for this filter"
        } else {
            "No matches yet"
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    const CARD_HEIGHT: u16 = 5;
    if area.height < CARD_HEIGHT {
        let empty = Paragraph::new("Match list needs more height")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let visible = (area.height / CARD_HEIGHT) as usize;
    let (start, end) = visible_range(app.state.selected, filtered.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let card_area = Rect {
            x: area.x,
            y: area.y + (i as u16) * CARD_HEIGHT,
            width: area.width,
            height: CARD_HEIGHT,
        };

        let m = filtered[idx];
        let selected = idx == app.state.selected;
        let border_style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let countdown_text = app.board.text(&m.id);
        let countdown_style = match app.board.card(&m.id).map(|card| card.state()) {
            Some(CountdownState::Live) => {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            }
            Some(CountdownState::Unknown) => Style::default().fg(Color::DarkGray),
            _ => Style::default().fg(Color::Cyan),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(m.home.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(" vs ", Style::default().fg(Color::DarkGray)),
                Span::styled(m.away.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(countdown::format_kickoff(m.start)),
            Line::from(Span::styled(countdown_text.to_string(), countdown_style)),
        ];

        let card = Paragraph::new(lines).block(
            Block::default()
                .title(m.league.clone())
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(card, card_area);
    }
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Soccer Pulse - Help",
        "",
        "Search:",
        "  /            Focus search",
        "  Enter / Esc  Leave search",
        "  c            Clear search",
        "",
        "Filter:",
        "  a            All matches",
        "  l            Live (kicked off)",
        "  u            Upcoming",
        "  Tab          Cycle filter",
        "",
        "  j/k or ↑/↓   Move",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
