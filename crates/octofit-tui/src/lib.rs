// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use octofit_app::{
    AppCommand, AppState, DetailView, DismissTarget, InputMode, InteractionGate, LoadApplied,
    LoadId, LoadState, Record, ResourceKind, Route, Screen,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const PAGE_ROWS: isize = 10;
const DETAIL_WIDTH_PERCENT: u16 = 70;
const DETAIL_HEIGHT_PERCENT: u16 = 50;
const NOT_FOUND_TEXT: &str = "That page was not found.";

/// Data source behind the dashboard. Loads run off the UI thread when the
/// implementation overrides `spawn_load`; the default runs inline.
pub trait AppRuntime {
    /// Fetches one resource collection. The error string is diagnostic only.
    fn load_collection(
        &mut self,
        load_id: LoadId,
        kind: ResourceKind,
    ) -> std::result::Result<Vec<Record>, String>;

    fn spawn_load(
        &mut self,
        load_id: LoadId,
        kind: ResourceKind,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let outcome = self.load_collection(load_id, kind);
        tx.send(InternalEvent::LoadFinished {
            load_id,
            kind,
            outcome,
        })
        .map_err(|_| anyhow::anyhow!("load event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    LoadFinished {
        load_id: LoadId,
        kind: ResourceKind,
        outcome: std::result::Result<Vec<Record>, String>,
    },
}

#[derive(Debug, Default)]
struct ViewData {
    screen: Option<Screen>,
    gate: InteractionGate,
    help_visible: bool,
    status_token: u64,
    frame_area: Rect,
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    mount_route(state, runtime, &mut view_data, &internal_tx);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        match terminal.draw(|frame| render(frame, state, &view_data)) {
            Ok(completed) => view_data.frame_area = completed.area,
            Err(error) => {
                result = Err(error).context("draw frame");
                break;
            }
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(Event::Mouse(mouse)) => handle_mouse_event(&mut view_data, mouse),
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    view_data.screen = None;
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        terminal::LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("leave alternate screen")?;
    result
}

/// Unmounts the current screen and mounts the one the route names, which
/// kicks off its load.
fn mount_route<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    view_data.screen = None;
    let Some(kind) = state.route.resource() else {
        tracing::warn!(path = %state.route.path(), "route not found");
        return;
    };
    tracing::debug!(resource = kind.path_segment(), "mounting screen");
    view_data.screen = Some(Screen::mount(kind, view_data.gate.clone()));
    start_load(state, runtime, view_data, internal_tx);
}

fn start_load<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let load_id = state.next_load_id();
    let Some(screen) = view_data.screen.as_mut() else {
        return;
    };
    let kind = screen.kind();
    screen.begin_load(load_id);

    if let Err(error) = runtime.spawn_load(load_id, kind, internal_tx.clone()) {
        tracing::error!(
            resource = kind.path_segment(),
            load_id,
            error = %format!("{error:#}"),
            "could not start load"
        );
        screen.finish_load(load_id, Err(error));
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::LoadFinished {
                load_id,
                kind,
                outcome,
            } => handle_load_finished(state, view_data, tx, load_id, kind, outcome),
        }
    }
}

fn handle_load_finished(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    load_id: LoadId,
    kind: ResourceKind,
    outcome: std::result::Result<Vec<Record>, String>,
) {
    let applied = match view_data.screen.as_mut() {
        Some(screen) if screen.kind() == kind => screen.finish_load(load_id, outcome),
        _ => LoadApplied::Stale,
    };

    match applied {
        LoadApplied::Ready { records } => {
            emit_status(
                state,
                view_data,
                tx,
                format!("{} loaded ({records})", kind.path_segment()),
            );
        }
        LoadApplied::Failed => {
            emit_status(state, view_data, tx, "load failed; press r to retry");
        }
        LoadApplied::Stale => {
            tracing::debug!(
                resource = kind.path_segment(),
                load_id,
                "discarding superseded load"
            );
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn navigate<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    state.dispatch(command);
    mount_route(state, runtime, view_data, internal_tx);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            view_data.help_visible = false;
        }
        return false;
    }

    if let Some(screen) = view_data.screen.as_mut()
        && screen.selection().is_some()
    {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q')
        ) {
            screen.close();
        }
        return false;
    }

    if state.mode == InputMode::Search {
        handle_search_key(state, view_data, key);
        return false;
    }

    match key.code {
        KeyCode::Tab => navigate(state, runtime, view_data, internal_tx, AppCommand::NextScreen),
        KeyCode::BackTab => {
            navigate(state, runtime, view_data, internal_tx, AppCommand::PrevScreen);
        }
        KeyCode::Char(digit @ '1'..='5') => {
            let index = digit as usize - '1' as usize;
            let route = Route::Screen(ResourceKind::ALL[index]);
            navigate(
                state,
                runtime,
                view_data,
                internal_tx,
                AppCommand::Navigate(route),
            );
        }
        KeyCode::Char('r') => {
            emit_status(state, view_data, internal_tx, "reloading");
            mount_route(state, runtime, view_data, internal_tx);
        }
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('/') if view_data.screen.is_some() => {
            state.dispatch(AppCommand::EnterSearch);
        }
        KeyCode::Char('x') => {
            if let Some(screen) = view_data.screen.as_mut() {
                screen.clear_term();
            }
        }
        KeyCode::Enter => {
            if let Some(screen) = view_data.screen.as_mut()
                && !screen.open_at_cursor()
            {
                emit_status(state, view_data, internal_tx, "nothing to open");
            }
        }
        code => {
            if let Some(screen) = view_data.screen.as_mut() {
                move_cursor_for_key(screen, code);
            }
        }
    }
    false
}

fn move_cursor_for_key(screen: &mut Screen, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('j') | KeyCode::Down => screen.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => screen.move_cursor(-1),
        KeyCode::PageDown => screen.move_cursor(PAGE_ROWS),
        KeyCode::PageUp => screen.move_cursor(-PAGE_ROWS),
        KeyCode::Char('g') | KeyCode::Home => screen.jump_cursor(false),
        KeyCode::Char('G') | KeyCode::End => screen.jump_cursor(true),
        _ => false,
    }
}

fn handle_search_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    let Some(screen) = view_data.screen.as_mut() else {
        state.dispatch(AppCommand::ExitSearch);
        return;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.dispatch(AppCommand::ExitSearch);
        }
        KeyCode::Backspace => screen.pop_term_char(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            screen.clear_term();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            screen.push_term_char(ch);
        }
        _ => {}
    }
}

fn handle_mouse_event(view_data: &mut ViewData, mouse: MouseEvent) {
    let Some(screen) = view_data.screen.as_mut() else {
        return;
    };
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if screen.selection().is_some() => {
            let surface = detail_area(view_data.frame_area);
            let target = if surface.contains(Position::new(mouse.column, mouse.row)) {
                DismissTarget::Surface
            } else {
                DismissTarget::Backdrop
            };
            screen.dismiss(target);
        }
        MouseEventKind::ScrollDown => {
            screen.move_cursor(1);
        }
        MouseEventKind::ScrollUp => {
            screen.move_cursor(-1);
        }
        _ => {}
    }
}

fn detail_area(frame: Rect) -> Rect {
    centered_rect(DETAIL_WIDTH_PERCENT, DETAIL_HEIGHT_PERCENT, frame)
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let tabs = Tabs::new(
        ResourceKind::ALL
            .iter()
            .enumerate()
            .map(|(index, kind)| format!("{} {}", index + 1, kind.label()))
            .collect::<Vec<String>>(),
    )
    .block(Block::default().title("OctoFit Tracker").borders(Borders::ALL))
    .style(Style::default().fg(Color::White))
    .highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let tabs = match state.route.resource() {
        Some(kind) => tabs.select(kind.position()),
        None => tabs.select(None),
    };
    frame.render_widget(tabs, layout[0]);

    let header = Paragraph::new(header_text(state, view_data.screen.as_ref()))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, layout[1]);

    match view_data.screen.as_ref() {
        Some(screen) => render_screen(frame, layout[2], screen),
        None => {
            let body = Paragraph::new(NOT_FOUND_TEXT)
                .block(Block::default().borders(Borders::ALL).title("not found"));
            frame.render_widget(body, layout[2]);
        }
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[3]);

    if let Some(detail) = view_data.screen.as_ref().and_then(Screen::detail) {
        let area = detail_area(frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(detail_overlay_text(&detail))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(detail.title.clone())
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(overlay, area);
    }

    if view_data.help_visible {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_screen(frame: &mut ratatui::Frame<'_>, area: Rect, screen: &Screen) {
    let descriptor = screen.descriptor();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(descriptor.kind.label());

    if let Some(message) = body_message(screen) {
        let style = match screen.load_state() {
            LoadState::Error(_) => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::DarkGray),
        };
        frame.render_widget(Paragraph::new(message).style(style).block(block), area);
        return;
    }

    let header = Row::new(descriptor.column_labels().map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = screen.rows().into_iter().map(|row| {
        let height = if row.subtitle.is_some() { 2 } else { 1 };
        let mut cells = row.cells.into_iter();
        let first = cells.next().unwrap_or_default();
        let mut lead = vec![Line::from(first)];
        if let Some(subtitle) = row.subtitle {
            lead.push(Line::styled(subtitle, Style::default().fg(Color::DarkGray)));
        }
        let mut all = vec![Cell::from(Text::from(lead))];
        all.extend(cells.map(Cell::from));
        Row::new(all).height(height)
    });

    let widths = vec![Constraint::Min(8); descriptor.columns.len().max(1)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray));
    let mut table_state = TableState::default().with_selected(Some(screen.cursor()));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Text shown instead of the table: loading, error, or empty view.
fn body_message(screen: &Screen) -> Option<String> {
    let descriptor = screen.descriptor();
    match screen.load_state() {
        LoadState::Loading => Some(descriptor.loading_text.to_owned()),
        LoadState::Error(message) => Some(message.clone()),
        LoadState::Ready if screen.view_len() == 0 => Some(descriptor.empty_text.to_owned()),
        LoadState::Ready => None,
    }
}

fn header_text(state: &AppState, screen: Option<&Screen>) -> String {
    let Some(screen) = screen else {
        return format!("route {}", state.route.path());
    };
    let descriptor = screen.descriptor();
    let term = screen.term().raw();
    let search = match (state.mode, screen.term().is_active()) {
        (InputMode::Search, _) => format!("search: {term}▏"),
        (InputMode::Nav, false) => format!("search: ({}, press /)", descriptor.search_placeholder),
        (InputMode::Nav, true) => format!("search: {term}  (x clears)"),
    };
    format!("{}\n{search}", descriptor.blurb)
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    match view_data.screen.as_ref() {
        Some(screen) if screen.selection().is_some() => "esc close".to_owned(),
        Some(_) if state.mode == InputMode::Search => "type to filter  enter/esc done".to_owned(),
        Some(screen) if screen.is_loading() => "loading  tab next  ctrl+q quit".to_owned(),
        Some(screen) => format!(
            "{}/{}  enter details  / search  r reload  tab next  ? help",
            screen.view_len(),
            screen.records().len()
        ),
        None => "tab or 1-5 to pick a screen  ctrl+q quit".to_owned(),
    }
}

fn detail_overlay_text(detail: &DetailView) -> String {
    let width = detail
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines = detail
        .fields
        .iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect::<Vec<String>>();
    lines.push(String::new());
    lines.push("esc close".to_owned());
    lines.join("\n")
}

fn help_overlay_text() -> String {
    [
        "tab / shift+tab   next / previous screen",
        "1-5               jump to screen",
        "j k ↑ ↓           move",
        "g G pgup pgdn     jump",
        "/                 search",
        "x                 clear search",
        "enter             details",
        "esc               close details",
        "r                 reload",
        "?                 toggle help",
        "ctrl+q            quit",
    ]
    .join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, InternalEvent, ViewData, body_message, detail_area, detail_overlay_text,
        handle_key_event, handle_mouse_event, header_text, mount_route, process_internal_events,
        status_text,
    };
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use octofit_app::{
        AppState, InputMode, LoadId, LoadState, Record, ResourceKind, Route,
    };
    use octofit_testkit::sample_records;
    use ratatui::layout::Rect;
    use std::sync::mpsc::{self, Receiver, Sender};

    #[derive(Debug, Default)]
    struct TestRuntime {
        fail_with: Option<String>,
        loads: Vec<(LoadId, ResourceKind)>,
        deferred: bool,
    }

    impl AppRuntime for TestRuntime {
        fn load_collection(
            &mut self,
            load_id: LoadId,
            kind: ResourceKind,
        ) -> Result<Vec<Record>, String> {
            self.loads.push((load_id, kind));
            match &self.fail_with {
                Some(error) => Err(error.clone()),
                None => Ok(sample_records(kind)),
            }
        }

        fn spawn_load(
            &mut self,
            load_id: LoadId,
            kind: ResourceKind,
            tx: Sender<InternalEvent>,
        ) -> anyhow::Result<()> {
            if self.deferred {
                self.loads.push((load_id, kind));
                return Ok(());
            }
            let outcome = self.load_collection(load_id, kind);
            tx.send(InternalEvent::LoadFinished {
                load_id,
                kind,
                outcome,
            })?;
            Ok(())
        }
    }

    struct Harness {
        state: AppState,
        runtime: TestRuntime,
        view_data: ViewData,
        tx: Sender<InternalEvent>,
        rx: Receiver<InternalEvent>,
    }

    impl Harness {
        fn mounted(route: &str, runtime: TestRuntime) -> Self {
            let (tx, rx) = mpsc::channel();
            let mut harness = Self {
                state: AppState::with_route(Route::parse(route)),
                runtime,
                view_data: ViewData {
                    frame_area: Rect::new(0, 0, 100, 40),
                    ..ViewData::default()
                },
                tx,
                rx,
            };
            mount_route(
                &mut harness.state,
                &mut harness.runtime,
                &mut harness.view_data,
                &harness.tx,
            );
            harness.pump();
            harness
        }

        fn pump(&mut self) {
            process_internal_events(&mut self.state, &mut self.view_data, &self.tx, &self.rx);
        }

        fn key(&mut self, code: KeyCode) -> bool {
            self.key_with(code, KeyModifiers::NONE)
        }

        fn key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
            let quit = handle_key_event(
                &mut self.state,
                &mut self.runtime,
                &mut self.view_data,
                &self.tx,
                KeyEvent::new(code, modifiers),
            );
            self.pump();
            quit
        }

        fn click(&mut self, column: u16, row: u16) {
            handle_mouse_event(
                &mut self.view_data,
                MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    modifiers: KeyModifiers::NONE,
                },
            );
        }

        fn screen(&self) -> &octofit_app::Screen {
            self.view_data.screen.as_ref().expect("screen should be mounted")
        }
    }

    #[test]
    fn mounting_a_screen_loads_its_collection() {
        let harness = Harness::mounted("/teams", TestRuntime::default());
        assert_eq!(harness.runtime.loads, vec![(1, ResourceKind::Teams)]);
        assert_eq!(harness.screen().load_state(), &LoadState::Ready);
        assert_eq!(harness.screen().records().len(), 3);
        assert_eq!(harness.state.status_line.as_deref(), Some("teams loaded (3)"));
    }

    #[test]
    fn failed_load_shows_resource_message_only() {
        let harness = Harness::mounted(
            "/teams",
            TestRuntime {
                fail_with: Some("server returned 500 for http://x/api/teams/".to_owned()),
                ..TestRuntime::default()
            },
        );
        let message = body_message(harness.screen()).expect("error message");
        assert_eq!(message, "Unable to load teams data.");
        assert!(!message.contains("500"));
    }

    #[test]
    fn tab_switch_remounts_and_reloads() {
        let mut harness = Harness::mounted("/", TestRuntime::default());
        assert_eq!(harness.screen().kind(), ResourceKind::Activities);

        harness.key(KeyCode::Tab);
        assert_eq!(harness.screen().kind(), ResourceKind::Leaderboard);
        harness.key(KeyCode::Char('5'));
        assert_eq!(harness.screen().kind(), ResourceKind::Workouts);
        harness.key(KeyCode::BackTab);
        assert_eq!(harness.screen().kind(), ResourceKind::Users);
        assert_eq!(harness.runtime.loads.len(), 4);
    }

    #[test]
    fn late_response_from_previous_screen_is_ignored() {
        let mut harness = Harness::mounted(
            "/teams",
            TestRuntime {
                deferred: true,
                ..TestRuntime::default()
            },
        );
        harness.key(KeyCode::Char('r'));
        let (stale_id, _) = harness.runtime.loads[0];

        harness
            .tx
            .send(InternalEvent::LoadFinished {
                load_id: stale_id,
                kind: ResourceKind::Teams,
                outcome: Ok(sample_records(ResourceKind::Teams)),
            })
            .expect("send");
        harness.pump();
        assert_eq!(harness.screen().load_state(), &LoadState::Loading);

        let (current_id, _) = harness.runtime.loads[1];
        harness
            .tx
            .send(InternalEvent::LoadFinished {
                load_id: current_id,
                kind: ResourceKind::Teams,
                outcome: Ok(Vec::new()),
            })
            .expect("send");
        harness.pump();
        assert_eq!(harness.screen().load_state(), &LoadState::Ready);
        assert_eq!(
            body_message(harness.screen()).as_deref(),
            Some("No teams match your filters.")
        );
    }

    #[test]
    fn search_mode_edits_the_filter_term() {
        let mut harness = Harness::mounted("/teams", TestRuntime::default());
        harness.key(KeyCode::Char('/'));
        assert_eq!(harness.state.mode, InputMode::Search);

        for ch in "fal".chars() {
            harness.key(KeyCode::Char(ch));
        }
        assert_eq!(harness.screen().term().raw(), "fal");
        assert_eq!(harness.screen().view_len(), 1);

        harness.key(KeyCode::Backspace);
        assert_eq!(harness.screen().term().raw(), "fa");

        harness.key(KeyCode::Enter);
        assert_eq!(harness.state.mode, InputMode::Nav);
        harness.key(KeyCode::Char('x'));
        assert_eq!(harness.screen().view_len(), 3);
    }

    #[test]
    fn enter_opens_detail_and_esc_closes_it() {
        let mut harness = Harness::mounted("/teams", TestRuntime::default());
        harness.key(KeyCode::Char('j'));
        harness.key(KeyCode::Char('j'));
        harness.key(KeyCode::Enter);

        let detail = harness.screen().detail().expect("detail open");
        assert_eq!(detail.title, "Falcons");
        assert_eq!(detail.value("Coach"), Some("Jo"));
        assert_eq!(detail.value("Members"), Some("0"));
        assert!(harness.view_data.gate.is_suppressed());

        harness.key(KeyCode::Char('k'));
        assert_eq!(harness.screen().cursor(), 2);

        harness.key(KeyCode::Esc);
        assert!(harness.screen().selection().is_none());
        assert!(!harness.view_data.gate.is_suppressed());
    }

    #[test]
    fn backdrop_click_closes_detail_but_surface_click_does_not() {
        let mut harness = Harness::mounted("/users", TestRuntime::default());
        harness.key(KeyCode::Enter);
        let surface = detail_area(harness.view_data.frame_area);

        harness.click(surface.x + 1, surface.y + 1);
        assert!(harness.screen().selection().is_some());

        harness.click(0, 0);
        assert!(harness.screen().selection().is_none());
    }

    #[test]
    fn switching_screens_with_detail_open_releases_the_gate() {
        let mut harness = Harness::mounted("/workouts", TestRuntime::default());
        harness.key(KeyCode::Enter);
        assert!(harness.view_data.gate.is_suppressed());

        harness.view_data.screen = None;
        assert!(!harness.view_data.gate.is_suppressed());
    }

    #[test]
    fn unknown_route_renders_not_found_and_tab_recovers() {
        let mut harness = Harness::mounted("/nutrition", TestRuntime::default());
        assert!(harness.view_data.screen.is_none());
        assert!(harness.runtime.loads.is_empty());
        assert_eq!(header_text(&harness.state, None), "route /nutrition");

        harness.key(KeyCode::Tab);
        assert_eq!(harness.screen().kind(), ResourceKind::Activities);
    }

    #[test]
    fn ctrl_q_quits() {
        let mut harness = Harness::mounted("/", TestRuntime::default());
        assert!(!harness.key(KeyCode::Char('q')));
        assert!(harness.key_with(KeyCode::Char('q'), KeyModifiers::CONTROL));
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut harness = Harness::mounted("/", TestRuntime::default());
        harness.key(KeyCode::Char('?'));
        assert!(harness.view_data.help_visible);
        harness.key(KeyCode::Tab);
        assert_eq!(harness.screen().kind(), ResourceKind::Activities);
        harness.key(KeyCode::Esc);
        assert!(!harness.view_data.help_visible);
    }

    #[test]
    fn overlay_text_aligns_labels() {
        let mut harness = Harness::mounted("/leaderboard", TestRuntime::default());
        harness.key(KeyCode::Enter);
        let detail = harness.screen().detail().expect("detail open");
        let text = detail_overlay_text(&detail);
        assert!(text.contains("Rank           1"));
        assert!(text.contains("Points         750"));
        assert!(text.contains("Last activity  2025-11-18"));
        assert!(text.ends_with("esc close"));
    }

    #[test]
    fn status_text_hints_follow_mode() {
        let mut harness = Harness::mounted("/", TestRuntime::default());
        harness.state.status_line = None;
        assert!(status_text(&harness.state, &harness.view_data).starts_with("4/4"));
        harness.key(KeyCode::Char('/'));
        assert_eq!(
            status_text(&harness.state, &harness.view_data),
            "type to filter  enter/esc done"
        );
    }

    #[test]
    fn pending_load_and_blank_term_show_hints() {
        let mut harness = Harness::mounted(
            "/teams",
            TestRuntime {
                deferred: true,
                ..TestRuntime::default()
            },
        );
        harness.state.status_line = None;
        assert_eq!(
            status_text(&harness.state, &harness.view_data),
            "loading  tab next  ctrl+q quit"
        );

        if let Some(screen) = harness.view_data.screen.as_mut() {
            screen.set_term("   ");
        }
        let header = header_text(&harness.state, harness.view_data.screen.as_ref());
        assert!(header.ends_with("press /)"), "unexpected header: {header}");
    }
}
