// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::resource::{ResourceKind, Route};
use crate::screen::LoadId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Nav,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub route: Route,
    pub mode: InputMode,
    pub status_line: Option<String>,
    pub next_load_id: LoadId,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Screen(Route::DEFAULT),
            mode: InputMode::Nav,
            status_line: None,
            next_load_id: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextScreen,
    PrevScreen,
    Navigate(Route),
    EnterSearch,
    ExitSearch,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    RouteChanged(Route),
    ModeChanged(InputMode),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_route(route: Route) -> Self {
        Self {
            route,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextScreen => self.rotate_screen(1),
            AppCommand::PrevScreen => self.rotate_screen(-1),
            AppCommand::Navigate(route) => {
                self.route = route;
                self.mode = InputMode::Nav;
                vec![AppEvent::RouteChanged(self.route.clone())]
            }
            AppCommand::EnterSearch => {
                self.mode = InputMode::Search;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::ExitSearch => {
                self.mode = InputMode::Nav;
                vec![AppEvent::ModeChanged(self.mode)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Hands out the id for the next load; ids are never reused.
    pub fn next_load_id(&mut self) -> LoadId {
        self.next_load_id = self.next_load_id.saturating_add(1);
        self.next_load_id
    }

    fn rotate_screen(&mut self, delta: isize) -> Vec<AppEvent> {
        let screens = ResourceKind::ALL;
        let next = match self.route.resource() {
            Some(current) => {
                let len = screens.len() as isize;
                (current.position() as isize + delta).rem_euclid(len) as usize
            }
            None => 0,
        };
        self.route = Route::Screen(screens[next]);
        self.mode = InputMode::Nav;
        vec![AppEvent::RouteChanged(self.route.clone())]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
