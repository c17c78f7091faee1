// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cell::Cell;
use std::rc::Rc;

use crate::descriptor::{DetailView, ResourceDescriptor, RowView};
use crate::filter::{FilterTerm, filter_indices};
use crate::record::Record;
use crate::resource::ResourceKind;

pub type LoadId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Error(String),
    Ready,
}

/// What happened to a completed load once it reached its screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadApplied {
    Ready { records: usize },
    Failed,
    Stale,
}

/// Shared flag suppressing background list interaction while an overlay is up.
#[derive(Debug, Clone, Default)]
pub struct InteractionGate(Rc<Cell<bool>>);

impl InteractionGate {
    pub fn is_suppressed(&self) -> bool {
        self.0.get()
    }

    pub fn acquire(&self) -> InteractionLock {
        let previous = self.0.replace(true);
        InteractionLock {
            gate: Rc::clone(&self.0),
            previous,
        }
    }
}

/// Restores the gate to its prior value when dropped.
#[derive(Debug)]
pub struct InteractionLock {
    gate: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for InteractionLock {
    fn drop(&mut self) {
        self.gate.set(self.previous);
    }
}

#[derive(Debug)]
pub struct Selection {
    record: Record,
    position: usize,
    _lock: InteractionLock,
}

impl Selection {
    pub fn record(&self) -> &Record {
        &self.record
    }
}

/// Where a dismiss gesture landed relative to the detail surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTarget {
    Surface,
    Backdrop,
}

/// State for one mounted resource screen.
#[derive(Debug)]
pub struct Screen {
    kind: ResourceKind,
    load_state: LoadState,
    active_load: Option<LoadId>,
    records: Vec<Record>,
    term: FilterTerm,
    view: Vec<usize>,
    cursor: usize,
    selection: Option<Selection>,
    gate: InteractionGate,
}

impl Screen {
    pub fn mount(kind: ResourceKind, gate: InteractionGate) -> Self {
        Self {
            kind,
            load_state: LoadState::Loading,
            active_load: None,
            records: Vec::new(),
            term: FilterTerm::default(),
            view: Vec::new(),
            cursor: 0,
            selection: None,
            gate,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        self.kind.descriptor()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Starts tracking a new load; any earlier one becomes stale.
    pub fn begin_load(&mut self, load_id: LoadId) {
        self.load_state = LoadState::Loading;
        self.active_load = Some(load_id);
    }

    /// Applies a finished load. The error payload is diagnostic only; the
    /// screen shows the resource's static message instead.
    pub fn finish_load<E>(
        &mut self,
        load_id: LoadId,
        outcome: Result<Vec<Record>, E>,
    ) -> LoadApplied {
        if self.active_load != Some(load_id) {
            return LoadApplied::Stale;
        }
        self.active_load = None;

        match outcome {
            Ok(records) => {
                self.records = records;
                self.refresh_view();
                self.load_state = LoadState::Ready;
                LoadApplied::Ready {
                    records: self.records.len(),
                }
            }
            Err(_) => {
                self.load_state = LoadState::Error(self.descriptor().error_message.to_owned());
                LoadApplied::Failed
            }
        }
    }

    pub fn term(&self) -> &FilterTerm {
        &self.term
    }

    pub fn set_term(&mut self, raw: impl Into<String>) {
        self.term = FilterTerm::new(raw);
        self.refresh_view();
    }

    pub fn push_term_char(&mut self, ch: char) {
        self.term.push(ch);
        self.refresh_view();
    }

    pub fn pop_term_char(&mut self) {
        if self.term.pop().is_some() {
            self.refresh_view();
        }
    }

    pub fn clear_term(&mut self) {
        self.term.clear();
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.view = filter_indices(self.descriptor(), &self.records, &self.term);
        self.cursor = self.cursor.min(self.view.len().saturating_sub(1));
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    /// Filtered records with their position in the view.
    pub fn view(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.view
            .iter()
            .enumerate()
            .map(|(position, index)| (position, &self.records[*index]))
    }

    pub fn view_record(&self, position: usize) -> Option<&Record> {
        self.view
            .get(position)
            .and_then(|index| self.records.get(*index))
    }

    pub fn rows(&self) -> Vec<RowView> {
        let descriptor = self.descriptor();
        self.view()
            .map(|(position, record)| descriptor.row(record, position))
            .collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the row cursor. Ignored while an overlay holds the gate.
    pub fn move_cursor(&mut self, delta: isize) -> bool {
        if self.gate.is_suppressed() || self.view.is_empty() {
            return false;
        }
        let last = self.view.len() - 1;
        let next = self.cursor.saturating_add_signed(delta).min(last);
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    pub fn jump_cursor(&mut self, to_end: bool) -> bool {
        if self.gate.is_suppressed() || self.view.is_empty() {
            return false;
        }
        self.cursor = if to_end { self.view.len() - 1 } else { 0 };
        true
    }

    /// Opens the detail view for a record. A second open replaces the first.
    pub fn open(&mut self, record: Record, position: usize) {
        match self.selection.as_mut() {
            Some(selection) => {
                selection.record = record;
                selection.position = position;
            }
            None => {
                self.selection = Some(Selection {
                    record,
                    position,
                    _lock: self.gate.acquire(),
                });
            }
        }
    }

    pub fn open_at_cursor(&mut self) -> bool {
        let Some(record) = self.view_record(self.cursor).cloned() else {
            return false;
        };
        self.open(record, self.cursor);
        true
    }

    pub fn close(&mut self) {
        self.selection = None;
    }

    pub fn dismiss(&mut self, target: DismissTarget) -> bool {
        if target == DismissTarget::Backdrop && self.selection.is_some() {
            self.close();
            return true;
        }
        false
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn detail(&self) -> Option<DetailView> {
        self.selection
            .as_ref()
            .map(|selection| self.descriptor().detail(&selection.record, selection.position))
    }
}
