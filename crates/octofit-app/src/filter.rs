// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::descriptor::{ResourceDescriptor, matches_policy};
use crate::record::Record;

/// The search string a user typed, kept verbatim for editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterTerm {
    raw: String,
}

impl FilterTerm {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn push(&mut self, ch: char) {
        self.raw.push(ch);
    }

    pub fn pop(&mut self) -> Option<char> {
        self.raw.pop()
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Trimmed and case-folded; `None` when nothing would be filtered.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.to_lowercase())
    }

    pub fn is_active(&self) -> bool {
        self.needle().is_some()
    }
}

/// Positions of the records that match, in collection order.
pub fn filter_indices(
    descriptor: &ResourceDescriptor,
    records: &[Record],
    term: &FilterTerm,
) -> Vec<usize> {
    let Some(needle) = term.needle() else {
        return (0..records.len()).collect();
    };
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_policy(descriptor.filter, record, &needle))
        .map(|(index, _)| index)
        .collect()
}
