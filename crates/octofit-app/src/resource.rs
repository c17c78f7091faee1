// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Activities,
    Leaderboard,
    Teams,
    Users,
    Workouts,
}

impl ResourceKind {
    pub const ALL: [Self; 5] = [
        Self::Activities,
        Self::Leaderboard,
        Self::Teams,
        Self::Users,
        Self::Workouts,
    ];

    /// Path segment under `/api/`.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Activities => "activities",
            Self::Leaderboard => "leaderboard",
            Self::Teams => "teams",
            Self::Users => "users",
            Self::Workouts => "workouts",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Activities => "Activities",
            Self::Leaderboard => "Leaderboard",
            Self::Teams => "Teams",
            Self::Users => "Users",
            Self::Workouts => "Workouts",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let lowered = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.path_segment() == lowered)
    }

    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Screen(ResourceKind),
    NotFound(String),
}

impl Route {
    pub const DEFAULT: ResourceKind = ResourceKind::Activities;

    /// Resolves a dashboard path. The root redirects to the default screen.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Self::Screen(Self::DEFAULT);
        }
        match ResourceKind::parse(trimmed) {
            Some(kind) => Self::Screen(kind),
            None => Self::NotFound(path.trim().to_owned()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Screen(kind) => format!("/{}", kind.path_segment()),
            Self::NotFound(path) => path.clone(),
        }
    }

    pub const fn resource(&self) -> Option<ResourceKind> {
        match self {
            Self::Screen(kind) => Some(*kind),
            Self::NotFound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ResourceKind, Route};

    #[test]
    fn root_redirects_to_activities() {
        assert_eq!(Route::parse("/"), Route::Screen(ResourceKind::Activities));
        assert_eq!(Route::parse(""), Route::Screen(ResourceKind::Activities));
    }

    #[test]
    fn resource_paths_resolve_with_or_without_slashes() {
        assert_eq!(Route::parse("/teams"), Route::Screen(ResourceKind::Teams));
        assert_eq!(Route::parse("/Users/"), Route::Screen(ResourceKind::Users));
        assert_eq!(
            Route::parse("leaderboard"),
            Route::Screen(ResourceKind::Leaderboard)
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(
            Route::parse("/nutrition"),
            Route::NotFound("/nutrition".to_owned())
        );
        assert_eq!(Route::parse("/teams/3").resource(), None);
    }

    #[test]
    fn route_path_round_trips_screens() {
        for kind in ResourceKind::ALL {
            assert_eq!(Route::parse(&Route::Screen(kind).path()), Route::Screen(kind));
        }
    }
}
