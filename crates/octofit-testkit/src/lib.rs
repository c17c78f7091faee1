// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use octofit_app::{Record, ResourceKind};
use serde_json::{Value, json};

/// Response envelopes the backend is known to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Bare,
    Paginated,
    Single,
}

pub fn sample_items(kind: ResourceKind) -> Vec<Value> {
    match kind {
        ResourceKind::Activities => vec![
            json!({"id": 1, "user": "Spider-Man", "type": "Running", "name": "Morning Run",
                   "duration": 30, "calories": 300, "date": "2025-11-18", "intensity": "moderate"}),
            json!({"id": 2, "user": "Iron Man", "type": "Cycling", "title": "Harbor Loop",
                   "length": 45, "calories": 450, "performed_at": "2025-11-18T07:30:00Z"}),
            json!({"id": 3, "user": "Wonder Woman", "type": "Swimming", "duration": 60,
                   "calories": 600, "date": "2025-11-17", "notes": "Open water, calm"}),
            json!({"id": 4, "user": "Batman", "type": "Yoga", "name": "Night Flow",
                   "duration": 40, "calories": 200, "date": "2025-11-16",
                   "description": "Recovery session", "effort": "low"}),
        ],
        ResourceKind::Leaderboard => vec![
            json!({"id": 1, "team": "Marvel", "points": 750, "rank": 1,
                   "last_activity": "2025-11-18"}),
            json!({"id": 2, "team_name": "DC", "score": 800, "rank": 2}),
            json!({"id": 3, "user": "Spider-Man", "points": 0}),
        ],
        ResourceKind::Teams => vec![
            json!({"id": 1, "name": "Marvel", "description": "Marvel Superheroes",
                   "coach": "Nick Fury", "members": ["Spider-Man", "Iron Man"],
                   "tagline": "Excelsior"}),
            json!({"id": 2, "name": "DC", "description": "DC Superheroes", "members_count": 2}),
            json!({"id": 3, "name": "Falcons", "coach": "Jo"}),
        ],
        ResourceKind::Users => vec![
            json!({"id": 1, "username": "spidey", "email": "spiderman@marvel.com",
                   "role": "Captain", "joined_at": "2025-01-04"}),
            json!({"id": 2, "email": "ironman@marvel.com", "created_at": "2025-02-11"}),
            json!({"id": 3, "username": "wonder", "email": "wonderwoman@dc.com",
                   "status": "Inactive"}),
            json!({"id": 4, "name": "Batman"}),
        ],
        ResourceKind::Workouts => vec![
            json!({"id": 1, "name": "Hero HIIT", "description": "High intensity for heroes",
                   "difficulty": "Hard", "focus": "Conditioning", "duration": "25 min"}),
            json!({"id": 2, "title": "Power Yoga", "description": "Strength and flexibility",
                   "difficulty": "Medium", "category": "Mobility", "equipment": "Mat"}),
            json!({"id": 3, "difficulty": "Easy"}),
        ],
    }
}

pub fn sample_payload(kind: ResourceKind, envelope: Envelope) -> Value {
    let items = sample_items(kind);
    match envelope {
        Envelope::Bare => Value::Array(items),
        Envelope::Paginated => json!({
            "count": items.len(),
            "next": null,
            "previous": null,
            "results": items,
        }),
        Envelope::Single => items.into_iter().next().unwrap_or(Value::Null),
    }
}

pub fn sample_body(kind: ResourceKind, envelope: Envelope) -> String {
    sample_payload(kind, envelope).to_string()
}

pub fn sample_records(kind: ResourceKind) -> Vec<Record> {
    sample_items(kind).into_iter().map(Record::new).collect()
}
