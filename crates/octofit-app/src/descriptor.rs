// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::Value;

use crate::record::{Record, display_value, is_truthy};
use crate::resource::ResourceKind;

/// One step of a fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Used only when the value is truthy (non-empty, non-zero, not false).
    Truthy(&'static str),
    /// Used whenever the value is present, including `0` and `""`.
    Present(&'static str),
    /// Length of an array or string field.
    Length(&'static str),
    /// Truthy string field cut to at most `n` characters.
    Prefix(&'static str, usize),
}

impl Lookup {
    fn apply(self, record: &Record) -> Option<String> {
        match self {
            Self::Truthy(field) => record.truthy(field).map(display_value),
            Self::Present(field) => record.get(field).map(display_value),
            Self::Length(field) => match record.get(field)? {
                Value::Array(items) => Some(items.len().to_string()),
                Value::String(text) => Some(text.chars().count().to_string()),
                _ => None,
            },
            Self::Prefix(field, max_chars) => record
                .get(field)
                .and_then(Value::as_str)
                .map(|text| text.chars().take(max_chars).collect::<String>())
                .filter(|text| !text.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Text(&'static str),
    /// `<prefix><N>` with N the 1-based row position in the rendered view.
    Ordinal(&'static str),
}

impl Placeholder {
    fn render(self, position: usize) -> String {
        match self {
            Self::Text(text) => text.to_owned(),
            Self::Ordinal(prefix) => format!("{prefix}{}", position + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChain {
    pub steps: &'static [Lookup],
    pub placeholder: Placeholder,
}

impl FieldChain {
    pub const fn new(steps: &'static [Lookup], placeholder: Placeholder) -> Self {
        Self { steps, placeholder }
    }

    /// First step that yields a value, without the placeholder.
    pub fn lookup(&self, record: &Record) -> Option<String> {
        self.steps.iter().find_map(|step| step.apply(record))
    }

    pub fn resolve(&self, record: &Record, position: usize) -> String {
        self.lookup(record)
            .unwrap_or_else(|| self.placeholder.render(position))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledField {
    pub label: &'static str,
    pub chain: FieldChain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// Any top-level string value contains the term.
    AnyString,
    /// Any listed truthy field, coerced to text, contains the term.
    Fields(&'static [&'static str]),
}

/// Everything that distinguishes one resource screen from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub blurb: &'static str,
    pub search_placeholder: &'static str,
    pub loading_text: &'static str,
    pub empty_text: &'static str,
    pub error_message: &'static str,
    pub display_name: FieldChain,
    pub detail_title: FieldChain,
    pub subtitle: Option<FieldChain>,
    pub columns: &'static [LabeledField],
    pub filter: FilterPolicy,
    pub details: &'static [LabeledField],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

impl DetailView {
    pub fn value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field_label, _)| *field_label == label)
            .map(|(_, value)| value.as_str())
    }
}

impl ResourceDescriptor {
    pub fn name(&self, record: &Record, position: usize) -> String {
        self.display_name.resolve(record, position)
    }

    pub fn row(&self, record: &Record, position: usize) -> RowView {
        RowView {
            cells: self
                .columns
                .iter()
                .map(|column| column.chain.resolve(record, position))
                .collect(),
            subtitle: self
                .subtitle
                .map(|chain| chain.resolve(record, position)),
        }
    }

    pub fn detail(&self, record: &Record, position: usize) -> DetailView {
        DetailView {
            title: self.detail_title.resolve(record, position),
            fields: self
                .details
                .iter()
                .map(|field| (field.label, field.chain.resolve(record, position)))
                .collect(),
        }
    }

    pub fn column_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.label)
    }
}

impl ResourceKind {
    pub fn descriptor(self) -> &'static ResourceDescriptor {
        match self {
            Self::Activities => &ACTIVITIES,
            Self::Leaderboard => &LEADERBOARD,
            Self::Teams => &TEAMS,
            Self::Users => &USERS,
            Self::Workouts => &WORKOUTS,
        }
    }
}

pub fn matches_policy(policy: FilterPolicy, record: &Record, term: &str) -> bool {
    match policy {
        FilterPolicy::AnyString => record
            .string_values()
            .any(|value| value.to_lowercase().contains(term)),
        FilterPolicy::Fields(fields) => fields.iter().any(|field| {
            record
                .truthy(field)
                .is_some_and(|value| display_value(value).to_lowercase().contains(term))
        }),
    }
}

const fn field(label: &'static str, chain: FieldChain) -> LabeledField {
    LabeledField { label, chain }
}

const fn text(steps: &'static [Lookup], placeholder: &'static str) -> FieldChain {
    FieldChain::new(steps, Placeholder::Text(placeholder))
}

use Lookup::{Length, Prefix, Present, Truthy};

const ACTIVITY_NAME: FieldChain =
    FieldChain::new(&[Truthy("name"), Truthy("title")], Placeholder::Ordinal("Activity #"));

pub static ACTIVITIES: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Activities,
    blurb: "Review the most recent logged activities and drill into the details.",
    search_placeholder: "Search activities",
    loading_text: "Loading activities...",
    empty_text: "No activities match your filters.",
    error_message: "Unable to load activities from the server.",
    display_name: ACTIVITY_NAME,
    detail_title: text(&[Truthy("name"), Truthy("title")], "Activity details"),
    subtitle: Some(text(
        &[Truthy("description"), Truthy("notes")],
        "No description provided.",
    )),
    columns: &[
        field("Activity", ACTIVITY_NAME),
        field("When", text(&[Truthy("date"), Truthy("performed_at")], "No date provided")),
        field("Duration", text(&[Truthy("duration"), Truthy("length")], "Not set")),
    ],
    filter: FilterPolicy::AnyString,
    details: &[
        field("When", text(&[Truthy("date"), Truthy("performed_at")], "Not provided")),
        field("Duration", text(&[Truthy("duration"), Truthy("length")], "Not provided")),
        field("Intensity", text(&[Truthy("intensity"), Truthy("effort")], "Not provided")),
        field(
            "Notes",
            text(&[Truthy("description"), Truthy("notes")], "No additional notes."),
        ),
    ],
};

const ATHLETE_NAME: FieldChain = text(&[Truthy("user"), Truthy("name")], "Unknown athlete");
const POINTS: FieldChain = text(&[Present("points"), Present("score")], "0");
const TEAM_NAME: FieldChain = text(&[Truthy("team"), Truthy("team_name")], "Individual");

pub static LEADERBOARD: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Leaderboard,
    blurb: "Celebrate top performers and keep competition friendly.",
    search_placeholder: "Search athletes or teams",
    loading_text: "Loading leaderboard...",
    empty_text: "No leaderboard entries match your filters.",
    error_message: "Unable to load leaderboard data.",
    display_name: ATHLETE_NAME,
    detail_title: text(&[Truthy("user"), Truthy("name")], "Leaderboard details"),
    subtitle: None,
    columns: &[
        field("Rank", FieldChain::new(&[Present("rank")], Placeholder::Ordinal(""))),
        field("Name", ATHLETE_NAME),
        field("Points", POINTS),
        field("Team", TEAM_NAME),
    ],
    filter: FilterPolicy::Fields(&["user", "name", "team", "team_name"]),
    details: &[
        field("Rank", text(&[Present("rank")], "Unranked")),
        field("Points", POINTS),
        field("Team", TEAM_NAME),
        field(
            "Last activity",
            text(&[Truthy("last_activity")], "No recent activity logged."),
        ),
    ],
};

const TEAM_TITLE: FieldChain = text(&[Truthy("name")], "Unnamed team");
const COACH: FieldChain = text(&[Truthy("coach")], "TBD");
const MEMBERS: FieldChain = text(&[Present("members_count"), Length("members")], "0");
const TEAM_DESCRIPTION: FieldChain = text(&[Truthy("description")], "No description provided.");

pub static TEAMS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Teams,
    blurb: "Manage squads, coaches, and headcount with a unified view.",
    search_placeholder: "Search teams",
    loading_text: "Loading teams...",
    empty_text: "No teams match your filters.",
    error_message: "Unable to load teams data.",
    display_name: TEAM_TITLE,
    detail_title: text(&[Truthy("name")], "Team details"),
    subtitle: Some(TEAM_DESCRIPTION),
    columns: &[
        field("Team", TEAM_TITLE),
        field("Coach", COACH),
        field("Members", MEMBERS),
    ],
    filter: FilterPolicy::Fields(&["name", "coach", "description"]),
    details: &[
        field("Coach", COACH),
        field("Members", MEMBERS),
        field("Tagline", text(&[Truthy("tagline")], "No tagline provided.")),
        field("Description", TEAM_DESCRIPTION),
    ],
};

const USER_NAME: FieldChain = text(&[Truthy("username"), Truthy("email")], "Anonymous user");
const EMAIL: FieldChain = text(&[Truthy("email")], "No email listed");
const ROLE: FieldChain = text(&[Truthy("role")], "Athlete");
const JOINED: FieldChain = text(&[Truthy("joined_at"), Truthy("created_at")], "Unknown date");

pub static USERS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Users,
    blurb: "Keep tabs on recently joined community members.",
    search_placeholder: "Search users",
    loading_text: "Loading users...",
    empty_text: "No users match your filters.",
    error_message: "Unable to load users.",
    display_name: USER_NAME,
    detail_title: text(&[Truthy("username"), Truthy("email")], "User details"),
    subtitle: Some(ROLE),
    columns: &[
        field("User", USER_NAME),
        field("Email", EMAIL),
        field("Joined", JOINED),
    ],
    filter: FilterPolicy::Fields(&["username", "email"]),
    details: &[
        field("Email", EMAIL),
        field("Role", ROLE),
        field("Joined", JOINED),
        field("Status", text(&[Truthy("status")], "Active")),
    ],
};

const WORKOUT_NAME: FieldChain =
    FieldChain::new(&[Truthy("title"), Truthy("name")], Placeholder::Ordinal("Workout #"));
const FOCUS: FieldChain = text(&[Truthy("focus"), Truthy("category")], "General");
const WORKOUT_DURATION: FieldChain = text(&[Truthy("duration")], "Not specified");

pub static WORKOUTS: ResourceDescriptor = ResourceDescriptor {
    kind: ResourceKind::Workouts,
    blurb: "Share curated workouts to keep athletes inspired.",
    search_placeholder: "Search workouts",
    loading_text: "Loading workouts...",
    empty_text: "No workouts match your filters.",
    error_message: "Unable to load workouts.",
    display_name: WORKOUT_NAME,
    detail_title: text(&[Truthy("title"), Truthy("name")], "Workout details"),
    subtitle: Some(text(&[Prefix("description", 120)], "No description provided.")),
    columns: &[
        field("Workout", WORKOUT_NAME),
        field("Focus", FOCUS),
        field("Duration", WORKOUT_DURATION),
    ],
    filter: FilterPolicy::Fields(&["title", "name", "focus", "category"]),
    details: &[
        field("Focus", FOCUS),
        field("Duration", WORKOUT_DURATION),
        field("Equipment", text(&[Truthy("equipment")], "Bodyweight")),
        field(
            "Description",
            text(&[Truthy("description")], "No description provided."),
        ),
    ],
};

#[cfg(test)]
mod tests {
    use super::{FilterPolicy, matches_policy};
    use crate::{Record, ResourceKind};
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::new(value)
    }

    #[test]
    fn activity_without_name_uses_row_ordinal() {
        let descriptor = ResourceKind::Activities.descriptor();
        let untitled = record(json!({"duration": "30m"}));
        assert_eq!(descriptor.name(&untitled, 2), "Activity #3");
        assert_eq!(descriptor.name(&record(json!({"title": "Tempo"})), 0), "Tempo");
        assert_eq!(
            descriptor.name(&record(json!({"name": "Sprint", "title": "Tempo"})), 0),
            "Sprint"
        );
    }

    #[test]
    fn team_detail_counts_members_through_fallbacks() {
        let descriptor = ResourceKind::Teams.descriptor();

        let bare = descriptor.detail(&record(json!({"name": "Falcons", "coach": "Jo"})), 0);
        assert_eq!(bare.title, "Falcons");
        assert_eq!(bare.value("Coach"), Some("Jo"));
        assert_eq!(bare.value("Members"), Some("0"));
        assert_eq!(bare.value("Tagline"), Some("No tagline provided."));

        let listed = descriptor.detail(&record(json!({"members": ["a", "b", "c"]})), 0);
        assert_eq!(listed.value("Members"), Some("3"));
        assert_eq!(listed.value("Coach"), Some("TBD"));
        assert_eq!(listed.title, "Team details");

        let counted = descriptor.detail(
            &record(json!({"members_count": 0, "members": ["a"]})),
            0,
        );
        assert_eq!(counted.value("Members"), Some("0"));
    }

    #[test]
    fn leaderboard_points_keep_zero_but_team_skips_empty() {
        let descriptor = ResourceKind::Leaderboard.descriptor();
        let entry = record(json!({"points": 0, "score": 90, "team": "", "team_name": "Owls"}));
        let detail = descriptor.detail(&entry, 0);
        assert_eq!(detail.value("Points"), Some("0"));
        assert_eq!(detail.value("Team"), Some("Owls"));
        assert_eq!(detail.value("Rank"), Some("Unranked"));
        assert_eq!(detail.title, "Leaderboard details");

        let row = descriptor.row(&entry, 4);
        assert_eq!(row.cells, vec!["5", "Unknown athlete", "0", "Owls"]);
    }

    #[test]
    fn user_detail_defaults() {
        let descriptor = ResourceKind::Users.descriptor();
        let detail = descriptor.detail(&record(json!({"email": "jo@example.com"})), 0);
        assert_eq!(detail.title, "jo@example.com");
        assert_eq!(detail.value("Role"), Some("Athlete"));
        assert_eq!(detail.value("Joined"), Some("Unknown date"));
        assert_eq!(detail.value("Status"), Some("Active"));
        assert_eq!(
            descriptor.name(&record(json!({})), 0),
            "Anonymous user"
        );
    }

    #[test]
    fn workout_fallbacks_and_subtitle_truncation() {
        let descriptor = ResourceKind::Workouts.descriptor();
        let long = "x".repeat(200);
        let workout = record(json!({"category": "Strength", "description": long}));
        let row = descriptor.row(&workout, 1);
        assert_eq!(row.cells, vec!["Workout #2", "Strength", "Not specified"]);
        assert_eq!(row.subtitle.map(|text| text.len()), Some(120));

        let detail = descriptor.detail(&workout, 1);
        assert_eq!(detail.value("Equipment"), Some("Bodyweight"));
        assert_eq!(detail.value("Focus"), Some("Strength"));
    }

    #[test]
    fn activity_detail_joined_aliases() {
        let descriptor = ResourceKind::Activities.descriptor();
        let detail = descriptor.detail(
            &record(json!({"performed_at": "2026-03-01", "length": 45, "effort": "high"})),
            0,
        );
        assert_eq!(detail.value("When"), Some("2026-03-01"));
        assert_eq!(detail.value("Duration"), Some("45"));
        assert_eq!(detail.value("Intensity"), Some("high"));
        assert_eq!(detail.value("Notes"), Some("No additional notes."));
    }

    #[test]
    fn targeted_policy_coerces_numbers_and_skips_absent() {
        let policy = FilterPolicy::Fields(&["name", "coach"]);
        assert!(matches_policy(policy, &record(json!({"name": 4242})), "42"));
        assert!(!matches_policy(policy, &record(json!({"description": "falcon"})), "fal"));
        assert!(!matches_policy(policy, &record(json!({"name": 0})), "0"));
    }

    #[test]
    fn generic_policy_only_scans_strings() {
        let policy = FilterPolicy::AnyString;
        assert!(matches_policy(policy, &record(json!({"notes": "Hill Sprint"})), "sprint"));
        assert!(!matches_policy(policy, &record(json!({"duration": 30})), "30"));
    }

    #[test]
    fn every_resource_has_a_descriptor_matching_its_kind() {
        for kind in ResourceKind::ALL {
            let descriptor = kind.descriptor();
            assert_eq!(descriptor.kind, kind);
            assert!(!descriptor.details.is_empty());
            assert!(descriptor.column_labels().count() >= 3);
        }
    }
}
