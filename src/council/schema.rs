//! Record-shape descriptors.
//!
//! Every content collection in the admin panel is edited by the same generic
//! machinery. What differs between collections lives here: which fields exist,
//! which are required, which are maintained by the system, how ids are
//! assigned, which status values exist and how they move, and which records
//! are protected.
//!
//! Descriptors are `const` values built with small `const fn` builders, so the
//! full catalog (see [`crate::catalog`]) is a compile-time table.

use crate::model::{Record, RecordId};

/// One selectable value of a choice field, with its display label.
///
/// `verb` is the button caption used when moving a record *into* this value
/// through a status action ("Publish", "Close"). Empty for plain categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
    pub verb: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label,
            verb: "",
        }
    }

    pub const fn with_verb(mut self, verb: &'static str) -> Self {
        self.verb = verb;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text with no length cap.
    Text,
    /// Free-text content, capped at the configured text limit.
    LongText,
    /// Closed set of values.
    Choice(&'static [Choice]),
    /// `YYYY-MM-DD`, entered by the operator (e.g. a tender's last date).
    Date,
    Url,
    Email,
    /// Accepted by the form, never stored on the record.
    Secret,
    /// Non-negative integer maintained by the system.
    Counter,
}

/// Who owns a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Edited through the form.
    Editable,
    /// Edited through the form in create mode only; becomes the record id.
    Key,
    /// System-maintained counter, zeroed on insert and preserved on replace.
    Derived,
    /// Set to today on every insert and replace.
    Timestamp,
    /// Set to today on insert, then kept as is.
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Optional,
    Always,
    /// Required when creating, optional when editing (passwords).
    OnCreate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub role: FieldRole,
    pub requirement: Requirement,
    /// Value a create-mode draft starts with.
    pub default: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            role: FieldRole::Editable,
            requirement: Requirement::Optional,
            default: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.requirement = Requirement::Always;
        self
    }

    pub const fn required_on_create(mut self) -> Self {
        self.requirement = Requirement::OnCreate;
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = value;
        self
    }

    pub const fn key(mut self) -> Self {
        self.role = FieldRole::Key;
        self
    }

    /// A derived counter field.
    pub const fn counter(name: &'static str, label: &'static str) -> Self {
        let mut spec = Self::new(name, label, FieldKind::Counter);
        spec.role = FieldRole::Derived;
        spec
    }

    /// The automatic timestamp field.
    pub const fn timestamp(name: &'static str, label: &'static str) -> Self {
        let mut spec = Self::new(name, label, FieldKind::Date);
        spec.role = FieldRole::Timestamp;
        spec
    }

    /// A creation date: stamped on insert, untouched by edits.
    pub const fn created(name: &'static str, label: &'static str) -> Self {
        let mut spec = Self::new(name, label, FieldKind::Date);
        spec.role = FieldRole::Created;
        spec
    }

    /// Whether the store stamps this field with today's date.
    pub fn is_stamp(&self) -> bool {
        matches!(self.role, FieldRole::Timestamp | FieldRole::Created)
    }

    pub fn choices(&self) -> &'static [Choice] {
        match self.kind {
            FieldKind::Choice(choices) => choices,
            _ => &[],
        }
    }

    /// Whether the field is part of a draft in the given mode.
    pub fn in_draft(&self, creating: bool) -> bool {
        match self.role {
            FieldRole::Editable => true,
            FieldRole::Key => creating,
            FieldRole::Derived | FieldRole::Timestamp | FieldRole::Created => false,
        }
    }

    pub fn is_required(&self, creating: bool) -> bool {
        match self.requirement {
            Requirement::Optional => false,
            Requirement::Always => true,
            Requirement::OnCreate => creating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// `max(existing) + 1`.
    Sequential,
    /// Taken from the draft's key field at creation.
    Keyed,
}

impl IdKind {
    /// Parse a user-supplied id for this kind of collection.
    pub fn parse(&self, raw: &str) -> Option<RecordId> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self {
            IdKind::Sequential => raw.parse().ok().map(RecordId::Seq),
            IdKind::Keyed => Some(RecordId::Key(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Prepend,
    Append,
}

/// Status enumeration and the moves allowed between its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusModel {
    /// Name of the choice field that holds the status.
    pub field: &'static str,
    /// Allowed `(from, to)` moves. Empty means a binary toggle between the
    /// two values of the status field.
    pub transitions: &'static [(&'static str, &'static str)],
    /// Values shown on the public site.
    pub public: &'static [&'static str],
}

impl StatusModel {
    pub const fn binary(field: &'static str, public: &'static [&'static str]) -> Self {
        Self {
            field,
            transitions: &[],
            public,
        }
    }

    pub const fn with_transitions(
        field: &'static str,
        transitions: &'static [(&'static str, &'static str)],
        public: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            transitions,
            public,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn allows(&self, values: &[Choice], from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }
        if self.is_binary() {
            return values.len() == 2
                && values.iter().any(|c| c.value == from)
                && values.iter().any(|c| c.value == to);
        }
        self.transitions.iter().any(|(f, t)| *f == from && *t == to)
    }

    /// The single move offered as a one-click toggle from `current`.
    ///
    /// Binary enumerations flip to the other value. Declared transitions
    /// offer the first move listed for `current`.
    pub fn toggle_target(&self, values: &[Choice], current: &str) -> Option<&'static str> {
        if self.is_binary() {
            if values.len() != 2 {
                return None;
            }
            return values
                .iter()
                .find(|c| c.value != current)
                .filter(|_| values.iter().any(|c| c.value == current))
                .map(|c| c.value);
        }
        self.transitions
            .iter()
            .find(|(from, _)| *from == current)
            .map(|(_, to)| *to)
    }
}

/// Which records resist destructive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    Unprotected,
    /// Fixed ids that can be neither deleted nor have their status changed.
    Locked {
        ids: &'static [&'static str],
        delete_notice: &'static str,
        status_notice: &'static str,
    },
    /// Fixed ids that need an extra warning confirmation before deletion.
    /// Status changes stay allowed.
    Guarded {
        ids: &'static [&'static str],
        warning: &'static str,
    },
}

impl Protection {
    pub fn is_locked(&self, id: &RecordId) -> bool {
        match self {
            Protection::Locked { ids, .. } => {
                let id = id.to_string();
                ids.iter().any(|locked| *locked == id)
            }
            _ => false,
        }
    }

    pub fn is_guarded(&self, id: &RecordId) -> bool {
        match self {
            Protection::Guarded { ids, .. } => {
                let id = id.to_string();
                ids.iter().any(|guarded| *guarded == id)
            }
            _ => false,
        }
    }
}

/// Full description of one content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSchema {
    /// Machine name, used on the command line (`news`, `tenders`, ...).
    pub name: &'static str,
    /// Screen heading.
    pub label: &'static str,
    /// Noun for one record, used in messages.
    pub noun: &'static str,
    pub id_kind: IdKind,
    pub fields: &'static [FieldSpec],
    /// Field shown as the record's headline.
    pub title_field: &'static str,
    pub status: Option<StatusModel>,
    /// Field the list screen filters by.
    pub dimension: Option<&'static str>,
    pub insert_at: InsertPosition,
    pub protection: Protection,
    pub can_create: bool,
    pub can_delete: bool,
}

impl CollectionSchema {
    pub const fn new(
        name: &'static str,
        label: &'static str,
        noun: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            name,
            label,
            noun,
            id_kind: IdKind::Sequential,
            fields,
            title_field: "title",
            status: None,
            dimension: None,
            insert_at: InsertPosition::Prepend,
            protection: Protection::Unprotected,
            can_create: true,
            can_delete: true,
        }
    }

    pub const fn keyed(mut self) -> Self {
        self.id_kind = IdKind::Keyed;
        self
    }

    pub const fn title_field(mut self, field: &'static str) -> Self {
        self.title_field = field;
        self
    }

    pub const fn status(mut self, status: StatusModel) -> Self {
        self.status = Some(status);
        self
    }

    pub const fn filter_by(mut self, field: &'static str) -> Self {
        self.dimension = Some(field);
        self
    }

    pub const fn append(mut self) -> Self {
        self.insert_at = InsertPosition::Append;
        self
    }

    pub const fn protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self
    }

    /// Records can only be edited, not added or removed.
    pub const fn edit_only(mut self) -> Self {
        self.can_create = false;
        self.can_delete = false;
        self
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn derived_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|f| f.role == FieldRole::Derived)
    }

    /// The date shown next to a record: last modified, or created when the
    /// collection only keeps a creation date.
    pub fn timestamp_field(&self) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.is_stamp())
    }

    pub fn key_field(&self) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.role == FieldRole::Key)
    }

    /// Allowed values of the status field, if the collection has one.
    pub fn status_values(&self) -> &'static [Choice] {
        self.status
            .and_then(|s| self.field(s.field))
            .map(|f| f.choices())
            .unwrap_or(&[])
    }

    pub fn status_of<'r>(&self, record: &'r Record) -> Option<&'r str> {
        self.status.map(|s| record.text(s.field))
    }

    /// Headline of a record for lists and messages.
    pub fn title_of<'r>(&self, record: &'r Record) -> &'r str {
        record.text(self.title_field)
    }

    /// Whether the public site shows this record.
    pub fn is_public(&self, record: &Record) -> bool {
        match self.status {
            Some(status) => {
                let current = record.text(status.field);
                status.public.iter().any(|v| *v == current)
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: &[Choice] = &[
        Choice::new("active", "Active").with_verb("Activate"),
        Choice::new("closed", "Closed").with_verb("Close"),
        Choice::new("draft", "Draft"),
    ];
    const BINARY: &[Choice] = &[
        Choice::new("published", "Published"),
        Choice::new("draft", "Draft"),
    ];
    const MOVES: &[(&str, &str)] = &[
        ("active", "closed"),
        ("closed", "active"),
        ("draft", "active"),
    ];

    #[test]
    fn binary_status_flips_both_ways() {
        let model = StatusModel::binary("status", &["published"]);
        assert!(model.allows(BINARY, "published", "draft"));
        assert!(model.allows(BINARY, "draft", "published"));
        assert!(!model.allows(BINARY, "draft", "draft"));
        assert_eq!(model.toggle_target(BINARY, "draft"), Some("published"));
        assert_eq!(model.toggle_target(BINARY, "published"), Some("draft"));
        assert_eq!(model.toggle_target(BINARY, "bogus"), None);
    }

    #[test]
    fn declared_transitions_restrict_moves() {
        let model = StatusModel::with_transitions("status", MOVES, &["active"]);
        assert!(model.allows(STATES, "draft", "active"));
        assert!(model.allows(STATES, "closed", "active"));
        assert!(model.allows(STATES, "active", "closed"));
        assert!(!model.allows(STATES, "draft", "closed"));
        assert!(!model.allows(STATES, "active", "draft"));

        assert_eq!(model.toggle_target(STATES, "active"), Some("closed"));
        assert_eq!(model.toggle_target(STATES, "draft"), Some("active"));
    }

    #[test]
    fn locked_ids_match_by_display_form() {
        let protection = Protection::Locked {
            ids: &["1"],
            delete_notice: "no",
            status_notice: "no",
        };
        assert!(protection.is_locked(&RecordId::Seq(1)));
        assert!(!protection.is_locked(&RecordId::Seq(2)));
    }

    #[test]
    fn guarded_records_match_by_id_not_type() {
        let protection = Protection::Guarded {
            ids: &["header", "footer"],
            warning: "careful",
        };
        let retyped = Record::keyed("header").with_text("type", "page");
        let lookalike = Record::keyed("promo").with_text("type", "header");
        assert!(protection.is_guarded(&retyped.id));
        assert!(!protection.is_guarded(&lookalike.id));
        assert!(!protection.is_locked(&retyped.id));
    }

    #[test]
    fn creation_dates_are_stamps_but_not_drafted() {
        let created = FieldSpec::created("created_date", "Created");
        assert!(created.is_stamp());
        assert!(!created.in_draft(true));
        assert!(!created.in_draft(false));
        assert!(!FieldSpec::new("title", "Title", FieldKind::Text).is_stamp());
    }

    #[test]
    fn sequential_ids_parse_as_numbers() {
        assert_eq!(IdKind::Sequential.parse("4"), Some(RecordId::Seq(4)));
        assert_eq!(IdKind::Sequential.parse("abc"), None);
        assert_eq!(
            IdKind::Keyed.parse("about"),
            Some(RecordId::Key("about".into()))
        );
        assert_eq!(IdKind::Keyed.parse("  "), None);
    }
}
