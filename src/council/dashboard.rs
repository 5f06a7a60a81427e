//! Landing-screen figures: record totals per collection and a feed of what
//! the operator changed during the session.

use crate::catalog;
use crate::error::Result;
use crate::model::RecordId;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

const FEED_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "status", rename_all = "snake_case")]
pub enum ActivityKind {
    Created,
    Updated,
    Deleted,
    StatusChanged(String),
    SettingsSaved,
}

#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub collection: String,
    pub id: Option<RecordId>,
    pub title: String,
    pub kind: ActivityKind,
    pub at: DateTime<Utc>,
}

impl Activity {
    pub fn new(collection: &str, id: Option<RecordId>, title: &str, kind: ActivityKind) -> Self {
        Self {
            collection: collection.to_string(),
            id,
            title: title.to_string(),
            kind,
            at: Utc::now(),
        }
    }

    /// One-line description, e.g. `Added news item "Budget Meeting"`.
    pub fn describe(&self) -> String {
        let noun = catalog::lookup(&self.collection)
            .map(|s| s.noun)
            .unwrap_or("record");
        match &self.kind {
            ActivityKind::Created => format!("Added {} \"{}\"", noun, self.title),
            ActivityKind::Updated => format!("Updated {} \"{}\"", noun, self.title),
            ActivityKind::Deleted => format!("Deleted {} \"{}\"", noun, self.title),
            ActivityKind::StatusChanged(to) => {
                format!("Set {} \"{}\" to {}", noun, self.title, to)
            }
            ActivityKind::SettingsSaved => "Saved site settings".to_string(),
        }
    }
}

/// Bounded, newest-first feed of committed admin actions.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<Activity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, activity: Activity) {
        self.entries.push_front(activity);
        self.entries.truncate(FEED_CAPACITY);
    }

    pub fn recent(&self, limit: usize) -> Vec<Activity> {
        self.entries.iter().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionTotal {
    pub collection: String,
    pub label: String,
    pub total: usize,
    /// Records the public site shows (all of them for collections without
    /// a status).
    pub public: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub totals: Vec<CollectionTotal>,
    pub recent: Vec<Activity>,
    /// Sum of form download counters.
    pub downloads: i64,
}

/// Figures for every catalog collection, read live from `backend`.
pub fn summarize<B: StorageBackend>(
    backend: &B,
    activity: &ActivityLog,
    recent: usize,
) -> Result<Dashboard> {
    let mut totals = Vec::new();
    let mut downloads = 0;

    for schema in catalog::ALL {
        let records = backend.load(schema.name)?;
        for field in schema.derived_fields().filter(|f| f.name == "downloads") {
            downloads += records
                .iter()
                .filter_map(|r| r.get(field.name).and_then(|v| v.as_int()))
                .sum::<i64>();
        }
        totals.push(CollectionTotal {
            collection: schema.name.to_string(),
            label: schema.label.to_string(),
            total: records.len(),
            public: records.iter().filter(|r| schema.is_public(r)).count(),
        });
    }

    Ok(Dashboard {
        totals,
        recent: activity.recent(recent),
        downloads,
    })
}
