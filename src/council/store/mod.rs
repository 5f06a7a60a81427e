//! # Storage Layer
//!
//! [`RecordStore`] owns the canonical collection behind one admin screen and
//! enforces the record rules every collection shares:
//!
//! - **Ids**: sequential collections assign `max(existing) + 1`, so an id is
//!   never reused while a larger one exists; keyed collections take the id
//!   from the draft's key field and reject duplicates.
//! - **Timestamps**: the collection's timestamp field is set to today on every
//!   insert and replace. It is never taken from caller input.
//! - **Derived fields**: counters start at zero and survive every replace.
//! - **Protection**: locked ids reject `remove` and status changes with
//!   [`CouncilError::ProtectionViolation`], leaving the collection untouched.
//!
//! ## Backends
//!
//! The store is generic over [`StorageBackend`], which only knows how to load
//! and save a whole collection. Every mutating call loads, changes and saves
//! once, so a persistent backend would see each call as one unit.
//!
//! - [`memory::MemBackend`]: the in-memory session backend (the only one).
//!
//! Confirmation prompts are not the store's concern; see [`crate::editor::dispatch`].

use crate::error::{CouncilError, Result, ValidationError};
use crate::model::{FieldValue, Record, RecordId};
use crate::schema::{CollectionSchema, FieldKind, FieldRole, IdKind, InsertPosition, Protection};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub mod backend;
pub mod memory;

pub use backend::StorageBackend;

/// Field values submitted for insert or replace.
pub type FieldMap = BTreeMap<String, FieldValue>;

fn today() -> FieldValue {
    FieldValue::Date(Utc::now().date_naive())
}

pub struct RecordStore<B: StorageBackend> {
    backend: B,
    schema: &'static CollectionSchema,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn new(backend: B, schema: &'static CollectionSchema) -> Self {
        Self { backend, schema }
    }

    pub fn schema(&self) -> &'static CollectionSchema {
        self.schema
    }

    /// All records in display order.
    pub fn list(&self) -> Result<Vec<Record>> {
        let records = self.backend.load(self.schema.name)?;
        debug!(collection = self.schema.name, count = records.len(), "listed records");
        Ok(records)
    }

    pub fn get(&self, id: &RecordId) -> Result<Record> {
        self.list()?
            .into_iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| self.not_found(id))
    }

    /// Create a record from `candidate`.
    ///
    /// Only editable fields are taken from the candidate. Derived counters
    /// start at zero and the timestamp is today.
    pub fn insert(&mut self, candidate: &FieldMap) -> Result<Record> {
        if !self.schema.can_create {
            return Err(CouncilError::Unsupported(format!(
                "{} cannot be created",
                self.schema.label
            )));
        }

        let mut records = self.list()?;
        let id = self.next_id(&records, candidate)?;

        let mut record = Record::new(id);
        for field in self.schema.fields {
            match field.role {
                FieldRole::Editable if field.kind != FieldKind::Secret => {
                    let value = candidate
                        .get(field.name)
                        .cloned()
                        .unwrap_or_else(|| FieldValue::text(field.default));
                    record.set(field.name, value);
                }
                FieldRole::Derived => record.set(field.name, FieldValue::Int(0)),
                FieldRole::Timestamp | FieldRole::Created => record.set(field.name, today()),
                _ => {}
            }
        }

        match self.schema.insert_at {
            InsertPosition::Prepend => records.insert(0, record.clone()),
            InsertPosition::Append => records.push(record.clone()),
        }
        self.backend.save(self.schema.name, &records)?;

        info!(collection = self.schema.name, id = %record.id, "inserted record");
        Ok(record)
    }

    /// Merge `fields` over the record with `id`, keeping its position.
    ///
    /// Derived counters, the id and the stamps are never taken from
    /// `fields`. A missing id is reported as [`CouncilError::NotFound`].
    /// Locked records keep their status; changing it here fails like
    /// [`RecordStore::toggle_status`] does.
    pub fn replace(&mut self, id: &RecordId, fields: &FieldMap) -> Result<Record> {
        let mut records = self.list()?;
        let Some(pos) = records.iter().position(|r| &r.id == id) else {
            warn!(collection = self.schema.name, id = %id, "replace on missing record");
            return Err(self.not_found(id));
        };

        if let (Protection::Locked { status_notice, .. }, Some(model)) =
            (self.schema.protection, self.schema.status)
        {
            let changes_status = fields
                .get(model.field)
                .is_some_and(|value| value.to_string() != records[pos].text(model.field));
            if changes_status && self.schema.protection.is_locked(id) {
                return Err(self.violation(id, status_notice));
            }
        }

        let mut updated = records[pos].clone();
        for (name, value) in fields {
            let editable = self
                .schema
                .field(name)
                .is_some_and(|f| f.role == FieldRole::Editable && f.kind != FieldKind::Secret);
            if editable {
                updated.set(name, value.clone());
            }
        }
        for stamp in self.schema.fields.iter().filter(|f| f.role == FieldRole::Timestamp) {
            updated.set(stamp.name, today());
        }

        records[pos] = updated.clone();
        self.backend.save(self.schema.name, &records)?;

        info!(collection = self.schema.name, id = %id, "replaced record");
        Ok(updated)
    }

    /// Delete a record. Returns `false` when the id is already gone.
    pub fn remove(&mut self, id: &RecordId) -> Result<bool> {
        if let Protection::Locked { delete_notice, .. } = self.schema.protection {
            if self.schema.protection.is_locked(id) {
                return Err(self.violation(id, delete_notice));
            }
        }
        if !self.schema.can_delete {
            return Err(CouncilError::Unsupported(format!(
                "{} cannot be deleted",
                self.schema.label
            )));
        }

        let mut records = self.list()?;
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            debug!(collection = self.schema.name, id = %id, "remove on missing record");
            return Ok(false);
        }
        self.backend.save(self.schema.name, &records)?;

        info!(collection = self.schema.name, id = %id, "removed record");
        Ok(true)
    }

    /// Move a record's status to `target`, or to the collection's toggle
    /// target when `target` is `None`.
    ///
    /// Only the status field changes; the timestamp is left alone.
    pub fn toggle_status(&mut self, id: &RecordId, target: Option<&str>) -> Result<Record> {
        if let Protection::Locked { status_notice, .. } = self.schema.protection {
            if self.schema.protection.is_locked(id) {
                return Err(self.violation(id, status_notice));
            }
        }
        let Some(status) = self.schema.status else {
            return Err(CouncilError::Unsupported(format!(
                "{} have no status",
                self.schema.label
            )));
        };

        let mut records = self.list()?;
        let Some(pos) = records.iter().position(|r| &r.id == id) else {
            return Err(self.not_found(id));
        };

        let values = self.schema.status_values();
        let current = records[pos].text(status.field).to_string();
        let to = match target {
            Some(t) => Some(t),
            None => status.toggle_target(values, &current),
        };
        let Some(to) = to.filter(|to| status.allows(values, &current, to)) else {
            return Err(CouncilError::InvalidTransition {
                id: id.clone(),
                from: current,
                to: target.unwrap_or("?").to_string(),
            });
        };

        records[pos].set(status.field, FieldValue::text(to));
        let updated = records[pos].clone();
        self.backend.save(self.schema.name, &records)?;

        info!(collection = self.schema.name, id = %id, from = %current, to, "changed status");
        Ok(updated)
    }

    fn next_id(&self, records: &[Record], candidate: &FieldMap) -> Result<RecordId> {
        match self.schema.id_kind {
            IdKind::Sequential => {
                let max = records.iter().filter_map(|r| r.id.as_seq()).max().unwrap_or(0);
                Ok(RecordId::Seq(max + 1))
            }
            IdKind::Keyed => {
                let key_name = self.schema.key_field().map(|f| f.name).unwrap_or("id");
                let raw = candidate
                    .get(key_name)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let id = self
                    .schema
                    .id_kind
                    .parse(&raw)
                    .ok_or_else(|| ValidationError::single(key_name, "is required"))?;
                if records.iter().any(|r| r.id == id) {
                    return Err(ValidationError::single(key_name, "is already taken").into());
                }
                Ok(id)
            }
        }
    }

    fn not_found(&self, id: &RecordId) -> CouncilError {
        CouncilError::NotFound {
            collection: self.schema.name.to_string(),
            id: id.clone(),
        }
    }

    fn violation(&self, id: &RecordId, notice: &str) -> CouncilError {
        warn!(collection = self.schema.name, id = %id, notice, "blocked by protection");
        CouncilError::ProtectionViolation {
            collection: self.schema.name.to_string(),
            id: id.clone(),
            notice: notice.to_string(),
        }
    }
}
