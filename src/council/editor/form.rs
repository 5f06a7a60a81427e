//! The add/edit form of a collection screen.
//!
//! A [`FormController`] holds at most one [`Draft`]. Opening a form discards
//! whatever was open before. Field updates coerce and check input as it
//! arrives; [`FormController::commit`] checks required fields and hands the
//! draft to the store.

use crate::error::{CouncilError, Result, ValidationError};
use crate::model::{FieldValue, Record, RecordId};
use crate::schema::{CollectionSchema, FieldKind, FieldSpec};
use crate::store::{FieldMap, RecordStore, StorageBackend};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// Uncommitted values of a record's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub mode: FormMode,
    pub values: FieldMap,
}

impl Draft {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn is_create(&self) -> bool {
        self.mode == FormMode::Create
    }
}

pub struct FormController {
    schema: &'static CollectionSchema,
    text_limit: usize,
    draft: Option<Draft>,
    errors: Option<ValidationError>,
}

impl FormController {
    pub fn new(schema: &'static CollectionSchema, text_limit: usize) -> Self {
        Self {
            schema,
            text_limit,
            draft: None,
            errors: None,
        }
    }

    /// Open a fresh draft, replacing any draft already open.
    ///
    /// Create mode starts from the field defaults. Edit mode copies the
    /// editable fields of `seed`; secrets always start blank.
    pub fn open(&mut self, mode: FormMode, seed: Option<&Record>) -> &Draft {
        let creating = mode == FormMode::Create;
        let mut values = FieldMap::new();
        for field in self.schema.fields.iter().filter(|f| f.in_draft(creating)) {
            let value = match (seed, field.kind) {
                (_, FieldKind::Secret) => FieldValue::text(""),
                (Some(record), _) => record
                    .get(field.name)
                    .cloned()
                    .unwrap_or_else(|| FieldValue::text("")),
                (None, _) => FieldValue::text(field.default),
            };
            values.insert(field.name.to_string(), value);
        }

        if self.draft.is_some() {
            debug!(collection = self.schema.name, "discarding open draft");
        }
        self.errors = None;
        self.draft.insert(Draft { mode, values })
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Issues from the last failed update or commit.
    pub fn errors(&self) -> Option<&ValidationError> {
        self.errors.as_ref()
    }

    /// Set one field of the open draft.
    ///
    /// Long text is cut at the text limit. Unknown fields, fields outside the
    /// draft, undeclared choices and malformed dates are rejected and leave
    /// the draft unchanged.
    pub fn update_field(&mut self, name: &str, raw: &str) -> Result<()> {
        let creating = match self.draft.as_ref() {
            Some(draft) => draft.is_create(),
            None => return Err(no_open_form()),
        };

        let field = match self.schema.field(name) {
            Some(f) if f.in_draft(creating) => f,
            Some(_) => return Err(self.reject(name, "cannot be edited")),
            None => {
                let message = format!("is not a field of {}", self.schema.label);
                return Err(self.reject(name, &message));
            }
        };

        let value = match coerce(field, raw, self.text_limit) {
            Ok(value) => value,
            Err(message) => return Err(self.reject(name, &message)),
        };
        if let Some(draft) = self.draft.as_mut() {
            draft.values.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Characters left before the text limit, for capped fields.
    pub fn remaining(&self, name: &str) -> Option<usize> {
        let field = self.schema.field(name)?;
        if field.kind != FieldKind::LongText {
            return None;
        }
        let used = self
            .draft
            .as_ref()
            .and_then(|d| d.get(name))
            .map(|v| v.to_string().chars().count())
            .unwrap_or(0);
        Some(self.text_limit.saturating_sub(used))
    }

    /// Check the open draft, reporting every offending field at once.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(());
        };
        let creating = draft.is_create();

        let mut err = ValidationError::new();
        for field in self.schema.fields.iter().filter(|f| f.in_draft(creating)) {
            let blank = draft.get(field.name).map_or(true, FieldValue::is_blank);
            if blank {
                if field.is_required(creating) {
                    err.push(field.name, "is required");
                }
                continue;
            }
            if field.kind == FieldKind::Email {
                let value = draft.get(field.name).map(|v| v.to_string()).unwrap_or_default();
                if !looks_like_email(&value) {
                    err.push(field.name, "must be an email address");
                }
            }
        }

        if err.is_empty() {
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Validate the draft and write it to `store`.
    ///
    /// On success the draft is cleared. On failure it stays open and the
    /// issues are kept for display.
    pub fn commit<B: StorageBackend>(&mut self, store: &mut RecordStore<B>) -> Result<Record> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(no_open_form());
        };

        if let Err(err) = self.validate() {
            debug!(collection = self.schema.name, issues = err.issues.len(), "draft rejected");
            self.errors = Some(err.clone());
            return Err(err.into());
        }

        let result = match &draft.mode {
            FormMode::Create => store.insert(&draft.values),
            FormMode::Edit(id) => store.replace(id, &draft.values),
        };

        match result {
            Ok(record) => {
                self.cancel();
                Ok(record)
            }
            Err(CouncilError::Validation(err)) => {
                self.errors = Some(err.clone());
                Err(err.into())
            }
            Err(other) => Err(other),
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
        self.errors = None;
    }

    fn reject(&mut self, field: &str, message: &str) -> CouncilError {
        let err = ValidationError::single(field, message);
        self.errors = Some(err.clone());
        err.into()
    }
}

fn no_open_form() -> CouncilError {
    CouncilError::Unsupported("no form is open".to_string())
}

fn coerce(field: &FieldSpec, raw: &str, limit: usize) -> std::result::Result<FieldValue, String> {
    match field.kind {
        FieldKind::LongText => Ok(FieldValue::text(raw.chars().take(limit).collect::<String>())),
        FieldKind::Choice(choices) => {
            if choices.iter().any(|c| c.value == raw) {
                Ok(FieldValue::text(raw))
            } else {
                let allowed: Vec<_> = choices.iter().map(|c| c.value).collect();
                Err(format!("must be one of: {}", allowed.join(", ")))
            }
        }
        FieldKind::Date if raw.trim().is_empty() => Ok(FieldValue::text("")),
        FieldKind::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(FieldValue::Date)
            .map_err(|_| "must be a date (YYYY-MM-DD)".to_string()),
        FieldKind::Counter => Err("is maintained by the system".to_string()),
        FieldKind::Text | FieldKind::Url | FieldKind::Email | FieldKind::Secret => {
            Ok(FieldValue::text(raw))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.'),
        None => false,
    }
}
