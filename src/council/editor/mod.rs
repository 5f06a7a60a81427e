//! # Collection Editor
//!
//! Every admin screen that manages a list of records (news, tenders, users,
//! ...) is the same machine, configured by a [`CollectionSchema`]:
//!
//! - [`RecordStore`]: the canonical collection and its rules.
//! - [`filter`]: the visible subset and the filter bar counts.
//! - [`form`]: the single add/edit draft and its validation state.
//! - [`dispatch`]: delete and status intents, with protection and prompts.
//!
//! [`CollectionEditor`] ties the four together behind an [`AuthContext`] and
//! produces a [`ScreenView`] for whatever UI is drawing the screen. It never
//! prints or reads input; prompts go through [`dispatch::Prompter`].

use crate::auth::AuthContext;
use crate::dashboard::{Activity, ActivityKind, ActivityLog};
use crate::error::{CouncilError, Result, ValidationError};
use crate::model::{Record, RecordId};
use crate::schema::CollectionSchema;
use crate::store::{RecordStore, StorageBackend};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub mod dispatch;
pub mod filter;
pub mod form;

use dispatch::{Action, Prompter};
use filter::{FilterOption, Selection};
use form::{Draft, FormController, FormMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Outcome of an admin action: the records it touched plus messages for
/// the operator.
#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    pub affected: Vec<Record>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected(mut self, records: Vec<Record>) -> Self {
        self.affected = records;
        self
    }
}

/// One line of the record list.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub record: Record,
    pub title: String,
    pub public: bool,
    pub actions: Vec<Action>,
}

/// Everything a UI needs to draw one collection screen.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenView {
    pub collection: &'static str,
    pub label: &'static str,
    pub filter: String,
    pub options: Vec<FilterOption>,
    pub rows: Vec<Row>,
    pub can_create: bool,
    pub draft: Option<Draft>,
    pub errors: Option<ValidationError>,
    /// Characters left in each capped field of the open draft.
    pub remaining: BTreeMap<&'static str, usize>,
}

pub struct CollectionEditor<B: StorageBackend> {
    store: RecordStore<B>,
    form: FormController,
    selection: Selection,
}

impl<B: StorageBackend> CollectionEditor<B> {
    /// Build the screen for `schema`. Fails with `Unauthenticated` when no
    /// operator is signed in.
    pub fn new(
        auth: &AuthContext,
        backend: B,
        schema: &'static CollectionSchema,
        text_limit: usize,
    ) -> Result<Self> {
        let operator = auth.require()?;
        debug!(collection = schema.name, operator, "opening collection editor");
        Ok(Self {
            store: RecordStore::new(backend, schema),
            form: FormController::new(schema, text_limit),
            selection: Selection::All,
        })
    }

    pub fn schema(&self) -> &'static CollectionSchema {
        self.store.schema()
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn set_filter(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Records under the current filter.
    pub fn visible(&self) -> Result<Vec<Record>> {
        let records = self.store.list()?;
        Ok(match self.schema().dimension {
            Some(dimension) => filter::apply(&records, dimension, &self.selection),
            None => records,
        })
    }

    /// A single record as a list row.
    pub fn row(&self, id: &RecordId) -> Result<Row> {
        Ok(self.row_for(self.store.get(id)?))
    }

    fn row_for(&self, record: Record) -> Row {
        let schema = self.schema();
        Row {
            title: schema.title_of(&record).to_string(),
            public: schema.is_public(&record),
            actions: dispatch::available_actions(schema, &record),
            record,
        }
    }

    pub fn view(&self) -> Result<ScreenView> {
        let schema = self.schema();
        let records = self.store.list()?;
        let rows = self.visible()?.into_iter().map(|r| self.row_for(r)).collect();

        let remaining = schema
            .fields
            .iter()
            .filter_map(|f| self.form.remaining(f.name).map(|n| (f.name, n)))
            .filter(|_| self.form.draft().is_some())
            .collect();

        Ok(ScreenView {
            collection: schema.name,
            label: schema.label,
            filter: self.selection.to_string(),
            options: filter::options(schema, &records),
            rows,
            can_create: schema.can_create,
            draft: self.form.draft().cloned(),
            errors: self.form.errors().cloned(),
            remaining,
        })
    }

    pub fn open_create(&mut self) -> Result<&Draft> {
        let schema = self.schema();
        if !schema.can_create {
            return Err(CouncilError::Unsupported(format!(
                "{} cannot be created",
                schema.label
            )));
        }
        Ok(self.form.open(FormMode::Create, None))
    }

    pub fn open_edit(&mut self, id: &RecordId) -> Result<&Draft> {
        let record = self.store.get(id)?;
        Ok(self.form.open(FormMode::Edit(id.clone()), Some(&record)))
    }

    pub fn update_field(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.update_field(name, value)
    }

    /// Commit the open draft and log it.
    pub fn commit(&mut self, activity: &mut ActivityLog) -> Result<CmdResult> {
        let creating = self.form.draft().is_some_and(Draft::is_create);
        let record = self.form.commit(&mut self.store)?;

        let schema = self.schema();
        let title = schema.title_of(&record).to_string();
        let (kind, verb) = if creating {
            (ActivityKind::Created, "Added")
        } else {
            (ActivityKind::Updated, "Updated")
        };
        activity.record(Activity::new(schema.name, Some(record.id.clone()), &title, kind));

        let mut result = CmdResult::default().with_affected(vec![record.clone()]);
        result.add_message(CmdMessage::success(format!(
            "{} {} {}: {}",
            verb, schema.noun, record.id, title
        )));
        Ok(result)
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    pub fn delete(
        &mut self,
        id: &RecordId,
        prompter: &mut dyn Prompter,
        activity: &mut ActivityLog,
    ) -> Result<CmdResult> {
        dispatch::request_delete(&mut self.store, id, prompter, activity)
    }

    pub fn change_status(
        &mut self,
        id: &RecordId,
        target: Option<&str>,
        activity: &mut ActivityLog,
    ) -> Result<CmdResult> {
        dispatch::request_status_change(&mut self.store, id, target, activity)
    }
}
