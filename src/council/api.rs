//! # API Facade
//!
//! [`AdminApi`] is the single entry point for an admin session, whatever UI is
//! driving it. It owns the session state (backend, operator, configuration,
//! activity feed, settings) and opens a [`CollectionEditor`] per call.
//!
//! ## Role and Responsibilities
//!
//! - **Authenticates** every call against the session's [`AuthContext`]
//! - **Normalizes inputs** (collection names, raw ids, `field=value` pairs)
//! - **Returns structured types** (`Result<CmdResult>`, [`ScreenView`], ...)
//!
//! Business rules live in the store and the editor components. This layer
//! holds none and never writes to a terminal.
//!
//! ## Generic Over StorageBackend
//!
//! `AdminApi<B: StorageBackend>` works with any backend. The CLI and the tests
//! both use `AdminApi<MemBackend>` seeded from fixtures.

use crate::auth::AuthContext;
use crate::catalog;
use crate::config::CouncilConfig;
use crate::dashboard::{self, ActivityLog, Dashboard};
use crate::editor::dispatch::Prompter;
use crate::editor::filter::Selection;
use crate::editor::{CmdResult, CollectionEditor, Row, ScreenView};
use crate::error::{CouncilError, Result, ValidationError};
use crate::model::RecordId;
use crate::schema::CollectionSchema;
use crate::settings::SettingsEditor;
use crate::store::StorageBackend;

/// A `field=value` pair from the caller.
pub type FieldInput = (String, String);

pub struct AdminApi<B: StorageBackend> {
    backend: B,
    auth: AuthContext,
    config: CouncilConfig,
    activity: ActivityLog,
    settings: SettingsEditor,
}

impl<B: StorageBackend> AdminApi<B> {
    pub fn new(backend: B, auth: AuthContext, config: CouncilConfig) -> Self {
        let settings = SettingsEditor::new(config.site.clone());
        Self {
            backend,
            auth,
            config,
            activity: ActivityLog::new(),
            settings,
        }
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn config(&self) -> &CouncilConfig {
        &self.config
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn list(&self, collection: &str, selection: Selection) -> Result<ScreenView> {
        let mut screen = self.screen(collection)?;
        screen.set_filter(selection);
        screen.view()
    }

    pub fn show(&self, collection: &str, id: &str) -> Result<Row> {
        let screen = self.screen(collection)?;
        let id = parse_id(screen.schema(), id)?;
        screen.row(&id)
    }

    pub fn add(&mut self, collection: &str, fields: &[FieldInput]) -> Result<CmdResult> {
        let mut screen = open(&self.backend, &self.auth, &self.config, collection)?;
        screen.open_create()?;
        fill(&mut screen, fields)?;
        screen.commit(&mut self.activity)
    }

    pub fn edit(&mut self, collection: &str, id: &str, fields: &[FieldInput]) -> Result<CmdResult> {
        let mut screen = open(&self.backend, &self.auth, &self.config, collection)?;
        let id = parse_id(screen.schema(), id)?;
        screen.open_edit(&id)?;
        fill(&mut screen, fields)?;
        screen.commit(&mut self.activity)
    }

    pub fn delete(
        &mut self,
        collection: &str,
        id: &str,
        prompter: &mut dyn Prompter,
    ) -> Result<CmdResult> {
        let mut screen = open(&self.backend, &self.auth, &self.config, collection)?;
        let id = parse_id(screen.schema(), id)?;
        screen.delete(&id, prompter, &mut self.activity)
    }

    pub fn change_status(
        &mut self,
        collection: &str,
        id: &str,
        target: Option<&str>,
    ) -> Result<CmdResult> {
        let mut screen = open(&self.backend, &self.auth, &self.config, collection)?;
        let id = parse_id(screen.schema(), id)?;
        screen.change_status(&id, target, &mut self.activity)
    }

    pub fn settings(&self) -> Result<&SettingsEditor> {
        self.auth.require()?;
        Ok(&self.settings)
    }

    /// Set one setting and save straight away.
    pub fn update_setting(&mut self, section: &str, field: &str, value: &str) -> Result<CmdResult> {
        self.auth.require()?;
        self.settings.set(section, field, value)?;
        Ok(self.settings.save(&mut self.activity))
    }

    pub fn dashboard(&self, recent: usize) -> Result<Dashboard> {
        self.auth.require()?;
        dashboard::summarize(&self.backend, &self.activity, recent)
    }

    /// A collection screen bound to this session's backend.
    pub fn screen(&self, collection: &str) -> Result<CollectionEditor<&B>> {
        open(&self.backend, &self.auth, &self.config, collection)
    }

    /// A collection screen plus the session's activity feed, for UIs that
    /// drive the editor step by step.
    pub fn screen_mut(&mut self, collection: &str) -> Result<(CollectionEditor<&B>, &mut ActivityLog)> {
        let screen = open(&self.backend, &self.auth, &self.config, collection)?;
        Ok((screen, &mut self.activity))
    }
}

fn open<'b, B: StorageBackend>(
    backend: &'b B,
    auth: &AuthContext,
    config: &CouncilConfig,
    collection: &str,
) -> Result<CollectionEditor<&'b B>> {
    auth.require()?;
    let schema = catalog::lookup(collection)?;
    CollectionEditor::new(auth, backend, schema, config.text_limit)
}

/// Apply every input, collecting all rejected fields before failing.
fn fill<B: StorageBackend>(screen: &mut CollectionEditor<B>, fields: &[FieldInput]) -> Result<()> {
    let mut issues = ValidationError::new();
    for (name, value) in fields {
        match screen.update_field(name, value) {
            Ok(()) => {}
            Err(CouncilError::Validation(err)) => issues.issues.extend(err.issues),
            Err(other) => return Err(other),
        }
    }
    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues.into())
    }
}

/// Parse a raw id the way `schema` assigns them.
pub fn parse_id(schema: &CollectionSchema, raw: &str) -> Result<RecordId> {
    schema.id_kind.parse(raw).ok_or_else(|| {
        CouncilError::from(ValidationError::single(
            "id",
            format!("'{}' is not a valid {} id", raw, schema.noun),
        ))
    })
}

/// Split `field=value` arguments.
pub fn parse_field_inputs<I: AsRef<str>>(args: &[I]) -> Result<Vec<FieldInput>> {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            arg.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| {
                    CouncilError::from(ValidationError::single(arg, "expected field=value"))
                })
        })
        .collect()
}
