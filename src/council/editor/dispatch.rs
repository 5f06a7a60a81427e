//! Turns operator intents into store mutations.
//!
//! Deletion is the only destructive intent and always asks first through a
//! [`Prompter`]. Locked records are refused before any prompt is shown.
//! Guarded records get an extra warning prompt ahead of the usual one.
//! Status changes apply directly.

use super::{CmdMessage, CmdResult};
use crate::dashboard::{Activity, ActivityKind, ActivityLog};
use crate::error::{CouncilError, Result};
use crate::model::{Record, RecordId};
use crate::schema::{CollectionSchema, Protection};
use crate::store::{RecordStore, StorageBackend};
use serde::Serialize;
use tracing::{info, warn};

/// Yes/no questions put to the operator.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Answers every question the same way. Used for `--yes` and for
/// non-interactive sessions.
pub struct FixedAnswer(pub bool);

impl Prompter for FixedAnswer {
    fn confirm(&mut self, _question: &str) -> bool {
        self.0
    }
}

/// What the operator can do with one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Edit,
    Delete,
    ChangeStatus { target: String, label: String },
}

impl Action {
    pub fn label(&self) -> &str {
        match self {
            Action::Edit => "Edit",
            Action::Delete => "Delete",
            Action::ChangeStatus { label, .. } => label,
        }
    }
}

pub fn delete_question(schema: &CollectionSchema) -> String {
    format!("Are you sure you want to delete this {}?", schema.noun)
}

/// Ask, then delete.
///
/// A locked record fails with `ProtectionViolation` without prompting. A
/// declined prompt leaves the collection as it was.
pub fn request_delete<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &RecordId,
    prompter: &mut dyn Prompter,
    activity: &mut ActivityLog,
) -> Result<CmdResult> {
    let schema = store.schema();
    if let Protection::Locked { delete_notice, .. } = schema.protection {
        if schema.protection.is_locked(id) {
            warn!(collection = schema.name, id = %id, "delete refused before prompt");
            return Err(CouncilError::ProtectionViolation {
                collection: schema.name.to_string(),
                id: id.clone(),
                notice: delete_notice.to_string(),
            });
        }
    }
    if !schema.can_delete {
        return Err(CouncilError::Unsupported(format!(
            "{} cannot be deleted",
            schema.label
        )));
    }

    let record = store.get(id)?;
    let mut result = CmdResult::default();

    if let Protection::Guarded { warning, .. } = schema.protection {
        if schema.protection.is_guarded(id) && !prompter.confirm(warning) {
            result.add_message(CmdMessage::info("Deletion cancelled"));
            return Ok(result);
        }
    }
    if !prompter.confirm(&delete_question(schema)) {
        result.add_message(CmdMessage::info("Deletion cancelled"));
        return Ok(result);
    }

    let title = schema.title_of(&record).to_string();
    if store.remove(id)? {
        activity.record(Activity::new(schema.name, Some(id.clone()), &title, ActivityKind::Deleted));
        result.add_message(CmdMessage::success(format!(
            "Deleted {} {}: {}",
            schema.noun, id, title
        )));
        result.affected.push(record);
    } else {
        result.add_message(CmdMessage::warning(format!("{} {} was already gone", schema.noun, id)));
    }
    Ok(result)
}

/// Move a record to `target`, or along its one-click toggle when `None`.
pub fn request_status_change<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &RecordId,
    target: Option<&str>,
    activity: &mut ActivityLog,
) -> Result<CmdResult> {
    let schema = store.schema();
    let updated = store.toggle_status(id, target)?;
    let status = schema.status_of(&updated).unwrap_or_default().to_string();
    let title = schema.title_of(&updated).to_string();

    info!(collection = schema.name, id = %id, status = %status, "status change applied");
    activity.record(Activity::new(
        schema.name,
        Some(id.clone()),
        &title,
        ActivityKind::StatusChanged(status.clone()),
    ));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} is now {}",
        capitalize(schema.noun),
        id,
        status_label(schema, &status)
    )));
    result.affected.push(updated);
    Ok(result)
}

/// Buttons offered next to a record.
pub fn available_actions(schema: &CollectionSchema, record: &Record) -> Vec<Action> {
    let mut actions = vec![Action::Edit];
    let locked = schema.protection.is_locked(&record.id);

    if let Some(status) = schema.status.filter(|_| !locked) {
        let values = schema.status_values();
        let current = record.text(status.field);
        if let Some(target) = status.toggle_target(values, current) {
            let label = values
                .iter()
                .find(|c| c.value == target)
                .map(|c| if c.verb.is_empty() { c.label } else { c.verb })
                .unwrap_or(target);
            actions.push(Action::ChangeStatus {
                target: target.to_string(),
                label: label.to_string(),
            });
        }
    }
    if schema.can_delete && !locked {
        actions.push(Action::Delete);
    }
    actions
}

fn status_label<'a>(schema: &CollectionSchema, value: &'a str) -> &'a str {
    schema
        .status_values()
        .iter()
        .find(|c| c.value == value)
        .map(|c| c.label)
        .unwrap_or(value)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{COMPONENTS, NEWS, PAGES, TENDERS, USERS};
    use crate::model::FieldValue;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::MemBackend;
    use crate::store::FieldMap;

    /// Records every question and answers from a script.
    struct ScriptedPrompter {
        answers: Vec<bool>,
        asked: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.to_vec(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn confirm(&mut self, question: &str) -> bool {
            self.asked.push(question.to_string());
            if self.answers.is_empty() {
                false
            } else {
                self.answers.remove(0)
            }
        }
    }

    #[test]
    fn deleting_the_main_admin_never_prompts() {
        let backend = MemBackend::seeded();
        let mut store = RecordStore::new(&backend, &USERS);
        let mut prompter = ScriptedPrompter::new(&[true]);
        let mut log = ActivityLog::new();

        let result = request_delete(&mut store, &RecordId::Seq(1), &mut prompter, &mut log);

        assert!(matches!(result, Err(CouncilError::ProtectionViolation { .. })));
        assert!(prompter.asked.is_empty());
        assert_eq!(store.list().unwrap().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn confirmed_delete_removes_and_logs() {
        let fixture = StoreFixture::new().with_news(3);
        let mut store = RecordStore::new(&fixture.backend, &NEWS);
        let mut prompter = ScriptedPrompter::new(&[true]);
        let mut log = ActivityLog::new();

        let result = request_delete(&mut store, &RecordId::Seq(2), &mut prompter, &mut log).unwrap();

        assert_eq!(prompter.asked, vec!["Are you sure you want to delete this news item?"]);
        assert_eq!(result.affected.len(), 1);
        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(log.recent(1)[0].kind, ActivityKind::Deleted);
    }

    #[test]
    fn declined_delete_changes_nothing() {
        let fixture = StoreFixture::new().with_news(3);
        let mut store = RecordStore::new(&fixture.backend, &NEWS);
        let mut prompter = ScriptedPrompter::new(&[false]);
        let mut log = ActivityLog::new();

        let result = request_delete(&mut store, &RecordId::Seq(2), &mut prompter, &mut log).unwrap();

        assert!(result.affected.is_empty());
        assert_eq!(store.list().unwrap().len(), 3);
        assert!(log.is_empty());
    }

    #[test]
    fn guarded_component_needs_two_confirmations() {
        let backend = MemBackend::seeded();
        let mut store = RecordStore::new(&backend, &COMPONENTS);
        let mut log = ActivityLog::new();

        let mut declines_warning = ScriptedPrompter::new(&[false]);
        let header = RecordId::Key("header".into());
        request_delete(&mut store, &header, &mut declines_warning, &mut log).unwrap();
        assert_eq!(declines_warning.asked.len(), 1);
        assert!(declines_warning.asked[0].starts_with("Warning:"));
        assert!(store.get(&header).is_ok());

        let mut accepts_both = ScriptedPrompter::new(&[true, true]);
        request_delete(&mut store, &header, &mut accepts_both, &mut log).unwrap();
        assert_eq!(accepts_both.asked.len(), 2);
        assert_eq!(
            accepts_both.asked[1],
            "Are you sure you want to delete this component?"
        );
        assert!(store.get(&header).is_err());
    }

    #[test]
    fn ordinary_component_gets_single_confirmation() {
        let backend = MemBackend::seeded();
        let mut store = RecordStore::new(&backend, &COMPONENTS);
        let mut prompter = ScriptedPrompter::new(&[true]);
        let mut log = ActivityLog::new();

        request_delete(&mut store, &RecordId::Key("home".into()), &mut prompter, &mut log).unwrap();
        assert_eq!(prompter.asked.len(), 1);
    }

    #[test]
    fn retyped_core_component_still_needs_the_warning() {
        let backend = MemBackend::seeded();
        let mut store = RecordStore::new(&backend, &COMPONENTS);
        let mut log = ActivityLog::new();
        let header = RecordId::Key("header".into());
        let retype: FieldMap = [("type".to_string(), FieldValue::text("page"))]
            .into_iter()
            .collect();
        store.replace(&header, &retype).unwrap();

        let mut prompter = ScriptedPrompter::new(&[true, true]);
        request_delete(&mut store, &header, &mut prompter, &mut log).unwrap();

        assert_eq!(prompter.asked.len(), 2);
        assert!(prompter.asked[0].starts_with("Warning:"));
        assert!(store.get(&header).is_err());
    }

    #[test]
    fn component_typed_like_a_core_one_gets_single_confirmation() {
        let backend = MemBackend::seeded();
        let mut store = RecordStore::new(&backend, &COMPONENTS);
        let mut log = ActivityLog::new();
        let candidate: FieldMap = [
            ("id".to_string(), FieldValue::text("promo")),
            ("name".to_string(), FieldValue::text("Promo Banner")),
            ("type".to_string(), FieldValue::text("header")),
        ]
        .into_iter()
        .collect();
        let promo = store.insert(&candidate).unwrap().id;

        let mut prompter = ScriptedPrompter::new(&[true]);
        request_delete(&mut store, &promo, &mut prompter, &mut log).unwrap();

        assert_eq!(prompter.asked, vec!["Are you sure you want to delete this component?"]);
        assert!(store.get(&promo).is_err());
    }

    #[test]
    fn guarded_component_status_changes_without_prompting() {
        let backend = MemBackend::seeded();
        let mut store = RecordStore::new(&backend, &COMPONENTS);
        let mut log = ActivityLog::new();
        let navbar = RecordId::Key("navbar".into());

        let result = request_status_change(&mut store, &navbar, Some("inactive"), &mut log).unwrap();

        assert_eq!(result.affected[0].text("status"), "inactive");
        assert_eq!(store.get(&navbar).unwrap().text("status"), "inactive");
        assert_eq!(log.recent(1)[0].kind, ActivityKind::StatusChanged("inactive".into()));
    }

    #[test]
    fn deleting_missing_record_is_not_found() {
        let fixture = StoreFixture::new().with_news(1);
        let mut store = RecordStore::new(&fixture.backend, &NEWS);
        let mut prompter = ScriptedPrompter::new(&[true]);

        let result = request_delete(&mut store, &RecordId::Seq(9), &mut prompter, &mut ActivityLog::new());
        assert!(matches!(result, Err(CouncilError::NotFound { .. })));
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn draft_tender_activates_without_prompt() {
        let tenders = vec![
            Record::seq(3)
                .with_text("title", "Solid Waste Management System")
                .with_text("department", "Sanitation")
                .with_text("status", "draft"),
            Record::seq(2).with_text("title", "Pipeline").with_text("status", "active"),
        ];
        let fixture = StoreFixture::new().with_records("tenders", tenders);
        let mut store = RecordStore::new(&fixture.backend, &TENDERS);
        let mut log = ActivityLog::new();
        let mut before = store.get(&RecordId::Seq(3)).unwrap();

        let result =
            request_status_change(&mut store, &RecordId::Seq(3), Some("active"), &mut log).unwrap();

        before.set("status", crate::model::FieldValue::text("active"));
        assert_eq!(result.affected, vec![before]);
        assert_eq!(result.messages[0].content, "Tender 3 is now Active");
        assert_eq!(
            log.recent(1)[0].kind,
            ActivityKind::StatusChanged("active".into())
        );
    }

    #[test]
    fn admin_status_change_is_refused() {
        let backend = MemBackend::seeded();
        let mut store = RecordStore::new(&backend, &USERS);

        let result = request_status_change(&mut store, &RecordId::Seq(1), None, &mut ActivityLog::new());
        assert!(matches!(
            result,
            Err(CouncilError::ProtectionViolation { ref notice, .. })
                if notice == "Cannot deactivate the main admin account"
        ));
    }

    #[test]
    fn actions_follow_status_and_protection() {
        let backend = MemBackend::seeded();

        let tenders = RecordStore::new(&backend, &TENDERS).list().unwrap();
        let active = available_actions(&TENDERS, &tenders[0]);
        assert_eq!(
            active,
            vec![
                Action::Edit,
                Action::ChangeStatus {
                    target: "closed".into(),
                    label: "Close".into()
                },
                Action::Delete,
            ]
        );
        let draft = available_actions(&TENDERS, &tenders[3]);
        assert_eq!(draft[1].label(), "Activate");

        let users = RecordStore::new(&backend, &USERS).list().unwrap();
        assert_eq!(available_actions(&USERS, &users[0]), vec![Action::Edit]);
        assert_eq!(available_actions(&USERS, &users[1])[1].label(), "Deactivate");

        let pages = RecordStore::new(&backend, &PAGES).list().unwrap();
        assert_eq!(available_actions(&PAGES, &pages[0]), vec![Action::Edit]);
    }

    #[test]
    fn news_toggle_is_labelled_by_target() {
        let backend = MemBackend::seeded();
        let news = RecordStore::new(&backend, &NEWS).list().unwrap();
        assert_eq!(available_actions(&NEWS, &news[0])[1].label(), "Unpublish");
        assert_eq!(available_actions(&NEWS, &news[2])[1].label(), "Publish");
    }
}
