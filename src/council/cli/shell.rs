//! `council shell`: a menu-driven admin session.
//!
//! Everything done here goes through the same [`AdminApi`] session, so the
//! dashboard at the end reflects the changes made along the way.

use super::prompt::DialoguerPrompter;
use super::render::{print_dashboard, print_messages, print_record, print_screen, print_settings_section};
use council::api::AdminApi;
use council::catalog;
use council::dashboard::ActivityLog;
use council::editor::dispatch::Action;
use council::editor::filter::Selection;
use council::editor::{CmdResult, CollectionEditor};
use council::error::{CouncilError, Result};
use council::model::{FieldValue, RecordId};
use council::schema::{CollectionSchema, FieldKind};
use council::settings::TABS;
use council::store::StorageBackend;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

fn ui<T>(result: std::result::Result<T, dialoguer::Error>) -> Result<T> {
    result.map_err(|e| match e {
        dialoguer::Error::IO(io) => CouncilError::Io(io),
    })
}

fn choose(theme: &ColorfulTheme, prompt: &str, items: &[String]) -> Result<usize> {
    ui(Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact())
}

pub fn run<B: StorageBackend>(api: &mut AdminApi<B>) -> Result<()> {
    let operator = api.auth().require()?.to_string();
    let mut prompter = DialoguerPrompter::new();
    let theme = ColorfulTheme::default();
    println!("Signed in as {}.", operator);

    loop {
        let mut items: Vec<String> = catalog::ALL.iter().map(|s| s.label.to_string()).collect();
        items.extend(["Dashboard", "Settings", "Quit"].map(String::from));

        let picked = choose(&theme, "Admin panel", &items)?;
        match catalog::ALL.get(picked) {
            Some(schema) => {
                let (mut screen, activity) = api.screen_mut(schema.name)?;
                collection_menu(&theme, &mut prompter, &mut screen, activity, schema)?;
            }
            None => match items[picked].as_str() {
                "Dashboard" => print_dashboard(&api.dashboard(10)?),
                "Settings" => settings_menu(&theme, api)?,
                _ => return Ok(()),
            },
        }
    }
}

fn collection_menu<B: StorageBackend>(
    theme: &ColorfulTheme,
    prompter: &mut DialoguerPrompter,
    screen: &mut CollectionEditor<B>,
    activity: &mut ActivityLog,
    schema: &CollectionSchema,
) -> Result<()> {
    loop {
        let view = screen.view()?;
        println!();
        print_screen(&view, schema);
        println!();

        let mut items = Vec::new();
        if view.options.len() > 1 {
            items.push("Filter".to_string());
        }
        if view.can_create {
            items.push(format!("Add {}", schema.noun));
        }
        if !view.rows.is_empty() {
            items.push(format!("Open {}", schema.noun));
        }
        items.push("Back".to_string());

        let picked = choose(theme, schema.label, &items)?;
        let item = items[picked].as_str();
        if item == "Filter" {
            let labels: Vec<String> = view
                .options
                .iter()
                .map(|o| format!("{} ({})", o.label, o.count))
                .collect();
            let choice = choose(theme, "Show", &labels)?;
            let selection: Selection = view.options[choice].value.parse().unwrap_or_default();
            screen.set_filter(selection);
        } else if item.starts_with("Add") {
            screen.open_create()?;
            run_form(theme, screen, activity, schema)?;
        } else if item.starts_with("Open") {
            let titles: Vec<String> = view
                .rows
                .iter()
                .map(|r| format!("{}. {}", r.record.id, r.title))
                .collect();
            let choice = choose(theme, "Which one", &titles)?;
            record_menu(theme, prompter, screen, activity, schema, &view.rows[choice].record.id)?;
        } else {
            return Ok(());
        }
    }
}

fn record_menu<B: StorageBackend>(
    theme: &ColorfulTheme,
    prompter: &mut DialoguerPrompter,
    screen: &mut CollectionEditor<B>,
    activity: &mut ActivityLog,
    schema: &CollectionSchema,
    id: &RecordId,
) -> Result<()> {
    let row = screen.row(id)?;
    println!();
    print_record(&row, schema);

    let mut items: Vec<String> = row.actions.iter().map(|a| a.label().to_string()).collect();
    items.push("Back".to_string());
    let picked = choose(theme, "Action", &items)?;

    let outcome = match row.actions.get(picked) {
        Some(Action::Edit) => {
            screen.open_edit(id)?;
            return run_form(theme, screen, activity, schema);
        }
        Some(Action::Delete) => screen.delete(id, prompter, activity),
        Some(Action::ChangeStatus { target, .. }) => {
            screen.change_status(id, Some(target.as_str()), activity)
        }
        None => return Ok(()),
    };
    report(outcome)
}

/// Prompt for every draft field, then commit. Rejected fields are asked
/// again until the draft commits or the operator gives up.
fn run_form<B: StorageBackend>(
    theme: &ColorfulTheme,
    screen: &mut CollectionEditor<B>,
    activity: &mut ActivityLog,
    schema: &CollectionSchema,
) -> Result<()> {
    let mut pending: Vec<&str> = schema.fields.iter().map(|f| f.name).collect();

    loop {
        for name in &pending {
            let Some(field) = schema.field(name) else { continue };
            let Some(draft) = screen.form().draft() else { return Ok(()) };
            if !draft.values.contains_key(field.name) {
                continue;
            }
            let current = draft.get(field.name).map(FieldValue::to_string).unwrap_or_default();

            let value = match field.kind {
                FieldKind::Choice(choices) => {
                    let labels: Vec<String> = choices.iter().map(|c| c.label.to_string()).collect();
                    let start = choices.iter().position(|c| c.value == current).unwrap_or(0);
                    let picked = ui(Select::with_theme(theme)
                        .with_prompt(field.label)
                        .items(&labels)
                        .default(start)
                        .interact())?;
                    choices[picked].value.to_string()
                }
                _ => {
                    let mut prompt = field.label.to_string();
                    if let Some(left) = screen.form().remaining(field.name) {
                        prompt = format!("{} ({} characters left)", prompt, left);
                    }
                    ui(Input::<String>::with_theme(theme)
                        .with_prompt(prompt)
                        .with_initial_text(current)
                        .allow_empty(true)
                        .interact_text())?
                }
            };
            if let Err(e) = screen.update_field(field.name, &value) {
                println!("{}", e);
            }
        }

        match screen.commit(activity) {
            Ok(result) => {
                print_messages(&result.messages);
                return Ok(());
            }
            Err(CouncilError::Validation(err)) => {
                println!("{}", err);
                let retry = ui(dialoguer::Confirm::with_theme(theme)
                    .with_prompt("Fix the highlighted fields?")
                    .default(true)
                    .interact())?;
                if !retry {
                    screen.cancel();
                    return Ok(());
                }
                pending = schema
                    .fields
                    .iter()
                    .map(|f| f.name)
                    .filter(|n| err.has_issue(n))
                    .collect();
            }
            Err(other) => {
                screen.cancel();
                return Err(other);
            }
        }
    }
}

fn settings_menu<B: StorageBackend>(theme: &ColorfulTheme, api: &mut AdminApi<B>) -> Result<()> {
    let mut tabs: Vec<String> = TABS.iter().map(|(_, label)| label.to_string()).collect();
    tabs.push("Back".to_string());
    let picked = choose(theme, "Settings", &tabs)?;
    let Some((section, label)) = TABS.get(picked) else {
        return Ok(());
    };

    let pairs = api.settings()?.section(section)?;
    print_settings_section(label, &pairs);

    let mut fields: Vec<String> = pairs.iter().map(|(k, _)| k.clone()).collect();
    fields.push("Back".to_string());
    let picked = choose(theme, "Change", &fields)?;
    let Some((field, current)) = pairs.get(picked) else {
        return Ok(());
    };

    let value = ui(Input::<String>::with_theme(theme)
        .with_prompt(field.as_str())
        .with_initial_text(current.as_str())
        .interact_text())?;
    report(api.update_setting(section, field, &value))
}

/// Print an action's messages; recoverable failures are shown, not fatal.
fn report(outcome: Result<CmdResult>) -> Result<()> {
    match outcome {
        Ok(result) => {
            print_messages(&result.messages);
            Ok(())
        }
        Err(
            e @ (CouncilError::ProtectionViolation { .. }
            | CouncilError::InvalidTransition { .. }
            | CouncilError::Validation(_)
            | CouncilError::NotFound { .. }),
        ) => {
            println!("{}", e);
            Ok(())
        }
        Err(other) => Err(other),
    }
}
