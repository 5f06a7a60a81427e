//! Terminal output for the CLI: record lists, single records, the dashboard
//! and settings, plus JSON output for every command.

use super::styles::{status_style, ID_STYLE, SELECTED_STYLE, TIME_STYLE, TITLE_STYLE};
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use council::dashboard::Dashboard;
use council::editor::{CmdMessage, MessageLevel, Row, ScreenView};
use council::error::Result;
use council::model::FieldValue;
use council::schema::{CollectionSchema, FieldKind};
use serde::Serialize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 16;
const STATUS_WIDTH: usize = 11;
const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn line_width() -> usize {
    let (_, cols) = console::Term::stdout().size();
    (cols as usize).clamp(40, MAX_LINE_WIDTH)
}

pub(super) fn render_filter_bar(view: &ScreenView) -> String {
    view.options
        .iter()
        .map(|o| {
            let text = format!("{} ({})", o.label, o.count);
            if o.value == view.filter {
                SELECTED_STYLE.apply_to(text).to_string()
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub(super) fn print_screen(view: &ScreenView, schema: &CollectionSchema) {
    println!("{}", TITLE_STYLE.apply_to(view.label));
    if view.options.len() > 1 {
        println!("{}", render_filter_bar(view));
    }
    println!();

    if view.rows.is_empty() {
        println!("No {} found.", plural(schema.noun));
        return;
    }

    let width = line_width();
    for row in &view.rows {
        println!("{}", render_row_line(row, schema, width));
    }
}

/// One list line: id, title, status badge and relative date.
pub(super) fn render_row_line(row: &Row, schema: &CollectionSchema, width: usize) -> String {
    let id = format!("{:>w$}. ", row.record.id.to_string(), w = ID_WIDTH - 2);
    let id = truncate_to_width(&id, ID_WIDTH);

    let status = schema.status_of(&row.record).unwrap_or("");
    let time = schema
        .timestamp_field()
        .and_then(|f| row.record.get(f.name))
        .and_then(FieldValue::as_date)
        .map(format_date_ago)
        .unwrap_or_default();

    let fixed = ID_WIDTH + STATUS_WIDTH + TIME_WIDTH;
    let available = width.saturating_sub(fixed);
    let title = truncate_to_width(&row.title, available);
    let padding = available.saturating_sub(title.width());

    format!(
        "{}{}{}{}{}",
        ID_STYLE.apply_to(format!("{:<w$}", id, w = ID_WIDTH)),
        title,
        " ".repeat(padding),
        status_style(status).apply_to(format!("{:>w$}", status, w = STATUS_WIDTH)),
        TIME_STYLE.apply_to(format!("{:>w$}", time, w = TIME_WIDTH)),
    )
}

pub(super) fn print_record(row: &Row, schema: &CollectionSchema) {
    println!(
        "{} {}",
        ID_STYLE.apply_to(row.record.id.to_string()),
        TITLE_STYLE.apply_to(&row.title)
    );
    println!("--------------------------------");

    let label_width = schema.fields.iter().map(|f| f.label.width()).max().unwrap_or(0);
    for field in schema.fields {
        if field.kind == FieldKind::Secret {
            continue;
        }
        let value = match row.record.get(field.name) {
            Some(value) => value.to_string(),
            None if field.name == "id" => row.record.id.to_string(),
            None => continue,
        };
        let label = format!("{:<w$}", field.label, w = label_width);
        println!("{}  {}", label.dimmed(), value);
    }

    let visibility = if row.public { "shown on the public site" } else { "hidden from the public site" };
    println!();
    println!("{}", visibility.dimmed());
    let actions: Vec<_> = row.actions.iter().map(|a| a.label()).collect();
    println!("Actions: {}", actions.join(", "));
}

pub(super) fn print_dashboard(dash: &Dashboard) {
    println!("{}", TITLE_STYLE.apply_to("Dashboard"));
    println!();

    let label_width = dash.totals.iter().map(|t| t.label.width()).max().unwrap_or(0);
    for total in &dash.totals {
        println!(
            "  {:<w$}  {:>4} {}",
            total.label,
            total.total,
            format!("({} public)", total.public).dimmed(),
            w = label_width
        );
    }
    println!("  {:<w$}  {:>4}", "Form downloads", dash.downloads, w = label_width);

    println!();
    println!("{}", TITLE_STYLE.apply_to("Recent Activity"));
    if dash.recent.is_empty() {
        println!("{}", "No activity yet in this session.".dimmed());
    }
    let formatter = Formatter::new();
    for entry in &dash.recent {
        let ago = Utc::now()
            .signed_duration_since(entry.at)
            .to_std()
            .map(|d| formatter.convert(d))
            .unwrap_or_default();
        println!("  {}  {}", entry.describe(), TIME_STYLE.apply_to(ago));
    }
}

pub(super) fn print_settings_section(label: &str, pairs: &[(String, String)]) {
    println!("{}", TITLE_STYLE.apply_to(label));
    let width = pairs.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    for (field, value) in pairs {
        println!("  {}  {}", format!("{:<w$}", field, w = width).dimmed(), value);
    }
}

fn format_date_ago(date: NaiveDate) -> String {
    let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
        return date.to_string();
    };
    let duration = Utc::now().signed_duration_since(midnight.and_utc());
    match duration.to_std() {
        Ok(d) => Formatter::new().convert(d),
        Err(_) => date.to_string(),
    }
}

fn plural(noun: &str) -> String {
    format!("{}s", noun)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
