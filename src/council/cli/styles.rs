use console::Style;
use once_cell::sync::Lazy;

/// Styles for status badges, keyed by status value.
pub static STATUS_STYLES: Lazy<Vec<(&'static str, Style)>> = Lazy::new(|| {
    vec![
        ("published", Style::new().green()),
        ("active", Style::new().green()),
        ("draft", Style::new().yellow()),
        ("closed", Style::new().red()),
        ("inactive", Style::new().red()),
    ]
});

pub static ID_STYLE: Lazy<Style> = Lazy::new(|| Style::new().yellow());
pub static TITLE_STYLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static TIME_STYLE: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());
pub static SELECTED_STYLE: Lazy<Style> = Lazy::new(|| Style::new().cyan().bold().underlined());

pub fn status_style(value: &str) -> Style {
    STATUS_STYLES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, s)| s.clone())
        .unwrap_or_else(Style::new)
}
