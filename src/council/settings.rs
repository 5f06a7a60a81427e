//! Site-wide settings, edited tab by tab.
//!
//! Settings are one nested document. Fields are addressed as
//! `(section, field)`, e.g. `("social", "facebook")`, and edits stay pending
//! until [`SettingsEditor::save`].

use crate::dashboard::{Activity, ActivityKind, ActivityLog};
use crate::editor::{CmdMessage, CmdResult};
use crate::error::{CouncilError, Result, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// `(section, tab label)` in display order.
pub const TABS: &[(&str, &str)] = &[
    ("general", "General"),
    ("contact", "Contact Info"),
    ("social", "Social Media"),
    ("notifications", "Notifications"),
    ("appearance", "Appearance"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub site_name: String,
    pub site_tagline: String,
    pub site_description: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            site_name: "City Municipal Corporation".into(),
            site_tagline: "Serving Our Community with Excellence".into(),
            site_description: "Official website of the City Municipal Corporation providing civic services, news updates, and community information.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub working_hours: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            contact_email: "info@citymunicipal.gov".into(),
            contact_phone: "+1 (555) 123-4567".into(),
            address: "123 City Hall Street, Downtown City, State 12345".into(),
            working_hours: "Monday - Friday: 9:00 AM - 5:00 PM".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub twitter: String,
    pub youtube: String,
    pub instagram: String,
}

impl Default for SocialLinks {
    fn default() -> Self {
        Self {
            facebook: "https://facebook.com/citymunicipal".into(),
            twitter: "https://twitter.com/citymunicipal".into(),
            youtube: "https://youtube.com/citymunicipal".into(),
            instagram: "https://instagram.com/citymunicipal".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_alerts: bool,
    pub maintenance_mode: bool,
    pub news_auto_publish: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_alerts: false,
            maintenance_mode: false,
            news_auto_publish: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_url: String,
    pub favicon_url: String,
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            primary_color: "#3B82F6".into(),
            secondary_color: "#1E40AF".into(),
            logo_url: "/logo.png".into(),
            favicon_url: "/favicon.ico".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub general: GeneralSettings,
    pub contact: ContactSettings,
    pub social: SocialLinks,
    pub notifications: NotificationSettings,
    pub appearance: AppearanceSettings,
}

pub struct SettingsEditor {
    saved: SiteSettings,
    pending: SiteSettings,
}

impl SettingsEditor {
    pub fn new(settings: SiteSettings) -> Self {
        Self {
            saved: settings.clone(),
            pending: settings,
        }
    }

    pub fn tabs(&self) -> &'static [(&'static str, &'static str)] {
        TABS
    }

    /// The settings as last saved.
    pub fn saved(&self) -> &SiteSettings {
        &self.saved
    }

    /// The settings including unsaved edits.
    pub fn pending(&self) -> &SiteSettings {
        &self.pending
    }

    pub fn is_dirty(&self) -> bool {
        self.saved != self.pending
    }

    /// `(field, value)` pairs of one tab.
    pub fn section(&self, section: &str) -> Result<Vec<(String, String)>> {
        let doc = serde_json::to_value(&self.pending)?;
        let fields = doc
            .get(section)
            .and_then(Value::as_object)
            .ok_or_else(|| unknown_section(section))?;
        Ok(fields
            .iter()
            .map(|(name, value)| (name.clone(), display(value)))
            .collect())
    }

    pub fn get(&self, section: &str, field: &str) -> Result<String> {
        let doc = serde_json::to_value(&self.pending)?;
        let section_doc = doc.get(section).ok_or_else(|| unknown_section(section))?;
        section_doc
            .get(field)
            .map(display)
            .ok_or_else(|| unknown_field(section, field))
    }

    /// Stage a new value. Switches take `true`/`false` (or on/off, yes/no);
    /// colors must be `#RRGGBB`.
    pub fn set(&mut self, section: &str, field: &str, raw: &str) -> Result<()> {
        let mut doc = serde_json::to_value(&self.pending)?;
        let section_doc = doc
            .get_mut(section)
            .ok_or_else(|| unknown_section(section))?;
        let slot = section_doc
            .get_mut(field)
            .ok_or_else(|| unknown_field(section, field))?;

        if slot.is_boolean() {
            let on = parse_switch(raw)
                .ok_or_else(|| ValidationError::single(field, "must be true or false"))?;
            *slot = Value::Bool(on);
        } else if field.ends_with("_color") && !is_hex_color(raw) {
            return Err(ValidationError::single(field, "must be a color like #3B82F6").into());
        } else {
            *slot = Value::String(raw.to_string());
        }

        self.pending = serde_json::from_value(doc)?;
        Ok(())
    }

    /// Discard unsaved edits.
    pub fn reset(&mut self) {
        self.pending = self.saved.clone();
    }

    pub fn save(&mut self, activity: &mut ActivityLog) -> CmdResult {
        self.saved = self.pending.clone();
        info!("site settings saved");
        activity.record(Activity::new("settings", None, "", ActivityKind::SettingsSaved));

        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Settings saved successfully!"));
        result
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn is_hex_color(raw: &str) -> bool {
    raw.len() == 7
        && raw.starts_with('#')
        && raw[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn unknown_section(section: &str) -> CouncilError {
    let known: Vec<_> = TABS.iter().map(|(id, _)| *id).collect();
    ValidationError::single(
        "section",
        format!("unknown section '{}' (expected one of: {})", section, known.join(", ")),
    )
    .into()
}

fn unknown_field(section: &str, field: &str) -> CouncilError {
    ValidationError::single(field, format!("is not a {} setting", section)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_seeded_site() {
        let settings = SiteSettings::default();
        assert_eq!(settings.general.site_name, "City Municipal Corporation");
        assert!(settings.notifications.email_notifications);
        assert!(!settings.notifications.maintenance_mode);
        assert_eq!(settings.appearance.primary_color, "#3B82F6");
    }

    #[test]
    fn every_tab_is_a_section() {
        let editor = SettingsEditor::new(SiteSettings::default());
        for (id, _) in editor.tabs() {
            assert!(!editor.section(id).unwrap().is_empty(), "{}", id);
        }
    }

    #[test]
    fn set_stages_until_save() {
        let mut editor = SettingsEditor::new(SiteSettings::default());
        let mut log = ActivityLog::new();

        editor.set("social", "twitter", "https://x.com/citymunicipal").unwrap();
        assert!(editor.is_dirty());
        assert_eq!(editor.saved().social.twitter, "https://twitter.com/citymunicipal");

        let result = editor.save(&mut log);
        assert_eq!(result.messages[0].content, "Settings saved successfully!");
        assert_eq!(editor.saved().social.twitter, "https://x.com/citymunicipal");
        assert!(!editor.is_dirty());
        assert_eq!(log.recent(1)[0].kind, ActivityKind::SettingsSaved);
    }

    #[test]
    fn switches_parse_loosely() {
        let mut editor = SettingsEditor::new(SiteSettings::default());
        editor.set("notifications", "maintenance_mode", "on").unwrap();
        assert!(editor.pending().notifications.maintenance_mode);
        assert_eq!(editor.get("notifications", "maintenance_mode").unwrap(), "true");

        let bad = editor.set("notifications", "sms_alerts", "maybe");
        assert!(matches!(bad, Err(CouncilError::Validation(ref e)) if e.has_issue("sms_alerts")));
    }

    #[test]
    fn colors_must_be_hex() {
        let mut editor = SettingsEditor::new(SiteSettings::default());
        assert!(editor.set("appearance", "primary_color", "blue").is_err());
        editor.set("appearance", "primary_color", "#10B981").unwrap();
        assert_eq!(editor.pending().appearance.primary_color, "#10B981");
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut editor = SettingsEditor::new(SiteSettings::default());
        assert!(editor.get("billing", "plan").is_err());
        assert!(editor.set("general", "site_motto", "x").is_err());
    }

    #[test]
    fn reset_discards_pending_edits() {
        let mut editor = SettingsEditor::new(SiteSettings::default());
        editor.set("general", "site_name", "Thanesar Council").unwrap();
        editor.reset();
        assert_eq!(editor.get("general", "site_name").unwrap(), "City Municipal Corporation");
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let json = r#"{"general":{"site_name":"Thanesar"}}"#;
        let settings: SiteSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.general.site_name, "Thanesar");
        assert_eq!(settings.contact, ContactSettings::default());
    }
}
