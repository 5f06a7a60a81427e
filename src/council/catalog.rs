//! The content collections of the council admin panel.
//!
//! Each constant below is the complete descriptor for one admin screen.
//! Adding a collection means adding a descriptor here and its seed records in
//! [`crate::fixtures`].

use crate::error::{CouncilError, Result};
use crate::schema::{
    Choice, CollectionSchema, FieldKind, FieldSpec, Protection, StatusModel,
};

const PUBLISH_STATES: &[Choice] = &[
    Choice::new("published", "Published").with_verb("Publish"),
    Choice::new("draft", "Draft").with_verb("Unpublish"),
];

const ACTIVE_STATES: &[Choice] = &[
    Choice::new("active", "Active").with_verb("Activate"),
    Choice::new("inactive", "Inactive").with_verb("Deactivate"),
];

const TENDER_STATES: &[Choice] = &[
    Choice::new("active", "Active").with_verb("Activate"),
    Choice::new("closed", "Closed").with_verb("Close"),
    Choice::new("draft", "Draft"),
];

// No draft -> closed move.
const TENDER_MOVES: &[(&str, &str)] = &[
    ("active", "closed"),
    ("closed", "active"),
    ("draft", "active"),
];

const GALLERY_CATEGORIES: &[Choice] = &[
    Choice::new("projects", "Projects"),
    Choice::new("events", "Events"),
    Choice::new("meetings", "Meetings"),
    Choice::new("infrastructure", "Infrastructure"),
    Choice::new("community", "Community"),
];

const DEPARTMENTS: &[Choice] = &[
    Choice::new("PWD", "Public Works Department"),
    Choice::new("Health", "Health Department"),
    Choice::new("Education", "Education Department"),
    Choice::new("Water", "Water Supply Department"),
    Choice::new("Sanitation", "Sanitation Department"),
    Choice::new("IT", "IT Department"),
];

const FORM_CATEGORIES: &[Choice] = &[
    Choice::new("certificates", "Certificates"),
    Choice::new("licenses", "Licenses & Permits"),
    Choice::new("applications", "Applications"),
    Choice::new("tax", "Tax Forms"),
    Choice::new("property", "Property Related"),
    Choice::new("complaints", "Complaints"),
];

const ROLES: &[Choice] = &[
    Choice::new("admin", "Administrator"),
    Choice::new("user", "User"),
];

const COMPONENT_TYPES: &[Choice] = &[
    Choice::new("header", "Header"),
    Choice::new("footer", "Footer"),
    Choice::new("navbar", "Navigation Bar"),
    Choice::new("page", "Page"),
    Choice::new("section", "Section"),
];

pub const NEWS: CollectionSchema = CollectionSchema::new(
    "news",
    "News Management",
    "news item",
    &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("content", "Content", FieldKind::LongText).required(),
        FieldSpec::new("image", "Image URL", FieldKind::Url),
        FieldSpec::new("status", "Status", FieldKind::Choice(PUBLISH_STATES))
            .default_value("published"),
        FieldSpec::timestamp("date", "Date"),
    ],
)
.status(StatusModel::binary("status", &["published"]))
.filter_by("status");

pub const GALLERY: CollectionSchema = CollectionSchema::new(
    "gallery",
    "Gallery Management",
    "gallery item",
    &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::LongText).required(),
        FieldSpec::new("image_url", "Image URL", FieldKind::Url).required(),
        FieldSpec::new("category", "Category", FieldKind::Choice(GALLERY_CATEGORIES))
            .default_value("projects"),
        FieldSpec::timestamp("date", "Date"),
    ],
)
.filter_by("category");

pub const TENDERS: CollectionSchema = CollectionSchema::new(
    "tenders",
    "Tender Management",
    "tender",
    &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::LongText).required(),
        FieldSpec::new("last_date", "Last Date", FieldKind::Date).required(),
        FieldSpec::new("tender_value", "Tender Value", FieldKind::Text).required(),
        FieldSpec::new("department", "Department", FieldKind::Choice(DEPARTMENTS))
            .default_value("PWD"),
        FieldSpec::new("document_url", "Document", FieldKind::Url),
        FieldSpec::new("status", "Status", FieldKind::Choice(TENDER_STATES))
            .default_value("active"),
        FieldSpec::timestamp("publish_date", "Published"),
    ],
)
.status(StatusModel::with_transitions(
    "status",
    TENDER_MOVES,
    &["active"],
))
.filter_by("status");

pub const FORMS: CollectionSchema = CollectionSchema::new(
    "forms",
    "Forms Management",
    "form",
    &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("description", "Description", FieldKind::LongText).required(),
        FieldSpec::new("category", "Category", FieldKind::Choice(FORM_CATEGORIES))
            .default_value("certificates"),
        FieldSpec::new("file_url", "File", FieldKind::Text).required(),
        FieldSpec::new("file_size", "File Size", FieldKind::Text).required(),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATES))
            .default_value("active"),
        FieldSpec::counter("downloads", "Downloads"),
        FieldSpec::timestamp("upload_date", "Uploaded"),
    ],
)
.status(StatusModel::binary("status", &["active"]))
.filter_by("category");

pub const PAGES: CollectionSchema = CollectionSchema::new(
    "pages",
    "Page Content",
    "page",
    &[
        FieldSpec::new("title", "Title", FieldKind::Text).required(),
        FieldSpec::new("content", "Content", FieldKind::Text).required(),
        FieldSpec::timestamp("last_modified", "Last Modified"),
    ],
)
.keyed()
.edit_only();

pub const USERS: CollectionSchema = CollectionSchema::new(
    "users",
    "User Management",
    "user",
    &[
        FieldSpec::new("username", "Username", FieldKind::Text).required(),
        FieldSpec::new("password", "Password", FieldKind::Secret).required_on_create(),
        FieldSpec::new("email", "Email", FieldKind::Email).required(),
        FieldSpec::new("role", "Role", FieldKind::Choice(ROLES)).default_value("user"),
        FieldSpec::new("post_name", "Post", FieldKind::Text).required(),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATES))
            .default_value("active"),
        FieldSpec::created("created_date", "Created"),
    ],
)
.title_field("username")
.status(StatusModel::binary("status", &[]))
.filter_by("role")
.append()
.protection(Protection::Locked {
    ids: &["1"],
    delete_notice: "Cannot delete the main admin account",
    status_notice: "Cannot deactivate the main admin account",
});

pub const COMPONENTS: CollectionSchema = CollectionSchema::new(
    "components",
    "Website Components",
    "component",
    &[
        FieldSpec::new("id", "Key", FieldKind::Text).key().required(),
        FieldSpec::new("name", "Name", FieldKind::Text).required(),
        FieldSpec::new("type", "Type", FieldKind::Choice(COMPONENT_TYPES))
            .default_value("page"),
        FieldSpec::new("status", "Status", FieldKind::Choice(ACTIVE_STATES))
            .default_value("active"),
        FieldSpec::timestamp("last_modified", "Last Modified"),
    ],
)
.keyed()
.title_field("name")
.status(StatusModel::binary("status", &["active"]))
.filter_by("type")
.protection(Protection::Guarded {
    ids: &["header", "footer", "navbar"],
    warning: "Warning: Deleting core components may break the website. Are you sure?",
});

/// Every collection, in sidebar order.
pub const ALL: &[CollectionSchema] = &[NEWS, GALLERY, TENDERS, FORMS, PAGES, USERS, COMPONENTS];

pub fn names() -> impl Iterator<Item = &'static str> {
    ALL.iter().map(|s| s.name)
}

pub fn lookup(name: &str) -> Result<&'static CollectionSchema> {
    ALL.iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| CouncilError::UnknownCollection(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldRole, IdKind, InsertPosition};

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("Tenders").unwrap().name, "tenders");
        assert!(matches!(
            lookup("budgets"),
            Err(CouncilError::UnknownCollection(_))
        ));
    }

    #[test]
    fn every_status_field_is_a_choice_field() {
        for schema in ALL {
            if let Some(status) = schema.status {
                let field = schema.field(status.field).unwrap();
                assert!(!field.choices().is_empty(), "{}", schema.name);
                assert!(
                    field.choices().iter().any(|c| c.value == field.default),
                    "{} default status not among choices",
                    schema.name
                );
            }
        }
    }

    #[test]
    fn every_dimension_names_a_choice_field() {
        for schema in ALL {
            if let Some(dim) = schema.dimension {
                let field = schema.field(dim).unwrap();
                assert!(!field.choices().is_empty(), "{}", schema.name);
            }
        }
    }

    #[test]
    fn every_collection_has_a_timestamp() {
        for schema in ALL {
            assert!(schema.timestamp_field().is_some(), "{}", schema.name);
        }
    }

    #[test]
    fn keyed_collections_that_create_have_a_key_field() {
        for schema in ALL {
            if schema.id_kind == IdKind::Keyed && schema.can_create {
                let key = schema.key_field().unwrap();
                assert_eq!(key.role, FieldRole::Key);
            }
        }
    }

    #[test]
    fn users_append_and_everything_else_prepends() {
        for schema in ALL {
            let expected = if schema.name == "users" {
                InsertPosition::Append
            } else {
                InsertPosition::Prepend
            };
            assert_eq!(schema.insert_at, expected, "{}", schema.name);
        }
    }

    #[test]
    fn forms_keep_download_counters() {
        let derived: Vec<_> = FORMS.derived_fields().map(|f| f.name).collect();
        assert_eq!(derived, vec!["downloads"]);
    }
}
