//! Seed records every admin session starts from.

use crate::model::{FieldValue, Record};
use crate::schema::CollectionSchema;

fn date(raw: &str) -> FieldValue {
    raw.parse()
        .map(FieldValue::Date)
        .unwrap_or_else(|_| FieldValue::text(raw))
}

fn image(query: &str, seq: &str, w: u32, h: u32) -> String {
    format!(
        "https://readdy.ai/api/search-image?query={}&width={}&height={}&seq={}&orientation=landscape",
        query, w, h, seq
    )
}

/// Seed records for the named collection, in display order.
pub fn seed(schema: &CollectionSchema) -> Vec<Record> {
    match schema.name {
        "news" => news(),
        "gallery" => gallery(),
        "tenders" => tenders(),
        "forms" => forms(),
        "pages" => pages(),
        "users" => users(),
        "components" => components(),
        _ => Vec::new(),
    }
}

fn news() -> Vec<Record> {
    vec![
        Record::seq(1)
            .with_text("title", "New Waste Management System Launched")
            .with_text("content", "Advanced waste collection system launched in Ward 5 with door-to-door service for better cleanliness and hygiene.")
            .with_text("image", &image("waste%20management%20trucks%20collecting%20garbage", "news-1", 400, 250))
            .with_text("status", "published")
            .with("date", date("2024-01-15")),
        Record::seq(2)
            .with_text("title", "Water Supply Improvement Project")
            .with_text("content", "Enhanced water distribution network completed in Sectors 3 and 7, ensuring 24/7 water supply to residents.")
            .with_text("image", &image("water%20supply%20pipeline%20construction", "news-2", 400, 250))
            .with_text("status", "published")
            .with("date", date("2024-01-12")),
        Record::seq(3)
            .with_text("title", "Municipal Budget Meeting")
            .with_text("content", "Annual budget meeting scheduled for January 25, 2024. All ward representatives and citizens are invited to participate.")
            .with_text("image", "")
            .with_text("status", "draft")
            .with("date", date("2024-01-10")),
    ]
}

fn gallery() -> Vec<Record> {
    let item = |id: u64, title: &str, description: &str, query: &str, category: &str, day: &str| {
        Record::seq(id)
            .with_text("title", title)
            .with_text("description", description)
            .with_text("image_url", &image(query, &format!("gallery-{}", id), 400, 300))
            .with_text("category", category)
            .with("date", date(day))
    };
    vec![
        item(1, "Waste Management System Launch", "New waste collection vehicles deployed in Ward 5", "modern%20waste%20management%20trucks", "projects", "2024-01-15"),
        item(2, "Water Pipeline Installation", "New water supply lines being installed in residential areas", "municipal%20workers%20installing%20water%20pipeline", "infrastructure", "2024-01-12"),
        item(3, "Community Health Camp", "Free health checkup camp organized for senior citizens", "community%20health%20camp", "community", "2024-01-10"),
        item(4, "Municipal Council Meeting", "Monthly council meeting discussing development projects", "municipal%20council%20meeting", "meetings", "2024-01-08"),
        item(5, "Road Construction Progress", "Main Market Road reconstruction showing significant progress", "road%20construction%20work", "infrastructure", "2024-01-05"),
        item(6, "Annual Festival Celebration", "Municipal organized cultural festival at community center", "colorful%20municipal%20festival", "events", "2024-01-01"),
    ]
}

fn tenders() -> Vec<Record> {
    vec![
        Record::seq(1)
            .with_text("title", "Road Construction - Main Market Street")
            .with_text("description", "Construction and repair of Main Market Street including drainage system and street lights installation.")
            .with("publish_date", date("2024-01-15"))
            .with("last_date", date("2024-02-15"))
            .with_text("status", "active")
            .with_text("tender_value", "₹25,00,000")
            .with_text("department", "PWD")
            .with_text("document_url", "tender-doc-001.pdf"),
        Record::seq(2)
            .with_text("title", "Water Supply Pipeline Extension")
            .with_text("description", "Extension of water supply pipeline to Ward 8 and 9 covering 200 households.")
            .with("publish_date", date("2024-01-12"))
            .with("last_date", date("2024-02-12"))
            .with_text("status", "active")
            .with_text("tender_value", "₹18,50,000")
            .with_text("department", "Water")
            .with_text("document_url", "tender-doc-002.pdf"),
        Record::seq(3)
            .with_text("title", "Solid Waste Management System")
            .with_text("description", "Supply and installation of waste collection vehicles and equipment for municipal area.")
            .with("publish_date", date("2024-01-10"))
            .with("last_date", date("2024-01-25"))
            .with_text("status", "closed")
            .with_text("tender_value", "₹45,00,000")
            .with_text("department", "Sanitation")
            .with_text("document_url", ""),
        Record::seq(4)
            .with_text("title", "Municipal Building Renovation")
            .with_text("description", "Complete renovation of municipal council building including electrical and plumbing work.")
            .with("publish_date", date("2024-01-08"))
            .with("last_date", date("2024-02-08"))
            .with_text("status", "draft")
            .with_text("tender_value", "₹12,75,000")
            .with_text("department", "PWD")
            .with_text("document_url", ""),
    ]
}

fn forms() -> Vec<Record> {
    let form = |id: u64, title: &str, description: &str, category: &str, file: &str, size: &str, downloads: i64, day: &str| {
        Record::seq(id)
            .with_text("title", title)
            .with_text("description", description)
            .with_text("category", category)
            .with_text("file_url", file)
            .with_text("file_size", size)
            .with("downloads", FieldValue::Int(downloads))
            .with_text("status", "active")
            .with("upload_date", date(day))
    };
    vec![
        form(1, "Birth Certificate Application", "Form to apply for birth certificate from municipal records", "certificates", "birth-certificate-form.pdf", "245 KB", 156, "2024-01-15"),
        form(2, "Death Certificate Application", "Form to apply for death certificate from municipal records", "certificates", "death-certificate-form.pdf", "238 KB", 89, "2024-01-15"),
        form(3, "Shop License Application", "Application form for new shop/business license", "licenses", "shop-license-form.pdf", "312 KB", 234, "2024-01-12"),
        form(4, "Property Tax Assessment", "Form for property tax assessment and payment", "tax", "property-tax-form.pdf", "289 KB", 445, "2024-01-10"),
        form(5, "Water Connection Application", "Form to apply for new water connection", "applications", "water-connection-form.pdf", "267 KB", 178, "2024-01-08"),
        form(6, "Public Grievance Form", "Form to register public complaints and grievances", "complaints", "grievance-form.pdf", "198 KB", 67, "2024-01-05"),
    ]
}

fn pages() -> Vec<Record> {
    let page = |key: &str, title: &str, content: &str, day: &str| {
        Record::keyed(key)
            .with_text("title", title)
            .with_text("content", content)
            .with("last_modified", date(day))
    };
    vec![
        page("about", "About Us", "Municipal Council Thanesar is committed to serving the citizens with dedication and transparency. We work towards creating a cleaner, safer, and more prosperous community for all residents. Our council comprises elected representatives who work tirelessly to address civic issues and implement development projects.", "2024-01-15"),
        page("chairman", "Chairman's Desk", "Welcome to Municipal Council Thanesar. As the Chairman, I am committed to ensuring transparent governance and sustainable development for our city. Our focus remains on improving infrastructure, maintaining cleanliness, and providing quality services to all citizens. Together, we are building a better tomorrow for Thanesar.", "2024-01-12"),
        page("rti", "Right to Information (RTI)", "The Right to Information Act, 2005 empowers citizens to seek information from public authorities. Municipal Council Thanesar is committed to transparency and provides all necessary information as per RTI guidelines. Citizens can submit RTI applications during office hours. Processing time is 30 days for normal applications.", "2024-01-10"),
        page("contact", "Contact Information", "Municipal Council Office\nThanesar, Kurukshetra\nHaryana, India - 136118\n\nPhone: +91-1744-123456\nEmail: info@mcthanesar.gov.in\n\nOffice Hours:\nMonday - Friday: 9:00 AM - 5:00 PM\nSaturday: 9:00 AM - 1:00 PM\nSunday: Closed", "2024-01-08"),
    ]
}

fn users() -> Vec<Record> {
    vec![
        Record::seq(1)
            .with_text("username", "admin")
            .with_text("email", "admin@citymunicipal.gov")
            .with_text("role", "admin")
            .with_text("post_name", "System Administrator")
            .with_text("status", "active")
            .with("created_date", date("2024-01-15")),
        Record::seq(2)
            .with_text("username", "manager")
            .with_text("email", "manager@citymunicipal.gov")
            .with_text("role", "user")
            .with_text("post_name", "Municipal Manager")
            .with_text("status", "active")
            .with("created_date", date("2024-01-10")),
    ]
}

fn components() -> Vec<Record> {
    let component = |key: &str, name: &str, kind: &str, day: &str| {
        Record::keyed(key)
            .with_text("name", name)
            .with_text("type", kind)
            .with_text("status", "active")
            .with("last_modified", date(day))
    };
    vec![
        component("header", "Main Header", "header", "2024-01-15"),
        component("footer", "Main Footer", "footer", "2024-01-15"),
        component("navbar", "Navigation Bar", "navbar", "2024-01-14"),
        component("home", "Home Page", "page", "2024-01-13"),
        component("about", "About Us Page", "page", "2024-01-12"),
        component("contact", "Contact Page", "page", "2024-01-11"),
        component("news-section", "News Section", "section", "2024-01-10"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use std::collections::HashSet;

    #[test]
    fn every_collection_has_seed_records() {
        for schema in catalog::ALL {
            assert!(!seed(schema).is_empty(), "{}", schema.name);
        }
    }

    #[test]
    fn seed_ids_are_unique() {
        for schema in catalog::ALL {
            let records = seed(schema);
            let ids: HashSet<_> = records.iter().map(|r| r.id.clone()).collect();
            assert_eq!(ids.len(), records.len(), "{}", schema.name);
        }
    }

    #[test]
    fn seed_values_respect_choice_fields() {
        for schema in catalog::ALL {
            for record in seed(schema) {
                for field in schema.fields {
                    let choices = field.choices();
                    if choices.is_empty() {
                        continue;
                    }
                    let value = record.text(field.name);
                    assert!(
                        choices.iter().any(|c| c.value == value),
                        "{}.{} = {:?}",
                        schema.name,
                        field.name,
                        value
                    );
                }
            }
        }
    }

    #[test]
    fn seed_dates_parse() {
        let records = seed(&catalog::TENDERS);
        assert!(records[0].get("publish_date").unwrap().as_date().is_some());
    }
}
