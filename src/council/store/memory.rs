use super::backend::StorageBackend;
use crate::catalog;
use crate::error::{CouncilError, Result};
use crate::fixtures as seeds;
use crate::model::Record;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage for an admin session.
///
/// Uses `RefCell` for interior mutability since a session is single-threaded.
/// This keeps `StorageBackend` on `&self` so several screens can share one
/// backend by reference.
#[derive(Default)]
pub struct MemBackend {
    collections: RefCell<HashMap<String, Vec<Record>>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend holding the seed records of every catalog collection.
    pub fn seeded() -> Self {
        let backend = Self::new();
        {
            let mut collections = backend.collections.borrow_mut();
            for schema in catalog::ALL {
                collections.insert(schema.name.to_string(), seeds::seed(schema));
            }
        }
        backend
    }

    pub fn with_collection(self, name: &str, records: Vec<Record>) -> Self {
        self.collections
            .borrow_mut()
            .insert(name.to_string(), records);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn load(&self, collection: &str) -> Result<Vec<Record>> {
        let collections = self.collections.borrow();
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn save(&self, collection: &str, records: &[Record]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CouncilError::Store("Simulated write error".to_string()));
        }
        self.collections
            .borrow_mut()
            .insert(collection.to_string(), records.to_vec());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::FieldValue;

    /// Builds small hand-made collections for tests.
    pub struct StoreFixture {
        pub backend: MemBackend,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                backend: MemBackend::new(),
            }
        }

        /// `count` news items with ids `1..=count`, newest first.
        pub fn with_news(self, count: u64) -> Self {
            let records = (1..=count)
                .rev()
                .map(|i| {
                    Record::seq(i)
                        .with_text("title", &format!("News {}", i))
                        .with_text("content", &format!("Body {}", i))
                        .with_text("image", "")
                        .with_text("status", "published")
                })
                .collect();
            self.with_records("news", records)
        }

        pub fn with_form(self, id: u64, category: &str, downloads: i64) -> Self {
            let mut records = self.backend.load("forms").unwrap_or_default();
            records.push(
                Record::seq(id)
                    .with_text("title", &format!("Form {}", id))
                    .with_text("description", "A form")
                    .with_text("category", category)
                    .with_text("file_url", "form.pdf")
                    .with_text("file_size", "100 KB")
                    .with_text("status", "active")
                    .with("downloads", FieldValue::Int(downloads)),
            );
            self.with_records("forms", records)
        }

        pub fn with_records(mut self, name: &str, records: Vec<Record>) -> Self {
            self.backend = self.backend.with_collection(name, records);
            self
        }
    }
}
