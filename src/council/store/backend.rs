use crate::error::Result;
use crate::model::Record;

/// Raw persistence for collections.
///
/// This trait handles *where* records live. [`super::RecordStore`] handles the
/// rules (id assignment, derived fields, protection) and calls `save` after
/// every mutation, so each store operation is one load-modify-save unit.
pub trait StorageBackend {
    /// Load a collection in display order. Unknown collections are empty.
    fn load(&self, collection: &str) -> Result<Vec<Record>>;

    /// Replace a collection's contents.
    fn save(&self, collection: &str, records: &[Record]) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn load(&self, collection: &str) -> Result<Vec<Record>> {
        (**self).load(collection)
    }

    fn save(&self, collection: &str, records: &[Record]) -> Result<()> {
        (**self).save(collection, records)
    }
}
