use crate::Result;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};

/// The subset of a document collection the ticket store relies on. A single
/// handle is shared by every in-flight request.
#[async_trait]
pub trait DocumentCollection: Send + Sync + 'static {
    async fn ping(&self) -> Result<()>;

    /// Returns the identifier the store assigned to the new document.
    async fn insert_one(&self, document: Document) -> Result<Bson>;
    async fn find_one(&self, filter: Document) -> Result<Option<Document>>;
    async fn find(&self, filter: Document) -> Result<Vec<Document>>;

    /// Returns the number of documents matched, which is 0 for a missing id.
    async fn update_by_id(&self, id: ObjectId, update: Document) -> Result<u64>;
    async fn find_one_and_delete(&self, filter: Document) -> Result<Option<Document>>;
}
