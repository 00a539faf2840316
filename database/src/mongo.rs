use crate::{DocumentCollection, Result};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};
use tracing::debug;

pub struct MongoCollection {
    client: Client,
    database: String,
    collection: Collection<Document>,
}

impl MongoCollection {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<MongoCollection> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

        let client = Client::with_options(options)?;
        Ok(MongoCollection::new(client, database, collection))
    }

    pub fn new(client: Client, database: &str, collection: &str) -> MongoCollection {
        MongoCollection {
            collection: client.database(database).collection(collection),
            database: database.to_owned(),
            client,
        }
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 }, None)
            .await?;

        debug!(
            database = %self.database,
            collection = %self.collection.name(),
            "connected to MongoDB cluster"
        );

        Ok(())
    }

    async fn insert_one(&self, document: Document) -> Result<Bson> {
        let res = self.collection.insert_one(document, None).await?;
        Ok(res.inserted_id)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        Ok(self.collection.find_one(filter, None).await?)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        let cursor = self.collection.find(filter, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_by_id(&self, id: ObjectId, update: Document) -> Result<u64> {
        let res = self
            .collection
            .update_one(doc! { "_id": id }, update, None)
            .await?;

        Ok(res.matched_count)
    }

    async fn find_one_and_delete(&self, filter: Document) -> Result<Option<Document>> {
        Ok(self.collection.find_one_and_delete(filter, None).await?)
    }
}
