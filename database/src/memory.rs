use crate::{DocumentCollection, Error, Result};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use regex::RegexBuilder;
use tokio::sync::RwLock;

/// In-process collection, kept in insertion order. Understands the filters
/// and updates the ticket store emits and rejects anything else.
#[derive(Default)]
pub struct MemoryCollection {
    documents: RwLock<Vec<Document>>,
}

impl MemoryCollection {
    pub fn new() -> MemoryCollection {
        MemoryCollection::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentCollection for MemoryCollection {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_one(&self, document: Document) -> Result<Bson> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => Bson::ObjectId(ObjectId::new()),
        };

        let mut stored = doc! { "_id": id.clone() };
        for (key, value) in document {
            if key != "_id" {
                stored.insert(key, value);
            }
        }

        self.documents.write().await.push(stored);
        Ok(id)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>> {
        let documents = self.documents.read().await;

        for document in documents.iter() {
            if matches(document, &filter)? {
                return Ok(Some(document.clone()));
            }
        }

        Ok(None)
    }

    async fn find(&self, filter: Document) -> Result<Vec<Document>> {
        let documents = self.documents.read().await;

        let mut found = Vec::new();
        for document in documents.iter() {
            if matches(document, &filter)? {
                found.push(document.clone());
            }
        }

        Ok(found)
    }

    async fn update_by_id(&self, id: ObjectId, update: Document) -> Result<u64> {
        let fields = set_fields(&update)?;
        let mut documents = self.documents.write().await;

        match documents
            .iter_mut()
            .find(|document| document.get_object_id("_id").ok() == Some(id))
        {
            Some(document) => {
                for (key, value) in fields {
                    document.insert(key.clone(), value.clone());
                }

                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_one_and_delete(&self, filter: Document) -> Result<Option<Document>> {
        let mut documents = self.documents.write().await;

        let mut position = None;
        for (i, document) in documents.iter().enumerate() {
            if matches(document, &filter)? {
                position = Some(i);
                break;
            }
        }

        Ok(position.map(|i| documents.remove(i)))
    }
}

fn set_fields(update: &Document) -> Result<&Document> {
    let mut fields = None;

    for (op, arg) in update {
        match (op.as_str(), arg) {
            ("$set", Bson::Document(set)) => fields = Some(set),
            (op, _) => return Error::Unsupported(format!("update operator {}", op)).into(),
        }
    }

    fields.ok_or_else(|| Error::Unsupported("update without $set".to_owned()))
}

fn matches(document: &Document, filter: &Document) -> Result<bool> {
    for (key, condition) in filter {
        let matched = match key.as_str() {
            "$or" => matches_any(document, condition)?,
            op if op.starts_with('$') => {
                return Error::Unsupported(format!("filter operator {}", op)).into()
            }
            field => matches_field(document.get(field), condition)?,
        };

        if !matched {
            return Ok(false);
        }
    }

    Ok(true)
}

fn matches_any(document: &Document, condition: &Bson) -> Result<bool> {
    let clauses = match condition {
        Bson::Array(clauses) => clauses,
        _ => return Error::Unsupported("$or expects an array".to_owned()).into(),
    };

    for clause in clauses {
        match clause {
            Bson::Document(clause) => {
                if matches(document, clause)? {
                    return Ok(true);
                }
            }
            _ => return Error::Unsupported("$or clause must be a document".to_owned()).into(),
        }
    }

    Ok(false)
}

fn matches_field(value: Option<&Bson>, condition: &Bson) -> Result<bool> {
    match condition {
        Bson::Document(ops) if ops.keys().any(|k| k.starts_with('$')) => {
            matches_operators(value, ops)
        }
        expected => Ok(value == Some(expected)),
    }
}

fn matches_operators(value: Option<&Bson>, ops: &Document) -> Result<bool> {
    let mut pattern = None;
    let mut options = "";

    for (op, arg) in ops {
        match (op.as_str(), arg) {
            ("$regex", Bson::String(p)) => pattern = Some(p.as_str()),
            ("$options", Bson::String(o)) => options = o.as_str(),
            ("$eq", expected) => {
                if value != Some(expected) {
                    return Ok(false);
                }
            }
            (op, _) => return Error::Unsupported(format!("filter operator {}", op)).into(),
        }
    }

    match pattern {
        Some(pattern) => {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(options.contains('i'))
                .build()?;

            Ok(matches!(value, Some(Bson::String(s)) if regex.is_match(s)))
        }
        None if options.is_empty() => Ok(true),
        None => Error::Unsupported("$options without $regex".to_owned()).into(),
    }
}
