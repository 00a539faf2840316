use crate::mapper::{self, decode_ticket, new_ticket_document};
use crate::patch::build_patch;
use crate::{DocumentCollection, Error, Result};

use bson::oid::ObjectId;
use bson::{doc, Bson, DateTime, Document};
use model::{NewTicket, Ticket, TicketId};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// CRUD operations over a collection of ticket documents.
pub struct TicketStore<C: DocumentCollection> {
    collection: C,
}

impl<C: DocumentCollection> TicketStore<C> {
    pub fn new(collection: C) -> TicketStore<C> {
        TicketStore { collection }
    }

    pub async fn ping(&self) -> Result<()> {
        self.collection.ping().await
    }

    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<TicketId> {
        let document = new_ticket_document(ticket, DateTime::now());

        let id = match self.collection.insert_one(document).await? {
            Bson::ObjectId(id) => id,
            _ => return Error::InvalidInsertedId.into(),
        };

        debug!(ticket.id = %id, "created new ticket");

        Ok(TicketId::from(id.to_hex()))
    }

    /// An id that does not parse is reported as [`Error::TicketNotFound`].
    pub async fn find_ticket(&self, id: &str) -> Result<Ticket> {
        let object_id = parse_or_not_found(id)?;

        let document = match self.collection.find_one(doc! { "_id": object_id }).await? {
            Some(document) => document,
            None => {
                debug!(ticket.id = id, "ticket not found");
                return Error::TicketNotFound.into();
            }
        };

        let ticket = decode_ticket(document)?;
        debug!(ticket.id = id, "found ticket");

        Ok(ticket)
    }

    /// Returns every ticket when `query` is empty, otherwise those whose title
    /// or description contains `query`, ignoring case.
    pub async fn find_tickets(&self, query: &str) -> Result<Vec<Ticket>> {
        let documents = self.collection.find(search_filter(query)).await?;

        let tickets = documents
            .into_iter()
            .map(decode_ticket)
            .collect::<Result<Vec<_>>>()?;

        debug!(count = tickets.len(), query, "retrieved tickets");

        Ok(tickets)
    }

    pub async fn update_ticket(&self, id: &str, updates: &Map<String, Value>) -> Result<Ticket> {
        let object_id = parse_or_not_found(id)?;

        for (key, value) in updates {
            trace!(key = key.as_str(), %value, "update field");
        }

        let set = build_patch(updates, DateTime::now());

        // an empty $set is only possible for an empty patch, nothing to write
        if !set.is_empty() {
            let matched = self
                .collection
                .update_by_id(object_id, doc! { "$set": set })
                .await?;

            if matched == 0 {
                debug!(ticket.id = id, "update matched no ticket");
            }
        }

        let ticket = self.find_ticket(id).await?;
        debug!(ticket.id = id, updates = updates.len(), "ticket updated");

        Ok(ticket)
    }

    pub async fn delete_ticket(&self, id: &str) -> Result<()> {
        let object_id = parse_or_not_found(id)?;

        match self
            .collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await?
        {
            Some(_) => {
                debug!(ticket.id = id, "deleted ticket");
                Ok(())
            }
            None => {
                debug!(ticket.id = id, "ticket not found");
                Error::TicketNotFound.into()
            }
        }
    }
}

fn parse_or_not_found(id: &str) -> Result<ObjectId> {
    match mapper::parse_id(id) {
        Some(object_id) => Ok(object_id),
        None => {
            debug!(ticket.id = id, "id is not a valid object id");
            Error::TicketNotFound.into()
        }
    }
}

/// Filter matching `query` as a literal, case-insensitive substring of the
/// title or description. Empty queries match everything.
pub fn search_filter(query: &str) -> Document {
    if query.is_empty() {
        return Document::new();
    }

    let pattern = regex::escape(query);

    doc! {
        "$or": [
            { "title": { "$regex": pattern.as_str(), "$options": "i" } },
            { "description": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}
