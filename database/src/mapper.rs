//! Translation between [`Ticket`] and its stored document form.
//!
//! Documents carry their identifier as a native `ObjectId` under `_id`; every
//! record leaving this module carries the 24 character hex form instead.

use crate::Result;

use bson::oid::ObjectId;
use bson::{doc, Bson, DateTime, Document};
use model::{NewTicket, Ticket, TicketId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TicketDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    site: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    assigned_to: String,
    #[serde(default)]
    created_by: String,
    #[serde(default, deserialize_with = "deserialize_priority")]
    priority: i64,
    #[serde(default)]
    status: String,
    created_on: DateTime,
    updated_at: DateTime,
}

// documents written outside the api may store priority as a double
fn deserialize_priority<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::Int32(n) => Ok(n.into()),
        Bson::Int64(n) => Ok(n),
        Bson::Double(n) if n.is_finite() => Ok(n as i64),
        other => Err(D::Error::custom(format!(
            "invalid priority type {:?}",
            other.element_type()
        ))),
    }
}

/// Parses the external identifier form. `None` for anything that is not a
/// valid 24 character hex string.
pub fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

pub fn decode_ticket(document: Document) -> Result<Ticket> {
    let raw: TicketDocument = bson::from_document(document)?;

    Ok(Ticket {
        id: TicketId::from(raw.id.to_hex()),
        title: raw.title,
        description: raw.description,
        site: raw.site,
        category: raw.category,
        assigned_to: raw.assigned_to,
        created_by: raw.created_by,
        priority: raw.priority,
        status: raw.status,
        created_on: raw.created_on.to_chrono(),
        updated_at: raw.updated_at.to_chrono(),
    })
}

pub fn encode_ticket(ticket: &Ticket) -> Result<Document> {
    let raw = TicketDocument {
        id: ObjectId::parse_str(ticket.id.as_str())?,
        title: ticket.title.clone(),
        description: ticket.description.clone(),
        site: ticket.site.clone(),
        category: ticket.category.clone(),
        assigned_to: ticket.assigned_to.clone(),
        created_by: ticket.created_by.clone(),
        priority: ticket.priority,
        status: ticket.status.clone(),
        created_on: DateTime::from_chrono(ticket.created_on),
        updated_at: DateTime::from_chrono(ticket.updated_at),
    };

    Ok(bson::to_document(&raw)?)
}

/// Builds the document inserted for a new ticket. The store assigns `_id`.
pub fn new_ticket_document(ticket: &NewTicket, now: DateTime) -> Document {
    doc! {
        "title": ticket.title.as_str(),
        "description": ticket.description.as_str(),
        "site": ticket.site.as_str(),
        "category": ticket.category.as_str(),
        "assignedTo": ticket.assigned_to.as_str(),
        "createdBy": ticket.created_by.as_str(),
        "priority": ticket.priority,
        "status": ticket.status.as_str(),
        "createdOn": now,
        "updatedAt": now,
    }
}
