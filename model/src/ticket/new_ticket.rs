use super::Ticket;
use serde::{Deserialize, Serialize};

/// Client supplied fields of a ticket. The identifier and timestamps are
/// always assigned by the store, so any `id` in the payload is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub site: String,
    pub category: String,
    pub assigned_to: String,
    pub created_by: String,
    pub priority: i64,
    pub status: String,
}

impl From<&Ticket> for NewTicket {
    fn from(ticket: &Ticket) -> Self {
        NewTicket {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            site: ticket.site.clone(),
            category: ticket.category.clone(),
            assigned_to: ticket.assigned_to.clone(),
            created_by: ticket.created_by.clone(),
            priority: ticket.priority,
            status: ticket.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let ticket: NewTicket = serde_json::from_str(r#"{"title":"VPN down"}"#).unwrap();

        assert_eq!(ticket.title, "VPN down");
        assert_eq!(ticket.priority, 0);
        assert!(ticket.status.is_empty());
    }

    #[test]
    fn test_id_is_ignored() {
        let ticket: NewTicket =
            serde_json::from_str(r#"{"id":"abc","assignedTo":"kim","priority":3}"#).unwrap();

        assert_eq!(ticket.assigned_to, "kim");
        assert_eq!(ticket.priority, 3);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(serde_json::from_str::<NewTicket>(r#"{"priority":"high"}"#).is_err());
        assert!(serde_json::from_str::<NewTicket>(r#"{"priority":1.5}"#).is_err());
    }
}
