use crate::TicketId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An IT support ticket as stored and served by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub site: String,
    pub category: String,
    pub assigned_to: String,
    pub created_by: String,
    pub priority: i64,
    pub status: String,
    pub created_on: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_json_field_names() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let ticket = Ticket {
            id: TicketId::from("65f1c0ffee00000000000001".to_owned()),
            title: "Printer jam".to_owned(),
            description: "Second floor printer".to_owned(),
            site: "HQ".to_owned(),
            category: "hardware".to_owned(),
            assigned_to: "sam".to_owned(),
            created_by: "alex".to_owned(),
            priority: 2,
            status: "open".to_owned(),
            created_on: at,
            updated_at: at,
        };

        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "65f1c0ffee00000000000001",
                "title": "Printer jam",
                "description": "Second floor printer",
                "site": "HQ",
                "category": "hardware",
                "assignedTo": "sam",
                "createdBy": "alex",
                "priority": 2,
                "status": "open",
                "createdOn": "2024-05-01T09:30:00Z",
                "updatedAt": "2024-05-01T09:30:00Z"
            })
        );
    }
}
