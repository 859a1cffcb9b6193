use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_decodes_rfc3339_date() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Launch",
            "description": "Product launch",
            "date": "2026-10-17T18:30:00+02:00"
        }))
        .unwrap();

        assert_eq!(event.id, 1);
        assert_eq!(event.title, "Launch");
        assert_eq!(
            event.date,
            Utc.with_ymd_and_hms(2026, 10, 17, 16, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_event_rejects_non_rfc3339_date() {
        let result = serde_json::from_value::<Event>(serde_json::json!({
            "id": 1,
            "title": "Launch",
            "description": "",
            "date": "2026-10-17"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_event_description_defaults_to_empty() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Standup",
            "date": "2026-10-17T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(event.description, "");
    }

    #[test]
    fn test_user_decodes() {
        let user: User =
            serde_json::from_value(serde_json::json!({ "id": 2, "email": "b@x.com" })).unwrap();
        assert_eq!(user, User { id: 2, email: "b@x.com".into() });
    }
}
