use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub mod bill {
    use super::*;

    /// Lifecycle status of a bill.
    ///
    /// Assigned and derived by the server; clients never send it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BillStatus {
        Pending,
        Paid,
        Overdue,
    }

    impl BillStatus {
        pub fn label(self) -> &'static str {
            match self {
                Self::Pending => "pending",
                Self::Paid => "paid",
                Self::Overdue => "overdue",
            }
        }
    }

    /// Spending category of a bill.
    ///
    /// The variant names are the exact wire strings the server stores.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum BillCategory {
        Utilities,
        Rent,
        Insurance,
        Entertainment,
        Transportation,
        Food,
        Other,
    }

    impl BillCategory {
        pub const ALL: [BillCategory; 7] = [
            Self::Utilities,
            Self::Rent,
            Self::Insurance,
            Self::Entertainment,
            Self::Transportation,
            Self::Food,
            Self::Other,
        ];

        pub fn label(self) -> &'static str {
            match self {
                Self::Utilities => "Utilities",
                Self::Rent => "Rent",
                Self::Insurance => "Insurance",
                Self::Entertainment => "Entertainment",
                Self::Transportation => "Transportation",
                Self::Food => "Food",
                Self::Other => "Other",
            }
        }
    }

    /// A bill as returned by the server.
    ///
    /// Timestamps are naive ISO-8601 (the server emits no timezone offset).
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct Bill {
        pub id: i64,
        pub title: String,
        pub description: Option<String>,
        pub amount: f64,
        pub due_date: NaiveDateTime,
        pub status: BillStatus,
        pub category: BillCategory,
        pub created_at: NaiveDateTime,
        pub user_id: i64,
    }

    /// Request body for creating or updating a bill.
    ///
    /// Only the client-editable fields; `id`, `status`, `created_at` and
    /// `user_id` are server-assigned and must not be sent.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct BillDraft {
        pub title: String,
        pub description: Option<String>,
        pub amount: f64,
        pub due_date: NaiveDate,
        pub category: BillCategory,
    }
}

pub mod user {
    use super::*;

    /// Request body for registering a new account.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub email: String,
        pub password: String,
        pub full_name: String,
    }

    /// Response body for a registered account.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct User {
        pub id: i64,
        pub email: String,
        pub full_name: String,
        pub is_active: bool,
        pub created_at: NaiveDateTime,
    }
}

pub mod auth {
    use super::*;

    /// Bearer token returned by the password login endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub access_token: String,
        pub token_type: String,
    }
}

#[cfg(test)]
mod tests {
    use super::bill::{Bill, BillCategory, BillStatus};

    #[test]
    fn status_wire_strings() {
        let json = serde_json::to_string(&BillStatus::Overdue).unwrap();
        assert_eq!(json, "\"overdue\"");
        let parsed: BillStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, BillStatus::Pending);
    }

    #[test]
    fn category_wire_strings() {
        for category in BillCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
        }
    }

    #[test]
    fn bill_decodes_from_server_shape() {
        let body = r#"{
            "id": 1,
            "title": "Rent",
            "description": "Monthly rent",
            "amount": 1200.0,
            "due_date": "2026-09-01T00:00:00",
            "status": "pending",
            "category": "Rent",
            "created_at": "2026-08-20T10:15:00",
            "user_id": 7
        }"#;
        let bill: Bill = serde_json::from_str(body).unwrap();
        assert_eq!(bill.id, 1);
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.category, BillCategory::Rent);
        assert_eq!(bill.due_date.date().to_string(), "2026-09-01");
    }
}
