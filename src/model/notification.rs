use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: u64,
    pub user_id: u64,
    pub message: String,
    pub is_read: bool,
    pub sent_date: NaiveDateTime,
}

/// Notification about to be written; always starts unread.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub user_id: u64,
    pub message: String,
    pub sent_date: NaiveDateTime,
}

impl NewNotification {
    pub fn new(user_id: u64, message: impl Into<String>, sent_date: NaiveDateTime) -> Self {
        Self {
            user_id,
            message: message.into(),
            sent_date,
        }
    }
}
