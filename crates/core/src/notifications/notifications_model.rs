//! Notification domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ledger::Entity;

/// Severity of a notification as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Domain model representing a notification addressed to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_at: Option<NaiveDateTime>,
}

impl Notification {
    /// Marks the notification as read. Already-read notifications keep their
    /// original `read_at`.
    pub fn mark_as_read(&mut self, at: NaiveDateTime) {
        if !self.read {
            self.read = true;
            self.read_at = Some(at);
        }
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }
}

impl Entity for Notification {
    const NAME: &'static str = "Notification";

    fn id(&self) -> &str {
        &self.id
    }
}
