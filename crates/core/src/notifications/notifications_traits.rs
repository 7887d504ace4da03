use chrono::NaiveDateTime;
use log::warn;

use super::notifications_model::{Notification, NotificationKind};
use crate::errors::Result;

/// Storage contract for notifications.
pub trait NotificationRepositoryTrait: Send + Sync {
    fn create(&self, notification: Notification) -> Result<Notification>;

    fn get_by_id(&self, notification_id: &str) -> Result<Notification>;

    /// Notifications for a user, newest first.
    fn find_by_user_id(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<Notification>>;

    fn find_unread_by_user_id(&self, user_id: &str) -> Result<Vec<Notification>>;

    fn mark_as_read(&self, notification_id: &str, at: NaiveDateTime) -> Result<Notification>;

    /// Returns the number of notifications that changed state.
    fn mark_all_as_read(&self, user_id: &str, at: NaiveDateTime) -> Result<usize>;

    /// Deletes read notifications created before `cutoff`.
    fn delete_read_before(&self, user_id: &str, cutoff: NaiveDateTime) -> Result<usize>;
}

/// Notification sink and query service.
///
/// Producers call [`NotificationServiceTrait::notify`], which never fails the
/// caller; delivery is best-effort in-memory storage.
pub trait NotificationServiceTrait: Send + Sync {
    fn create_notification(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
    ) -> Result<Notification>;

    /// Fire-and-forget variant of [`NotificationServiceTrait::create_notification`].
    fn notify(&self, user_id: &str, title: &str, message: &str, kind: NotificationKind) {
        if let Err(e) = self.create_notification(user_id, title, message, kind) {
            warn!("Dropping notification '{}' for user {}: {}", title, user_id, e);
        }
    }

    fn get_user_notifications(&self, user_id: &str, limit: Option<usize>)
        -> Result<Vec<Notification>>;

    fn get_unread_notifications(&self, user_id: &str) -> Result<Vec<Notification>>;

    fn get_unread_count(&self, user_id: &str) -> Result<usize>;

    /// Marks one notification as read after checking it belongs to `user_id`.
    fn mark_as_read(&self, notification_id: &str, user_id: &str) -> Result<Notification>;

    fn mark_all_as_read(&self, user_id: &str) -> Result<usize>;

    /// Removes read notifications older than `days`.
    fn purge_read_notifications(&self, user_id: &str, days: i64) -> Result<usize>;
}
