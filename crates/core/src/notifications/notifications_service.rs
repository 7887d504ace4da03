use std::sync::Arc;

use chrono::Duration;
use log::debug;

use super::notifications_model::{Notification, NotificationKind};
use super::notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::errors::{Error, Result};
use crate::utils::{new_id, now_naive};

/// Service for emitting and reading notifications.
pub struct NotificationService {
    repository: Arc<dyn NotificationRepositoryTrait>,
}

impl NotificationService {
    pub fn new(repository: Arc<dyn NotificationRepositoryTrait>) -> Self {
        Self { repository }
    }
}

impl NotificationServiceTrait for NotificationService {
    fn create_notification(
        &self,
        user_id: &str,
        title: &str,
        message: &str,
        kind: NotificationKind,
    ) -> Result<Notification> {
        if user_id.trim().is_empty() {
            return Err(Error::invalid("User ID is required"));
        }
        if title.trim().is_empty() || message.trim().is_empty() {
            return Err(Error::invalid("Notification title and message are required"));
        }
        debug!("Notifying user {}: {}", user_id, title);
        self.repository.create(Notification {
            id: new_id(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            read: false,
            created_at: now_naive(),
            read_at: None,
        })
    }

    fn get_user_notifications(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Notification>> {
        self.repository
            .find_by_user_id(user_id, Some(limit.unwrap_or(DEFAULT_LIST_LIMIT)))
    }

    fn get_unread_notifications(&self, user_id: &str) -> Result<Vec<Notification>> {
        self.repository.find_unread_by_user_id(user_id)
    }

    fn get_unread_count(&self, user_id: &str) -> Result<usize> {
        Ok(self.repository.find_unread_by_user_id(user_id)?.len())
    }

    fn mark_as_read(&self, notification_id: &str, user_id: &str) -> Result<Notification> {
        let notification = self.repository.get_by_id(notification_id)?;
        // Another user's notification is reported as missing.
        if notification.user_id != user_id {
            return Err(Error::not_found("Notification", notification_id));
        }
        if !notification.is_unread() {
            return Ok(notification);
        }
        self.repository.mark_as_read(notification_id, now_naive())
    }

    fn mark_all_as_read(&self, user_id: &str) -> Result<usize> {
        self.repository.mark_all_as_read(user_id, now_naive())
    }

    fn purge_read_notifications(&self, user_id: &str, days: i64) -> Result<usize> {
        if days < 0 {
            return Err(Error::invalid(format!(
                "Retention days cannot be negative, got {}",
                days
            )));
        }
        let cutoff = Duration::try_days(days)
            .and_then(|age| now_naive().checked_sub_signed(age))
            .ok_or_else(|| Error::invalid(format!("Retention of {} days is out of range", days)))?;
        self.repository.delete_read_before(user_id, cutoff)
    }
}
