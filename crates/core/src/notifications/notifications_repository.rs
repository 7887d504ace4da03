use std::sync::Arc;

use chrono::NaiveDateTime;

use super::notifications_model::Notification;
use super::notifications_traits::NotificationRepositoryTrait;
use crate::errors::Result;
use crate::ledger::LedgerStore;

/// In-memory notification repository.
pub struct NotificationRepository {
    store: Arc<LedgerStore>,
}

impl NotificationRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }
}

/// Sorts by creation time descending; ties keep reverse insertion order.
fn newest_first(notifications: &mut [Notification]) {
    notifications.reverse();
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

impl NotificationRepositoryTrait for NotificationRepository {
    fn create(&self, notification: Notification) -> Result<Notification> {
        self.store
            .execute(move |ledger| ledger.notifications.insert(notification))
    }

    fn get_by_id(&self, notification_id: &str) -> Result<Notification> {
        self.store
            .read(|ledger| ledger.notifications.require(notification_id).cloned())?
    }

    fn find_by_user_id(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<Notification>> {
        let mut notifications = self
            .store
            .read(|ledger| ledger.notifications.filter(|n| n.user_id == user_id))?;
        newest_first(&mut notifications);
        if let Some(limit) = limit {
            notifications.truncate(limit);
        }
        Ok(notifications)
    }

    fn find_unread_by_user_id(&self, user_id: &str) -> Result<Vec<Notification>> {
        let mut notifications = self.store.read(|ledger| {
            ledger
                .notifications
                .filter(|n| n.user_id == user_id && n.is_unread())
        })?;
        newest_first(&mut notifications);
        Ok(notifications)
    }

    fn mark_as_read(&self, notification_id: &str, at: NaiveDateTime) -> Result<Notification> {
        self.store.execute(|ledger| {
            let notification = ledger.notifications.require_mut(notification_id)?;
            notification.mark_as_read(at);
            Ok(notification.clone())
        })
    }

    fn mark_all_as_read(&self, user_id: &str, at: NaiveDateTime) -> Result<usize> {
        self.store.execute(|ledger| {
            Ok(ledger.notifications.update_where(
                |n| n.user_id == user_id && n.is_unread(),
                |n| n.mark_as_read(at),
            ))
        })
    }

    fn delete_read_before(&self, user_id: &str, cutoff: NaiveDateTime) -> Result<usize> {
        self.store.execute(|ledger| {
            let stale: Vec<String> = ledger
                .notifications
                .values()
                .filter(|n| n.user_id == user_id && n.read && n.created_at < cutoff)
                .map(|n| n.id.clone())
                .collect();
            for id in &stale {
                ledger.notifications.remove(id);
            }
            Ok(stale.len())
        })
    }
}
