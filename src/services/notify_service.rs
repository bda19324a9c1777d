use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::Notification;

const MAX_NOTIFICATIONS: usize = 50;

/// Out-of-band delivery channel for issued OTP codes. The real system would
/// send email or SMS; here delivery is simulated on-device.
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    async fn deliver(&self, email: &str, code: &str) -> Result<()>;
}

/// In-memory notification list, newest first, capped at 50 entries.
pub struct NotificationCenter {
    notifications: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn add(&self, title: impl Into<String>, message: impl Into<String>) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            message: message.into(),
            timestamp: Utc::now(),
            read: false,
        };

        let mut list = self.notifications.lock().expect("notifications lock poisoned");
        list.insert(0, notification.clone());
        list.truncate(MAX_NOTIFICATIONS);
        notification
    }

    pub fn list(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notifications lock poisoned")
            .clone()
    }

    pub fn mark_read(&self, id: &str) {
        let mut list = self.notifications.lock().expect("notifications lock poisoned");
        if let Some(n) = list.iter_mut().find(|n| n.id == id) {
            n.read = true;
        }
    }

    pub fn mark_all_read(&self) {
        let mut list = self.notifications.lock().expect("notifications lock poisoned");
        for n in list.iter_mut() {
            n.read = true;
        }
    }

    pub fn clear(&self, id: &str) {
        self.notifications
            .lock()
            .expect("notifications lock poisoned")
            .retain(|n| n.id != id);
    }

    pub fn clear_all(&self) {
        self.notifications
            .lock()
            .expect("notifications lock poisoned")
            .clear();
    }

    pub fn unread_count(&self) -> usize {
        self.notifications
            .lock()
            .expect("notifications lock poisoned")
            .iter()
            .filter(|n| !n.read)
            .count()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpNotifier for NotificationCenter {
    async fn deliver(&self, email: &str, code: &str) -> Result<()> {
        tracing::info!("Mock OTP for {}: {}", email, code);
        self.add(
            "OTP Sent (Mock)",
            format!("For testing, your OTP for {} is: {}", email, code),
        );
        Ok(())
    }
}
