use chrono::{DateTime, Utc};
use serde::Serialize;

/// An in-app notification. The OTP delivery channel is simulated by pushing
/// the code here instead of sending email/SMS.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}
