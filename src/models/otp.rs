use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An issued OTP challenge, keyed by email in the ledger. At most one live
/// challenge exists per email; a new `issue` silently replaces the old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpChallenge {
    pub code: String,
    pub issued_at: DateTime<Utc>,
    /// The target user, resolved once at issuance and not re-resolved later.
    pub user_id: String,
}
