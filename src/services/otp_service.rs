use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::OtpChallenge;

/// Time source for the ledger, injected so expiry can be unit tested with a
/// simulated clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Process-wide mapping from email to the active OTP challenge.
///
/// At most one challenge per email; issuing replaces any prior unconsumed
/// challenge. Nothing here is persisted — challenges do not survive a process
/// restart, which is the intended simulation boundary.
pub struct OtpLedger {
    challenges: Mutex<HashMap<String, OtpChallenge>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl OtpLedger {
    pub fn new(clock: Arc<dyn Clock>, ttl_secs: u64) -> Self {
        Self {
            challenges: Mutex::new(HashMap::new()),
            clock,
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    // Generate 6-digit OTP, uniform over [100000, 999999].
    pub fn generate_otp() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(100_000..=999_999).to_string()
    }

    /// Issue a fresh challenge for this email, replacing any existing one,
    /// and return the code. Delivery is the caller's concern.
    pub fn issue(&self, email: &str, user_id: &str) -> String {
        let code = Self::generate_otp();
        let challenge = OtpChallenge {
            code: code.clone(),
            issued_at: self.clock.now(),
            user_id: user_id.to_string(),
        };
        self.challenges
            .lock()
            .expect("otp ledger lock poisoned")
            .insert(email.to_string(), challenge);
        code
    }

    /// The stored challenge, if any, unchanged. No expiry check here so the
    /// workflow can tell "found but expired" apart from "not found".
    pub fn peek(&self, email: &str) -> Option<OtpChallenge> {
        self.challenges
            .lock()
            .expect("otp ledger lock poisoned")
            .get(email)
            .cloned()
    }

    /// Remove the challenge unconditionally; no-op when absent.
    pub fn invalidate(&self, email: &str) {
        self.challenges
            .lock()
            .expect("otp ledger lock poisoned")
            .remove(email);
    }

    /// Whether a challenge is older than the configured lifetime.
    pub fn is_expired(&self, challenge: &OtpChallenge) -> bool {
        self.clock.now() - challenge.issued_at > self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ManualClock;

    fn ledger_with_clock() -> (OtpLedger, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (OtpLedger::new(clock.clone(), 300), clock)
    }

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..200 {
            let code = OtpLedger::generate_otp();
            assert_eq!(code.len(), 6);
            let n: u32 = code.parse().expect("numeric code");
            assert!((100_000..=999_999).contains(&n));
        }
    }

    #[test]
    fn peek_is_side_effect_free() {
        let (ledger, _clock) = ledger_with_clock();
        assert!(ledger.peek("a@x.com").is_none());

        let code = ledger.issue("a@x.com", "u1");
        let first = ledger.peek("a@x.com").expect("challenge stored");
        let second = ledger.peek("a@x.com").expect("still stored");
        assert_eq!(first.code, code);
        assert_eq!(second.code, code);
        assert_eq!(first.user_id, "u1");
    }

    #[test]
    fn issue_replaces_prior_challenge() {
        let (ledger, clock) = ledger_with_clock();
        let first = ledger.issue("a@x.com", "u1");
        clock.advance(Duration::seconds(10));
        let second = ledger.issue("a@x.com", "u1");

        let stored = ledger.peek("a@x.com").expect("challenge stored");
        assert_eq!(stored.code, second);
        // Re-issue also refreshes the timestamp.
        assert_eq!(stored.issued_at, clock.now());
        // Codes can collide by chance, so only assert when they differ.
        if first != second {
            assert_ne!(stored.code, first);
        }
    }

    #[test]
    fn invalidate_is_unconditional() {
        let (ledger, _clock) = ledger_with_clock();
        ledger.invalidate("missing@x.com"); // no-op

        ledger.issue("a@x.com", "u1");
        ledger.invalidate("a@x.com");
        assert!(ledger.peek("a@x.com").is_none());
    }

    #[test]
    fn expiry_is_strictly_after_ttl() {
        let (ledger, clock) = ledger_with_clock();
        ledger.issue("a@x.com", "u1");
        let challenge = ledger.peek("a@x.com").expect("challenge stored");

        clock.advance(Duration::seconds(300));
        assert!(!ledger.is_expired(&challenge));

        clock.advance(Duration::seconds(1));
        assert!(ledger.is_expired(&challenge));
    }
}
