use std::sync::Arc;

use crate::errors::{AuthError, IdentityError, Result};
use crate::models::OtpChallenge;
use crate::services::identity_service::IdentityStore;
use crate::services::notify_service::OtpNotifier;
use crate::services::otp_service::OtpLedger;

/// Orchestrates the send → verify → reset recovery flow over the OTP ledger
/// and the Identity Store. Every operation returns the user-facing success
/// message or an [`AuthError`] whose `Display` is the user-facing failure
/// message; nothing else escapes this boundary.
pub struct RecoveryService {
    identity: Arc<dyn IdentityStore>,
    ledger: Arc<OtpLedger>,
    notifier: Arc<dyn OtpNotifier>,
}

impl RecoveryService {
    pub fn new(
        identity: Arc<dyn IdentityStore>,
        ledger: Arc<OtpLedger>,
        notifier: Arc<dyn OtpNotifier>,
    ) -> Self {
        Self {
            identity,
            ledger,
            notifier,
        }
    }

    /// Issue an OTP for this email and deliver it out-of-band.
    pub async fn request_otp(&self, email: &str) -> Result<String> {
        if email.trim().is_empty() {
            return Err(AuthError::UserNotFound);
        }

        let users = self.identity.find_by_email(email).await.map_err(|e| {
            tracing::error!("Send OTP error: {}", e);
            AuthError::RecoveryUnavailable
        })?;

        let user = users.first().ok_or(AuthError::UserNotFound)?;

        let code = self.ledger.issue(email, &user.id);
        if let Err(e) = self.notifier.deliver(email, &code).await {
            tracing::error!("Failed to deliver OTP for {}: {}", email, e);
        }

        Ok("OTP has been sent to your email (simulated).".to_string())
    }

    /// Check a submitted code against the live challenge. A match does not
    /// consume the challenge; the same code stays valid for the reset call,
    /// which re-verifies on its own.
    pub async fn verify_otp(&self, email: &str, submitted_code: &str) -> Result<String> {
        self.check_challenge(email, submitted_code)?;
        Ok("OTP verified successfully.".to_string())
    }

    /// Re-validate email + code and, on match, update the password for the
    /// user captured at issuance time. The challenge is consumed only after
    /// the remote update succeeds, so a failed reset stays retryable.
    pub async fn reset_password(
        &self,
        email: &str,
        submitted_code: &str,
        new_password: &str,
    ) -> Result<String> {
        let challenge = self.check_challenge(email, submitted_code)?;

        match self
            .identity
            .update_password(&challenge.user_id, new_password)
            .await
        {
            Ok(()) => {
                self.ledger.invalidate(email);
                Ok("Password has been reset successfully.".to_string())
            }
            Err(IdentityError::Status { status, message }) => {
                tracing::error!("Password reset rejected ({}): {:?}", status, message);
                Err(AuthError::ResetFailed(message))
            }
            Err(e) => {
                tracing::error!("Reset password error: {}", e);
                Err(AuthError::ResetFailed(None))
            }
        }
    }

    // Shared validation for verify and reset. Expiry detection deletes the
    // challenge; a mismatch leaves it in place so the caller may retry.
    fn check_challenge(&self, email: &str, submitted_code: &str) -> Result<OtpChallenge> {
        let challenge = self.ledger.peek(email).ok_or(AuthError::ChallengeMissing)?;

        // Should not occur given the ledger's issue contract.
        if challenge.code.is_empty() || challenge.user_id.is_empty() {
            tracing::error!("Malformed challenge record for {}", email);
            return Err(AuthError::InternalState);
        }

        if self.ledger.is_expired(&challenge) {
            self.ledger.invalidate(email);
            return Err(AuthError::ChallengeExpired);
        }

        if challenge.code != submitted_code.trim() {
            return Err(AuthError::ChallengeMismatch);
        }

        Ok(challenge)
    }
}
