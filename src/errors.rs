// src/errors.rs
use thiserror::Error;

/// Operation-level error taxonomy. The `Display` string of every variant is
/// the exact message a UI shell should put in front of the user; operations
/// never leak transport details past this boundary.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email not registered.")]
    UserNotFound,

    #[error("OTP not found or may have expired. Please request again.")]
    ChallengeMissing,

    #[error("OTP has expired. Please request a new one.")]
    ChallengeExpired,

    #[error("Invalid OTP. Please try again.")]
    ChallengeMismatch,

    #[error("Internal error with OTP storage. Please try again.")]
    InternalState,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered.")]
    EmailTaken,

    #[error("Failed to send OTP. Please try again.")]
    RecoveryUnavailable,

    #[error("{}", .0.as_deref().unwrap_or("Failed to reset password on server."))]
    ResetFailed(Option<String>),

    #[error("Registration failed. Please try again.")]
    RegistrationFailed,

    #[error("An error occurred. Please try again.")]
    IdentityUnavailable,
}

impl AuthError {
    /// The user-facing message for this failure.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Transport-boundary errors from the Identity Store. These are converted
/// into [`AuthError`] variants at each operation boundary so callers only
/// ever see the taxonomy above.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("identity store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identity store returned status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
}

/// Durable local storage errors. The session manager treats these as
/// best-effort failures and logs them; they never reach the user.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AuthError>;
